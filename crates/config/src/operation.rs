//! Named assignment operations and load hooks.

use crate::RawConfigTable;

type Nullary<T> = Box<dyn Fn(&mut T) -> anyhow::Result<()>>;
type WithValue<T> = Box<dyn Fn(&mut T, Option<&str>) -> anyhow::Result<()>>;
type WithKeyValue<T> = Box<dyn Fn(&mut T, &str, Option<&str>) -> anyhow::Result<()>>;
type WithContext<T> = Box<dyn Fn(&mut T, &str, Option<&str>, &RawConfigTable) -> anyhow::Result<()>>;

/// An operation an attribute can be assigned through, by call shape.
///
/// `value` is the attribute's raw string (or its default raw value), `key`
/// is the lookup key, and the context is the whole table of the current load.
pub enum Operation<T> {
	/// Takes no arguments.
	Nullary(Nullary<T>),
	/// Takes the raw value.
	Value(WithValue<T>),
	/// Takes the key and the raw value.
	KeyValue(WithKeyValue<T>),
	/// Takes the key, the raw value and the table being loaded.
	KeyValueContext(WithContext<T>),
}

impl<T> Operation<T> {
	pub fn nullary(f: impl Fn(&mut T) -> anyhow::Result<()> + 'static) -> Self {
		Self::Nullary(Box::new(f))
	}

	pub fn value(f: impl Fn(&mut T, Option<&str>) -> anyhow::Result<()> + 'static) -> Self {
		Self::Value(Box::new(f))
	}

	pub fn key_value(f: impl Fn(&mut T, &str, Option<&str>) -> anyhow::Result<()> + 'static) -> Self {
		Self::KeyValue(Box::new(f))
	}

	pub fn key_value_context(
		f: impl Fn(&mut T, &str, Option<&str>, &RawConfigTable) -> anyhow::Result<()> + 'static,
	) -> Self {
		Self::KeyValueContext(Box::new(f))
	}

	/// Number of arguments the operation receives.
	pub fn arity(&self) -> usize {
		match self {
			Self::Nullary(_) => 0,
			Self::Value(_) => 1,
			Self::KeyValue(_) => 2,
			Self::KeyValueContext(_) => 3,
		}
	}

	pub(crate) fn invoke(
		&self,
		target: &mut T,
		key: &str,
		value: Option<&str>,
		table: &RawConfigTable,
	) -> anyhow::Result<()> {
		match self {
			Self::Nullary(f) => f(target),
			Self::Value(f) => f(target, value),
			Self::KeyValue(f) => f(target, key, value),
			Self::KeyValueContext(f) => f(target, key, value, table),
		}
	}
}

impl<T> std::fmt::Debug for Operation<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Operation(arity {})", self.arity())
	}
}

/// Zero-argument callback run before or after the binding pass.
pub type Hook<T> = Box<dyn Fn(&mut T) -> anyhow::Result<()>>;
