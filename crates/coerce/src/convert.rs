//! Bridge between Rust field types and dynamic [`Value`]s.
//!
//! A field type implementing [`ConfigValue`] reports the [`Shape`] a raw
//! string should be coerced into and converts to and from the resulting
//! value. Enums implement it through [`config_enum!`](crate::config_enum).

use std::collections::{HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::path::PathBuf;

use indexmap::IndexSet;
use regex::Regex;

use crate::{CollectionKind, EnumShape, EnumValue, Shape, TypeDescriptor, Value};

/// A Rust type that a config attribute can be stored in.
pub trait ConfigValue: Sized {
	/// Whether the type can hold an absent value.
	///
	/// A parse that yields nothing is only stored into nullable types.
	const NULLABLE: bool = false;

	/// Target shape for coercion.
	fn shape() -> Shape;

	/// Generic arguments, for collection shapes.
	fn generics() -> Vec<Shape> {
		Vec::new()
	}

	/// Descriptor with this type's shape and generics and no overrides.
	fn descriptor() -> TypeDescriptor {
		TypeDescriptor::with_generics(Self::shape(), Self::generics())
	}

	fn to_value(&self) -> Value;

	/// Converts a coerced value back, or `None` when the variant does not fit.
	fn from_value(value: Value) -> Option<Self>;
}

/// Fieldless enum usable as a closed set of config constants.
///
/// Implemented by [`config_enum!`](crate::config_enum).
pub trait ConfigEnum: Copy + 'static {
	const SHAPE: EnumShape;

	fn ordinal(self) -> usize;

	fn from_ordinal(ordinal: usize) -> Option<Self>;
}

/// [`ConfigValue::to_value`] for a [`ConfigEnum`].
pub fn enum_to_value<E: ConfigEnum>(constant: E) -> Value {
	let ordinal = constant.ordinal();
	Value::Enum(EnumValue {
		ordinal,
		name: E::SHAPE.variant(ordinal).unwrap_or_default(),
	})
}

/// [`ConfigValue::from_value`] for a [`ConfigEnum`].
pub fn enum_from_value<E: ConfigEnum>(value: Value) -> Option<E> {
	match value {
		Value::Enum(constant) => E::from_ordinal(constant.ordinal),
		_ => None,
	}
}

macro_rules! impl_scalar {
	($read:ident: $($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl ConfigValue for $ty {
				fn shape() -> Shape {
					Shape::$variant
				}

				fn to_value(&self) -> Value {
					Value::$variant(impl_scalar!(@read $read self))
				}

				fn from_value(value: Value) -> Option<Self> {
					match value {
						Value::$variant(v) => Some(v),
						_ => None,
					}
				}
			}
		)*
	};
	(@read copy $this:ident) => {
		*$this
	};
	(@read clone $this:ident) => {
		$this.clone()
	};
}

impl_scalar!(copy:
	bool => Bool,
	i8 => I8,
	i16 => I16,
	i32 => I32,
	i64 => I64,
	u8 => U8,
	u16 => U16,
	u32 => U32,
	u64 => U64,
	f32 => F32,
	f64 => F64,
);

impl_scalar!(clone:
	String => String,
	PathBuf => Path,
	Regex => Pattern,
);

impl ConfigValue for usize {
	fn shape() -> Shape {
		Shape::U64
	}

	fn to_value(&self) -> Value {
		Value::U64(*self as u64)
	}

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::U64(v) => usize::try_from(v).ok(),
			_ => None,
		}
	}
}

impl ConfigValue for isize {
	fn shape() -> Shape {
		Shape::I64
	}

	fn to_value(&self) -> Value {
		Value::I64(*self as i64)
	}

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::I64(v) => isize::try_from(v).ok(),
			_ => None,
		}
	}
}

impl<T: ConfigValue> ConfigValue for Option<T> {
	const NULLABLE: bool = true;

	fn shape() -> Shape {
		Shape::optional(T::shape())
	}

	fn generics() -> Vec<Shape> {
		T::generics()
	}

	fn to_value(&self) -> Value {
		match self {
			Some(inner) => inner.to_value(),
			None => Value::Null,
		}
	}

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Null => Some(None),
			other => T::from_value(other).map(Some),
		}
	}
}

fn elements_from<T: ConfigValue, C: FromIterator<T>>(value: Value) -> Option<C> {
	value.into_elements()?.into_iter().map(T::from_value).collect()
}

impl<T: ConfigValue> ConfigValue for Vec<T> {
	fn shape() -> Shape {
		Shape::array(T::shape())
	}

	fn to_value(&self) -> Value {
		Value::Array(self.iter().map(ConfigValue::to_value).collect())
	}

	fn from_value(value: Value) -> Option<Self> {
		elements_from::<T, _>(value)
	}
}

impl<T: ConfigValue> ConfigValue for VecDeque<T> {
	fn shape() -> Shape {
		Shape::Collection(CollectionKind::Queue)
	}

	fn generics() -> Vec<Shape> {
		vec![T::shape()]
	}

	fn to_value(&self) -> Value {
		Value::Queue(self.iter().map(ConfigValue::to_value).collect())
	}

	fn from_value(value: Value) -> Option<Self> {
		elements_from::<T, _>(value)
	}
}

impl<T: ConfigValue + Hash + Eq> ConfigValue for IndexSet<T> {
	fn shape() -> Shape {
		Shape::Collection(CollectionKind::Set)
	}

	fn generics() -> Vec<Shape> {
		vec![T::shape()]
	}

	fn to_value(&self) -> Value {
		Value::Set(self.iter().map(ConfigValue::to_value).collect())
	}

	fn from_value(value: Value) -> Option<Self> {
		elements_from::<T, _>(value)
	}
}

impl<T, S> ConfigValue for HashSet<T, S>
where
	T: ConfigValue + Hash + Eq,
	S: BuildHasher + Default,
{
	fn shape() -> Shape {
		Shape::Collection(CollectionKind::Set)
	}

	fn generics() -> Vec<Shape> {
		vec![T::shape()]
	}

	fn to_value(&self) -> Value {
		Value::Set(self.iter().map(ConfigValue::to_value).collect())
	}

	fn from_value(value: Value) -> Option<Self> {
		elements_from::<T, _>(value)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::ParserRegistry;

	crate::config_enum! {
		enum Difficulty {
			Easy,
			Normal,
			Hard => "Nightmare",
		}
	}

	fn coerce<T: ConfigValue>(raw: &str) -> Option<T> {
		let value = ParserRegistry::global().parse(Some(raw), &T::descriptor(), None)?;
		T::from_value(value)
	}

	#[test]
	fn scalars_round_trip_through_values() {
		assert_eq!(coerce::<u16>("8_080"), Some(8080));
		assert_eq!(coerce::<bool>("on"), Some(true));
		assert_eq!(coerce::<usize>("42"), Some(42));
		assert_eq!(coerce::<isize>("-42"), Some(-42));
		assert_eq!(coerce::<PathBuf>("logs/app.log"), Some(PathBuf::from("logs/app.log")));
		assert_eq!(u16::from_value(Value::I32(1)), None);
	}

	#[test]
	fn option_is_nullable() {
		assert!(<Option<i32>>::NULLABLE);
		assert!(!<i32>::NULLABLE);
		assert_eq!(<Option<i32>>::from_value(Value::Null), Some(None));
		assert_eq!(None::<i32>.to_value(), Value::Null);
		assert_eq!(coerce::<Option<i32>>("7"), Some(Some(7)));
	}

	#[test]
	fn vec_of_options_keeps_holes() {
		assert_eq!(
			coerce::<Vec<Option<u8>>>("1;x;3"),
			Some(vec![Some(1), None, Some(3)])
		);
	}

	#[test]
	fn nested_vec_reads_a_matrix() {
		assert_eq!(
			coerce::<Vec<Vec<String>>>("a=1;b=2"),
			Some(vec![
				vec!["a".to_string(), "1".to_string()],
				vec!["b".to_string(), "2".to_string()],
			])
		);
	}

	#[test]
	fn collections_report_generics() {
		assert_eq!(<VecDeque<u8>>::generics(), vec![Shape::U8]);
		assert_eq!(<HashSet<String>>::shape(), Shape::Collection(CollectionKind::Set));
		let set = coerce::<IndexSet<String>>("b;a;b").unwrap();
		assert_eq!(set.into_iter().collect::<Vec<_>>(), ["b", "a"]);
		let queue = coerce::<VecDeque<i64>>("5;6").unwrap();
		assert_eq!(queue, VecDeque::from([5, 6]));
	}

	#[test]
	fn enums_use_display_names() {
		assert_eq!(Difficulty::SHAPE.variants, &["Easy", "Normal", "Nightmare"]);
		assert_eq!(coerce::<Difficulty>("nightmare"), Some(Difficulty::Hard));
		assert_eq!(coerce::<Difficulty>("1"), Some(Difficulty::Normal));
		assert_eq!(coerce::<Difficulty>("Hard"), None);
		assert_eq!(
			Difficulty::Hard.to_value(),
			Value::Enum(EnumValue {
				ordinal: 2,
				name: "Nightmare"
			})
		);
	}
}
