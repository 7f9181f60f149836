//! Type descriptors handed to parsers.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use rustc_hash::FxHashMap;

use crate::Shape;

/// Typed name for an entry in a descriptor's attribute bag.
pub struct AttributeKey<V> {
	name: &'static str,
	_marker: PhantomData<fn() -> V>,
}

impl<V> AttributeKey<V> {
	/// Declares a key. Two keys with the same name address the same slot.
	pub const fn new(name: &'static str) -> Self {
		Self {
			name,
			_marker: PhantomData,
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}
}

impl<V> fmt::Debug for AttributeKey<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "AttributeKey({}:{})", self.name, std::any::type_name::<V>())
	}
}

/// Splits a composite raw value into elements (arrays, collections) or rows
/// (two-dimensional arrays).
pub const PRIMARY_DELIMITER: AttributeKey<Regex> = AttributeKey::new("primary_delimiter");

/// Splits each row of a two-dimensional array into columns.
pub const SECONDARY_DELIMITER: AttributeKey<Regex> = AttributeKey::new("secondary_delimiter");

pub(crate) static DEFAULT_PRIMARY: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(";").expect("static delimiter"));
pub(crate) static DEFAULT_SECONDARY: LazyLock<Regex> =
	LazyLock::new(|| Regex::new("=").expect("static delimiter"));

type AttributeBag = FxHashMap<&'static str, Arc<dyn Any + Send + Sync>>;

/// Resolved target shape plus generic arguments and per-call overrides.
#[derive(Clone)]
pub struct TypeDescriptor {
	shape: Shape,
	generics: Vec<Shape>,
	attributes: Arc<AttributeBag>,
}

impl TypeDescriptor {
	/// Creates a descriptor with no generic arguments and an empty bag.
	pub fn new(shape: Shape) -> Self {
		Self {
			shape,
			generics: Vec::new(),
			attributes: Arc::default(),
		}
	}

	/// Creates a descriptor with generic arguments.
	pub fn with_generics(shape: Shape, generics: impl IntoIterator<Item = Shape>) -> Self {
		Self {
			shape,
			generics: generics.into_iter().collect(),
			attributes: Arc::default(),
		}
	}

	/// Returns a descriptor for `shape` that shares this descriptor's
	/// attribute bag but carries no generic arguments.
	pub fn derive(&self, shape: Shape) -> Self {
		Self {
			shape,
			generics: Vec::new(),
			attributes: Arc::clone(&self.attributes),
		}
	}

	/// Sets an attribute.
	///
	/// The bag is shared with every descriptor derived from this one; setting
	/// an attribute after deriving copies the bag first.
	pub fn with_attribute<V: Any + Send + Sync>(mut self, key: &AttributeKey<V>, value: V) -> Self {
		Arc::make_mut(&mut self.attributes).insert(key.name, Arc::new(value));
		self
	}

	/// Sets an attribute if `value` is present.
	pub fn with_optional_attribute<V: Any + Send + Sync>(
		self,
		key: &AttributeKey<V>,
		value: Option<V>,
	) -> Self {
		match value {
			Some(value) => self.with_attribute(key, value),
			None => self,
		}
	}

	/// Reads an attribute.
	///
	/// A value stored under the same name with a different type reads as
	/// absent.
	pub fn attribute<V: Any + Send + Sync>(&self, key: &AttributeKey<V>) -> Option<&V> {
		self.attributes.get(key.name)?.downcast_ref::<V>()
	}

	pub fn shape(&self) -> &Shape {
		&self.shape
	}

	pub fn generics(&self) -> &[Shape] {
		&self.generics
	}

	/// Primary delimiter, or `;` when none was configured.
	pub fn primary_delimiter(&self) -> &Regex {
		self.attribute(&PRIMARY_DELIMITER)
			.unwrap_or(&*DEFAULT_PRIMARY)
	}

	/// Secondary delimiter, or `=` when none was configured.
	pub fn secondary_delimiter(&self) -> &Regex {
		self.attribute(&SECONDARY_DELIMITER)
			.unwrap_or(&*DEFAULT_SECONDARY)
	}
}

impl fmt::Debug for TypeDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut keys: Vec<_> = self.attributes.keys().collect();
		keys.sort();
		f.debug_struct("TypeDescriptor")
			.field("shape", &self.shape)
			.field("generics", &self.generics)
			.field("attributes", &keys)
			.finish()
	}
}
