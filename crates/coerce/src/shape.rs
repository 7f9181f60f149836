//! Target shapes.
//!
//! A [`Shape`] names what a raw string should become: a scalar, a closed set
//! of named constants, an array of some dimension, or a collection. Parsers
//! are looked up by shape in the [`ParserRegistry`](crate::ParserRegistry).

use std::fmt;

/// Ordered list of constants for an enum-like target.
///
/// The position of a name in `variants` is its ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumShape {
	/// Type name, used in diagnostics.
	pub name: &'static str,
	/// Display names of the constants, in declaration order.
	pub variants: &'static [&'static str],
}

impl EnumShape {
	/// Returns the display name at `ordinal`, if it exists.
	pub fn variant(&self, ordinal: usize) -> Option<&'static str> {
		self.variants.get(ordinal).copied()
	}

	/// Finds the first constant whose name matches `name` ignoring case.
	pub fn position_ignore_case(&self, name: &str) -> Option<usize> {
		let wanted = name.to_lowercase();
		self.variants
			.iter()
			.position(|variant| variant.to_lowercase() == wanted)
	}
}

/// Collection capability requested by a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
	/// The bare "collection" capability.
	Any,
	/// Insertion-ordered, duplicates allowed.
	List,
	/// Unique elements.
	Set,
	/// First-in first-out.
	Queue,
	/// A specific implementation by name (e.g. `"vec_deque"`).
	Concrete(&'static str),
}

/// Shape of a target value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
	Bool,
	I8,
	I16,
	I32,
	I64,
	U8,
	U16,
	U32,
	U64,
	F32,
	F64,
	String,
	/// Compiled regular expression.
	Pattern,
	/// Filesystem path, kept as written.
	Path,
	/// Closed set of named constants.
	Enum(EnumShape),
	/// Fixed-length array of the inner shape.
	Array(Box<Shape>),
	/// Collection; its element shape is carried as the descriptor's first
	/// generic argument.
	Collection(CollectionKind),
	/// Inner shape that can also represent absence.
	///
	/// Shapes not wrapped in `Optional` are "primitive": a parse that yields
	/// nothing cannot be stored.
	Optional(Box<Shape>),
	/// Caller-defined tag, resolvable only through a registered parser.
	Named(&'static str),
}

impl Shape {
	/// Shorthand for `Shape::Array(Box::new(inner))`.
	pub fn array(inner: Shape) -> Self {
		Shape::Array(Box::new(inner))
	}

	/// Shorthand for `Shape::Optional(Box::new(inner))`.
	pub fn optional(inner: Shape) -> Self {
		match inner {
			Shape::Optional(_) => inner,
			other => Shape::Optional(Box::new(other)),
		}
	}

	/// Returns true if this shape can hold an absent value.
	pub fn is_nullable(&self) -> bool {
		matches!(self, Shape::Optional(_))
	}

	/// Strips any `Optional` wrapper.
	pub fn without_optional(&self) -> &Shape {
		match self {
			Shape::Optional(inner) => inner.without_optional(),
			other => other,
		}
	}

	/// Returns true if this shape (ignoring `Optional`) is an array.
	pub fn is_array(&self) -> bool {
		matches!(self.without_optional(), Shape::Array(_))
	}

	/// Returns the element shape of an array, stripping one level.
	pub fn component(&self) -> Option<&Shape> {
		match self.without_optional() {
			Shape::Array(inner) => Some(inner),
			_ => None,
		}
	}

	/// Counts nested array levels.
	pub fn dimensions(&self) -> usize {
		let mut dims = 0;
		let mut current = self;
		while let Some(inner) = current.component() {
			dims += 1;
			current = inner;
		}
		dims
	}

	/// Returns the map key for non-array shapes.
	pub fn tag(&self) -> Option<ShapeTag> {
		Some(match self.without_optional() {
			Shape::Bool => ShapeTag::Bool,
			Shape::I8 => ShapeTag::I8,
			Shape::I16 => ShapeTag::I16,
			Shape::I32 => ShapeTag::I32,
			Shape::I64 => ShapeTag::I64,
			Shape::U8 => ShapeTag::U8,
			Shape::U16 => ShapeTag::U16,
			Shape::U32 => ShapeTag::U32,
			Shape::U64 => ShapeTag::U64,
			Shape::F32 => ShapeTag::F32,
			Shape::F64 => ShapeTag::F64,
			Shape::String => ShapeTag::String,
			Shape::Pattern => ShapeTag::Pattern,
			Shape::Path => ShapeTag::Path,
			Shape::Enum(_) => ShapeTag::Enum,
			Shape::Collection(kind) => ShapeTag::Collection(*kind),
			Shape::Named(name) => ShapeTag::Named(name),
			Shape::Array(_) | Shape::Optional(_) => return None,
		})
	}
}

impl fmt::Display for Shape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Shape::Enum(shape) => write!(f, "enum {}", shape.name),
			Shape::Array(inner) => write!(f, "[{inner}]"),
			Shape::Collection(kind) => write!(f, "collection<{kind:?}>"),
			Shape::Optional(inner) => write!(f, "{inner}?"),
			Shape::Named(name) => f.write_str(name),
			scalar => write!(f, "{}", format!("{scalar:?}").to_lowercase()),
		}
	}
}

/// Box-free registry key for every non-array shape.
///
/// All enums share [`ShapeTag::Enum`]; the concrete constant list travels in
/// the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeTag {
	Bool,
	I8,
	I16,
	I32,
	I64,
	U8,
	U16,
	U32,
	U64,
	F32,
	F64,
	String,
	Pattern,
	Path,
	Enum,
	Collection(CollectionKind),
	Named(&'static str),
}

/// Where a parser lives in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserSlot {
	/// Scalar, enum, collection and named shapes.
	Tag(ShapeTag),
	/// Arrays, keyed by dimension count.
	Dimensions(usize),
}

impl ParserSlot {
	/// Computes the slot a shape dispatches to on exact lookup.
	pub fn of(shape: &Shape) -> Option<Self> {
		if shape.is_array() {
			return Some(ParserSlot::Dimensions(shape.dimensions()));
		}
		shape.tag().map(ParserSlot::Tag)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const COLORS: EnumShape = EnumShape {
		name: "Color",
		variants: &["Red", "Green", "Blue"],
	};

	#[test]
	fn dimensions_count_nested_arrays() {
		assert_eq!(Shape::I32.dimensions(), 0);
		assert_eq!(Shape::array(Shape::I32).dimensions(), 1);
		assert_eq!(Shape::array(Shape::array(Shape::I32)).dimensions(), 2);
		assert_eq!(
			Shape::array(Shape::optional(Shape::array(Shape::String))).dimensions(),
			2
		);
	}

	#[test]
	fn optional_does_not_nest() {
		let once = Shape::optional(Shape::Bool);
		assert_eq!(Shape::optional(once.clone()), once);
		assert!(once.is_nullable());
		assert_eq!(once.without_optional(), &Shape::Bool);
	}

	#[test]
	fn slot_of_array_uses_dimensions() {
		assert_eq!(
			ParserSlot::of(&Shape::array(Shape::array(Shape::F64))),
			Some(ParserSlot::Dimensions(2))
		);
		assert_eq!(
			ParserSlot::of(&Shape::Enum(COLORS)),
			Some(ParserSlot::Tag(ShapeTag::Enum))
		);
	}

	#[test]
	fn enum_lookup_ignores_case() {
		assert_eq!(COLORS.position_ignore_case("gReEn"), Some(1));
		assert_eq!(COLORS.position_ignore_case("purple"), None);
		assert_eq!(COLORS.variant(2), Some("Blue"));
		assert_eq!(COLORS.variant(3), None);
	}
}
