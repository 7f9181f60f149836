//! Built-in field parsers.
//!
//! One parser per shape family. Scalars live in `boolean`, `number` and
//! `text`; composites (`array`, `matrix`, `collection`) recurse through the
//! registry for their elements.

use std::sync::Arc;

mod array;
mod boolean;
mod collection;
mod enumeration;
mod matrix;
mod number;
mod text;

#[cfg(test)]
mod tests;

pub use array::ArrayParser;
pub use boolean::BooleanParser;
pub use collection::{CollectionImpl, CollectionParser};
pub use enumeration::EnumParser;
pub use matrix::MatrixParser;
pub use number::{FloatParser, IntegerParser, is_number, normalize_number};
pub use text::{PathParser, PatternParser, StringParser, normalize_string};

use crate::FieldParser;

/// Every parser a fresh [`ParserRegistry`](crate::ParserRegistry) starts with.
pub fn builtins() -> Vec<Arc<dyn FieldParser>> {
	vec![
		Arc::new(BooleanParser),
		Arc::new(IntegerParser::<i8>::new()),
		Arc::new(IntegerParser::<i16>::new()),
		Arc::new(IntegerParser::<i32>::new()),
		Arc::new(IntegerParser::<i64>::new()),
		Arc::new(IntegerParser::<u8>::new()),
		Arc::new(IntegerParser::<u16>::new()),
		Arc::new(IntegerParser::<u32>::new()),
		Arc::new(IntegerParser::<u64>::new()),
		Arc::new(FloatParser::<f32>::new()),
		Arc::new(FloatParser::<f64>::new()),
		Arc::new(StringParser),
		Arc::new(PatternParser),
		Arc::new(PathParser),
		Arc::new(EnumParser),
		Arc::new(ArrayParser),
		Arc::new(MatrixParser),
		Arc::new(CollectionParser::new()),
	]
}
