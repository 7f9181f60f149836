//! String, pattern and path parsers.

use std::path::PathBuf;

use regex::Regex;

use crate::{FieldParser, ParserRegistry, ParserSlot, Shape, ShapeTag, TypeDescriptor, Value};

/// Normalizes a raw string value: backslashes become forward slashes, NUL
/// becomes a space, the `&nbsp` token becomes a space, then the result is
/// trimmed.
pub fn normalize_string(raw: &str) -> String {
	raw.replace('\\', "/")
		.replace('\0', " ")
		.replace("&nbsp", " ")
		.trim()
		.to_string()
}

/// Parser for [`Shape::String`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StringParser;

impl FieldParser for StringParser {
	fn name(&self) -> &'static str {
		"string"
	}

	fn slot(&self) -> ParserSlot {
		ParserSlot::Tag(ShapeTag::String)
	}

	fn parse(
		&self,
		_registry: &ParserRegistry,
		raw: Option<&str>,
		descriptor: &TypeDescriptor,
		default: Option<Value>,
	) -> Option<Value> {
		let Some(raw) = raw else {
			return default;
		};
		if descriptor.shape().without_optional() != &Shape::String {
			return default;
		}
		Some(Value::String(normalize_string(raw)))
	}
}

/// Parser for [`Shape::Pattern`]; compile errors fall back to the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternParser;

impl FieldParser for PatternParser {
	fn name(&self) -> &'static str {
		"pattern"
	}

	fn slot(&self) -> ParserSlot {
		ParserSlot::Tag(ShapeTag::Pattern)
	}

	fn parse(
		&self,
		_registry: &ParserRegistry,
		raw: Option<&str>,
		descriptor: &TypeDescriptor,
		default: Option<Value>,
	) -> Option<Value> {
		let Some(raw) = raw else {
			return default;
		};
		if descriptor.shape().without_optional() != &Shape::Pattern {
			return default;
		}
		match Regex::new(raw) {
			Ok(pattern) => Some(Value::Pattern(pattern)),
			Err(error) => {
				tracing::error!(raw, %error, "error while compiling a pattern");
				default
			}
		}
	}
}

/// Parser for [`Shape::Path`]; the raw value is kept verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathParser;

impl FieldParser for PathParser {
	fn name(&self) -> &'static str {
		"path"
	}

	fn slot(&self) -> ParserSlot {
		ParserSlot::Tag(ShapeTag::Path)
	}

	fn parse(
		&self,
		_registry: &ParserRegistry,
		raw: Option<&str>,
		descriptor: &TypeDescriptor,
		default: Option<Value>,
	) -> Option<Value> {
		let Some(raw) = raw else {
			return default;
		};
		if descriptor.shape().without_optional() != &Shape::Path {
			return default;
		}
		Some(Value::Path(PathBuf::from(raw)))
	}
}
