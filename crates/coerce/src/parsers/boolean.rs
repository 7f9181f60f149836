use crate::{FieldParser, ParserRegistry, ParserSlot, ShapeTag, TypeDescriptor, Value};

/// Accepts `y`/`1`/`true`/`yes`/`on` and `n`/`0`/`false`/`no`/`off`, any case.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanParser;

impl BooleanParser {
	/// Parses a boolean without a fallback.
	pub fn parse_bool(raw: &str) -> Option<bool> {
		let lowered = raw.to_lowercase();
		match lowered.as_str() {
			"y" | "1" | "true" | "yes" | "on" => Some(true),
			"n" | "0" | "false" | "no" | "off" => Some(false),
			_ => None,
		}
	}
}

impl FieldParser for BooleanParser {
	fn name(&self) -> &'static str {
		"bool"
	}

	fn slot(&self) -> ParserSlot {
		ParserSlot::Tag(ShapeTag::Bool)
	}

	fn parse(
		&self,
		_registry: &ParserRegistry,
		raw: Option<&str>,
		_descriptor: &TypeDescriptor,
		default: Option<Value>,
	) -> Option<Value> {
		let Some(raw) = raw else {
			return default;
		};
		match Self::parse_bool(raw) {
			Some(v) => Some(Value::Bool(v)),
			None => {
				tracing::info!(raw, "not a boolean, using default");
				default
			}
		}
	}
}
