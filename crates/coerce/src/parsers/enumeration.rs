use super::is_number;
use crate::{
	EnumValue, FieldParser, ParserRegistry, ParserSlot, Shape, ShapeTag, TypeDescriptor, Value,
};

/// Generic parser for every [`Shape::Enum`].
///
/// A raw value that is a plain integer literal (optional `-`, ASCII digits,
/// no separators) selects a constant by ordinal; anything else is matched
/// against the constant names ignoring case. Ordinals outside the constant
/// list fall back to the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumParser;

impl FieldParser for EnumParser {
	fn name(&self) -> &'static str {
		"enum"
	}

	fn slot(&self) -> ParserSlot {
		ParserSlot::Tag(ShapeTag::Enum)
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
		let Shape::Enum(shape) = descriptor.shape().without_optional() else {
			return default;
		};

		if let Some(ordinal) = parse_ordinal(raw) {
			let variant = usize::try_from(ordinal)
				.ok()
				.and_then(|ordinal| shape.variant(ordinal).map(|name| (ordinal, name)));
			return match variant {
				Some((ordinal, name)) => Some(Value::Enum(EnumValue { ordinal, name })),
				None => {
					tracing::warn!(
						%ordinal,
						enum_name = shape.name,
						variants = shape.variants.len(),
						"enum ordinal out of range, using default"
					);
					default
				}
			};
		}

		match shape.position_ignore_case(raw) {
			Some(ordinal) => Some(Value::Enum(EnumValue {
				ordinal,
				name: shape.variants[ordinal],
			})),
			None => {
				tracing::info!(raw, enum_name = shape.name, "no matching enum constant, using default");
				default
			}
		}
	}
}

/// Reads `raw` as an ordinal when it is a plain integer literal.
///
/// Separators are not stripped here, so a name such as `1-2` is never taken
/// for ordinal 12.
fn parse_ordinal(raw: &str) -> Option<i128> {
	let trimmed = raw.trim();
	if !is_number(trimmed, false) {
		return None;
	}
	trimmed.parse().ok()
}
