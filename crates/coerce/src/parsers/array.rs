use crate::{FieldParser, ParserRegistry, ParserSlot, Shape, TypeDescriptor, Value};

/// One-dimensional array parser.
///
/// The raw value is split on the primary delimiter and every token is parsed
/// against the element shape. Tokens that yield nothing are dropped when the
/// element shape is primitive and stored as [`Value::Null`] when it is
/// `Optional`. An empty raw value produces an empty array.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayParser;

impl ArrayParser {
	/// Element shape for a one-dimensional parse, or `None` when the target
	/// has two or more dimensions.
	pub(crate) fn element_shape(descriptor: &TypeDescriptor) -> Option<Shape> {
		match descriptor.shape().component() {
			Some(component) if component.is_array() => None,
			Some(component) => Some(component.clone()),
			None => Some(
				descriptor
					.generics()
					.first()
					.unwrap_or(descriptor.shape())
					.clone(),
			),
		}
	}
}

/// Splits on `delimiter`, keeping empty tokens. Empty input has no tokens.
pub(crate) fn split<'a>(input: &'a str, delimiter: &regex::Regex) -> Vec<&'a str> {
	if input.is_empty() {
		return Vec::new();
	}
	delimiter.split(input).collect()
}

impl FieldParser for ArrayParser {
	fn name(&self) -> &'static str {
		"array"
	}

	fn slot(&self) -> ParserSlot {
		ParserSlot::Dimensions(1)
	}

	fn parse(
		&self,
		registry: &ParserRegistry,
		raw: Option<&str>,
		descriptor: &TypeDescriptor,
		default: Option<Value>,
	) -> Option<Value> {
		let Some(raw) = raw else {
			return default;
		};
		let Some(element) = Self::element_shape(descriptor) else {
			tracing::warn!(shape = %descriptor.shape(), "array has more than one dimension");
			return default;
		};
		let Some(parser) = registry.resolve(&element) else {
			tracing::error!(element = %element, "cannot parse array: element shape is not supported");
			return default;
		};

		let nullable = element.is_nullable();
		let element_descriptor = descriptor.derive(element.without_optional().clone());
		let tokens = split(raw, descriptor.primary_delimiter());
		let mut items = Vec::with_capacity(tokens.len());
		for token in tokens {
			match parser.parse(registry, Some(token), &element_descriptor, None) {
				Some(value) => items.push(value),
				None if nullable => items.push(Value::Null),
				None => {
					tracing::error!(
						token,
						element = %element,
						"dropping array element: parsed nothing for a primitive element"
					);
				}
			}
		}
		Some(Value::Array(items))
	}
}
