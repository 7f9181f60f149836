use super::array::split;
use crate::{FieldParser, ParserRegistry, ParserSlot, Shape, TypeDescriptor, Value};

/// Two-dimensional (pair-list) array parser.
///
/// Rows are split on the primary delimiter (default `;`), columns on the
/// secondary delimiter (default `=`). Rows keep their own column count, so
/// `a=1;b=2=3` yields a ragged `[[a, 1], [b, 2, 3]]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixParser;

impl MatrixParser {
	fn element_shape(descriptor: &TypeDescriptor) -> Option<Shape> {
		let Some(row) = descriptor.shape().component() else {
			return Some(
				descriptor
					.generics()
					.first()
					.unwrap_or(descriptor.shape())
					.clone(),
			);
		};
		match row.component() {
			Some(cell) if cell.is_array() => None,
			Some(cell) => Some(cell.clone()),
			None => Some(row.clone()),
		}
	}
}

impl FieldParser for MatrixParser {
	fn name(&self) -> &'static str {
		"matrix"
	}

	fn slot(&self) -> ParserSlot {
		ParserSlot::Dimensions(2)
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
			tracing::warn!(shape = %descriptor.shape(), "array has more than two dimensions");
			return default;
		};
		let Some(parser) = registry.resolve(&element) else {
			tracing::error!(element = %element, "cannot parse array: element shape is not supported");
			return default;
		};

		let nullable = element.is_nullable();
		let cell_descriptor = descriptor.derive(element.without_optional().clone());
		let rows = split(raw, descriptor.primary_delimiter())
			.into_iter()
			.map(|row| {
				let mut cells = Vec::new();
				for column in descriptor.secondary_delimiter().split(row) {
					match parser.parse(registry, Some(column), &cell_descriptor, None) {
						Some(value) => cells.push(value),
						None if nullable => cells.push(Value::Null),
						None => {
							tracing::error!(
								column,
								element = %element,
								"dropping cell: parsed nothing for a primitive element"
							);
						}
					}
				}
				Value::Array(cells)
			})
			.collect();
		Some(Value::Array(rows))
	}
}
