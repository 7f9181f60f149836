//! Integer and floating-point parsers.
//!
//! Raw text is normalized first: the `&nbsp` token is removed, then spaces,
//! control whitespace, underscores and hyphens are dropped everywhere except
//! a leading minus sign, so `1_000`, `1 000` and `880-555-35-35` all read as
//! plain digit strings. What remains must be an optional `-` followed by
//! ASCII digits, with at most one `.` (never first) for floating targets.

use std::marker::PhantomData;
use std::str::FromStr;

use crate::{FieldParser, ParserRegistry, ParserSlot, ShapeTag, TypeDescriptor, Value};

/// Strips separators from a numeric literal.
pub fn normalize_number(raw: &str) -> String {
	let without_nbsp = raw.replace("&nbsp;", "").replace("&nbsp", "");
	let trimmed = without_nbsp.trim();
	let mut out = String::with_capacity(trimmed.len());
	for (index, c) in trimmed.char_indices() {
		if index == 0 && c == '-' {
			out.push(c);
			continue;
		}
		match c {
			'\n' | '\t' | '\r' | '\0' | ' ' | '-' | '_' => {}
			other => out.push(other),
		}
	}
	out
}

/// Checks the normalized grammar: `-?digits` or, with `decimal`, `-?digits(.digits)?`
/// where the dot is never the first character.
pub fn is_number(input: &str, decimal: bool) -> bool {
	let digits = input.strip_prefix('-').unwrap_or(input);
	if digits.is_empty() {
		return false;
	}
	let mut dot_seen = false;
	for (index, c) in input.char_indices() {
		match c {
			'-' if index == 0 => {}
			'.' if decimal && index != 0 && !dot_seen => dot_seen = true,
			c if c.is_ascii_digit() => {}
			_ => return false,
		}
	}
	true
}

/// Integer width that can be produced by [`IntegerParser`].
pub trait Integer: TryFrom<i128> + Copy + Send + Sync + 'static {
	const TAG: ShapeTag;
	const NAME: &'static str;
	/// Most digits (sign excluded) a value of this width can have.
	const MAX_DIGITS: usize;

	fn into_value(self) -> Value;
}

macro_rules! impl_integer {
	($($ty:ty => $tag:ident, $variant:ident, $digits:expr;)*) => {
		$(
			impl Integer for $ty {
				const TAG: ShapeTag = ShapeTag::$tag;
				const NAME: &'static str = stringify!($ty);
				const MAX_DIGITS: usize = $digits;

				fn into_value(self) -> Value {
					Value::$variant(self)
				}
			}
		)*
	};
}

impl_integer! {
	i8 => I8, I8, 3;
	i16 => I16, I16, 5;
	i32 => I32, I32, 10;
	i64 => I64, I64, 19;
	u8 => U8, U8, 3;
	u16 => U16, U16, 5;
	u32 => U32, U32, 10;
	u64 => U64, U64, 20;
}

/// Parses a normalized integer literal into `T`, rejecting anything outside
/// `T::MIN..=T::MAX`.
fn parse_integer<T: Integer>(normalized: &str) -> Option<T> {
	if !is_number(normalized, false) {
		return None;
	}
	// Leading zeros do not count toward the width.
	let digits = normalized.trim_start_matches('-').trim_start_matches('0').len();
	if digits > T::MAX_DIGITS {
		return None;
	}
	let wide: i128 = normalized.parse().ok()?;
	T::try_from(wide).ok()
}

/// Bounds-checked integer parser for one width.
pub struct IntegerParser<T> {
	_width: PhantomData<fn() -> T>,
}

impl<T: Integer> IntegerParser<T> {
	pub fn new() -> Self {
		Self {
			_width: PhantomData,
		}
	}

	/// Parses and range-checks without a fallback.
	pub fn parse_str(raw: &str) -> Option<T> {
		parse_integer(&normalize_number(raw))
	}
}

impl<T: Integer> Default for IntegerParser<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Integer> FieldParser for IntegerParser<T> {
	fn name(&self) -> &'static str {
		T::NAME
	}

	fn slot(&self) -> ParserSlot {
		ParserSlot::Tag(T::TAG)
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
		match Self::parse_str(raw) {
			Some(v) => Some(v.into_value()),
			None => {
				tracing::info!(raw, width = T::NAME, "malformed or out-of-range integer, using default");
				default
			}
		}
	}
}

/// Floating precision that can be produced by [`FloatParser`].
pub trait Float: FromStr + Copy + Send + Sync + 'static {
	const TAG: ShapeTag;
	const NAME: &'static str;

	fn is_finite(self) -> bool;
	fn into_value(self) -> Value;
}

impl Float for f32 {
	const TAG: ShapeTag = ShapeTag::F32;
	const NAME: &'static str = "f32";

	fn is_finite(self) -> bool {
		f32::is_finite(self)
	}

	fn into_value(self) -> Value {
		Value::F32(self)
	}
}

impl Float for f64 {
	const TAG: ShapeTag = ShapeTag::F64;
	const NAME: &'static str = "f64";

	fn is_finite(self) -> bool {
		f64::is_finite(self)
	}

	fn into_value(self) -> Value {
		Value::F64(self)
	}
}

/// Decimal parser for one floating precision.
///
/// Values that overflow the precision are rejected rather than stored as
/// infinity.
pub struct FloatParser<T> {
	_precision: PhantomData<fn() -> T>,
}

impl<T: Float> FloatParser<T> {
	pub fn new() -> Self {
		Self {
			_precision: PhantomData,
		}
	}

	/// Parses without a fallback.
	pub fn parse_str(raw: &str) -> Option<T> {
		let normalized = normalize_number(raw);
		if !is_number(&normalized, true) {
			return None;
		}
		let parsed: T = normalized.parse().ok()?;
		parsed.is_finite().then_some(parsed)
	}
}

impl<T: Float> Default for FloatParser<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Float> FieldParser for FloatParser<T> {
	fn name(&self) -> &'static str {
		T::NAME
	}

	fn slot(&self) -> ParserSlot {
		ParserSlot::Tag(T::TAG)
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
		match Self::parse_str(raw) {
			Some(v) => Some(v.into_value()),
			None => {
				tracing::info!(raw, precision = T::NAME, "malformed or overflowing decimal, using default");
				default
			}
		}
	}
}
