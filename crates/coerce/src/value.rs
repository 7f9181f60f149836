//! Dynamic coerced values.

use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use indexmap::IndexSet;
use regex::Regex;

/// A constant of an enum-like target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumValue {
	/// Position in the declaring [`EnumShape`](crate::EnumShape).
	pub ordinal: usize,
	/// Display name of the constant.
	pub name: &'static str,
}

/// Result of a successful coercion.
///
/// Equality and hashing treat floats by bit pattern and patterns by their
/// source text, so values can be collected into a unique set.
#[derive(Debug, Clone)]
pub enum Value {
	/// Explicit absence, only stored where the shape is nullable.
	Null,
	Bool(bool),
	I8(i8),
	I16(i16),
	I32(i32),
	I64(i64),
	U8(u8),
	U16(u16),
	U32(u32),
	U64(u64),
	F32(f32),
	F64(f64),
	String(String),
	Pattern(Regex),
	Path(PathBuf),
	Enum(EnumValue),
	/// Fixed-length array; nested arrays are ragged.
	Array(Vec<Value>),
	List(Vec<Value>),
	Set(IndexSet<Value>),
	Queue(VecDeque<Value>),
}

impl Value {
	/// Returns true for [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Name of the variant, for diagnostics.
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "bool",
			Value::I8(_) => "i8",
			Value::I16(_) => "i16",
			Value::I32(_) => "i32",
			Value::I64(_) => "i64",
			Value::U8(_) => "u8",
			Value::U16(_) => "u16",
			Value::U32(_) => "u32",
			Value::U64(_) => "u64",
			Value::F32(_) => "f32",
			Value::F64(_) => "f64",
			Value::String(_) => "string",
			Value::Pattern(_) => "pattern",
			Value::Path(_) => "path",
			Value::Enum(_) => "enum",
			Value::Array(_) => "array",
			Value::List(_) => "list",
			Value::Set(_) => "set",
			Value::Queue(_) => "queue",
		}
	}

	/// Borrows the elements of any sequence-like value in iteration order.
	pub fn elements(&self) -> Option<Vec<&Value>> {
		match self {
			Value::Array(items) | Value::List(items) => Some(items.iter().collect()),
			Value::Set(items) => Some(items.iter().collect()),
			Value::Queue(items) => Some(items.iter().collect()),
			_ => None,
		}
	}

	/// Consumes any sequence-like value into its elements.
	pub fn into_elements(self) -> Option<Vec<Value>> {
		match self {
			Value::Array(items) | Value::List(items) => Some(items),
			Value::Set(items) => Some(items.into_iter().collect()),
			Value::Queue(items) => Some(items.into_iter().collect()),
			_ => None,
		}
	}

	/// Writes the value back in config-file syntax.
	///
	/// Sequences are joined with `primary`; rows of a nested sequence join
	/// their columns with `secondary`. `Null` renders as the empty string.
	pub fn to_raw(&self, primary: &str, secondary: &str) -> String {
		match self {
			Value::Null => String::new(),
			Value::Bool(v) => v.to_string(),
			Value::I8(v) => v.to_string(),
			Value::I16(v) => v.to_string(),
			Value::I32(v) => v.to_string(),
			Value::I64(v) => v.to_string(),
			Value::U8(v) => v.to_string(),
			Value::U16(v) => v.to_string(),
			Value::U32(v) => v.to_string(),
			Value::U64(v) => v.to_string(),
			Value::F32(v) => v.to_string(),
			Value::F64(v) => v.to_string(),
			Value::String(v) => v.clone(),
			Value::Pattern(v) => v.as_str().to_string(),
			Value::Path(v) => v.display().to_string(),
			Value::Enum(v) => v.name.to_string(),
			sequence => {
				let items = sequence.elements().unwrap_or_default();
				items
					.into_iter()
					.map(|item| match item.elements() {
						Some(columns) => columns
							.into_iter()
							.map(|column| column.to_raw(secondary, secondary))
							.collect::<Vec<_>>()
							.join(secondary),
						None => item.to_raw(primary, secondary),
					})
					.collect::<Vec<_>>()
					.join(primary)
			}
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Null, Value::Null) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::I8(a), Value::I8(b)) => a == b,
			(Value::I16(a), Value::I16(b)) => a == b,
			(Value::I32(a), Value::I32(b)) => a == b,
			(Value::I64(a), Value::I64(b)) => a == b,
			(Value::U8(a), Value::U8(b)) => a == b,
			(Value::U16(a), Value::U16(b)) => a == b,
			(Value::U32(a), Value::U32(b)) => a == b,
			(Value::U64(a), Value::U64(b)) => a == b,
			(Value::F32(a), Value::F32(b)) => a.to_bits() == b.to_bits(),
			(Value::F64(a), Value::F64(b)) => a.to_bits() == b.to_bits(),
			(Value::String(a), Value::String(b)) => a == b,
			(Value::Pattern(a), Value::Pattern(b)) => a.as_str() == b.as_str(),
			(Value::Path(a), Value::Path(b)) => a == b,
			(Value::Enum(a), Value::Enum(b)) => a == b,
			(Value::Array(a), Value::Array(b)) | (Value::List(a), Value::List(b)) => a == b,
			(Value::Set(a), Value::Set(b)) => a == b,
			(Value::Queue(a), Value::Queue(b)) => a == b,
			_ => false,
		}
	}
}

impl Eq for Value {}

impl Hash for Value {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::mem::discriminant(self).hash(state);
		match self {
			Value::Null => {}
			Value::Bool(v) => v.hash(state),
			Value::I8(v) => v.hash(state),
			Value::I16(v) => v.hash(state),
			Value::I32(v) => v.hash(state),
			Value::I64(v) => v.hash(state),
			Value::U8(v) => v.hash(state),
			Value::U16(v) => v.hash(state),
			Value::U32(v) => v.hash(state),
			Value::U64(v) => v.hash(state),
			Value::F32(v) => v.to_bits().hash(state),
			Value::F64(v) => v.to_bits().hash(state),
			Value::String(v) => v.hash(state),
			Value::Pattern(v) => v.as_str().hash(state),
			Value::Path(v) => v.hash(state),
			Value::Enum(v) => v.hash(state),
			Value::Array(items) | Value::List(items) => items.hash(state),
			// Set equality ignores order, so only the length is hashed.
			Value::Set(items) => items.len().hash(state),
			Value::Queue(items) => items.hash(state),
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::String(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::String(v)
	}
}
