//! Per-attribute schema metadata.

use kvbind_coerce::Shape;

/// Declarative settings for one attribute.
///
/// Every setting is optional; `AttributeOptions::default()` binds the
/// attribute under its own name with the field type's shape.
///
/// ```ignore
/// AttributeOptions::new()
///     .key("ServerPort")
///     .default_value("25565")
///     .comment("Port the server listens on.")
///     .immutable()
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttributeOptions {
	pub(crate) key: Option<String>,
	pub(crate) ignored: bool,
	pub(crate) not_in_config: bool,
	pub(crate) immutable: bool,
	pub(crate) default_value: Option<String>,
	pub(crate) comment: Option<String>,
	pub(crate) primary_delimiter: Option<String>,
	pub(crate) secondary_delimiter: Option<String>,
	pub(crate) hint: ParserHint,
}

/// Overrides for how an attribute's raw value is coerced and assigned.
#[derive(Debug, Clone, Default)]
pub struct ParserHint {
	pub(crate) operation: Option<String>,
	pub(crate) shape: Option<Shape>,
	pub(crate) generics: Option<Vec<Shape>>,
}

impl AttributeOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Looks the attribute up under `key` instead of its name.
	pub fn key(mut self, key: impl Into<String>) -> Self {
		self.key = Some(key.into());
		self
	}

	/// Excludes the attribute from loading and from the template.
	pub fn ignored(mut self) -> Self {
		self.ignored = true;
		self
	}

	/// Marks the attribute as never written in the config file.
	///
	/// Such an attribute only receives a value through its operation; one
	/// without an operation is dropped from every load with a warning.
	pub fn not_in_config(mut self) -> Self {
		self.not_in_config = true;
		self
	}

	/// Accepts at most one successful assignment, then is skipped by every
	/// later load of the same binder.
	pub fn immutable(mut self) -> Self {
		self.immutable = true;
		self
	}

	/// Raw value used when the key is absent from the file.
	pub fn default_value(mut self, raw: impl Into<String>) -> Self {
		self.default_value = Some(raw.into());
		self
	}

	/// Documentation written above the attribute in the rendered template.
	/// Embedded newlines produce one comment line each.
	pub fn comment(mut self, text: impl Into<String>) -> Self {
		self.comment = Some(text.into());
		self
	}

	/// Regular expression separating array elements or pair-list rows.
	pub fn primary_delimiter(mut self, pattern: impl Into<String>) -> Self {
		self.primary_delimiter = Some(pattern.into());
		self
	}

	/// Regular expression separating the columns of a pair-list row.
	pub fn secondary_delimiter(mut self, pattern: impl Into<String>) -> Self {
		self.secondary_delimiter = Some(pattern.into());
		self
	}

	/// Assigns through the schema operation called `name` instead of writing
	/// the field.
	pub fn operation(mut self, name: impl Into<String>) -> Self {
		self.hint.operation = Some(name.into());
		self
	}

	/// Coerces into `shape` instead of the field type's own shape.
	///
	/// The coerced value must still convert into the field type.
	pub fn shape(mut self, shape: Shape) -> Self {
		self.hint.shape = Some(shape);
		self
	}

	/// Generic arguments used instead of the field type's own.
	pub fn generics(mut self, generics: impl IntoIterator<Item = Shape>) -> Self {
		self.hint.generics = Some(generics.into_iter().collect());
		self
	}

	pub fn is_ignored(&self) -> bool {
		self.ignored
	}

	pub fn is_immutable(&self) -> bool {
		self.immutable
	}

	pub fn operation_name(&self) -> Option<&str> {
		self.hint.operation.as_deref()
	}
}
