//! Statically declared binding schema.
//!
//! A [`Schema`] lists the attributes of a config type together with typed
//! accessors, the named [`Operation`]s attributes can be assigned through,
//! and optional before/after load hooks. It is built once per type:
//!
//! ```ignore
//! let schema = Schema::new("ServerConfig")
//!     .field("port", |c: &ServerConfig| &c.port, |c| &mut c.port)
//!     .field_with(
//!         "motd",
//!         AttributeOptions::new().key("MessageOfTheDay").default_value("hi"),
//!         |c: &ServerConfig| &c.motd,
//!         |c| &mut c.motd,
//!     )
//!     .operation("set_admins", Operation::value(|c, raw| { /* ... */ Ok(()) }))
//!     .after_load(|c| c.validate());
//! ```

use kvbind_coerce::{ConfigValue, Shape, Value};
use rustc_hash::FxHashMap;

use crate::operation::{Hook, Operation};
use crate::options::AttributeOptions;


type Reader<T> = Box<dyn Fn(&T) -> Value>;
type Writer<T> = Box<dyn Fn(&mut T, Value) -> bool>;

/// One declared attribute with type-erased accessors.
pub struct Attribute<T> {
	pub(crate) name: &'static str,
	pub(crate) options: AttributeOptions,
	pub(crate) shape: Shape,
	pub(crate) generics: Vec<Shape>,
	pub(crate) nullable: bool,
	read: Reader<T>,
	write: Writer<T>,
}

impl<T> Attribute<T> {
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Config key: the override from the options, else the attribute name.
	pub fn key(&self) -> &str {
		self.options.key.as_deref().unwrap_or(self.name)
	}

	pub fn options(&self) -> &AttributeOptions {
		&self.options
	}

	/// Shape of the field type, before any hint override.
	pub fn shape(&self) -> &Shape {
		&self.shape
	}

	/// Whether the field type can hold an absent value.
	pub fn is_nullable(&self) -> bool {
		self.nullable
	}

	/// Current value of the attribute on `target`.
	pub fn read(&self, target: &T) -> Value {
		(self.read)(target)
	}

	/// Stores `value`, returning false if it does not convert into the field
	/// type.
	pub fn write(&self, target: &mut T, value: Value) -> bool {
		(self.write)(target, value)
	}
}

impl<T> std::fmt::Debug for Attribute<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Attribute")
			.field("name", &self.name)
			.field("shape", &self.shape)
			.field("nullable", &self.nullable)
			.field("options", &self.options)
			.finish_non_exhaustive()
	}
}

/// Attributes, operations and hooks of one config type.
pub struct Schema<T> {
	name: &'static str,
	pub(crate) attributes: Vec<Attribute<T>>,
	pub(crate) operations: FxHashMap<String, Operation<T>>,
	pub(crate) before_load: Option<Hook<T>>,
	pub(crate) after_load: Option<Hook<T>>,
}

impl<T: 'static> Schema<T> {
	/// Creates an empty schema; `name` labels log messages.
	pub fn new(name: &'static str) -> Self {
		Self {
			name,
			attributes: Vec::new(),
			operations: FxHashMap::default(),
			before_load: None,
			after_load: None,
		}
	}

	/// Declares an attribute with default options.
	pub fn field<F: ConfigValue + 'static>(
		self,
		name: &'static str,
		get: fn(&T) -> &F,
		get_mut: fn(&mut T) -> &mut F,
	) -> Self {
		self.field_with(name, AttributeOptions::default(), get, get_mut)
	}

	/// Declares an attribute.
	///
	/// A second declaration with the same name replaces the first and keeps
	/// its position.
	pub fn field_with<F: ConfigValue + 'static>(
		mut self,
		name: &'static str,
		options: AttributeOptions,
		get: fn(&T) -> &F,
		get_mut: fn(&mut T) -> &mut F,
	) -> Self {
		let attribute = Attribute {
			name,
			options,
			shape: F::shape(),
			generics: F::generics(),
			nullable: F::NULLABLE,
			read: Box::new(move |target| get(target).to_value()),
			write: Box::new(move |target, value| match F::from_value(value) {
				Some(value) => {
					*get_mut(target) = value;
					true
				}
				None => false,
			}),
		};
		match self.attributes.iter_mut().find(|a| a.name == name) {
			Some(existing) => {
				tracing::warn!(config = self.name, attribute = name, "attribute declared twice, keeping the last");
				*existing = attribute;
			}
			None => self.attributes.push(attribute),
		}
		self
	}

	/// Registers an operation attributes can name with
	/// [`AttributeOptions::operation`].
	pub fn operation(mut self, name: impl Into<String>, operation: Operation<T>) -> Self {
		self.operations.insert(name.into(), operation);
		self
	}

	/// Runs before any attribute is assigned.
	pub fn before_load(mut self, hook: impl Fn(&mut T) -> anyhow::Result<()> + 'static) -> Self {
		self.before_load = Some(Box::new(hook));
		self
	}

	/// Runs after every attribute was processed.
	pub fn after_load(mut self, hook: impl Fn(&mut T) -> anyhow::Result<()> + 'static) -> Self {
		self.after_load = Some(Box::new(hook));
		self
	}
}

impl<T> Schema<T> {
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Attributes in declaration order.
	pub fn attributes(&self) -> &[Attribute<T>] {
		&self.attributes
	}

	pub fn attribute(&self, name: &str) -> Option<&Attribute<T>> {
		self.attributes.iter().find(|a| a.name == name)
	}

	pub fn get_operation(&self, name: &str) -> Option<&Operation<T>> {
		self.operations.get(name)
	}
}

impl<T> std::fmt::Debug for Schema<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut operations: Vec<_> = self.operations.keys().collect();
		operations.sort();
		f.debug_struct("Schema")
			.field("name", &self.name)
			.field("attributes", &self.attributes)
			.field("operations", &operations)
			.field("before_load", &self.before_load.is_some())
			.field("after_load", &self.after_load.is_some())
			.finish()
	}
}
