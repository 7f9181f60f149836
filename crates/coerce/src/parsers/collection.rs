use std::collections::VecDeque;

use indexmap::IndexSet;
use rustc_hash::FxHashMap;

use crate::{
	CollectionKind, FieldParser, ParserRegistry, ParserSlot, Shape, ShapeTag, TypeDescriptor, Value,
};

/// Concrete storage a collection is materialized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionImpl {
	/// [`Value::List`], backed by `Vec`.
	List,
	/// [`Value::Set`], backed by an insertion-ordered `IndexSet`.
	Set,
	/// [`Value::Queue`], backed by `VecDeque`.
	Queue,
}

impl CollectionImpl {
	fn materialize(self, items: Vec<Value>) -> Value {
		match self {
			CollectionImpl::List => Value::List(items),
			CollectionImpl::Set => Value::Set(items.into_iter().collect::<IndexSet<_>>()),
			CollectionImpl::Queue => Value::Queue(items.into_iter().collect::<VecDeque<_>>()),
		}
	}
}

/// Generic collection parser.
///
/// The element shape is the descriptor's first generic argument (`String`
/// when absent). Elements are parsed through the registry's one-dimensional
/// array parser, so they honor the same primary delimiter and null rules,
/// then copied into the storage chosen for the requested [`CollectionKind`]:
///
/// | kind | storage |
/// |------|---------|
/// | `Any`, `List` | `vec` |
/// | `Set` | `index_set` |
/// | `Queue` | `vec_deque` |
/// | `Concrete(name)` | `name`, looked up in the implementation table |
#[derive(Debug, Clone)]
pub struct CollectionParser {
	impls: FxHashMap<&'static str, CollectionImpl>,
}

impl CollectionParser {
	/// Creates a parser knowing the `vec`, `index_set` and `vec_deque`
	/// implementations.
	pub fn new() -> Self {
		let mut impls = FxHashMap::default();
		impls.insert("vec", CollectionImpl::List);
		impls.insert("index_set", CollectionImpl::Set);
		impls.insert("vec_deque", CollectionImpl::Queue);
		Self { impls }
	}

	/// Makes `name` usable as a [`CollectionKind::Concrete`] target.
	pub fn with_impl(mut self, name: &'static str, storage: CollectionImpl) -> Self {
		self.impls.insert(name, storage);
		self
	}

	fn storage(&self, kind: CollectionKind) -> Option<CollectionImpl> {
		let name = match kind {
			CollectionKind::Any | CollectionKind::List => "vec",
			CollectionKind::Set => "index_set",
			CollectionKind::Queue => "vec_deque",
			CollectionKind::Concrete(name) => name,
		};
		self.impls.get(name).copied()
	}
}

impl Default for CollectionParser {
	fn default() -> Self {
		Self::new()
	}
}

impl FieldParser for CollectionParser {
	fn name(&self) -> &'static str {
		"collection"
	}

	fn slot(&self) -> ParserSlot {
		ParserSlot::Tag(ShapeTag::Collection(CollectionKind::Any))
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
		let Shape::Collection(kind) = descriptor.shape().without_optional() else {
			return default;
		};
		let Some(storage) = self.storage(*kind) else {
			tracing::error!(?kind, "unknown collection implementation, using default");
			return default;
		};

		let element = match descriptor.generics().first() {
			Some(element) => element.clone(),
			None => {
				tracing::warn!(?kind, "collection has no element shape, reading elements as strings");
				Shape::String
			}
		};
		let array = Shape::array(element);
		let Some(parser) = registry.resolve(&array) else {
			tracing::error!(shape = %array, "no array parser for collection elements");
			return default;
		};
		match parser
			.parse(registry, Some(raw), &descriptor.derive(array), None)
			.and_then(Value::into_elements)
		{
			Some(items) => Some(storage.materialize(items)),
			None => default,
		}
	}
}
