//! Parser registry.
//!
//! Maps a [`Shape`] to the [`FieldParser`] that coerces raw strings into it.
//! Scalars, enums, collections and named shapes are keyed by [`ShapeTag`];
//! arrays are keyed by their dimension count.
//!
//! # Resolution Order
//!
//! 1. Arrays dispatch on dimension count (only 1 and 2 ship built in)
//! 2. Any enum dispatches to the generic enum parser
//! 3. Exact tag match
//! 4. Any collection kind without an exact match falls back to the generic
//!    collection parser
//!
//! The order can be replaced wholesale with [`ParserRegistry::set_resolver`].

use std::fmt;
use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;

use crate::parsers;
use crate::{CollectionKind, ParserSlot, Shape, ShapeTag, TypeDescriptor, Value};


/// Coerces a raw string into one shape.
///
/// Implementations never fail past their own boundary: malformed input yields
/// `default`, and the reason is logged.
pub trait FieldParser: Send + Sync {
	/// Human-readable parser name for diagnostics.
	fn name(&self) -> &'static str;

	/// The slot this parser occupies when registered without an explicit one.
	fn slot(&self) -> ParserSlot;

	/// Parses `raw` against `descriptor`.
	///
	/// `raw == None` always yields `default`. Composite parsers use
	/// `registry` to resolve their element parsers.
	fn parse(
		&self,
		registry: &ParserRegistry,
		raw: Option<&str>,
		descriptor: &TypeDescriptor,
		default: Option<Value>,
	) -> Option<Value>;
}

/// Replacement dispatch function; see [`ParserRegistry::set_resolver`].
pub type Resolver =
	Arc<dyn Fn(&ParserRegistry, &Shape) -> Option<Arc<dyn FieldParser>> + Send + Sync>;

/// Outcome of [`ParserRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
	/// The slot was empty.
	Inserted,
	/// An existing parser was replaced.
	Replaced,
	/// The slot was occupied and replacement was not requested.
	Kept,
}

static GLOBAL: OnceLock<Arc<ParserRegistry>> = OnceLock::new();

/// Shape-to-parser dispatch table.
pub struct ParserRegistry {
	scalars: FxHashMap<ShapeTag, Arc<dyn FieldParser>>,
	arrays: FxHashMap<usize, Arc<dyn FieldParser>>,
	resolver: Option<Resolver>,
}

impl ParserRegistry {
	/// Creates a registry with no parsers.
	pub fn empty() -> Self {
		Self {
			scalars: FxHashMap::default(),
			arrays: FxHashMap::default(),
			resolver: None,
		}
	}

	/// Creates a registry populated with every built-in parser.
	pub fn new() -> Self {
		let mut registry = Self::empty();
		for parser in parsers::builtins() {
			registry.register(None, parser, false);
		}
		registry
	}

	/// Shared default registry.
	///
	/// Built on first use and never mutated. Callers that need custom parsers
	/// construct their own registry and inject it.
	pub fn global() -> &'static ParserRegistry {
		Self::global_arc()
	}

	/// Reference-counted handle to [`ParserRegistry::global`], for injection
	/// into components that hold an `Arc<ParserRegistry>`.
	pub fn shared() -> Arc<ParserRegistry> {
		Arc::clone(Self::global_arc())
	}

	fn global_arc() -> &'static Arc<ParserRegistry> {
		GLOBAL.get_or_init(|| Arc::new(ParserRegistry::new()))
	}

	/// Registers `parser` under `slot`, or under the parser's own
	/// [`FieldParser::slot`] when `slot` is `None`.
	///
	/// An occupied slot is only overwritten when `replace` is set.
	pub fn register(
		&mut self,
		slot: Option<ParserSlot>,
		parser: Arc<dyn FieldParser>,
		replace: bool,
	) -> Registration {
		let slot = slot.unwrap_or_else(|| parser.slot());
		let name = parser.name();
		let outcome = match slot {
			ParserSlot::Tag(tag) => insert(&mut self.scalars, tag, parser, replace),
			ParserSlot::Dimensions(dims) => insert(&mut self.arrays, dims, parser, replace),
		};
		tracing::debug!(?slot, parser = name, ?outcome, "parser registration");
		outcome
	}

	/// Registers a parser for a shape, deriving the slot from the shape.
	///
	/// `Optional` wrappers are ignored; `Shape::array(Shape::optional(x))`
	/// registers for one dimension.
	pub fn register_for(
		&mut self,
		shape: &Shape,
		parser: Arc<dyn FieldParser>,
		replace: bool,
	) -> Option<Registration> {
		let slot = ParserSlot::of(shape)?;
		Some(self.register(Some(slot), parser, replace))
	}

	/// Replaces the dispatch algorithm. `None` restores the default order.
	pub fn set_resolver(&mut self, resolver: Option<Resolver>) {
		self.resolver = resolver;
	}

	/// Looks up a parser by exact slot.
	pub fn get(&self, slot: ParserSlot) -> Option<&Arc<dyn FieldParser>> {
		match slot {
			ParserSlot::Tag(tag) => self.scalars.get(&tag),
			ParserSlot::Dimensions(dims) => self.arrays.get(&dims),
		}
	}

	/// Resolves the parser for `shape` with the active dispatch function.
	pub fn resolve(&self, shape: &Shape) -> Option<Arc<dyn FieldParser>> {
		match &self.resolver {
			Some(resolver) => resolver(self, shape),
			None => self.resolve_default(shape),
		}
	}

	/// The built-in dispatch order, usable from a custom resolver.
	pub fn resolve_default(&self, shape: &Shape) -> Option<Arc<dyn FieldParser>> {
		let shape = shape.without_optional();
		if shape.is_array() {
			return self.arrays.get(&shape.dimensions()).cloned();
		}
		if let Shape::Enum(_) = shape {
			return self.scalars.get(&ShapeTag::Enum).cloned();
		}
		let tag = shape.tag()?;
		if let Some(parser) = self.scalars.get(&tag) {
			return Some(Arc::clone(parser));
		}
		if let Shape::Collection(_) = shape {
			return self
				.scalars
				.get(&ShapeTag::Collection(CollectionKind::Any))
				.cloned();
		}
		None
	}

	/// Resolves a parser for the descriptor's shape and runs it.
	///
	/// A dispatch miss is logged and yields `default`.
	pub fn parse(
		&self,
		raw: Option<&str>,
		descriptor: &TypeDescriptor,
		default: Option<Value>,
	) -> Option<Value> {
		let Some(parser) = self.resolve(descriptor.shape()) else {
			tracing::error!(shape = %descriptor.shape(), "no parser registered for shape");
			return default;
		};
		parser.parse(self, raw, descriptor, default)
	}
}

impl Default for ParserRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for ParserRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut scalars: Vec<_> = self
			.scalars
			.iter()
			.map(|(tag, parser)| format!("{tag:?}={}", parser.name()))
			.collect();
		scalars.sort();
		let mut arrays: Vec<_> = self
			.arrays
			.iter()
			.map(|(dims, parser)| format!("{dims}={}", parser.name()))
			.collect();
		arrays.sort();
		f.debug_struct("ParserRegistry")
			.field("scalars", &scalars)
			.field("arrays", &arrays)
			.field("custom_resolver", &self.resolver.is_some())
			.finish()
	}
}

fn insert<K: std::hash::Hash + Eq>(
	map: &mut FxHashMap<K, Arc<dyn FieldParser>>,
	key: K,
	parser: Arc<dyn FieldParser>,
	replace: bool,
) -> Registration {
	match map.entry(key) {
		std::collections::hash_map::Entry::Vacant(slot) => {
			slot.insert(parser);
			Registration::Inserted
		}
		std::collections::hash_map::Entry::Occupied(mut slot) => {
			if replace {
				slot.insert(parser);
				Registration::Replaced
			} else {
				Registration::Kept
			}
		}
	}
}
