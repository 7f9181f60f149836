//! Binding pass.
//!
//! A [`Binder`] owns a [`Schema`] and the per-attribute [`ParseState`] that
//! outlives individual loads. One [`Binder::load`] call:
//!
//! 1. Builds a binding for every non-ignored attribute: lookup key, raw value
//!    (table entry, else the declared default raw value), operation name and
//!    type descriptor with delimiter overrides
//! 2. Drops not-in-config attributes that have no operation
//! 3. Runs the before-load hook
//! 4. Assigns each binding once, through its operation or by coercing the raw
//!    value into the field; immutable attributes that already succeeded on an
//!    earlier load are skipped
//! 5. Runs the after-load hook
//! 6. Reports eligible and successful counts plus unclaimed table keys
//!
//! No per-attribute failure aborts the pass.

use std::sync::Arc;

use kvbind_coerce::{
	PRIMARY_DELIMITER, ParserRegistry, SECONDARY_DELIMITER, Shape, TypeDescriptor,
};
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::RawConfigTable;
use crate::schema::{Attribute, Schema};


/// Maximum edit distance for a "did you mean" suggestion.
const SUGGESTION_DISTANCE: usize = 3;

/// Outcome of the most recent assignment attempt of an attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseState {
	/// Never attempted.
	#[default]
	Unset,
	/// The last attempt stored a value.
	Parsed,
	/// The last attempt failed; the attribute kept its previous value.
	Rejected,
}

/// Order attributes are assigned in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttributeOrder {
	/// Declaration order.
	#[default]
	Declared,
	/// Hash order of attribute names. Only useful when no attribute or hook
	/// depends on another attribute having been assigned first.
	Unordered,
}

/// Table key no attribute claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey {
	pub key: String,
	/// Closest declared key, if one is close enough.
	pub suggestion: Option<String>,
}

/// Result of one binding pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
	/// Attributes that took part in the pass.
	pub eligible: usize,
	/// Attributes that were assigned successfully.
	pub succeeded: usize,
	/// Keys present in the table that match no declared attribute.
	pub unknown_keys: Vec<UnknownKey>,
}

/// Per-pass record of one attribute.
struct Binding<'a> {
	index: usize,
	name: &'static str,
	key: &'a str,
	raw: Option<&'a str>,
	operation: Option<&'a str>,
	descriptor: TypeDescriptor,
}

/// Applies raw tables to targets of type `T`.
pub struct Binder<T> {
	schema: Schema<T>,
	registry: Arc<ParserRegistry>,
	order: AttributeOrder,
	states: Vec<ParseState>,
}

impl<T> Binder<T> {
	/// Creates a binder using the shared default parser registry.
	pub fn new(schema: Schema<T>) -> Self {
		let states = vec![ParseState::Unset; schema.attributes.len()];
		Self {
			schema,
			registry: ParserRegistry::shared(),
			order: AttributeOrder::default(),
			states,
		}
	}

	/// Coerces with `registry` instead of the shared default.
	pub fn with_registry(mut self, registry: Arc<ParserRegistry>) -> Self {
		self.registry = registry;
		self
	}

	pub fn with_order(mut self, order: AttributeOrder) -> Self {
		self.order = order;
		self
	}

	pub fn schema(&self) -> &Schema<T> {
		&self.schema
	}

	pub fn registry(&self) -> &ParserRegistry {
		&self.registry
	}

	/// State of the attribute called `name`.
	pub fn state(&self, name: &str) -> Option<ParseState> {
		let index = self.schema.attributes.iter().position(|a| a.name == name)?;
		self.states.get(index).copied()
	}

	/// Runs one binding pass of `table` over `target`.
	pub fn load(&mut self, target: &mut T, table: &RawConfigTable) -> LoadSummary {
		let bindings = collect_bindings(&self.schema, self.order, table);
		let eligible = bindings.len();
		let unknown_keys = self.unknown_keys(table);

		run_hook(self.schema.name(), "before_load", self.schema.before_load.as_ref(), target);

		let mut succeeded = 0;
		for binding in &bindings {
			let attribute = &self.schema.attributes[binding.index];
			if attribute.options.immutable && self.states[binding.index] == ParseState::Parsed {
				tracing::debug!(attribute = binding.name, "immutable attribute already parsed, skipping");
				continue;
			}
			let success = match binding.operation {
				Some(operation) => self.assign_by_operation(binding, operation, target, table),
				None => self.assign_direct(binding, attribute, target),
			};
			self.states[binding.index] = if success {
				ParseState::Parsed
			} else {
				ParseState::Rejected
			};
			succeeded += usize::from(success);
		}

		run_hook(self.schema.name(), "after_load", self.schema.after_load.as_ref(), target);

		LoadSummary {
			eligible,
			succeeded,
			unknown_keys,
		}
	}

	fn assign_by_operation(
		&self,
		binding: &Binding<'_>,
		operation: &str,
		target: &mut T,
		table: &RawConfigTable,
	) -> bool {
		let Some(op) = self.schema.get_operation(operation) else {
			tracing::error!(
				attribute = binding.name,
				operation,
				"cannot assign attribute: operation is not declared"
			);
			return false;
		};
		match op.invoke(target, binding.key, binding.raw, table) {
			Ok(()) => true,
			Err(error) => {
				tracing::error!(attribute = binding.name, operation, error = %error, "operation failed");
				false
			}
		}
	}

	fn assign_direct(&self, binding: &Binding<'_>, attribute: &Attribute<T>, target: &mut T) -> bool {
		let descriptor = &binding.descriptor;
		if self.registry.resolve(descriptor.shape()).is_none() {
			tracing::error!(
				attribute = binding.name,
				shape = %descriptor.shape(),
				"cannot parse attribute: shape is not supported"
			);
			return false;
		}
		let Some(value) = self.registry.parse(binding.raw, descriptor, None) else {
			if attribute.nullable {
				tracing::info!(
					attribute = binding.name,
					key = binding.key,
					raw = binding.raw,
					"no value parsed, keeping current value"
				);
			} else {
				tracing::error!(
					attribute = binding.name,
					key = binding.key,
					raw = binding.raw,
					"no value parsed for a primitive attribute, keeping current value"
				);
			}
			return false;
		};
		let kind = value.type_name();
		if attribute.write(target, value) {
			true
		} else {
			tracing::error!(
				attribute = binding.name,
				value = kind,
				shape = %attribute.shape,
				"coerced value does not fit the attribute, keeping current value"
			);
			false
		}
	}

	fn unknown_keys(&self, table: &RawConfigTable) -> Vec<UnknownKey> {
		let known: Vec<&str> = self.schema.attributes.iter().map(Attribute::key).collect();
		table
			.keys()
			.filter(|key| !known.contains(key))
			.map(|key| {
				let suggestion = suggest_key(key, &known);
				tracing::warn!(
					config = self.schema.name(),
					key,
					suggestion = suggestion.as_deref(),
					"unknown config key"
				);
				UnknownKey {
					key: key.to_string(),
					suggestion,
				}
			})
			.collect()
	}
}

impl<T> std::fmt::Debug for Binder<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Binder")
			.field("schema", &self.schema)
			.field("order", &self.order)
			.field("states", &self.states)
			.finish_non_exhaustive()
	}
}

fn collect_bindings<'a, T>(
	schema: &'a Schema<T>,
	order: AttributeOrder,
	table: &'a RawConfigTable,
) -> Vec<Binding<'a>> {
	let mut bindings = Vec::with_capacity(schema.attributes.len());
	for (index, attribute) in schema.attributes.iter().enumerate() {
		let options = &attribute.options;
		if options.ignored {
			continue;
		}
		let operation = options.hint.operation.as_deref().filter(|name| !name.is_empty());
		if options.not_in_config && operation.is_none() {
			tracing::warn!(
				config = schema.name(),
				attribute = attribute.name,
				"attribute is marked not-in-config but has no operation; mark it ignored if this is intended"
			);
			continue;
		}
		let key = attribute.key();
		bindings.push(Binding {
			index,
			name: attribute.name,
			key,
			raw: table.get_or(key, options.default_value.as_deref()),
			operation,
			descriptor: descriptor_for(attribute),
		});
	}
	if order == AttributeOrder::Unordered {
		let by_name: FxHashMap<&'static str, Binding<'a>> =
			bindings.into_iter().map(|b| (b.name, b)).collect();
		bindings = by_name.into_values().collect();
	}
	bindings
}

/// Builds the descriptor an attribute is coerced with: hint shape and
/// generics over the field type's, plus delimiter overrides.
fn descriptor_for<T>(attribute: &Attribute<T>) -> TypeDescriptor {
	let options = &attribute.options;
	let shape = options.hint.shape.clone().unwrap_or_else(|| attribute.shape.clone());
	let generics = options
		.hint
		.generics
		.clone()
		.unwrap_or_else(|| attribute.generics.clone());
	TypeDescriptor::with_generics(shape_for(attribute, shape), generics)
		.with_optional_attribute(
			&PRIMARY_DELIMITER,
			compile_delimiter(attribute, options.primary_delimiter.as_deref()),
		)
		.with_optional_attribute(
			&SECONDARY_DELIMITER,
			compile_delimiter(attribute, options.secondary_delimiter.as_deref()),
		)
}

/// Keeps a hint shape nullable when the field type is.
fn shape_for<T>(attribute: &Attribute<T>, shape: Shape) -> Shape {
	if attribute.nullable {
		Shape::optional(shape)
	} else {
		shape
	}
}

fn compile_delimiter<T>(attribute: &Attribute<T>, pattern: Option<&str>) -> Option<Regex> {
	let pattern = pattern.filter(|p| !p.is_empty())?;
	match Regex::new(pattern) {
		Ok(regex) => Some(regex),
		Err(error) => {
			tracing::error!(
				attribute = attribute.name,
				pattern,
				%error,
				"invalid delimiter pattern, using the default"
			);
			None
		}
	}
}

fn run_hook<T>(config: &str, hook: &str, f: Option<&crate::operation::Hook<T>>, target: &mut T) {
	let Some(f) = f else {
		return;
	};
	if let Err(error) = f(target) {
		tracing::error!(config, hook, error = %error, "load hook failed");
	}
}

/// Suggests the closest declared key within [`SUGGESTION_DISTANCE`] edits.
fn suggest_key(key: &str, known: &[&str]) -> Option<String> {
	known
		.iter()
		.map(|candidate| (strsim::levenshtein(key, candidate), *candidate))
		.filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
		.min_by_key(|(distance, _)| *distance)
		.map(|(_, candidate)| candidate.to_string())
}
