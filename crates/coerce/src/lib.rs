//! Typed coercion of raw config strings.
//!
//! A raw string plus a [`TypeDescriptor`] goes in, a [`Value`] (or the
//! caller's default) comes out. This crate provides:
//! - Target shapes ([`Shape`], [`ShapeTag`], [`EnumShape`], [`CollectionKind`])
//! - Dynamic values ([`Value`], [`EnumValue`])
//! - The dispatch table ([`ParserRegistry`]) and the [`FieldParser`] trait
//! - Built-in parsers for scalars, enums, arrays, pair lists and collections
//!   ([`parsers`])
//! - The [`ConfigValue`] bridge to Rust field types and [`config_enum!`]
//!
//! Parsers never fail past their own boundary. Malformed input yields the
//! default and the reason is logged through `tracing`.

mod convert;
mod descriptor;
mod macros;
pub mod parsers;
mod registry;
mod shape;
mod value;

pub use convert::{ConfigEnum, ConfigValue, enum_from_value, enum_to_value};
pub use descriptor::{AttributeKey, PRIMARY_DELIMITER, SECONDARY_DELIMITER, TypeDescriptor};
pub use registry::{FieldParser, ParserRegistry, Registration, Resolver};
pub use shape::{CollectionKind, EnumShape, ParserSlot, Shape, ShapeTag};
pub use value::{EnumValue, Value};
