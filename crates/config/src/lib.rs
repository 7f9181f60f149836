//! Key/value configuration files bound onto typed Rust structs.
//!
//! A config file is a list of `key = value` lines. `#` starts a comment line,
//! a trailing `\` continues a value onto the next line, and the first `=`
//! separates key from value:
//!
//! ```text
//! # Port the server listens on.
//! port = 25565
//! banned = alice;bob;\
//!          mallory
//! ranks = admin=alice;mod=bob
//! ```
//!
//! Loading happens in two stages:
//!
//! 1. [`RawConfigTable`] reads the file into an ordered map of raw strings
//! 2. [`Binder`] walks a [`Schema`] and coerces each raw string into its
//!    field through the [`ParserRegistry`], or hands it to a named
//!    [`Operation`]
//!
//! Malformed values never fail a load: the field keeps its current value and
//! the rejection is logged through `tracing`. Only an unreadable file or a
//! holder that cannot be constructed produce a [`LoadError`].
//!
//! # Example
//!
//! ```ignore
//! use kvbind_config::{AttributeOptions, ConfigHolder, ConfigLoader, Schema};
//!
//! #[derive(Default)]
//! struct ServerConfig {
//!     port: u16,
//!     banned: Vec<String>,
//! }
//!
//! impl ConfigHolder for ServerConfig {
//!     const NAME: &'static str = "ServerConfig";
//!
//!     fn config_path() -> std::path::PathBuf {
//!         "config/server.properties".into()
//!     }
//!
//!     fn schema() -> Schema<Self> {
//!         Schema::new(Self::NAME)
//!             .field_with(
//!                 "port",
//!                 AttributeOptions::new().default_value("25565").immutable(),
//!                 |c: &Self| &c.port,
//!                 |c| &mut c.port,
//!             )
//!             .field("banned", |c: &Self| &c.banned, |c| &mut c.banned)
//!     }
//!
//!     fn create() -> anyhow::Result<Self> {
//!         Ok(Self::default())
//!     }
//! }
//!
//! let mut loader = ConfigLoader::<ServerConfig>::new()?;
//! loader.load()?;
//! ```

mod binder;
mod error;
mod holder;
mod operation;
mod options;
mod reader;
mod schema;
mod template;

pub use binder::{AttributeOrder, Binder, LoadSummary, ParseState, UnknownKey};
pub use error::{LoadError, Result};
pub use holder::{ConfigHolder, ConfigLoader};
pub use kvbind_coerce as coerce;
pub use kvbind_coerce::{
	CollectionKind, ConfigEnum, ConfigValue, FieldParser, ParserRegistry, Shape, TypeDescriptor,
	Value, config_enum,
};
pub use operation::{Hook, Operation};
pub use options::{AttributeOptions, ParserHint};
pub use reader::{Charset, RawConfigTable};
pub use schema::{Attribute, Schema};
