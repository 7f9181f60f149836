//! Top-level config holders.
//!
//! A [`ConfigHolder`] is a type that owns its config file: it names the file,
//! declares its [`Schema`] and knows how to construct a blank instance.
//! [`ConfigLoader`] creates that instance once and refreshes it from disk on
//! every [`ConfigLoader::load`], keeping immutable attributes fixed after
//! their first successful assignment.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use kvbind_coerce::ParserRegistry;

use crate::binder::{AttributeOrder, Binder, LoadSummary};
use crate::error::{LoadError, Result};
use crate::reader::{Charset, RawConfigTable};
use crate::schema::Schema;

/// A config type bound to one file.
pub trait ConfigHolder: Sized + 'static {
	/// Label used in log messages.
	const NAME: &'static str;

	/// File path, relative to the loader's base directory unless absolute.
	fn config_path() -> PathBuf;

	fn charset() -> Charset {
		Charset::Utf8
	}

	fn order() -> AttributeOrder {
		AttributeOrder::Declared
	}

	fn schema() -> Schema<Self>;

	/// Creates the instance attributes are loaded into.
	fn create() -> anyhow::Result<Self>;
}

/// Owns one [`ConfigHolder`] instance and reloads it from disk.
pub struct ConfigLoader<T> {
	base_dir: PathBuf,
	binder: Binder<T>,
	instance: T,
}

impl<T: ConfigHolder> ConfigLoader<T> {
	/// Constructs the holder, resolving its path against the working
	/// directory.
	pub fn new() -> Result<Self> {
		let base_dir = std::env::current_dir().map_err(|error| LoadError::Io {
			path: PathBuf::from("."),
			error,
		})?;
		Self::with_base_dir(base_dir)
	}

	/// Constructs the holder, resolving its path against `base_dir`.
	pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Result<Self> {
		let instance = T::create().map_err(|reason| {
			tracing::error!(config = T::NAME, error = %reason, "cannot construct config");
			LoadError::Construct {
				config: T::NAME,
				reason,
			}
		})?;
		Ok(Self {
			base_dir: base_dir.into(),
			binder: Binder::new(T::schema()).with_order(T::order()),
			instance,
		})
	}

	/// Coerces with `registry` instead of the shared default.
	pub fn with_registry(mut self, registry: Arc<ParserRegistry>) -> Self {
		self.binder = self.binder.with_registry(registry);
		self
	}

	/// Resolved location of the config file.
	pub fn path(&self) -> PathBuf {
		self.base_dir.join(T::config_path())
	}

	pub fn base_dir(&self) -> &Path {
		&self.base_dir
	}

	/// Reads the config file and binds it onto the held instance.
	///
	/// A missing file binds an empty table, so every attribute falls back to
	/// its declared default raw value or keeps its current value.
	pub fn load(&mut self) -> Result<LoadSummary> {
		tracing::info!("start loading config [{}]", T::NAME);
		let path = self.path();
		let table = RawConfigTable::read_file(&path, T::charset())?;
		let summary = self.binder.load(&mut self.instance, &table);
		tracing::info!(
			path = %path.display(),
			"loaded config [{}]: {} of {} attributes",
			T::NAME,
			summary.succeeded,
			summary.eligible
		);
		Ok(summary)
	}

	pub fn config(&self) -> &T {
		&self.instance
	}

	pub fn config_mut(&mut self) -> &mut T {
		&mut self.instance
	}

	pub fn into_config(self) -> T {
		self.instance
	}

	pub fn binder(&self) -> &Binder<T> {
		&self.binder
	}

	/// Renders a default config file from the held instance.
	pub fn render_template(&self) -> String {
		self.binder.schema().render_template(&self.instance)
	}

	/// Writes [`Self::render_template`] to the config path unless a file is
	/// already there. Returns whether a file was written.
	pub fn write_template(&self) -> Result<bool> {
		let path = self.path();
		if path.exists() {
			return Ok(false);
		}
		let io_error = |error| LoadError::Io {
			path: path.clone(),
			error,
		};
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent).map_err(io_error)?;
		}
		std::fs::write(&path, self.render_template()).map_err(io_error)?;
		tracing::info!(config = T::NAME, path = %path.display(), "wrote default config");
		Ok(true)
	}
}

impl<T: std::fmt::Debug> std::fmt::Debug for ConfigLoader<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ConfigLoader")
			.field("base_dir", &self.base_dir)
			.field("binder", &self.binder)
			.field("instance", &self.instance)
			.finish()
	}
}
