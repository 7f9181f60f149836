//! Line-oriented `key = value` reader.
//!
//! Each physical line is trimmed, stripped of Unicode control and invisible
//! characters (`\p{C}`), and has `&nbsp;` replaced by a space. Empty lines and
//! lines starting with `#` are skipped. A line ending in `\` continues onto
//! the next physical line. A complete logical line is split on its first `=`;
//! key and value are trimmed and later occurrences of a key overwrite earlier
//! ones.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::{LoadError, Result};


static INVISIBLE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\p{C}").expect("static pattern"));

const NBSP: &str = "&nbsp;";
const COMMENT: char = '#';
const CONTINUATION: char = '\\';

/// Character set a config file is decoded with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Charset {
	#[default]
	Utf8,
	/// ISO-8859-1; every byte maps to the code point of the same value.
	Latin1,
}

impl Charset {
	fn decode(self, bytes: Vec<u8>) -> io::Result<String> {
		match self {
			Charset::Utf8 => {
				String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
			}
			Charset::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
		}
	}
}

/// Raw keys and values of one config file, in first-seen key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfigTable {
	entries: IndexMap<String, String>,
}

impl RawConfigTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Reads `path`. A file that does not exist reads as an empty table.
	///
	/// # Errors
	///
	/// [`LoadError::Io`] when the file exists but cannot be opened, a read
	/// fails part-way, or a line is not valid in `charset`.
	pub fn read_file(path: &Path, charset: Charset) -> Result<Self> {
		let file = match File::open(path) {
			Ok(file) => file,
			Err(error) if error.kind() == io::ErrorKind::NotFound => {
				tracing::debug!(path = %path.display(), "config file not found, using an empty table");
				return Ok(Self::new());
			}
			Err(error) => {
				return Err(LoadError::Io {
					path: path.to_path_buf(),
					error,
				});
			}
		};
		Self::read(BufReader::new(file), charset).map_err(|error| {
			tracing::error!(path = %path.display(), %error, "config file loading failed");
			LoadError::Io {
				path: path.to_path_buf(),
				error,
			}
		})
	}

	/// Reads every line of `reader`. The reader is consumed and dropped on
	/// return, including on error.
	pub fn read<R: BufRead>(mut reader: R, charset: Charset) -> io::Result<Self> {
		let mut table = Self::new();
		let mut assembler = LineAssembler::default();
		let mut buf = Vec::new();
		let mut line_number = 0usize;
		loop {
			buf.clear();
			let read = reader.read_until(b'\n', &mut buf).inspect_err(|error| {
				tracing::warn!(line = line_number + 1, %error, "read failed");
			})?;
			if read == 0 {
				break;
			}
			line_number += 1;
			let line = charset.decode(std::mem::take(&mut buf)).inspect_err(|error| {
				tracing::warn!(line = line_number, %error, "line is not valid in the selected charset");
			})?;
			assembler.push(&line, line_number, &mut table);
		}
		assembler.finish();
		Ok(table)
	}

	/// Parses in-memory text.
	pub fn parse_str(text: &str) -> Self {
		let mut table = Self::new();
		let mut assembler = LineAssembler::default();
		for (index, line) in text.lines().enumerate() {
			assembler.push(line, index + 1, &mut table);
		}
		assembler.finish();
		table
	}

	/// Raw value for `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries.get(key).map(String::as_str)
	}

	/// Raw value for `key`, or `default` when the key is absent.
	pub fn get_or<'a>(&'a self, key: &str, default: Option<&'a str>) -> Option<&'a str> {
		self.get(key).or(default)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Sets `key`, returning the value it replaced. A replaced key keeps its
	/// original position.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
		self.entries.insert(key.into(), value.into())
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	pub fn values(&self) -> impl Iterator<Item = &str> {
		self.entries.values().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawConfigTable {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut table = Self::new();
		for (key, value) in iter {
			table.insert(key, value);
		}
		table
	}
}

/// Joins continued physical lines into logical `key = value` records.
#[derive(Debug, Default)]
struct LineAssembler {
	pending: String,
	started_at: usize,
}

impl LineAssembler {
	fn push(&mut self, physical: &str, line_number: usize, table: &mut RawConfigTable) {
		let trimmed = physical.trim();
		if trimmed.is_empty() {
			return;
		}
		let stripped = INVISIBLE.replace_all(trimmed, "");
		let cleaned = stripped.replace(NBSP, " ");
		let line = cleaned.trim();
		if line.is_empty() || line.starts_with(COMMENT) {
			return;
		}

		if self.pending.is_empty() {
			self.started_at = line_number;
		}
		match line.strip_suffix(CONTINUATION) {
			Some(head) => self.pending.push_str(head),
			None => {
				self.pending.push_str(line);
				let logical = std::mem::take(&mut self.pending);
				self.complete(&logical, table);
			}
		}
	}

	fn complete(&self, logical: &str, table: &mut RawConfigTable) {
		let Some((key, value)) = logical.split_once('=') else {
			tracing::warn!(line = self.started_at, content = logical, "skipping config line without '='");
			return;
		};
		let key = key.trim();
		let value = value.trim();
		if let Some(previous) = table.insert(key, value) {
			tracing::debug!(key, %previous, value, "config key repeated, later value wins");
		}
	}

	fn finish(self) {
		if !self.pending.is_empty() {
			tracing::debug!(
				line = self.started_at,
				content = %self.pending,
				"dropping unterminated continuation at end of input"
			);
		}
	}
}
