//! Default config file rendering.

use std::fmt::Write;

use kvbind_coerce::Value;

use crate::schema::{Attribute, Schema};

const DEFAULT_PRIMARY: &str = ";";
const DEFAULT_SECONDARY: &str = "=";

impl<T> Schema<T> {
	/// Renders a config file holding every loadable attribute.
	///
	/// Each attribute becomes its comment (one `# ` line per comment line)
	/// followed by `key = value`, where the value is the declared default raw
	/// value, or else `target`'s current value joined with the attribute's
	/// delimiters. An attribute with neither a default raw value nor a
	/// current value is written as a commented-out `# key =` line. Ignored and
	/// not-in-config attributes are left out.
	/// Attributes are separated by a blank line.
	pub fn render_template(&self, target: &T) -> String {
		let mut out = String::new();
		for attribute in self.attributes() {
			let options = attribute.options();
			if options.ignored || options.not_in_config {
				continue;
			}
			if !out.is_empty() {
				out.push('\n');
			}
			if let Some(comment) = &options.comment {
				for line in comment.lines() {
					let _ = writeln!(out, "# {line}");
				}
			}
			match &options.default_value {
				Some(raw) => {
					let _ = writeln!(out, "{} = {raw}", attribute.key());
				}
				None => {
					let value = attribute.read(target);
					if value.is_null() {
						// Commented out so the key stays absent on reload.
						let _ = writeln!(out, "# {} =", attribute.key());
					} else {
						let _ = writeln!(out, "{} = {}", attribute.key(), current_raw(attribute, &value));
					}
				}
			}
		}
		out
	}
}

fn current_raw<T>(attribute: &Attribute<T>, value: &Value) -> String {
	let options = attribute.options();
	let primary = joiner(attribute, options.primary_delimiter.as_deref(), DEFAULT_PRIMARY);
	let secondary = joiner(attribute, options.secondary_delimiter.as_deref(), DEFAULT_SECONDARY);
	value.to_raw(primary, secondary)
}

/// Text to join elements with: the delimiter pattern itself when it matches
/// only its own literal text.
fn joiner<'a, T>(attribute: &Attribute<T>, pattern: Option<&'a str>, fallback: &'a str) -> &'a str {
	match pattern {
		Some(pattern) if regex::escape(pattern) == pattern => pattern,
		Some(pattern) => {
			tracing::warn!(
				attribute = attribute.name(),
				pattern,
				fallback,
				"delimiter is not a literal, rendering with the default"
			);
			fallback
		}
		None => fallback,
	}
}
