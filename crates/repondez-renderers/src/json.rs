//! JSON renderer with optional line prefix and indentation.

use std::io;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use repondez_core::{Body, Data, RenderError, Result};
use repondez_negotiation::media_type::APPLICATION_JSON;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::Formatter;

use crate::renderer::Renderer;

/// Renders a payload as a JSON document followed by a newline.
///
/// Strings and HTML markers become JSON strings, byte payloads become
/// base64 strings, and a missing payload becomes `null`.
///
/// # Examples
///
/// ```
/// use repondez_core::Body;
/// use repondez_renderers::{JsonRenderer, Renderer};
///
/// let mut out = Vec::new();
/// JsonRenderer::default().render(&Body::new("Hello,\nWorld!"), &mut out).unwrap();
/// assert_eq!(out, b"\"Hello,\\nWorld!\"\n");
///
/// let mut out = Vec::new();
/// JsonRenderer::new("", "  ")
///     .render(&Body::new(serde_json::json!({"a": [1]})), &mut out)
///     .unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"a\": [\n    1\n  ]\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
	prefix: String,
	indent: String,
}

impl JsonRenderer {
	pub fn new(prefix: impl Into<String>, indent: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			indent: indent.into(),
		}
	}

	/// Encodes any serializable value followed by a newline
	pub fn encode<T: Serialize + ?Sized>(&self, value: &T, sink: &mut dyn io::Write) -> serde_json::Result<()> {
		if self.prefix.is_empty() && self.indent.is_empty() {
			serde_json::to_writer(&mut *sink, value)?;
		} else {
			let formatter = IndentFormatter::new(&self.prefix, &self.indent);
			let mut serializer = serde_json::Serializer::with_formatter(&mut *sink, formatter);
			value.serialize(&mut serializer)?;
		}
		sink.write_all(b"\n").map_err(serde_json::Error::io)
	}
}

impl Renderer for JsonRenderer {
	fn media_type(&self) -> &'static str {
		APPLICATION_JSON
	}

	fn render(&self, body: &Body, sink: &mut dyn io::Write) -> Result<()> {
		let encoded = match &body.data {
			Data::Null => self.encode(&Value::Null, sink),
			Data::Text(text) => self.encode(text, sink),
			Data::Html(markup) => self.encode(markup.as_str(), sink),
			Data::Bytes(bytes) => self.encode(&STANDARD.encode(bytes), sink),
			Data::Csv(csv) => self.encode(csv.value(), sink),
			Data::Value(value) => self.encode(value, sink),
		};
		encoded.map_err(json_error)
	}
}

fn json_error(error: serde_json::Error) -> RenderError {
	if error.is_io() {
		RenderError::Sink(error.into())
	} else {
		RenderError::encode(APPLICATION_JSON, error)
	}
}

/// Pretty printer that starts every line after the first with `prefix`,
/// then `indent` once per nesting level. Empty arrays and objects stay on
/// one line.
struct IndentFormatter<'a> {
	prefix: &'a [u8],
	indent: &'a [u8],
	depth: usize,
	has_value: bool,
}

impl<'a> IndentFormatter<'a> {
	fn new(prefix: &'a str, indent: &'a str) -> Self {
		Self {
			prefix: prefix.as_bytes(),
			indent: indent.as_bytes(),
			depth: 0,
			has_value: false,
		}
	}

	fn newline<W: ?Sized + io::Write>(&self, writer: &mut W) -> io::Result<()> {
		writer.write_all(b"\n")?;
		writer.write_all(self.prefix)?;
		for _ in 0..self.depth {
			writer.write_all(self.indent)?;
		}
		Ok(())
	}

	fn open<W: ?Sized + io::Write>(&mut self, writer: &mut W, bracket: &[u8]) -> io::Result<()> {
		self.depth += 1;
		self.has_value = false;
		writer.write_all(bracket)
	}

	fn close<W: ?Sized + io::Write>(&mut self, writer: &mut W, bracket: &[u8]) -> io::Result<()> {
		self.depth -= 1;
		if self.has_value {
			self.newline(writer)?;
		}
		self.has_value = true;
		writer.write_all(bracket)
	}

	fn element<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
		if !first {
			writer.write_all(b",")?;
		}
		self.newline(writer)
	}
}

impl Formatter for IndentFormatter<'_> {
	fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
		self.open(writer, b"[")
	}

	fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
		self.close(writer, b"]")
	}

	fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
		self.element(writer, first)
	}

	fn end_array_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
		self.has_value = true;
		Ok(())
	}

	fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
		self.open(writer, b"{")
	}

	fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
		self.close(writer, b"}")
	}

	fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
		self.element(writer, first)
	}

	fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
		writer.write_all(b": ")
	}

	fn end_object_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
		self.has_value = true;
		Ok(())
	}
}
