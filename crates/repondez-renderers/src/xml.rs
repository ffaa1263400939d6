//! XML renderer.
//!
//! Scalars are wrapped in an element named after their type (`string`,
//! `int`, `uint`, `float64`, `bool`), objects in `<root>` with one child per
//! key, and arrays repeat the enclosing element. `null` produces nothing.

use std::io;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use repondez_core::{BoxError, Body, Data, RenderError, Result};
use repondez_negotiation::media_type::APPLICATION_XML;
use serde_json::Value;
use thiserror::Error;

use crate::renderer::Renderer;

/// XML encoding failures
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum XmlError {
	/// An object key that cannot be used as an element name
	#[error("xml: `{0}` is not a valid element name")]
	InvalidName(String),
	/// The underlying writer failed
	#[error("xml: {0}")]
	Write(#[source] BoxError),
}

/// Renders payloads as XML with optional prefix and indentation.
///
/// # Examples
///
/// ```
/// use repondez_core::Body;
/// use repondez_renderers::{Renderer, XmlRenderer};
/// use serde_json::json;
///
/// let mut out = Vec::new();
/// XmlRenderer::default().render(&Body::new(""), &mut out).unwrap();
/// assert_eq!(out, b"<string></string>");
///
/// let mut out = Vec::new();
/// XmlRenderer::new("", " ")
///     .render(&Body::new(json!({"status": "OK", "number": 3})), &mut out)
///     .unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "<root>\n <number>3</number>\n <status>OK</status>\n</root>"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct XmlRenderer {
	prefix: String,
	indent: String,
}

impl XmlRenderer {
	pub fn new(prefix: impl Into<String>, indent: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			indent: indent.into(),
		}
	}

	pub fn encode(&self, data: &Data, sink: &mut dyn io::Write) -> std::result::Result<(), XmlError> {
		let mut printer = Printer {
			writer: Writer::new(sink),
			prefix: &self.prefix,
			indent: &self.indent,
			depth: 0,
			indented_in: false,
			put_newline: false,
		};

		match data {
			Data::Null => Ok(()),
			Data::Text(text) => printer.scalar("string", text),
			Data::Html(markup) => printer.scalar("HTML", markup.as_str()),
			Data::Bytes(bytes) => printer.scalar("bytes", &STANDARD.encode(bytes)),
			Data::Csv(csv) => printer.document(csv.value()),
			Data::Value(value) => printer.document(value),
		}
	}
}

impl Renderer for XmlRenderer {
	fn media_type(&self) -> &'static str {
		APPLICATION_XML
	}

	fn render(&self, body: &Body, sink: &mut dyn io::Write) -> Result<()> {
		self.encode(&body.data, sink)
			.map_err(|error| RenderError::encode(APPLICATION_XML, error))
	}
}

struct Printer<'a, 'w> {
	writer: Writer<&'w mut dyn io::Write>,
	prefix: &'a str,
	indent: &'a str,
	depth: usize,
	indented_in: bool,
	put_newline: bool,
}

type XmlResult = std::result::Result<(), XmlError>;

fn write_error<E>(error: E) -> XmlError
where
	E: std::error::Error + Send + Sync + 'static,
{
	XmlError::Write(Box::new(error))
}

impl Printer<'_, '_> {
	fn document(&mut self, value: &Value) -> XmlResult {
		match value {
			Value::Null => Ok(()),
			Value::Array(items) => items.iter().try_for_each(|item| self.document(item)),
			Value::Object(_) => self.element("root", value),
			scalar => self.element(type_name(scalar), scalar),
		}
	}

	fn element(&mut self, name: &str, value: &Value) -> XmlResult {
		match value {
			Value::Null => Ok(()),
			Value::Array(items) => items.iter().try_for_each(|item| self.element(name, item)),
			Value::Object(fields) => {
				self.start(name)?;
				for (key, field) in fields {
					if !is_name(key) {
						return Err(XmlError::InvalidName(key.clone()));
					}
					self.element(key, field)?;
				}
				self.end(name)
			}
			Value::String(text) => self.scalar(name, text),
			scalar => self.scalar(name, &scalar.to_string()),
		}
	}

	fn scalar(&mut self, name: &str, text: &str) -> XmlResult {
		self.start(name)?;
		if !text.is_empty() {
			self.writer
				.write_event(Event::Text(BytesText::new(text)))
				.map_err(write_error)?;
		}
		self.end(name)
	}

	fn start(&mut self, name: &str) -> XmlResult {
		self.write_indent(1)?;
		self.writer
			.write_event(Event::Start(BytesStart::new(name)))
			.map_err(write_error)
	}

	fn end(&mut self, name: &str) -> XmlResult {
		self.write_indent(-1)?;
		self.writer
			.write_event(Event::End(BytesEnd::new(name)))
			.map_err(write_error)
	}

	/// An end tag directly after its start tag or text stays on the same
	/// line; everything else starts a new prefixed, indented line.
	fn write_indent(&mut self, depth_delta: i8) -> XmlResult {
		if self.prefix.is_empty() && self.indent.is_empty() {
			return Ok(());
		}
		if depth_delta < 0 {
			self.depth = self.depth.saturating_sub(1);
			if self.indented_in {
				self.indented_in = false;
				return Ok(());
			}
		}

		let sink = self.writer.get_mut();
		if self.put_newline {
			sink.write_all(b"\n").map_err(write_error)?;
		} else {
			self.put_newline = true;
		}
		sink.write_all(self.prefix.as_bytes()).map_err(write_error)?;
		for _ in 0..self.depth {
			sink.write_all(self.indent.as_bytes()).map_err(write_error)?;
		}

		if depth_delta > 0 {
			self.depth += 1;
			self.indented_in = true;
		}
		Ok(())
	}
}

fn type_name(scalar: &Value) -> &'static str {
	match scalar {
		Value::Bool(_) => "bool",
		Value::Number(number) if number.is_i64() => "int",
		Value::Number(number) if number.is_u64() => "uint",
		Value::Number(_) => "float64",
		_ => "string",
	}
}

fn is_name(name: &str) -> bool {
	let mut chars = name.chars();
	let Some(first) = chars.next() else {
		return false;
	};
	(first.is_alphabetic() || first == '_')
		&& chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[cfg(test)]
mod tests {
	use super::*;
	use repondez_core::Html;
	use rstest::rstest;
	use serde_json::json;

	fn encode(renderer: &XmlRenderer, data: Data) -> String {
		let mut out = Vec::new();
		renderer.encode(&data, &mut out).unwrap();
		String::from_utf8(out).unwrap()
	}

	#[rstest]
	#[case(Data::Null, "")]
	#[case(Data::from(""), "<string></string>")]
	#[case(Data::from("Hello <input> World!"), "<string>Hello &lt;input&gt; World!</string>")]
	#[case(Data::from(Html::from("<b>")), "<HTML>&lt;b&gt;</HTML>")]
	#[case(Data::from(vec![1u8, 2, 3]), "<bytes>AQID</bytes>")]
	#[case(Data::from(json!(2)), "<int>2</int>")]
	#[case(Data::from(json!(-2)), "<int>-2</int>")]
	#[case(Data::from(json!(u64::MAX)), "<uint>18446744073709551615</uint>")]
	#[case(Data::from(json!(1.5)), "<float64>1.5</float64>")]
	#[case(Data::from(json!(true)), "<bool>true</bool>")]
	#[case(Data::from(json!(["a", 1])), "<string>a</string><int>1</int>")]
	#[case(Data::from(json!({})), "<root></root>")]
	#[case(
		Data::from(json!({"tags": ["x", "y"], "skip": null, "inner": {"n": 1}})),
		"<root><inner><n>1</n></inner><tags>x</tags><tags>y</tags></root>"
	)]
	fn test_compact(#[case] data: Data, #[case] expected: &str) {
		assert_eq!(encode(&XmlRenderer::default(), data), expected);
	}

	#[test]
	fn test_prefix_and_indent() {
		let renderer = XmlRenderer::new("# ", "  ");
		let out = encode(&renderer, Data::from(json!({"inner": {"n": 1}, "s": ""})));
		assert_eq!(
			out,
			"# <root>\n#   <inner>\n#     <n>1</n>\n#   </inner>\n#   <s></s>\n# </root>"
		);
	}

	#[test]
	fn test_top_level_sequence_is_indented() {
		let renderer = XmlRenderer::new("", "\t");
		let out = encode(&renderer, Data::from(json!(["a", "b"])));
		assert_eq!(out, "<string>a</string>\n<string>b</string>");
	}

	#[test]
	fn test_invalid_element_name() {
		let mut out = Vec::new();
		let err = XmlRenderer::default()
			.encode(&Data::from(json!({"not a name": 1})), &mut out)
			.unwrap_err();
		assert!(matches!(err, XmlError::InvalidName(name) if name == "not a name"));
	}

	#[test]
	fn test_render_wraps_encoder_errors() {
		let mut out = Vec::new();
		let err = XmlRenderer::default()
			.render(&Body::new(json!({"1st": true})), &mut out)
			.unwrap_err();
		assert!(matches!(err, RenderError::Encode { ref media_type, .. } if media_type == APPLICATION_XML));
	}
}
