//! Template-backed renderers for `text/html` and `text/plain`.
//!
//! Templates see the payload as `data`. When the payload is an object its
//! top-level keys are also available directly, so `{{ title }}` works as
//! well as `{{ data.title }}`.

use std::io;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use repondez_core::{Body, Data, RenderError, Result};
use repondez_negotiation::media_type::{TEXT_HTML, TEXT_PLAIN};
use serde_json::Value;
use tera::{Context, Tera};

use crate::renderer::Renderer;

/// `text/html`: the named HTML template, or an HTML-marked payload as is.
///
/// Without a template set the template name is ignored.
#[derive(Debug, Clone, Copy)]
pub struct HtmlRenderer<'t> {
	templates: Option<&'t Tera>,
}

impl<'t> HtmlRenderer<'t> {
	pub fn new(templates: Option<&'t Tera>) -> Self {
		Self { templates }
	}
}

impl Renderer for HtmlRenderer<'_> {
	fn media_type(&self) -> &'static str {
		TEXT_HTML
	}

	fn render(&self, body: &Body, sink: &mut dyn io::Write) -> Result<()> {
		if !body.template_name.is_empty()
			&& let Some(set) = self.templates
		{
			let name = &body.template_name;
			if !contains(set, name) {
				return Err(RenderError::HtmlTemplateMiss(name.clone()));
			}
			return execute(set, name, &body.data, sink);
		}

		let Data::Html(markup) = &body.data else {
			return Err(RenderError::NotHtml);
		};
		sink.write_all(markup.as_str().as_bytes())?;
		Ok(())
	}
}

/// `text/plain`: the named text template, or a string payload verbatim.
///
/// Without a template set the template name is ignored.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer<'t> {
	templates: Option<&'t Tera>,
}

impl<'t> TextRenderer<'t> {
	pub fn new(templates: Option<&'t Tera>) -> Self {
		Self { templates }
	}
}

impl Renderer for TextRenderer<'_> {
	fn media_type(&self) -> &'static str {
		TEXT_PLAIN
	}

	fn render(&self, body: &Body, sink: &mut dyn io::Write) -> Result<()> {
		if !body.template_name.is_empty()
			&& let Some(set) = self.templates
		{
			let name = &body.template_name;
			if !contains(set, name) {
				return Err(RenderError::TextTemplateMiss(name.clone()));
			}
			return execute(set, name, &body.data, sink);
		}

		let Data::Text(text) = &body.data else {
			return Err(RenderError::NotAString);
		};
		sink.write_all(text.as_bytes())?;
		Ok(())
	}
}

fn contains(templates: &Tera, name: &str) -> bool {
	templates.get_template_names().any(|candidate| candidate == name)
}

fn execute(templates: &Tera, name: &str, data: &Data, sink: &mut dyn io::Write) -> Result<()> {
	let context = context_for(data);
	tracing::debug!(template = name, "executing template");
	templates
		.render_to(name, &context, sink)
		.map_err(|error| RenderError::Template {
			name: name.to_string(),
			source: Box::new(error),
		})
}

fn context_for(data: &Data) -> Context {
	let value = match data {
		Data::Null => Value::Null,
		Data::Text(text) => Value::String(text.clone()),
		Data::Html(markup) => Value::String(markup.as_str().to_string()),
		Data::Bytes(bytes) => Value::String(STANDARD.encode(bytes)),
		Data::Csv(csv) => csv.value().clone(),
		Data::Value(value) => value.clone(),
	};

	let mut context = Context::new();
	if let Value::Object(fields) = &value {
		for (key, field) in fields {
			context.insert(key.as_str(), field);
		}
	}
	context.insert("data", &value);
	context
}
