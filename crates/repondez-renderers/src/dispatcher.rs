//! Routes a negotiated media type to its renderer.

use std::io;

use repondez_core::{Body, Config, MediaTypeRegistry, RenderError, Result};
use repondez_negotiation::media_type::{
	APPLICATION_GOB, APPLICATION_JSON, APPLICATION_OCTET_STREAM, APPLICATION_XML, TEXT_CSV,
	TEXT_HTML, TEXT_PLAIN,
};

use crate::csv_renderer::CsvRenderer;
use crate::gob::GobRenderer;
use crate::json::JsonRenderer;
use crate::octet_stream::OctetStreamRenderer;
use crate::renderer::Renderer;
use crate::templates::{HtmlRenderer, TextRenderer};
use crate::xml::XmlRenderer;

/// Renders bodies with the built-in renderers, falling back to the
/// registry's extension renderers for other media types.
///
/// # Examples
///
/// ```
/// use repondez_core::{Body, Config, MediaTypeRegistry, RenderError};
/// use repondez_renderers::RenderDispatcher;
///
/// let config = Config::default();
/// let registry = MediaTypeRegistry::default();
/// let dispatcher = RenderDispatcher::new(&config, &registry);
///
/// let mut out = Vec::new();
/// dispatcher.render(&Body::new("Hello!"), "text/plain", &mut out).unwrap();
/// assert_eq!(out, b"Hello!");
///
/// let err = dispatcher.render(&Body::new("Hello!"), "image/png", &mut out).unwrap_err();
/// assert!(matches!(err, RenderError::UnhandledMediaType(_)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RenderDispatcher<'a> {
	config: &'a Config,
	registry: &'a MediaTypeRegistry,
}

impl<'a> RenderDispatcher<'a> {
	pub fn new(config: &'a Config, registry: &'a MediaTypeRegistry) -> Self {
		Self { config, registry }
	}

	pub fn render(&self, body: &Body, media_type: &str, sink: &mut dyn io::Write) -> Result<()> {
		let config = self.config;
		match media_type {
			TEXT_HTML => HtmlRenderer::new(config.html_templates()).render(body, sink),
			TEXT_PLAIN => TextRenderer::new(config.text_templates()).render(body, sink),
			APPLICATION_JSON => {
				JsonRenderer::new(config.json_prefix(), config.json_indent()).render(body, sink)
			}
			APPLICATION_XML => {
				XmlRenderer::new(config.xml_prefix(), config.xml_indent()).render(body, sink)
			}
			TEXT_CSV => CsvRenderer::new().render(body, sink),
			APPLICATION_OCTET_STREAM => OctetStreamRenderer.render(body, sink),
			APPLICATION_GOB => GobRenderer.render(body, sink),
			other => match self.registry.renderers().find(|renderer| renderer.handles(other)) {
				Some(renderer) => renderer.render(body, sink),
				None => Err(RenderError::UnhandledMediaType(other.to_string())),
			},
		}
	}
}
