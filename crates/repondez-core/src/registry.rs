//! Media types known to the renderer, frozen before serving starts.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::Arc;

use repondez_negotiation::media_type::{
	APPLICATION_GOB, APPLICATION_JSON, APPLICATION_OCTET_STREAM, APPLICATION_XML, TEXT_CSV,
	TEXT_HTML, TEXT_PLAIN,
};

use crate::body::Body;
use crate::error::Result;

/// A renderer for a media type outside the built-in set.
///
/// Registered renderers are offered for every body, after the built-in
/// structural types, and consulted by the dispatcher in registration order.
pub trait ExtensionRenderer: Send + Sync {
	/// The media type offered during negotiation
	fn media_type(&self) -> &str;

	/// `Content-Type` header value sent with this media type
	fn content_type(&self) -> &str {
		self.media_type()
	}

	/// Path extensions (without the dot) that select this media type
	fn extensions(&self) -> &[&str] {
		&[]
	}

	/// Whether this renderer claims `media_type`
	fn handles(&self, media_type: &str) -> bool {
		self.media_type() == media_type
	}

	fn render(&self, body: &Body, sink: &mut dyn io::Write) -> Result<()>;
}

/// Content types, path extensions and extension renderers.
///
/// # Examples
///
/// ```
/// use repondez_core::MediaTypeRegistry;
///
/// let registry = MediaTypeRegistry::default();
/// assert_eq!(registry.content_type("text/plain"), Some("text/plain; charset=utf-8"));
/// assert_eq!(registry.content_type("application/json"), Some("application/json"));
/// assert_eq!(registry.extension("htm"), Some("text/html"));
/// assert!(!registry.is_registered("application/rss+xml"));
/// ```
#[derive(Clone)]
pub struct MediaTypeRegistry {
	content_types: HashMap<String, String>,
	extensions: HashMap<String, String>,
	extended_media_types: Vec<String>,
	renderers: Vec<Arc<dyn ExtensionRenderer>>,
}

impl MediaTypeRegistry {
	pub fn builder() -> MediaTypeRegistryBuilder {
		MediaTypeRegistryBuilder::default()
	}

	/// `Content-Type` value for a media type
	pub fn content_type(&self, media_type: &str) -> Option<&str> {
		self.content_types.get(media_type).map(String::as_str)
	}

	pub fn is_registered(&self, media_type: &str) -> bool {
		self.content_types.contains_key(media_type)
	}

	/// Media type selected by a path extension
	pub fn extension(&self, extension: &str) -> Option<&str> {
		self.extensions.get(extension).map(String::as_str)
	}

	/// The extension → media type map consumed by the negotiator
	pub fn extensions(&self) -> &HashMap<String, String> {
		&self.extensions
	}

	/// Media types added by extension renderers, in registration order
	pub fn extended_media_types(&self) -> &[String] {
		&self.extended_media_types
	}

	pub fn renderers(&self) -> impl Iterator<Item = &dyn ExtensionRenderer> {
		self.renderers.iter().map(|renderer| renderer.as_ref())
	}
}

impl Default for MediaTypeRegistry {
	fn default() -> Self {
		let content_types = [
			(TEXT_PLAIN, "text/plain; charset=utf-8"),
			(TEXT_HTML, "text/html; charset=utf-8"),
			(TEXT_CSV, "text/csv; charset=utf-8"),
			(APPLICATION_OCTET_STREAM, APPLICATION_OCTET_STREAM),
			(APPLICATION_JSON, APPLICATION_JSON),
			(APPLICATION_XML, APPLICATION_XML),
			(APPLICATION_GOB, APPLICATION_GOB),
		];
		let extensions = [
			("txt", TEXT_PLAIN),
			("html", TEXT_HTML),
			("htm", TEXT_HTML),
			("csv", TEXT_CSV),
			("json", APPLICATION_JSON),
			("xml", APPLICATION_XML),
			("bin", APPLICATION_OCTET_STREAM),
			("gob", APPLICATION_GOB),
		];

		Self {
			content_types: owned_map(&content_types),
			extensions: owned_map(&extensions),
			extended_media_types: Vec::new(),
			renderers: Vec::new(),
		}
	}
}

fn owned_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
	pairs
		.iter()
		.map(|(key, value)| (key.to_string(), value.to_string()))
		.collect()
}

impl fmt::Debug for MediaTypeRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MediaTypeRegistry")
			.field("content_types", &self.content_types)
			.field("extensions", &self.extensions)
			.field("extended_media_types", &self.extended_media_types)
			.field("renderers", &self.renderers.len())
			.finish()
	}
}

/// Builder for [`MediaTypeRegistry`], starting from the built-in types
#[derive(Debug, Default)]
pub struct MediaTypeRegistryBuilder {
	registry: MediaTypeRegistry,
}

impl MediaTypeRegistryBuilder {
	/// Adds an extension renderer along with its content type and path
	/// extensions
	pub fn register(mut self, renderer: impl ExtensionRenderer + 'static) -> Self {
		let media_type = renderer.media_type().to_string();
		tracing::debug!(%media_type, "registering extension renderer");

		self.registry
			.content_types
			.insert(media_type.clone(), renderer.content_type().to_string());
		for extension in renderer.extensions() {
			self.registry
				.extensions
				.insert(extension.to_string(), media_type.clone());
		}
		if !self.registry.extended_media_types.contains(&media_type) {
			self.registry.extended_media_types.push(media_type);
		}
		self.registry.renderers.push(Arc::new(renderer));
		self
	}

	/// Overrides or adds a `Content-Type` value
	pub fn content_type(mut self, media_type: impl Into<String>, content_type: impl Into<String>) -> Self {
		self.registry
			.content_types
			.insert(media_type.into(), content_type.into());
		self
	}

	/// Maps a path extension to a media type
	pub fn extension(mut self, extension: impl Into<String>, media_type: impl Into<String>) -> Self {
		self.registry
			.extensions
			.insert(extension.into().to_ascii_lowercase(), media_type.into());
		self
	}

	pub fn build(self) -> MediaTypeRegistry {
		self.registry
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	struct Yaml;

	impl ExtensionRenderer for Yaml {
		fn media_type(&self) -> &str {
			"application/yaml"
		}

		fn extensions(&self) -> &[&str] {
			&["yaml", "yml"]
		}

		fn render(&self, _body: &Body, sink: &mut dyn io::Write) -> Result<()> {
			sink.write_all(b"---\n")?;
			Ok(())
		}
	}

	#[rstest]
	#[case("txt", "text/plain")]
	#[case("html", "text/html")]
	#[case("htm", "text/html")]
	#[case("csv", "text/csv")]
	#[case("json", "application/json")]
	#[case("xml", "application/xml")]
	#[case("bin", "application/octet-stream")]
	#[case("gob", "application/vnd.golang.gob")]
	fn test_default_extensions(#[case] extension: &str, #[case] media_type: &str) {
		let registry = MediaTypeRegistry::default();
		assert_eq!(registry.extension(extension), Some(media_type));
		assert!(registry.is_registered(media_type));
	}

	#[test]
	fn test_register_extension_renderer() {
		let registry = MediaTypeRegistry::builder().register(Yaml).build();

		assert_eq!(registry.content_type("application/yaml"), Some("application/yaml"));
		assert_eq!(registry.extension("yml"), Some("application/yaml"));
		assert_eq!(registry.extended_media_types(), ["application/yaml"]);
		assert!(registry.renderers().any(|renderer| renderer.handles("application/yaml")));
	}

	#[test]
	fn test_builder_mappings() {
		let registry = MediaTypeRegistry::builder()
			.content_type("application/rss+xml", "application/rss+xml; charset=utf-8")
			.extension("RSS", "application/rss+xml")
			.build();

		assert!(registry.is_registered("application/rss+xml"));
		assert_eq!(registry.extension("rss"), Some("application/rss+xml"));
		assert!(registry.extended_media_types().is_empty());
	}
}
