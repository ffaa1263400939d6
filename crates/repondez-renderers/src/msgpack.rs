//! MessagePack extension renderer.
//!
//! Register it to offer `application/vnd.msgpack` (path extension
//! `.msgpack`) for every body:
//!
//! ```
//! use repondez_core::MediaTypeRegistry;
//! use repondez_renderers::MsgpackRenderer;
//!
//! let registry = MediaTypeRegistry::builder().register(MsgpackRenderer).build();
//! assert_eq!(registry.extension("msgpack"), Some("application/vnd.msgpack"));
//! ```

use std::io;

use repondez_core::{Body, Data, ExtensionRenderer, RenderError, Result};

/// `application/vnd.msgpack`
pub const APPLICATION_MSGPACK: &str = "application/vnd.msgpack";

/// Encodes payloads with `rmp-serde`; byte payloads become msgpack `bin`
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgpackRenderer;

impl ExtensionRenderer for MsgpackRenderer {
	fn media_type(&self) -> &str {
		APPLICATION_MSGPACK
	}

	fn extensions(&self) -> &[&str] {
		&["msgpack"]
	}

	fn render(&self, body: &Body, sink: &mut dyn io::Write) -> Result<()> {
		let mut writer = sink;
		let encoded = match &body.data {
			Data::Null => rmp_serde::encode::write(&mut writer, &()),
			Data::Text(text) => rmp_serde::encode::write(&mut writer, text),
			Data::Html(markup) => rmp_serde::encode::write(&mut writer, &markup.as_str()),
			Data::Bytes(bytes) => {
				rmp_serde::encode::write(&mut writer, &serde_bytes::Bytes::new(bytes))
			}
			Data::Csv(csv) => rmp_serde::encode::write(&mut writer, csv.value()),
			Data::Value(value) => rmp_serde::encode::write(&mut writer, value),
		};
		encoded.map_err(|error| RenderError::encode(APPLICATION_MSGPACK, error))
	}
}
