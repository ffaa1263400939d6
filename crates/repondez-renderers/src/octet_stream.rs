//! Raw byte payloads

use std::io;

use repondez_core::{Body, Data, RenderError, Result};
use repondez_negotiation::media_type::APPLICATION_OCTET_STREAM;

use crate::renderer::Renderer;

/// Writes a byte payload verbatim
#[derive(Debug, Clone, Copy, Default)]
pub struct OctetStreamRenderer;

impl Renderer for OctetStreamRenderer {
	fn media_type(&self) -> &'static str {
		APPLICATION_OCTET_STREAM
	}

	fn render(&self, body: &Body, sink: &mut dyn io::Write) -> Result<()> {
		let Data::Bytes(bytes) = &body.data else {
			return Err(RenderError::NotBytes);
		};
		sink.write_all(bytes)?;
		Ok(())
	}
}
