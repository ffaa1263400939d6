//! Renderer trait

use std::io;

use repondez_core::{Body, Result};

/// Writes a body in one media type.
pub trait Renderer {
	/// The media type this renderer produces
	fn media_type(&self) -> &'static str;

	fn render(&self, body: &Body, sink: &mut dyn io::Write) -> Result<()>;
}
