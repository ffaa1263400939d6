//! Encoders for each built-in media type.

pub use repondez_renderers::*;
