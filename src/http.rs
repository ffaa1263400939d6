//! Handlers and the request-level adapter.

pub use repondez_http::*;
