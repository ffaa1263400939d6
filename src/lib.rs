//! # Repondez
//!
//! Server-driven content negotiation for HTTP responses. A handler returns a
//! single [`Body`]; the [`Responder`] renders it as HTML, plain text, JSON,
//! XML, CSV, raw bytes, gob, or any media type registered at startup,
//! whichever the client's `Accept` header or the URL path extension asks for.
//!
//! ## Crates
//!
//! - [`negotiation`]: `Accept` parsing and offer selection
//! - [`core`]: the body, payload variants, configuration and media type registry
//! - [`renderers`]: one encoder per media type plus the dispatcher
//! - [`http`]: the handler trait and the request-level adapter
//!
//! ## Feature Flags
//!
//! - `msgpack` (default): the `application/vnd.msgpack` extension renderer
//!
//! ## Quick Example
//!
//! ```
//! use repondez::prelude::*;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut templates = tera::Tera::default();
//! templates.add_raw_template("greeting", "<p>{{ data }}</p>").unwrap();
//!
//! let responder = Responder::new(
//!     Config::builder().html_templates(templates).build(),
//!     MediaTypeRegistry::default(),
//! );
//! let handler = handler_fn(|_writer, _request| Body::new("Hi & bye").with_template("greeting"));
//!
//! let request = hyper::Request::builder()
//!     .uri("/")
//!     .header("accept", "text/html")
//!     .body(bytes::Bytes::new())
//!     .unwrap();
//! let response = responder.respond(&handler, &request).await;
//!
//! assert_eq!(response.status, StatusCode::OK);
//! assert_eq!(response.body, "<p>Hi &amp; bye</p>");
//! # });
//! ```

pub mod core;
pub mod http;
pub mod negotiation;
pub mod renderers;

pub use repondez_core::{
	Body, Config, ConfigBuilder, CsvData, CsvWriter, Data, ExtensionRenderer, Html, MarshalCsv,
	MediaTypeRegistry, MediaTypeRegistryBuilder, RenderError, StatusCode,
};
pub use repondez_http::{FnHandler, Handler, Request, Responder, Response, ResponseWriter, handler_fn};
pub use repondez_negotiation::{AcceptHeader, ContentNegotiator, Negotiation, Proposal};
pub use repondez_renderers::RenderDispatcher;

#[cfg(feature = "msgpack")]
pub use repondez_renderers::MsgpackRenderer;

pub use async_trait::async_trait;

pub mod prelude {
	pub use crate::{
		Body, Config, CsvData, CsvWriter, Data, ExtensionRenderer, Handler, Html, MarshalCsv,
		MediaTypeRegistry, RenderError, Request, Responder, Response, ResponseWriter, StatusCode,
		handler_fn,
	};

	#[cfg(feature = "msgpack")]
	pub use crate::MsgpackRenderer;

	// External
	pub use async_trait::async_trait;
}
