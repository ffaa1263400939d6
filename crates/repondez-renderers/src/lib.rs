//! # Repondez Renderers
//!
//! Turns a [`Body`](repondez_core::Body) into bytes for one negotiated media
//! type.
//!
//! | Media type | Renderer |
//! |---|---|
//! | `text/html` | [`HtmlRenderer`]: HTML template, or an [`Html`](repondez_core::Html) payload |
//! | `text/plain` | [`TextRenderer`]: text template, or a string payload |
//! | `application/json` | [`JsonRenderer`] |
//! | `application/xml` | [`XmlRenderer`] |
//! | `text/csv` | [`CsvRenderer`] |
//! | `application/octet-stream` | [`OctetStreamRenderer`] |
//! | `application/vnd.golang.gob` | [`GobRenderer`] |
//! | anything else | registered [`ExtensionRenderer`](repondez_core::ExtensionRenderer)s |
//!
//! [`RenderDispatcher`] picks the renderer. With the `msgpack` feature,
//! [`MsgpackRenderer`] can be registered for `application/vnd.msgpack`.

pub mod csv_renderer;
pub mod dispatcher;
pub mod gob;
pub mod json;
pub mod octet_stream;
pub mod renderer;
pub mod templates;
pub mod xml;

#[cfg(feature = "msgpack")]
pub mod msgpack;

pub use csv_renderer::CsvRenderer;
pub use dispatcher::RenderDispatcher;
pub use gob::{GobError, GobRenderer};
pub use json::JsonRenderer;
pub use octet_stream::OctetStreamRenderer;
pub use renderer::Renderer;
pub use templates::{HtmlRenderer, TextRenderer};
pub use xml::{XmlError, XmlRenderer};

#[cfg(feature = "msgpack")]
pub use msgpack::{APPLICATION_MSGPACK, MsgpackRenderer};
