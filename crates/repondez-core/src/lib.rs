//! # Repondez Core
//!
//! The value a handler returns and everything needed to decide how it can
//! be represented:
//!
//! - [`Body`]: payload, template name, status and redirect location
//! - [`Data`]: the payload variants (text, HTML, bytes, CSV rows, structured)
//! - [`Config`]: template sets and encoder indentation
//! - [`MediaTypeRegistry`]: content types, path extensions and extension
//!   renderers, frozen at startup
//! - [`RenderError`]: every way rendering can fail

pub mod body;
pub mod config;
pub mod data;
pub mod error;
pub mod offers;
pub mod registry;
pub mod status;

pub use body::Body;
pub use config::{Config, ConfigBuilder};
pub use data::{CsvData, CsvWriter, Data, Html, MarshalCsv};
pub use error::{BoxError, RenderError, Result};
pub use registry::{ExtensionRenderer, MediaTypeRegistry, MediaTypeRegistryBuilder};

pub use http::StatusCode;
