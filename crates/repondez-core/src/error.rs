//! Rendering errors

use thiserror::Error;

/// Boxed source of an encoder failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures surfaced by renderers to the adapter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
	/// A template name was set but the HTML template set lacks it
	#[error("template `{0}` was set but is not in the HTML template set")]
	HtmlTemplateMiss(String),
	/// A template name was set but the text template set lacks it
	#[error("template `{0}` was set but is not in the text template set")]
	TextTemplateMiss(String),
	/// `text/html` without a template needs an HTML-marked payload
	#[error("payload is not marked as HTML")]
	NotHtml,
	/// `text/plain` without a template needs a string payload
	#[error("payload is not a string")]
	NotAString,
	/// `text/csv` needs a payload that marshals CSV rows
	#[error("payload does not marshal to CSV")]
	NotCsv,
	/// `application/octet-stream` needs a byte payload
	#[error("payload is not a byte sequence")]
	NotBytes,
	/// Template execution failed
	#[error("failed to execute template `{name}`: {source}")]
	Template {
		name: String,
		#[source]
		source: BoxError,
	},
	/// A serializer failed
	#[error("failed to encode {media_type}: {source}")]
	Encode {
		media_type: String,
		#[source]
		source: BoxError,
	},
	/// Negotiation chose a media type nothing can render
	#[error("unhandled media type `{0}`")]
	UnhandledMediaType(String),
	/// Writing to the response sink failed
	#[error("failed to write response: {0}")]
	Sink(#[from] std::io::Error),
}

impl RenderError {
	/// Wraps a serializer error for `media_type`
	pub fn encode(media_type: impl Into<String>, source: impl Into<BoxError>) -> Self {
		Self::Encode {
			media_type: media_type.into(),
			source: source.into(),
		}
	}
}

/// Result type for rendering
pub type Result<T> = std::result::Result<T, RenderError>;
