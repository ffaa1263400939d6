//! Out-parameter a handler writes into while it runs.

use hyper::HeaderMap;

/// Response headers and the default template name set during a handler call.
///
/// Setting `Content-Type` here to a registered media type commits the
/// response to that type.
///
/// # Examples
///
/// ```
/// use hyper::header::{CONTENT_TYPE, HeaderValue};
/// use repondez_http::ResponseWriter;
///
/// let mut writer = ResponseWriter::new();
/// writer.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
/// writer.set_default_template_name("index");
///
/// assert_eq!(writer.default_template_name(), Some("index"));
/// assert_eq!(writer.headers()[CONTENT_TYPE], "application/json");
/// ```
#[derive(Debug, Default)]
pub struct ResponseWriter {
	headers: HeaderMap,
	default_template_name: Option<String>,
}

impl ResponseWriter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts from headers set earlier, e.g. by middleware
	pub fn with_headers(headers: HeaderMap) -> Self {
		Self {
			headers,
			default_template_name: None,
		}
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	pub fn headers_mut(&mut self) -> &mut HeaderMap {
		&mut self.headers
	}

	/// Template used when the returned body names none
	pub fn set_default_template_name(&mut self, name: impl Into<String>) {
		self.default_template_name = Some(name.into());
	}

	pub fn default_template_name(&self) -> Option<&str> {
		self.default_template_name.as_deref()
	}

	pub fn into_parts(self) -> (HeaderMap, Option<String>) {
		(self.headers, self.default_template_name)
	}
}
