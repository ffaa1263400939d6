//! The response value a handler returns.

use http::StatusCode;

use crate::data::Data;

/// A payload plus everything the adapter needs to pick its representation.
///
/// # Examples
///
/// ```
/// use repondez_core::{Body, StatusCode};
///
/// let body = Body::new("Hello, World!").with_template("greeting");
/// assert_eq!(body.status(), StatusCode::OK);
/// assert_eq!(body.template_name, "greeting");
///
/// let body = Body::new("POST successful").status_see_other("/");
/// assert!(body.is_redirect());
/// assert_eq!(body.location(), Some("/"));
///
/// assert!(Body::blank().is_blank());
/// assert!(!Body::new(()).is_blank());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Body {
	pub data: Data,
	/// Template looked up in the HTML or text template set; may be empty
	pub template_name: String,
	status: Option<StatusCode>,
	location: Option<String>,
	predetermined_media_type: Option<String>,
	blank: bool,
}

impl Body {
	pub fn new(data: impl Into<Data>) -> Self {
		Self {
			data: data.into(),
			..Self::default()
		}
	}

	/// A body with no payload and no `Content-Type`, whatever gets negotiated
	pub fn blank() -> Self {
		Self {
			blank: true,
			..Self::default()
		}
	}

	pub fn with_template(mut self, name: impl Into<String>) -> Self {
		self.template_name = name.into();
		self
	}

	/// Sets an explicit status. Prefer the `status_*` helpers for redirects,
	/// which also set the location.
	pub fn with_status(mut self, status: StatusCode) -> Self {
		self.status = Some(status);
		self
	}

	pub(crate) fn with_redirect(mut self, status: StatusCode, location: impl Into<String>) -> Self {
		self.status = Some(status);
		self.location = Some(location.into());
		self
	}

	/// The status to send, `200 OK` unless set
	pub fn status(&self) -> StatusCode {
		self.status.unwrap_or(StatusCode::OK)
	}

	pub fn location(&self) -> Option<&str> {
		self.location.as_deref()
	}

	pub fn is_redirect(&self) -> bool {
		self.status().is_redirection()
	}

	/// Blank bodies never reach a serializer
	pub fn is_blank(&self) -> bool {
		self.blank && self.data.is_null()
	}

	pub fn predetermined_media_type(&self) -> Option<&str> {
		self.predetermined_media_type.as_deref()
	}

	/// Commits the body to a single media type.
	///
	/// Negotiation then only offers this type: a client that does not
	/// accept it gets a 406 with this representation.
	pub fn predetermine(&mut self, media_type: impl Into<String>) {
		self.predetermined_media_type = Some(media_type.into());
	}
}

impl From<Data> for Body {
	fn from(data: Data) -> Self {
		Self::new(data)
	}
}
