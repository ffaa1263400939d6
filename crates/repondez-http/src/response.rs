use bytes::Bytes;
use http_body_util::Full;
use hyper::{HeaderMap, StatusCode};

/// A fully rendered HTTP response
#[derive(Debug, Clone)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// Create a new Response with the given status code
	///
	/// # Examples
	///
	/// ```
	/// use repondez_http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::new(StatusCode::OK);
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// Create a Response with HTTP 500 Internal Server Error status
	pub fn internal_server_error() -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR)
	}

	/// Converts into a hyper response ready to be served
	///
	/// # Examples
	///
	/// ```
	/// use bytes::Bytes;
	/// use repondez_http::Response;
	/// use hyper::StatusCode;
	///
	/// let mut response = Response::new(StatusCode::SEE_OTHER);
	/// response.body = Bytes::from_static(b"moved");
	/// let response = response.into_hyper();
	/// assert_eq!(response.status(), StatusCode::SEE_OTHER);
	/// ```
	pub fn into_hyper(self) -> hyper::Response<Full<Bytes>> {
		let mut response = hyper::Response::new(Full::new(self.body));
		*response.status_mut() = self.status;
		*response.headers_mut() = self.headers;
		response
	}
}

impl From<Response> for hyper::Response<Full<Bytes>> {
	fn from(response: Response) -> Self {
		response.into_hyper()
	}
}
