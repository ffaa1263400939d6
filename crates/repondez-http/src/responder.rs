//! The adapter that turns a handler's [`Body`] into a negotiated response.

use std::io;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{ACCEPT, CONTENT_TYPE, HeaderName, HeaderValue, LOCATION};
use hyper::{HeaderMap, Method, StatusCode};
use repondez_core::{Body, Config, MediaTypeRegistry, RenderError, Result};
use repondez_negotiation::format_suffix::path_extension;
use repondez_negotiation::media_type::{TEXT_HTML, TEXT_PLAIN, essence};
use repondez_negotiation::{AcceptHeader, ContentNegotiator, Negotiation};
use repondez_renderers::RenderDispatcher;

use crate::handler::Handler;
use crate::response::Response;
use crate::writer::ResponseWriter;
use crate::Request;

/// Runs handlers and writes their bodies in the negotiated representation.
///
/// Cheap to clone; the configuration and registry are shared.
///
/// # Examples
///
/// ```
/// use hyper::header::ACCEPT;
/// use repondez_core::{Body, Config, MediaTypeRegistry};
/// use repondez_http::{Responder, handler_fn};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let responder = Responder::new(Config::default(), MediaTypeRegistry::default());
/// let handler = handler_fn(|_writer, _request| Body::new(serde_json::json!({"id": 1})));
///
/// let request = hyper::Request::builder()
///     .uri("/things/1.json")
///     .header(ACCEPT, "text/html")
///     .body(bytes::Bytes::new())
///     .unwrap();
/// let response = responder.respond(&handler, &request).await;
///
/// assert_eq!(response.status, 200);
/// assert_eq!(response.body, "{\"id\":1}\n");
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct Responder {
	config: Arc<Config>,
	registry: Arc<MediaTypeRegistry>,
}

impl Responder {
	pub fn new(config: Config, registry: MediaTypeRegistry) -> Self {
		Self::from_shared(Arc::new(config), Arc::new(registry))
	}

	pub fn from_shared(config: Arc<Config>, registry: Arc<MediaTypeRegistry>) -> Self {
		Self { config, registry }
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn registry(&self) -> &MediaTypeRegistry {
		&self.registry
	}

	/// Runs `handler` and streams the rendered body into `sink`.
	///
	/// `headers` holds whatever was set before the call and receives the
	/// handler's headers plus `Content-Type` and `Location`. Returns the
	/// status to send. On error nothing useful has been written to `sink`
	/// and the caller decides how to fail.
	pub async fn write<H>(
		&self,
		handler: &H,
		request: &Request,
		headers: &mut HeaderMap,
		sink: &mut (dyn io::Write + Send),
	) -> Result<StatusCode>
	where
		H: Handler + ?Sized,
	{
		let mut writer = ResponseWriter::with_headers(std::mem::take(headers));
		let body = handler.serve(&mut writer, request).await;
		let (handler_headers, default_template_name) = writer.into_parts();
		*headers = handler_headers;
		self.write_body(
			body,
			default_template_name.as_deref(),
			request,
			headers,
			sink,
		)
	}

	/// Runs `handler` and buffers the full response.
	///
	/// Render failures are logged and become a bare `500 Internal Server Error`.
	pub async fn respond<H>(&self, handler: &H, request: &Request) -> Response
	where
		H: Handler + ?Sized,
	{
		let mut headers = HeaderMap::new();
		let mut buffer = Vec::new();
		match self.write(handler, request, &mut headers, &mut buffer).await {
			Ok(status) => Response {
				status,
				headers,
				body: Bytes::from(buffer),
			},
			Err(error) => {
				tracing::error!(
					method = %request.method(),
					path = request.uri().path(),
					error = %error,
					"failed to write response"
				);
				Response::internal_server_error()
			}
		}
	}

	/// Collects a hyper request body, then behaves like [`respond`](Self::respond).
	///
	/// Suited to `hyper::service::service_fn`.
	pub async fn serve_hyper<H, B>(
		&self,
		handler: &H,
		request: hyper::Request<B>,
	) -> std::result::Result<hyper::Response<Full<Bytes>>, B::Error>
	where
		H: Handler + ?Sized,
		B: hyper::body::Body,
	{
		let (parts, body) = request.into_parts();
		let bytes = body.collect().await?.to_bytes();
		let request = Request::from_parts(parts, bytes);
		Ok(self.respond(handler, &request).await.into_hyper())
	}

	/// Negotiates and renders a body the handler already produced.
	///
	/// `default_template_name` applies when the body names no template.
	pub fn write_body<B>(
		&self,
		mut body: Body,
		default_template_name: Option<&str>,
		request: &hyper::Request<B>,
		headers: &mut HeaderMap,
		sink: &mut dyn io::Write,
	) -> Result<StatusCode> {
		let status = body.status();
		if body.template_name.is_empty()
			&& let Some(name) = default_template_name
		{
			body.template_name = name.to_string();
		}

		let accept = accept_value(request.headers());
		let content_type_preset = headers.contains_key(CONTENT_TYPE);
		if let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
			let media_type = essence(content_type);
			if self.registry.is_registered(media_type) {
				body.predetermine(media_type);
			}
		}

		let extension = if request.method() == Method::GET {
			path_extension(request.uri().path())
		} else {
			None
		};

		let offers = body.media_types(&self.config, &self.registry);
		let negotiator = ContentNegotiator::new(self.registry.extensions());
		let negotiation =
			negotiator.negotiate(extension.as_deref(), &AcceptHeader::parse(&accept), &offers);

		tracing::debug!(
			method = %request.method(),
			path = request.uri().path(),
			accept = %accept,
			extension = ?extension,
			offers = ?offers,
			outcome = ?negotiation,
			"negotiated representation"
		);

		if body.is_redirect() {
			if let Some(location) = body.location() {
				insert_header(headers, LOCATION, location);
			}
			if body.is_blank() || accept.is_empty() {
				return Ok(status);
			}
			let media_type = match negotiation.media_type() {
				Some(media_type) => media_type,
				None => default_offer(&offers)?,
			};
			return self.render(&body, media_type, content_type_preset, headers, sink, status);
		}

		let (media_type, status) = match negotiation {
			Negotiation::Matched(media_type) => (media_type, status),
			Negotiation::UnmatchedExtension(extension) => {
				tracing::debug!(extension = %extension, "no offer for path extension");
				return Ok(StatusCode::NOT_FOUND);
			}
			Negotiation::NotAcceptable => (default_offer(&offers)?, StatusCode::NOT_ACCEPTABLE),
		};

		if !body.template_name.is_empty() {
			let missing = match media_type {
				TEXT_PLAIN => self.config.text_templates().is_none(),
				TEXT_HTML => self.config.html_templates().is_none(),
				_ => false,
			};
			if missing {
				tracing::debug!(
					template = %body.template_name,
					media_type,
					"no template set for negotiated media type"
				);
				return Ok(StatusCode::NOT_FOUND);
			}
		}

		if status == StatusCode::CREATED
			&& let Some(location) = body.location()
		{
			insert_header(headers, LOCATION, location);
		}

		self.render(&body, media_type, content_type_preset, headers, sink, status)
	}

	fn render(
		&self,
		body: &Body,
		media_type: &str,
		content_type_preset: bool,
		headers: &mut HeaderMap,
		sink: &mut dyn io::Write,
		status: StatusCode,
	) -> Result<StatusCode> {
		if body.is_blank() {
			return Ok(status);
		}
		if !content_type_preset
			&& let Some(content_type) = self.registry.content_type(media_type)
		{
			insert_header(headers, CONTENT_TYPE, content_type);
		}
		RenderDispatcher::new(&self.config, &self.registry).render(body, media_type, sink)?;
		Ok(status)
	}
}

/// All `Accept` values joined, or empty when the header is absent
fn accept_value(headers: &HeaderMap) -> String {
	headers
		.get_all(ACCEPT)
		.iter()
		.filter_map(|value| value.to_str().ok())
		.collect::<Vec<_>>()
		.join(",")
}

fn default_offer(offers: &[String]) -> Result<&str> {
	offers
		.first()
		.map(String::as_str)
		.ok_or_else(|| RenderError::UnhandledMediaType(String::new()))
}

fn insert_header(headers: &mut HeaderMap, name: HeaderName, value: &str) {
	match HeaderValue::from_str(value) {
		Ok(value) => {
			headers.insert(name, value);
		}
		Err(_) => tracing::warn!(header = %name, value, "dropping invalid header value"),
	}
}
