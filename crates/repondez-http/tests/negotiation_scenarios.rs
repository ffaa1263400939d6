//! End-to-end negotiation through the responder.

use std::io::{Read, Write};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use hyper::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, LOCATION};
use hyper::{Method, StatusCode};
use repondez_core::{
	Body, Config, CsvData, CsvWriter, Data, Html, MarshalCsv, MediaTypeRegistry,
};
use repondez_http::{Handler, Request, Responder, ResponseWriter, handler_fn};
use repondez_renderers::MsgpackRenderer;
use rstest::*;
use serde::Serialize;
use serde_json::json;
use tera::Tera;

fn request(method: Method, uri: &str, accept: Option<&str>) -> Request {
	let mut builder = hyper::Request::builder().method(method).uri(uri);
	if let Some(accept) = accept {
		builder = builder.header(ACCEPT, accept);
	}
	builder.body(Bytes::new()).unwrap()
}

fn templates(name: &str, source: &str) -> Tera {
	let mut tera = Tera::default();
	tera.add_raw_template(name, source).unwrap();
	tera
}

#[fixture]
fn responder() -> Responder {
	Responder::default()
}

#[fixture]
fn html_responder() -> Responder {
	let config = Config::builder()
		.html_templates(templates(
			"tm",
			"<div>{% if data %}{{ data }}{% else %}Nothin!{% endif %}</div>",
		))
		.build();
	Responder::new(config, MediaTypeRegistry::default())
}

#[rstest]
#[tokio::test]
async fn test_browser_accept_renders_escaped_html_template(html_responder: Responder) {
	let handler = handler_fn(|_, _| Body::new("Hello <input> World!").with_template("tm"));
	let request = request(
		Method::GET,
		"/",
		Some("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
	);

	let response = html_responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(response.headers[CONTENT_TYPE], "text/html; charset=utf-8");
	assert_eq!(response.body, "<div>Hello &lt;input&gt; World!</div>");
}

#[rstest]
#[tokio::test]
async fn test_json_extension_overrides_accept(responder: Responder) {
	let handler = handler_fn(|_, _| Body::new("Hello,\nWorld!"));
	let request = request(Method::GET, "/message.json", Some("text/html"));

	let response = responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(response.headers[CONTENT_TYPE], "application/json");
	assert_eq!(response.body, "\"Hello,\\nWorld!\"\n");
}

#[rstest]
#[tokio::test]
async fn test_see_other_renders_feedback(responder: Responder) {
	let handler = handler_fn(|_, _| Body::new("POST successful").status_see_other("/"));
	let request = request(Method::POST, "/", Some("text/plain"));

	let response = responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::SEE_OTHER);
	assert_eq!(response.headers[LOCATION], "/");
	assert_eq!(response.headers[CONTENT_TYPE], "text/plain; charset=utf-8");
	assert_eq!(response.body, "POST successful");
}

#[rstest]
#[tokio::test]
async fn test_redirect_without_accept_has_no_body(responder: Responder) {
	let handler = handler_fn(|_, _| Body::new("POST successful").status_see_other("/done"));
	let request = request(Method::POST, "/", None);

	let response = responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::SEE_OTHER);
	assert_eq!(response.headers[LOCATION], "/done");
	assert!(!response.headers.contains_key(CONTENT_TYPE));
	assert!(response.body.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_blank_redirect_ignores_accept(responder: Responder) {
	let handler = handler_fn(|_, _| Body::blank().status_found("/elsewhere"));
	let request = request(Method::GET, "/", Some("application/json"));

	let response = responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::FOUND);
	assert_eq!(response.headers[LOCATION], "/elsewhere");
	assert!(!response.headers.contains_key(CONTENT_TYPE));
	assert!(response.body.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_unsatisfiable_accept_renders_default_with_406(responder: Responder) {
	let handler = handler_fn(|_, _| Body::new("Hello!"));
	let request = request(Method::GET, "/", Some("application/vnd.foobar"));

	let response = responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::NOT_ACCEPTABLE);
	assert_eq!(response.headers[CONTENT_TYPE], "text/plain; charset=utf-8");
	assert_eq!(response.body, "Hello!");
}

#[rstest]
#[case("/message.blah", Some("application/*"))]
#[case("/message.BLAH", None)]
#[tokio::test]
async fn test_unknown_extension_is_not_found(
	responder: Responder,
	#[case] uri: &str,
	#[case] accept: Option<&str>,
) {
	let handler = handler_fn(|_, _| Body::new("Hello,\nWorld!"));
	let request = request(Method::GET, uri, accept);

	let response = responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::NOT_FOUND);
	assert!(!response.headers.contains_key(CONTENT_TYPE));
	assert!(response.body.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_gob_extension_encodes_empty_map(responder: Responder) {
	let handler = handler_fn(|_, _| Body::new(json!({})));
	let request = request(Method::GET, "/resource.gob", None);

	let response = responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(response.headers[CONTENT_TYPE], "application/vnd.golang.gob");
	assert_eq!(
		response.body.as_ref(),
		[
			0x0D, 0x7F, 0x04, 0x01, 0x02, 0xFF, 0x80, 0x00, 0x01, 0x0C, 0x01, 0x0C, 0x00, 0x00,
			0x04, 0xFF, 0x80, 0x00, 0x00,
		]
	);
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("*/*"))]
#[tokio::test]
async fn test_null_payload_defaults_to_json(responder: Responder, #[case] accept: Option<&str>) {
	let handler = handler_fn(|_, _| Body::new(()));
	let request = request(Method::GET, "/", accept);

	let response = responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(response.headers[CONTENT_TYPE], "application/json");
	assert_eq!(response.body, "null\n");
}

#[rstest]
#[tokio::test]
async fn test_empty_string_renders_empty_text(responder: Responder) {
	let handler = handler_fn(|_, _| Body::new(""));
	let request = request(Method::GET, "/", Some("text/plain"));

	let response = responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(response.headers[CONTENT_TYPE], "text/plain; charset=utf-8");
	assert!(response.body.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_predetermined_type_must_match_accept(responder: Responder) {
	let handler = handler_fn(|writer: &mut ResponseWriter, _: &Request| {
		writer
			.headers_mut()
			.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		Body::new(())
	});
	let request = request(Method::GET, "/", Some("application/xml"));

	let response = responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::NOT_ACCEPTABLE);
	assert_eq!(response.headers[CONTENT_TYPE], "application/json");
	assert_eq!(response.body, "null\n");
}

#[rstest]
#[tokio::test]
async fn test_unregistered_content_type_is_kept(responder: Responder) {
	let handler = handler_fn(|writer: &mut ResponseWriter, _: &Request| {
		writer.headers_mut().insert(
			CONTENT_TYPE,
			HeaderValue::from_static("application/rss+xml"),
		);
		Body::new("<rss version=\"2.0\"/>")
	});
	let request = request(Method::GET, "/feed", Some("*/*"));

	let response = responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(response.headers[CONTENT_TYPE], "application/rss+xml");
	assert_eq!(response.body, "<rss version=\"2.0\"/>");
}

#[rstest]
#[tokio::test]
async fn test_missing_text_templates_is_not_found(html_responder: Responder) {
	let handler = handler_fn(|_, _| Body::new("Hello").with_template("tm"));
	let request = request(Method::GET, "/home.txt", None);

	let response = html_responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::NOT_FOUND);
	assert!(response.body.is_empty());
}

#[rstest]
#[case(Data::from("Hello"))]
#[case(Data::from(Html::new("<p>Hello</p>")))]
#[tokio::test]
async fn test_missing_html_templates_is_not_found(#[case] data: Data) {
	let config = Config::builder()
		.text_templates(templates("tm", "text: {{ data }}"))
		.build();
	let responder = Responder::new(config, MediaTypeRegistry::default());
	let handler = handler_fn(move |_, _| Body::new(data.clone()).with_template("tm"));
	let request = request(Method::GET, "/home.html", None);

	let response = responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::NOT_FOUND);
	assert!(!response.headers.contains_key(CONTENT_TYPE));
	assert!(response.body.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_redirect_renders_plain_text_without_text_templates(html_responder: Responder) {
	let handler = handler_fn(|writer: &mut ResponseWriter, _: &Request| {
		writer.set_default_template_name("form");
		Body::new("POST successful").status_see_other("/")
	});
	let request = request(Method::POST, "/", Some("text/plain"));

	let response = html_responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::SEE_OTHER);
	assert_eq!(response.headers[LOCATION], "/");
	assert_eq!(response.headers[CONTENT_TYPE], "text/plain; charset=utf-8");
	assert_eq!(response.body, "POST successful");
}

#[rstest]
#[tokio::test]
async fn test_not_acceptable_prefers_text_template() {
	let config = Config::builder()
		.html_templates(templates("tm", "<p>{{ data }}</p>"))
		.text_templates(templates("tm", "text: {{ data }}"))
		.build();
	let responder = Responder::new(config, MediaTypeRegistry::default());
	let handler = handler_fn(|_, _| Body::new("Hello").with_template("tm"));
	let request = request(Method::GET, "/", Some("unknown/unknown"));

	let response = responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::NOT_ACCEPTABLE);
	assert_eq!(response.headers[CONTENT_TYPE], "text/plain; charset=utf-8");
	assert_eq!(response.body, "text: Hello");
}

#[rstest]
#[tokio::test]
async fn test_blank_body_has_no_content_type(responder: Responder) {
	let handler = handler_fn(|_, _| Body::blank().status_no_content());
	let request = request(Method::DELETE, "/things/1", Some("application/json"));

	let response = responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::NO_CONTENT);
	assert!(!response.headers.contains_key(CONTENT_TYPE));
	assert!(response.body.is_empty());
}

#[derive(Serialize)]
struct Tally {
	status: String,
	number: u32,
}

impl MarshalCsv for Tally {
	fn marshal_csv(&self, writer: &mut CsvWriter<'_>) -> csv::Result<()> {
		writer.write_record(["status", "number"])?;
		writer.write_record([self.status.clone(), self.number.to_string()])
	}
}

#[rstest]
#[case("text/csv", "text/csv; charset=utf-8", "status,number\nOK,3\n")]
#[case("application/json", "application/json", "{\"number\":3,\"status\":\"OK\"}\n")]
#[tokio::test]
async fn test_csv_payload_negotiates_rows_or_structure(
	responder: Responder,
	#[case] accept: &str,
	#[case] content_type: &str,
	#[case] expected: &str,
) {
	let handler = handler_fn(|_, _| {
		let tally = Tally {
			status: "OK".to_string(),
			number: 3,
		};
		Body::new(Data::from(CsvData::new(tally).unwrap()))
	});
	let request = request(Method::GET, "/tally", Some(accept));

	let response = responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(response.headers[CONTENT_TYPE], content_type);
	assert_eq!(response.body, expected);
}

#[rstest]
#[tokio::test]
async fn test_extension_renderer_by_path() {
	let registry = MediaTypeRegistry::builder().register(MsgpackRenderer).build();
	let responder = Responder::new(Config::default(), registry);
	let handler = handler_fn(|_, _| Body::new(json!({})));
	let request = request(Method::GET, "/thing.msgpack", Some("text/html"));

	let response = responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(response.headers[CONTENT_TYPE], "application/vnd.msgpack");
	assert_eq!(response.body.as_ref(), [0x80]);
}

#[rstest]
#[tokio::test]
async fn test_render_failure_becomes_bare_500(html_responder: Responder) {
	let handler = handler_fn(|_, _| Body::new("Hello").with_template("missing"));
	let request = request(Method::GET, "/", Some("text/html"));

	let response = html_responder.respond(&handler, &request).await;

	assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
	assert!(response.headers.is_empty());
	assert!(response.body.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_write_streams_into_compressing_sink(responder: Responder) {
	let handler = handler_fn(|_, _| Body::new(json!({"greeting": "hello"})));
	let request = request(Method::GET, "/greeting.json", None);
	let mut headers = HeaderMap::new();
	let mut encoder = GzEncoder::new(Vec::new(), Compression::default());

	let status = responder
		.write(&handler, &request, &mut headers, &mut encoder)
		.await
		.unwrap();
	encoder.flush().unwrap();
	let compressed = encoder.finish().unwrap();

	let mut decoded = String::new();
	GzDecoder::new(compressed.as_slice())
		.read_to_string(&mut decoded)
		.unwrap();
	assert_eq!(status, StatusCode::OK);
	assert_eq!(headers[CONTENT_TYPE], "application/json");
	assert_eq!(decoded, "{\"greeting\":\"hello\"}\n");
}

struct Greeter {
	greeting: &'static str,
}

#[async_trait]
impl Handler for Greeter {
	async fn serve(&self, writer: &mut ResponseWriter, request: &Request) -> Body {
		writer.set_default_template_name("greet");
		let name = String::from_utf8_lossy(request.body()).into_owned();
		Body::new(json!({ "greeting": self.greeting, "name": name }))
	}
}

#[rstest]
#[tokio::test]
async fn test_serve_hyper_collects_body_and_uses_default_template() {
	let config = Config::builder()
		.html_templates(templates("greet", "<h1>{{ greeting }}, {{ name }}</h1>"))
		.build();
	let responder = Responder::new(config, MediaTypeRegistry::default());
	let handler: Arc<dyn Handler> = Arc::new(Greeter { greeting: "Hi" });
	let request = hyper::Request::builder()
		.method(Method::POST)
		.uri("/greet")
		.header(ACCEPT, "text/html")
		.body(http_body_util::Full::new(Bytes::from_static(b"Ada")))
		.unwrap();

	let response = responder.serve_hyper(&handler, request).await.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(response.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
	let body = http_body_util::BodyExt::collect(response.into_body())
		.await
		.unwrap()
		.to_bytes();
	assert_eq!(body, "<h1>Hi, Ada</h1>");
}
