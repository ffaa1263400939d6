//! # Repondez HTTP
//!
//! The request-level adapter. A [`Handler`] returns a
//! [`Body`](repondez_core::Body); the [`Responder`] picks its representation
//! from the request's `Accept` header, the `GET` path extension and any
//! `Content-Type` the handler committed to, then renders it.
//!
//! ```
//! use hyper::header::{ACCEPT, CONTENT_TYPE};
//! use repondez_core::Body;
//! use repondez_http::{Responder, handler_fn};
//!
//! # tokio_test_block_on(async {
//! let responder = Responder::default();
//! let handler = handler_fn(|_writer, _request| Body::new("Hello!"));
//!
//! let request = hyper::Request::builder()
//!     .uri("/")
//!     .header(ACCEPT, "application/vnd.foobar")
//!     .body(bytes::Bytes::new())
//!     .unwrap();
//! let response = responder.respond(&handler, &request).await;
//!
//! assert_eq!(response.status, 406);
//! assert_eq!(response.headers[CONTENT_TYPE], "text/plain; charset=utf-8");
//! assert_eq!(response.body, "Hello!");
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod handler;
pub mod responder;
pub mod response;
pub mod writer;

pub use handler::{FnHandler, Handler, handler_fn};
pub use responder::Responder;
pub use response::Response;
pub use writer::ResponseWriter;

/// Requests as seen by handlers, body already collected
pub type Request = hyper::Request<bytes::Bytes>;
