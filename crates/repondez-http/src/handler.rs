//! Handler abstraction

use std::sync::Arc;

use async_trait::async_trait;
use repondez_core::Body;

use crate::Request;
use crate::writer::ResponseWriter;

/// Produces the body for a request.
///
/// Handlers never pick a representation themselves; they may commit to one
/// by setting `Content-Type` on the writer.
#[async_trait]
pub trait Handler: Send + Sync {
	async fn serve(&self, writer: &mut ResponseWriter, request: &Request) -> Body;
}

#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
	async fn serve(&self, writer: &mut ResponseWriter, request: &Request) -> Body {
		(**self).serve(writer, request).await
	}
}

/// Adapts a synchronous closure into a [`Handler`]
#[derive(Debug, Clone)]
pub struct FnHandler<F>(F);

/// Wraps a closure as a handler.
///
/// # Examples
///
/// ```
/// use repondez_core::Body;
/// use repondez_http::handler_fn;
///
/// let handler = handler_fn(|writer, _request| {
///     writer.set_default_template_name("greeting");
///     Body::new("Hello")
/// });
/// ```
pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
	F: Fn(&mut ResponseWriter, &Request) -> Body + Send + Sync,
{
	FnHandler(f)
}

#[async_trait]
impl<F> Handler for FnHandler<F>
where
	F: Fn(&mut ResponseWriter, &Request) -> Body + Send + Sync,
{
	async fn serve(&self, writer: &mut ResponseWriter, request: &Request) -> Body {
		(self.0)(writer, request)
	}
}
