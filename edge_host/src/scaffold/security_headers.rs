use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll, ready},
};

use anyhow::{Context as _, Result};
use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    response::Response,
};
use edge_headers::security_headers;
use pin_project::pin_project;
use tower::Service;
use tower_layer::Layer;
use tracing::debug;

/// Stamps the edge security header set on every response, replacing any
/// value the inner service produced for the same names.
#[derive(Clone)]
pub struct SecurityHeaders {
    headers: Arc<[(HeaderName, HeaderValue)]>,
}

impl SecurityHeaders {
    pub fn new() -> Result<Self> {
        let mut headers = Vec::new();
        for (name, set) in security_headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .with_context(|| format!("invalid header name {:?}", name))?;
            for entry in set.entries() {
                let value = HeaderValue::from_str(entry.value())
                    .with_context(|| format!("invalid value for header {:?}", name))?;
                headers.push((header_name.clone(), value));
            }
        }
        debug!(count = headers.len(), "security headers prepared");

        Ok(Self {
            headers: headers.into(),
        })
    }

    pub fn apply(&self, target: &mut HeaderMap) {
        for (name, _) in self.headers.iter() {
            target.remove(name);
        }
        for (name, value) in self.headers.iter() {
            target.append(name.clone(), value.clone());
        }
    }
}

impl<S> Layer<S> for SecurityHeaders {
    type Service = SecurityHeadersService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeadersService {
            inner,
            headers: self.clone(),
        }
    }
}

#[derive(Clone)]
pub struct SecurityHeadersService<S> {
    inner: S,
    headers: SecurityHeaders,
}

impl<S, Req, Resp> Service<Request<Req>> for SecurityHeadersService<S>
where
    S: Service<Request<Req>, Response = Response<Resp>>,
{
    type Response = Response<Resp>;
    type Error = S::Error;
    type Future = SecurityHeadersFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Req>) -> Self::Future {
        SecurityHeadersFuture {
            headers: self.headers.clone(),
            inner: self.inner.call(req),
        }
    }
}

#[pin_project]
pub struct SecurityHeadersFuture<F> {
    headers: SecurityHeaders,
    #[pin]
    inner: F,
}

impl<F, B, E> Future for SecurityHeadersFuture<F>
where
    F: Future<Output = Result<Response<B>, E>>,
{
    type Output = Result<Response<B>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let mut response = ready!(this.inner.poll(cx))?;
        this.headers.apply(response.headers_mut());
        Poll::Ready(Ok(response))
    }
}
