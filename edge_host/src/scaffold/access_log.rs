use std::{
    fmt::Debug,
    future::Future,
    pin::Pin,
    task::{Context, Poll, ready},
    time::Instant,
};

use axum::{extract::Request, response::Response};
use pin_project::{pin_project, pinned_drop};
use tower::Service;
use tower_layer::Layer;
use tracing::{Level, Span, debug, error, info, span, warn};
use uuid::Uuid;

use crate::{
    api::state::HostState,
    scaffold::{pretty::PrettyOpt, remote_addr::RemoteAddr},
};

/// Per-request id, stored in request extensions by [`AccessLog`].
#[derive(Copy, Clone, Debug)]
pub struct AccessLogId(pub Uuid);

impl AccessLogId {
    pub fn uuid(self) -> Uuid {
        self.0
    }
}

#[derive(Clone)]
pub struct AccessLog {
    state: HostState,
}

impl AccessLog {
    pub fn new(state: HostState) -> Self {
        Self { state }
    }
}

impl<S> Layer<S> for AccessLog {
    type Service = AccessLogService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AccessLogService {
            inner,
            state: self.state.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AccessLogService<S> {
    inner: S,
    state: HostState,
}

impl<S, Req, Resp> Service<Request<Req>> for AccessLogService<S>
where
    S: Service<Request<Req>, Response = Response<Resp>>,
    S::Error: Debug,
{
    type Response = Response<Resp>;
    type Error = S::Error;
    type Future = AccessLogFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Req>) -> Self::Future {
        let id = Uuid::new_v4();
        let span = span!(Level::INFO, "request", access_id=%id);

        let req = {
            let _guard = span.enter();
            let (mut parts, body) = req.into_parts();
            parts.extensions.insert(AccessLogId(id));

            // an unknown peer is logged, not rejected
            let remote = match RemoteAddr::parse(
                &mut parts.extensions,
                &parts.headers,
                self.state.remote_header(),
            ) {
                Ok(v) => Some(v),
                Err(err) => {
                    info!(%err, "extract remote error");
                    None
                }
            };
            info!(
                target: "request",
                request_phase = "begin",
                remote_ip = %PrettyOpt(remote.map(|v| v.ip)),
                remote_port = %PrettyOpt(remote.and_then(|v| v.port)),
                method = %parts.method,
                uri = %parts.uri,
                "begin",
            );
            if cfg!(debug_assertions) {
                debug!(target: "request", headers=?parts.headers, "dump headers");
            }
            Request::from_parts(parts, body)
        };

        AccessLogFuture {
            pathname: req.uri().path().to_string(),
            span,
            done: false,
            start: Instant::now(),
            inner: self.inner.call(req),
        }
    }
}

#[pin_project(PinnedDrop)]
pub struct AccessLogFuture<F> {
    pathname: String,
    span: Span,
    done: bool,
    start: Instant,
    #[pin]
    inner: F,
}

impl<F, B, E> Future for AccessLogFuture<F>
where
    F: Future<Output = Result<Response<B>, E>>,
    E: Debug,
{
    type Output = Result<Response<B>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _guard = this.span.enter();
        let result = ready!(this.inner.poll(cx));
        *this.done = true;

        let cost = this.start.elapsed().as_millis();
        match &result {
            Ok(response) if response.status().is_client_error() || response.status().is_server_error() => {
                error!(
                    target: "request",
                    request_phase = "end",
                    request_end_type = "error status",
                    pathname = %this.pathname,
                    status = response.status().as_u16(),
                    cost,
                    "end with error status"
                );
            }
            Ok(response) => {
                info!(
                    target: "request",
                    request_phase = "end",
                    request_end_type = "success",
                    pathname = %this.pathname,
                    status = response.status().as_u16(),
                    cost,
                    "end ok"
                );
            }
            Err(err) => {
                error!(
                    target: "request",
                    request_phase = "end",
                    request_end_type = "server error",
                    pathname = %this.pathname,
                    cost,
                    "end with uncaught error {:?}", err
                );
            }
        }
        Poll::Ready(result)
    }
}

#[pinned_drop]
impl<F> PinnedDrop for AccessLogFuture<F> {
    fn drop(self: Pin<&mut Self>) {
        if !self.done {
            let _guard = self.span.enter();
            warn!(
                target: "request",
                request_phase = "end",
                request_end_type = "dropped",
                pathname = %self.pathname,
                cost = self.start.elapsed().as_millis(),
                "request connection dropped before finish",
            );
        }
    }
}
