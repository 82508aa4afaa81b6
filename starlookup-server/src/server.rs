use std::net::SocketAddr;

use axum::{
    extract::{
        MatchedPath,
        Request,
    },
    Router,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    classify::{
        ServerErrorsAsFailures,
        SharedClassifier,
    },
    trace::{
        DefaultOnRequest,
        DefaultOnResponse,
        MakeSpan,
        TraceLayer,
    },
};
use tracing::{
    Level,
    Span,
};

use crate::{
    error::Error,
    lookup::Gateway,
    Builder,
};

/// The star lookup HTTP server.
pub struct Server {
    router: Router,
    shutdown: CancellationToken,
}

impl Server {
    pub fn new(gateway: Gateway, shutdown: CancellationToken) -> Self {
        let router = Builder::default()
            .with_gateway(gateway)
            .build()
            .layer(trace_layer());

        Self { router, shutdown }
    }

    /// Serves until the shutdown token is cancelled.
    pub async fn bind(self, address: SocketAddr) -> Result<(), Error> {
        let listener = TcpListener::bind(address).await?;
        tracing::info!(address = %listener.local_addr()?, "serving stars");

        let shutdown = self.shutdown;
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        Ok(())
    }
}

/// One span per request, tagged with the route that matched.
#[derive(Clone, Copy, Debug)]
struct RequestSpan;

impl MakeSpan<axum::body::Body> for RequestSpan {
    fn make_span(&mut self, request: &Request) -> Span {
        let route = request
            .extensions()
            .get::<MatchedPath>()
            .map_or("fallback", MatchedPath::as_str);

        tracing::info_span!(
            "request",
            method = %request.method(),
            path = request.uri().path(),
            route,
        )
    }
}

fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan> {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}
