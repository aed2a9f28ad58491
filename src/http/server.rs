//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Assemble the service routes, health probes and `/metrics`
//! - Wire up middleware (request ID, tracing, timeout, body limit, metrics)
//! - Serve on a listener until the shutdown signal fires

use std::time::Duration;

use axum::{body::Body, http::Request, middleware, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::health;
use crate::http::request::{request_id_of, MakeRequestUuid};
use crate::http::state::AppState;
use crate::observability::metrics;
use crate::{reader, writer};

/// Which of the two services a process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Reader,
    Writer,
}

impl ServiceKind {
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Reader => "reader",
            ServiceKind::Writer => "writer",
        }
    }

    fn routes(self, state: AppState) -> Router {
        match self {
            ServiceKind::Reader => reader::router(state),
            ServiceKind::Writer => writer::router(state),
        }
    }
}

/// HTTP server for one data-app service.
pub struct HttpServer {
    kind: ServiceKind,
    router: Router,
    config: std::sync::Arc<ServiceConfig>,
    metrics: Option<PrometheusHandle>,
}

impl HttpServer {
    /// Create a new HTTP server for `kind` backed by `state`.
    pub fn new(kind: ServiceKind, state: AppState) -> Self {
        let config = state.config.clone();
        let metrics = config.observability.metrics_enabled.then(metrics::install);
        let router = Self::build_router(kind, &config, state, metrics.clone());

        Self {
            kind,
            router,
            config,
            metrics,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(
        kind: ServiceKind,
        config: &ServiceConfig,
        state: AppState,
        metrics_handle: Option<PrometheusHandle>,
    ) -> Router {
        let mut router = kind
            .routes(state.clone())
            .merge(health::router(state));

        if let Some(handle) = metrics_handle {
            router = router.merge(metrics::router(handle));
        }

        router
            .layer(middleware::from_fn_with_state(kind.name(), metrics::track_requests))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(
                        |request: &Request<Body>| {
                            tracing::info_span!(
                                "request",
                                method = %request.method(),
                                uri = %request.uri(),
                                request_id = %request_id_of(request),
                            )
                        },
                    ))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    // The limit's response body has no `Default`, so it stays outside the timeout.
                    .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// The fully layered router, for driving the service without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            service = self.kind.name(),
            address = %addr,
            pod_name = %self.config.pod_name,
            "HTTP server starting"
        );

        if let Some(handle) = self.metrics.clone() {
            let interval = Duration::from_secs(self.config.observability.metrics_upkeep_secs);
            tokio::spawn(metrics::run_upkeep(handle, interval, shutdown.resubscribe()));
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!(service = self.kind.name(), "HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
