//! HTTP server exposing collected metrics.
//!
//! # Responsibilities
//! - Create Axum Router with the scrape and health handlers
//! - Wire up middleware (tracing, timeout, optional basic auth)
//! - Serve on a bound listener until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::header,
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::HttpServerConfig;
use crate::http::auth::{basic_auth_middleware, BasicAuthenticator};
use crate::lifecycle::shutdown::wait_for_shutdown;

/// Content type of the Prometheus text exposition format.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

const HEALTHY_BODY: &str = "Exporter is Healthy.";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub handle: PrometheusHandle,
}

/// HTTP server for the exposition endpoint.
pub struct MetricsServer {
    router: Router,
}

impl MetricsServer {
    /// Create a server rendering metrics from `handle`.
    pub fn new(config: &HttpServerConfig, handle: PrometheusHandle) -> Self {
        let router = Self::build_router(config, AppState { handle });
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &HttpServerConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/", get(metrics_handler))
            .route("/metrics", get(metrics_handler))
            .route("/-/healthy", get(healthy_handler));

        if let Some(basic) = &config.authentication {
            let authenticator = Arc::new(BasicAuthenticator::new(basic));
            router = router.layer(middleware::from_fn_with_state(
                authenticator,
                basic_auth_middleware,
            ));
        }

        router
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Serve on `listener` until `shutdown` fires or Ctrl+C is received.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        state.handle.render(),
    )
}

async fn healthy_handler() -> &'static str {
    HEALTHY_BODY
}
