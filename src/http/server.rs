//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, metrics)
//! - Serve static assets for unmatched paths when configured
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::classifier::{ClassifierClient, ClientBuildError};
use crate::config::{DeploymentMode, GatewayConfig};
use crate::http::handlers;
use crate::http::request::make_request_span;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<ClassifierClient>,
    pub shutdown: Shutdown,
    pub mode: DeploymentMode,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    shutdown: Shutdown,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig, shutdown: Shutdown) -> Result<Self, ClientBuildError> {
        let classifier = Arc::new(ClassifierClient::from_config(&config.classifier)?);

        tracing::info!(
            mode = %config.classifier.mode,
            endpoint = %classifier.endpoint(),
            max_attempts = classifier.policy().max_attempts,
            delay_ms = config.classifier.delay_ms,
            "Classifier client ready"
        );

        let state = AppState {
            classifier,
            shutdown: shutdown.clone(),
            mode: config.classifier.mode,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, shutdown })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/factcheck", post(handlers::factcheck))
            .route("/check-news", post(handlers::check_news))
            .route("/health", get(handlers::health));

        if let Some(dir) = &config.assets.dir {
            tracing::info!(dir = %dir, "Serving static assets");
            router = router.fallback_service(ServeDir::new(dir));
        }

        router
            .with_state(state)
            .layer(middleware::from_fn(track_requests))
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(self.shutdown.wait())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Record request count and latency per matched route.
async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;

    let status = response.status();
    if status.is_server_error() {
        tracing::warn!(method = %method, route = %route, status = %status, "Request failed");
    } else {
        tracing::debug!(method = %method, route = %route, status = %status, "Request completed");
    }
    metrics::record_request(&method, &route, status.as_u16(), start);
    response
}
