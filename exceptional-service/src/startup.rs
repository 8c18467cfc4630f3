//! Application startup and lifecycle management.

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ExceptionalConfig;
use crate::handlers;
use crate::services::LedgerStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ExceptionalConfig,
    pub ledger: LedgerStore,
}

impl AppState {
    /// State with a freshly seeded ledger.
    pub fn new(config: ExceptionalConfig) -> Self {
        let ledger = LedgerStore::seeded(config.ledger.withdraw_delay());
        Self { config, ledger }
    }
}

/// Routes for the exceptional-conditions group.
fn exceptional_routes() -> Router<AppState> {
    Router::new()
        .route("/fail-open", get(handlers::fail_open::fail_open))
        .route("/overflow", get(handlers::overflow::overflow))
        .route("/transfer", post(handlers::ledger::transfer))
        .route("/withdraw", post(handlers::ledger::withdraw))
        .route("/info", get(handlers::info))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .nest("/api/exceptional", exceptional_routes())
        // Any origin, any method, any header.
        .layer(CorsLayer::permissive())
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Seed the ledger and bind the HTTP listener.
    pub async fn build(config: ExceptionalConfig) -> Result<Self, AppError> {
        let addr = config.common.socket_addr()?;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let state = AppState::new(config);

        tracing::info!(
            port,
            withdraw_delay_ms = state.config.ledger.withdraw_delay_ms,
            "Exceptional service bound"
        );

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Handle to the ledger this application serves.
    pub fn ledger(&self) -> LedgerStore {
        self.state.ledger.clone()
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router).await
    }
}
