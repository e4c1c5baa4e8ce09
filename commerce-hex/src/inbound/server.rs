//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use commerce_types::CommerceRepository;

use super::handlers::{self, AppState};
use crate::CommerceService;
use crate::openapi::ApiDoc;

/// HTTP Server for the Commerce API.
pub struct HttpServer<R: CommerceRepository> {
    state: Arc<AppState<R>>,
}

impl<R: CommerceRepository> HttpServer<R> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: CommerceService<R>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(openapi_json))
            .route("/api/members", post(handlers::register_member::<R>))
            .route("/api/members/{id}", get(handlers::get_member::<R>))
            .route(
                "/api/members/{id}/orders",
                get(handlers::list_member_orders::<R>),
            )
            .route("/api/orders", post(handlers::create_order::<R>))
            .route("/api/orders/{id}", get(handlers::get_order::<R>))
            .route(
                "/api/orders/{id}/payment",
                get(handlers::get_order_payment::<R>),
            )
            .route("/api/payments", post(handlers::request_payment::<R>))
            .route(
                "/api/payments/{id}/approve",
                post(handlers::approve_payment::<R>),
            )
            .route("/api/payments/{id}", get(handlers::get_payment::<R>))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Serves the generated OpenAPI document.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
