//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Report, export and overview routes
//! - Error mapping onto the JSON error envelope
//! - Health check

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use arap_core::reports::ReportOptions;
use arap_core::source::InvoiceSource;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where invoices are fetched from.
    pub source: Arc<dyn InvoiceSource>,
    /// Report calculation settings.
    pub options: ReportOptions,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
