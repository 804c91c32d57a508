//! HTTP request layer for invoice records and rendered documents.
//!
//! Thin delegation layer: handlers hand invoice values to the record store
//! and invoice ids to the renderer. No business logic lives here.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let max_body = state.config.max_upload_size_mb * 1024 * 1024;
    Router::new()
        .route("/health", get(api::health_check))
        .route("/api/invoices", post(api::save_invoice))
        .route("/api/invoices/multipart", post(api::save_invoice_multipart))
        .route("/api/invoices/:id", get(api::get_invoice))
        .route("/api/invoices/:id/pdf", get(api::download_pdf))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
