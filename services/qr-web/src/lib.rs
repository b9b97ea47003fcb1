//! Custom QR code generator web service.
//!
//! Serves a form for text, colors and an optional logo, renders the code
//! with `qr_renderer`, and keeps recent results available for download.

pub mod config;
pub mod downloads;
pub mod handlers;
pub mod metrics;
pub mod state;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use state::AppState;

/// Build the service router.
pub fn build_router(state: Arc<AppState>, prometheus_handle: PrometheusHandle) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        // Web UI
        .route("/", get(handlers::index_handler))
        // Generation
        .route(
            "/api/qr",
            get(handlers::generate_query_handler).post(handlers::generate_form_handler),
        )
        .route("/download/:id", get(handlers::download_handler))
        // Health check
        .route("/health", get(handlers::health_handler))
        // Metrics
        .route("/metrics", get(handlers::metrics_handler))
        .route("/api/stats", get(handlers::stats_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(Extension(state))
        .layer(Extension(prometheus_handle))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
