//! HTTP request handlers.
//!
//! - `ui`: the single-page generator form
//! - `generate`: QR generation (multipart form and query string)
//! - `download`: stored PNG downloads
//! - `metrics`: health, Prometheus and JSON stats
//! - `common`: error and PNG response helpers

pub mod common;
pub mod download;
pub mod generate;
pub mod metrics;
pub mod ui;

pub use common::{ApiError, ErrorBody};
pub use download::download_handler;
pub use generate::{generate_form_handler, generate_query_handler, QrForm, QrQuery};
pub use metrics::{health_handler, metrics_handler, stats_handler, HealthResponse};
pub use ui::index_handler;
