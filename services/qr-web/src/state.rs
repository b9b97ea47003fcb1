//! Application state and shared resources.

use qr_common::QrResult;
use qr_renderer::Renderer;
use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::downloads::DownloadStore;
use crate::metrics::MetricsCollector;

/// Shared application state.
pub struct AppState {
    pub renderer: Renderer,
    pub downloads: DownloadStore,
    pub metrics: Arc<MetricsCollector>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(config: &ServiceConfig) -> QrResult<Self> {
        let renderer = Renderer::new(config.render.clone())?;
        let downloads = DownloadStore::new(config.download_dir.as_deref(), config.max_downloads)?;
        let metrics = Arc::new(MetricsCollector::new());

        Ok(Self {
            renderer,
            downloads,
            metrics,
            max_upload_bytes: config.max_upload_bytes,
        })
    }
}
