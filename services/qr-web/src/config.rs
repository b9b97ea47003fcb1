//! Service configuration from command-line flags and environment.

use clap::Parser;
use qr_renderer::{ErrorCorrection, RenderOptions};
use std::path::PathBuf;
use tracing::Level;

/// Default request body limit (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Default number of rendered files kept for download.
pub const DEFAULT_MAX_DOWNLOADS: usize = 64;

#[derive(Parser, Debug, Clone)]
#[command(name = "qr-web")]
#[command(about = "Custom QR code generator web service")]
pub struct Args {
    /// Listen address
    #[arg(short, long, env = "QR_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// Log level
    #[arg(long, env = "QR_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Number of tokio worker threads (default: number of CPU cores)
    #[arg(long, env = "TOKIO_WORKER_THREADS")]
    pub worker_threads: Option<usize>,

    /// Pixels per QR module
    #[arg(long, env = "QR_MODULE_SIZE", default_value_t = 10)]
    pub module_size: u32,

    /// Quiet zone width in modules
    #[arg(long, env = "QR_BORDER", default_value_t = 4)]
    pub border: u32,

    /// Error correction level (L, M, Q or H)
    #[arg(long, env = "QR_ERROR_CORRECTION", default_value = "H")]
    pub error_correction: ErrorCorrection,

    /// Logo edge as a fraction of the QR image's shorter side
    #[arg(long, env = "QR_LOGO_RATIO", default_value_t = 0.25)]
    pub logo_ratio: f32,

    /// Accept logos without an alpha channel (pasted as opaque rectangles)
    #[arg(long, env = "QR_ALLOW_OPAQUE_LOGO")]
    pub allow_opaque_logo: bool,

    /// Maximum request body size in bytes
    #[arg(long, env = "QR_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Number of rendered PNGs kept for download
    #[arg(long, env = "QR_MAX_DOWNLOADS", default_value_t = DEFAULT_MAX_DOWNLOADS)]
    pub max_downloads: usize,

    /// Parent directory for the download scratch directory
    #[arg(long, env = "QR_DOWNLOAD_DIR")]
    pub download_dir: Option<PathBuf>,
}

impl Args {
    /// Tracing level for `log_level`; unknown values fall back to INFO.
    pub fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            render: RenderOptions {
                module_size: self.module_size,
                border: self.border,
                error_correction: self.error_correction,
                logo_ratio: self.logo_ratio,
                allow_opaque_logo: self.allow_opaque_logo,
            },
            max_upload_bytes: self.max_upload_bytes,
            max_downloads: self.max_downloads,
            download_dir: self.download_dir.clone(),
        }
    }
}

/// Everything `AppState` needs to start.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub render: RenderOptions,
    pub max_upload_bytes: usize,
    pub max_downloads: usize,
    pub download_dir: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_downloads: DEFAULT_MAX_DOWNLOADS,
            download_dir: None,
        }
    }
}
