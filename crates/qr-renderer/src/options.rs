//! Rendering options shared by every request a `Renderer` serves.

use qr_common::{ErrorCorrection, QrError, QrResult};
use serde::{Deserialize, Serialize};

/// Largest accepted module edge in pixels.
pub const MAX_MODULE_SIZE: u32 = 64;

/// Largest accepted quiet zone in modules.
pub const MAX_BORDER: u32 = 16;

/// Largest accepted logo-to-QR ratio. Beyond this the logo hides too much
/// of the symbol for any error-correction level to recover.
pub const MAX_LOGO_RATIO: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Edge length of one module in pixels
    pub module_size: u32,

    /// Quiet zone width in modules
    pub border: u32,

    /// Error-correction level for every encode
    pub error_correction: ErrorCorrection,

    /// Logo bounding square as a fraction of the QR image's shorter side
    pub logo_ratio: f32,

    /// Paste logos without an alpha channel as fully opaque instead of
    /// rejecting them
    pub allow_opaque_logo: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module_size: 10,
            border: 4,
            error_correction: ErrorCorrection::High,
            logo_ratio: 0.25,
            allow_opaque_logo: false,
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> QrResult<()> {
        if self.module_size == 0 || self.module_size > MAX_MODULE_SIZE {
            return Err(QrError::invalid(
                "module_size",
                format!("must be between 1 and {}, got {}", MAX_MODULE_SIZE, self.module_size),
            ));
        }
        if self.border > MAX_BORDER {
            return Err(QrError::invalid(
                "border",
                format!("must be at most {}, got {}", MAX_BORDER, self.border),
            ));
        }
        if !(self.logo_ratio > 0.0 && self.logo_ratio <= MAX_LOGO_RATIO) {
            return Err(QrError::invalid(
                "logo_ratio",
                format!("must be in (0, {}], got {}", MAX_LOGO_RATIO, self.logo_ratio),
            ));
        }
        Ok(())
    }
}
