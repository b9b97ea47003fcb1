//! Input to a single render.

use qr_common::{Color, QrError, QrResult};

use crate::logo::Logo;

/// Everything needed to produce one QR image.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Text or URL to encode; must be non-empty
    pub payload: String,
    /// Module color
    pub foreground: Color,
    /// Background and quiet-zone color
    pub background: Color,
    pub logo: Option<Logo>,
}

impl GenerationRequest {
    /// Black on white, no logo.
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            foreground: Color::BLACK,
            background: Color::WHITE,
            logo: None,
        }
    }

    pub fn with_colors(mut self, foreground: Color, background: Color) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    pub fn with_logo(mut self, logo: Logo) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Checks that do not need the logo decoded or the symbol encoded.
    pub fn validate(&self) -> QrResult<()> {
        if self.payload.is_empty() {
            return Err(QrError::Validation("payload must not be empty".to_string()));
        }
        Ok(())
    }
}
