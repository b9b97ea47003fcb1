//! The QR renderer.

use qr_common::{QrError, QrResult};
use tracing::{debug, instrument, warn};

use crate::logo;
use crate::options::RenderOptions;
use crate::output::OutputImage;
use crate::request::GenerationRequest;
use crate::symbol::QrSymbol;

/// Contrast ratio below which scanners commonly fail to read a code.
pub const LOW_CONTRAST_RATIO: f64 = 2.0;

/// Stateless QR renderer holding validated options.
///
/// Each `render` call is independent and runs to completion synchronously;
/// a `Renderer` can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Renderer {
    options: RenderOptions,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            options: RenderOptions::default(),
        }
    }
}

impl Renderer {
    pub fn new(options: RenderOptions) -> QrResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `request` into a finished image.
    ///
    /// # Errors
    /// - `Validation` when the payload is empty
    /// - `Encoding` when the payload does not fit any QR version
    /// - `Image` when the logo has no alpha channel and opaque logos are
    ///   not allowed
    #[instrument(skip_all, fields(
        payload_len = request.payload.len(),
        has_logo = request.logo.is_some(),
    ))]
    pub fn render(&self, request: &GenerationRequest) -> QrResult<OutputImage> {
        request.validate()?;

        if let Some(logo) = &request.logo {
            if !logo.has_alpha() && !self.options.allow_opaque_logo {
                return Err(QrError::Image(
                    "logo has no alpha channel to use as a mask; upload a PNG with transparency"
                        .to_string(),
                ));
            }
        }

        let contrast = request.foreground.contrast_ratio(&request.background);
        if contrast < LOW_CONTRAST_RATIO {
            warn!(
                foreground = %request.foreground,
                background = %request.background,
                contrast = contrast,
                "Low foreground/background contrast; code may not scan"
            );
        }

        let symbol = QrSymbol::encode(&request.payload, self.options.error_correction)?;
        let mut image = symbol.rasterize(
            request.foreground,
            request.background,
            self.options.module_size,
            self.options.border,
        );

        let logo_placement = request
            .logo
            .as_ref()
            .map(|logo| logo::composite(&mut image, logo, self.options.logo_ratio));

        debug!(
            version = symbol.version(),
            modules = symbol.width(),
            width = image.width(),
            height = image.height(),
            "Rendered QR code"
        );

        Ok(OutputImage {
            image,
            modules: symbol.width(),
            version: symbol.version(),
            error_correction: symbol.error_correction(),
            logo_placement,
        })
    }
}
