//! QR symbol encoding and module rasterization.

use image::{Rgba, RgbaImage};
use qr_common::{Color, ErrorCorrection, QrError, QrResult};
use qrcode::{EcLevel, QrCode, Version};

/// An encoded QR symbol: a square grid of dark/light modules.
#[derive(Debug, Clone)]
pub struct QrSymbol {
    /// Modules per side
    width: usize,
    /// Row-major, `true` = dark
    modules: Vec<bool>,
    version: i16,
    error_correction: ErrorCorrection,
}

fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::Low => EcLevel::L,
        ErrorCorrection::Medium => EcLevel::M,
        ErrorCorrection::Quartile => EcLevel::Q,
        ErrorCorrection::High => EcLevel::H,
    }
}

impl QrSymbol {
    /// Encode `payload` with the smallest version that fits at `level`.
    pub fn encode(payload: &str, level: ErrorCorrection) -> QrResult<Self> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), ec_level(level))
            .map_err(|e| {
                QrError::Encoding(format!(
                    "cannot encode {} bytes at level {}: {}",
                    payload.len(),
                    level,
                    e
                ))
            })?;

        let version = match code.version() {
            Version::Normal(v) | Version::Micro(v) => v,
        };
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();

        Ok(Self {
            width: code.width(),
            modules,
            version,
            error_correction: level,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn version(&self) -> i16 {
        self.version
    }

    pub fn error_correction(&self) -> ErrorCorrection {
        self.error_correction
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.width + x]
    }

    /// Raster edge length for the given module size and quiet zone.
    pub fn image_side(&self, module_size: u32, border: u32) -> u32 {
        (self.width as u32 + 2 * border) * module_size
    }

    /// Paint the symbol onto a new opaque canvas.
    ///
    /// Dark modules take `foreground`; light modules and the `border`-module
    /// quiet zone take `background`.
    pub fn rasterize(
        &self,
        foreground: Color,
        background: Color,
        module_size: u32,
        border: u32,
    ) -> RgbaImage {
        let side = self.image_side(module_size, border);
        let mut image = RgbaImage::from_pixel(side, side, Rgba(background.to_rgba()));
        let dark = Rgba(foreground.to_rgba());

        for y in 0..self.width {
            for x in 0..self.width {
                if !self.is_dark(x, y) {
                    continue;
                }
                let px = (x as u32 + border) * module_size;
                let py = (y as u32 + border) * module_size;
                for dy in 0..module_size {
                    for dx in 0..module_size {
                        image.put_pixel(px + dx, py + dy, dark);
                    }
                }
            }
        }

        image
    }
}
