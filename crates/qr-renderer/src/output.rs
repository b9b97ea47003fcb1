//! Finished render results.

use image::RgbaImage;
use qr_common::{ErrorCorrection, QrResult};
use serde::Serialize;
use std::path::Path;

use crate::png;

/// Where a logo landed on the QR image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogoPlacement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl LogoPlacement {
    /// Center of the bounding box.
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

/// The composited QR image returned to callers.
#[derive(Debug, Clone)]
pub struct OutputImage {
    pub image: RgbaImage,
    /// Modules per side of the encoded symbol
    pub modules: usize,
    pub version: i16,
    pub error_correction: ErrorCorrection,
    pub logo_placement: Option<LogoPlacement>,
}

impl OutputImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Encode as a standard PNG (no metadata chunks).
    pub fn to_png(&self) -> QrResult<Vec<u8>> {
        Ok(png::encode_auto(&self.image)?)
    }

    /// Encode and write to `path`.
    pub fn write_png(&self, path: impl AsRef<Path>) -> QrResult<()> {
        let bytes = self.to_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
