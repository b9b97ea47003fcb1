//! Logo decoding, fitting and compositing.
//!
//! A logo is scaled so its longer side matches a fixed fraction of the QR
//! image's shorter side, then alpha-blended over the exact center. The canvas
//! never grows: the fitted logo is at most half the QR side.

use image::imageops::{self, FilterType};
use image::io::{Limits, Reader};
use image::{ImageError, RgbaImage};
use qr_common::{QrError, QrResult};
use std::io::Cursor;
use tracing::debug;

use crate::output::LogoPlacement;

/// Largest accepted logo width or height in pixels.
pub const MAX_LOGO_EDGE: u32 = 4096;

fn too_large(width: u32, height: u32) -> QrError {
    QrError::Image(format!(
        "logo is {}x{} pixels; the limit is {} per side",
        width, height, MAX_LOGO_EDGE
    ))
}

fn reader(bytes: &[u8]) -> QrResult<Reader<Cursor<&[u8]>>> {
    Reader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| QrError::Image(format!("cannot read logo: {}", e)))
}

/// A decoded logo raster.
#[derive(Debug, Clone)]
pub struct Logo {
    image: RgbaImage,
    has_alpha: bool,
}

impl Logo {
    /// Decode an uploaded image (PNG, JPEG, GIF, BMP, WebP).
    pub fn decode(bytes: &[u8]) -> QrResult<Self> {
        if bytes.is_empty() {
            return Err(QrError::Image("logo file is empty".to_string()));
        }

        // Header-only read so oversized rasters are never allocated
        let (width, height) = reader(bytes)?
            .into_dimensions()
            .map_err(|e| QrError::Image(format!("cannot decode logo: {}", e)))?;
        if width > MAX_LOGO_EDGE || height > MAX_LOGO_EDGE {
            return Err(too_large(width, height));
        }

        let mut limits = Limits::default();
        limits.max_image_width = Some(MAX_LOGO_EDGE);
        limits.max_image_height = Some(MAX_LOGO_EDGE);
        let mut decoder = reader(bytes)?;
        decoder.limits(limits);
        let decoded = decoder.decode().map_err(|e| match e {
            ImageError::Limits(_) => too_large(width, height),
            e => QrError::Image(format!("cannot decode logo: {}", e)),
        })?;
        if decoded.width() == 0 || decoded.height() == 0 {
            return Err(QrError::Image("logo has zero size".to_string()));
        }

        let has_alpha = decoded.color().has_alpha();
        debug!(
            width = decoded.width(),
            height = decoded.height(),
            color = ?decoded.color(),
            "Decoded logo"
        );

        Ok(Self {
            image: decoded.to_rgba8(),
            has_alpha,
        })
    }

    /// Wrap an in-memory RGBA raster.
    pub fn from_rgba(image: RgbaImage) -> QrResult<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(QrError::Image("logo has zero size".to_string()));
        }
        Ok(Self {
            image,
            has_alpha: true,
        })
    }

    /// Whether the source carried an alpha channel usable as a paste mask.
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Edge of the square the logo must fit in for a `width`×`height` canvas.
pub fn target_edge(width: u32, height: u32, ratio: f32) -> u32 {
    ((width.min(height) as f64 * ratio as f64).floor() as u32).max(1)
}

/// Scale `(w, h)` so the longer side equals `target`, keeping aspect ratio.
///
/// Both up- and downscaling happen; neither side drops below one pixel.
pub fn fit_within(w: u32, h: u32, target: u32) -> (u32, u32) {
    let longer = w.max(h).max(1) as f64;
    let scale = target as f64 / longer;
    let side = |v: u32| ((v as f64 * scale).round() as u32).clamp(1, target.max(1));
    (side(w), side(h))
}

/// Top-left origin that centers a `logo` box on a `canvas`.
pub fn centered_origin(canvas: (u32, u32), logo: (u32, u32)) -> (u32, u32) {
    (
        canvas.0.saturating_sub(logo.0) / 2,
        canvas.1.saturating_sub(logo.1) / 2,
    )
}

/// Resize `logo` for `canvas` and blend it over the center.
///
/// Transparent logo pixels leave the QR untouched; opaque ones replace it.
/// The covered region stays fully opaque.
pub fn composite(canvas: &mut RgbaImage, logo: &Logo, ratio: f32) -> LogoPlacement {
    let (cw, ch) = canvas.dimensions();
    let (lw, lh) = logo.dimensions();
    let target = target_edge(cw, ch, ratio);
    let (w, h) = fit_within(lw, lh, target);

    let resized = if (w, h) == (lw, lh) {
        logo.image.clone()
    } else {
        imageops::resize(&logo.image, w, h, FilterType::Lanczos3)
    };

    let (x, y) = centered_origin((cw, ch), (w, h));
    imageops::overlay(canvas, &resized, x as i64, y as i64);

    // Blending over an opaque base can round alpha down by one
    for py in y..y + h {
        for px in x..x + w {
            canvas.get_pixel_mut(px, py)[3] = 255;
        }
    }

    debug!(
        source_width = lw,
        source_height = lh,
        width = w,
        height = h,
        x = x,
        y = y,
        "Composited logo"
    );

    LogoPlacement {
        x,
        y,
        width: w,
        height: h,
    }
}
