//! Synthetic logo images.
//!
//! Every generator returns a predictable RGBA buffer so tests can assert on
//! exact pixels after compositing.

/// A raw RGBA raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaPixels {
    pub width: u32,
    pub height: u32,
    /// Row-major, 4 bytes per pixel
    pub data: Vec<u8>,
}

impl RgbaPixels {
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Self {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self { width, height, data }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }
}

/// Transparent square with an opaque square in the middle half.
///
/// The opaque region spans `[w/4, 3w/4) x [h/4, 3h/4)`.
pub fn opaque_center_logo(width: u32, height: u32, color: [u8; 3]) -> RgbaPixels {
    RgbaPixels::from_fn(width, height, |x, y| {
        let inside = x >= width / 4 && x < width * 3 / 4 && y >= height / 4 && y < height * 3 / 4;
        if inside {
            [color[0], color[1], color[2], 255]
        } else {
            [0, 0, 0, 0]
        }
    })
}

/// A single color everywhere.
pub fn solid_logo(width: u32, height: u32, rgba: [u8; 4]) -> RgbaPixels {
    RgbaPixels::from_fn(width, height, |_, _| rgba)
}

/// Opaque two-tone checkerboard with `cell`-pixel squares.
pub fn checker_logo(width: u32, height: u32, cell: u32) -> RgbaPixels {
    let cell = cell.max(1);
    RgbaPixels::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            [220, 40, 40, 255]
        } else {
            [40, 40, 220, 255]
        }
    })
}

/// Horizontal gradient from transparent to opaque; many distinct colors.
pub fn gradient_logo(width: u32, height: u32) -> RgbaPixels {
    RgbaPixels::from_fn(width, height, |x, y| {
        let t = x * 255 / width.max(2).saturating_sub(1);
        [t as u8, (y * 255 / height.max(1)) as u8, 128, t as u8]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_center_logo() {
        let logo = opaque_center_logo(200, 200, [255, 0, 0]);
        assert_eq!(logo.data.len(), 200 * 200 * 4);
        assert_eq!(logo.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(logo.pixel(100, 100), [255, 0, 0, 255]);
        assert_eq!(logo.pixel(49, 100)[3], 0);
        assert_eq!(logo.pixel(50, 100)[3], 255);
        assert_eq!(logo.pixel(150, 100)[3], 0);
    }

    #[test]
    fn test_checker_logo() {
        let logo = checker_logo(4, 4, 2);
        assert_eq!(logo.pixel(0, 0), logo.pixel(3, 3));
        assert_ne!(logo.pixel(0, 0), logo.pixel(2, 0));
    }

    #[test]
    fn test_gradient_logo_alpha_range() {
        let logo = gradient_logo(64, 8);
        assert_eq!(logo.pixel(0, 0)[3], 0);
        assert_eq!(logo.pixel(63, 0)[3], 255);
    }
}
