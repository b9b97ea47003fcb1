//! End-to-end tests for `Renderer::render`.
//!
//! Covers:
//! - Payload validation and encoding failures
//! - Output geometry and colors
//! - Decodability (with and without a logo) using rqrr
//! - Logo sizing, centering and alpha masking

use image::{DynamicImage, RgbaImage};
use qr_renderer::{
    png, Color, ErrorCorrection, GenerationRequest, Logo, RenderOptions, Renderer,
};
use test_utils::{
    checker_logo, colors, opaque_center_logo, payloads, solid_logo, RgbaPixels,
};

// ============================================================================
// Helper functions
// ============================================================================

fn to_image(pixels: RgbaPixels) -> RgbaImage {
    RgbaImage::from_raw(pixels.width, pixels.height, pixels.data).expect("buffer size matches")
}

/// Upload-style logo: RGBA pixels encoded to PNG bytes, then decoded.
fn logo_from(pixels: RgbaPixels) -> Logo {
    let bytes = png::encode_rgba(&to_image(pixels)).unwrap();
    Logo::decode(&bytes).unwrap()
}

/// Decode the first QR code found in `image`.
fn decode(image: &RgbaImage) -> Option<String> {
    let gray = DynamicImage::ImageRgba8(image.clone()).to_luma8();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        gray.width() as usize,
        gray.height() as usize,
        |x, y| gray.get_pixel(x as u32, y as u32).0[0],
    );
    prepared
        .detect_grids()
        .into_iter()
        .find_map(|grid| grid.decode().ok())
        .map(|(_meta, content)| content)
}

/// Decode a QR code from PNG bytes.
fn decode_png(bytes: &[u8]) -> Option<String> {
    let image = image::load_from_memory(bytes).ok()?.to_rgba8();
    decode(&image)
}

// ============================================================================
// Validation and encoding errors
// ============================================================================

#[test]
fn test_empty_payload_is_validation_error() {
    let err = Renderer::default()
        .render(&GenerationRequest::new(""))
        .unwrap_err();
    assert_eq!(err.error_code(), "ValidationError");
}

#[test]
fn test_oversized_payload_is_encoding_error() {
    let err = Renderer::default()
        .render(&GenerationRequest::new(payloads::too_long()))
        .unwrap_err();
    assert_eq!(err.error_code(), "EncodingError");
}

#[test]
fn test_invalid_options_rejected() {
    let err = Renderer::new(RenderOptions {
        logo_ratio: 0.9,
        ..Default::default()
    })
    .unwrap_err();
    assert_eq!(err.error_code(), "ValidationError");
}

#[test]
fn test_every_non_empty_payload_renders() {
    let renderer = Renderer::default();
    let mut inputs: Vec<String> = payloads::ALL.iter().map(|s| s.to_string()).collect();
    inputs.extend((1..=200).step_by(7).map(|n| "a".repeat(n)));
    inputs.push(" ".to_string());

    for payload in inputs {
        let output = renderer
            .render(&GenerationRequest::new(payload.clone()))
            .unwrap_or_else(|e| panic!("payload of {} bytes failed: {}", payload.len(), e));
        assert!(output.width() > 0);
        assert_eq!(output.width(), output.height());
    }
}

// ============================================================================
// Geometry and colors
// ============================================================================

#[test]
fn test_scenario_url_black_on_white() {
    let renderer = Renderer::default();
    let request = GenerationRequest::new(payloads::URL).with_colors(
        colors::PICKER_BLACK.parse().unwrap(),
        colors::PICKER_WHITE.parse().unwrap(),
    );
    let output = renderer.render(&request).unwrap();

    let expected_side = (output.modules as u32 + 2 * 4) * 10;
    assert_eq!(output.width(), expected_side);
    assert_eq!(output.height(), expected_side);
    assert_eq!(output.error_correction, ErrorCorrection::High);
    assert!(output.logo_placement.is_none());

    let bytes = output.to_png().unwrap();
    assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    assert_eq!(decode_png(&bytes).as_deref(), Some(payloads::URL));
}

#[test]
fn test_round_trip_all_fixture_payloads() {
    let renderer = Renderer::default();
    for payload in payloads::ALL {
        let output = renderer.render(&GenerationRequest::new(payload)).unwrap();
        assert_eq!(decode(&output.image).as_deref(), Some(payload), "payload {:?}", payload);
    }
}

#[test]
fn test_custom_colors_applied_and_decodable() {
    let fg: Color = colors::NAMED_MAROON.parse().unwrap();
    let bg: Color = "#fffde7".parse().unwrap();
    let output = Renderer::default()
        .render(&GenerationRequest::new(payloads::WIFI).with_colors(fg, bg))
        .unwrap();

    assert_eq!(output.image.get_pixel(0, 0).0, bg.to_rgba());
    // First module of the top-left finder pattern sits just inside the border
    assert_eq!(output.image.get_pixel(40, 40).0, fg.to_rgba());
    assert!(output
        .image
        .pixels()
        .all(|p| p.0 == fg.to_rgba() || p.0 == bg.to_rgba()));
    assert_eq!(decode(&output.image).as_deref(), Some(payloads::WIFI));
}

#[test]
fn test_module_size_and_border_options() {
    let renderer = Renderer::new(RenderOptions {
        module_size: 3,
        border: 1,
        error_correction: ErrorCorrection::Low,
        ..Default::default()
    })
    .unwrap();
    let output = renderer.render(&GenerationRequest::new("hi")).unwrap();
    assert_eq!(output.modules, 21);
    assert_eq!(output.width(), (21 + 2) * 3);
}

// ============================================================================
// Logo compositing
// ============================================================================

#[test]
fn test_scenario_url_with_opaque_center_logo() {
    let renderer = Renderer::default();
    let plain = renderer.render(&GenerationRequest::new(payloads::URL)).unwrap();

    let logo = logo_from(opaque_center_logo(200, 200, [200, 30, 30]));
    let output = renderer
        .render(&GenerationRequest::new(payloads::URL).with_logo(logo))
        .unwrap();

    assert_eq!(output.image.dimensions(), plain.image.dimensions());
    let placement = output.logo_placement.unwrap();
    let target = (output.width() as f32 * 0.25).floor() as u32;
    assert_eq!((placement.width, placement.height), (target, target));

    let bytes = output.to_png().unwrap();
    assert_eq!(decode_png(&bytes).as_deref(), Some(payloads::URL));
}

#[test]
fn test_logo_never_changes_canvas_size() {
    let renderer = Renderer::default();
    let plain = renderer.render(&GenerationRequest::new(payloads::LONG_URL)).unwrap();

    for (w, h) in [(1, 1), (3, 5), (200, 200), (1000, 10), (10, 1000), (640, 480)] {
        let logo = logo_from(checker_logo(w, h, 2));
        let output = renderer
            .render(&GenerationRequest::new(payloads::LONG_URL).with_logo(logo))
            .unwrap();
        assert_eq!(output.image.dimensions(), plain.image.dimensions(), "logo {}x{}", w, h);

        let p = output.logo_placement.unwrap();
        assert!(p.x + p.width <= output.width());
        assert!(p.y + p.height <= output.height());
        assert!(p.width.max(p.height) == (output.width() as f32 * 0.25).floor() as u32);
    }
}

#[test]
fn test_logo_preserves_aspect_ratio() {
    let logo = logo_from(checker_logo(400, 200, 8));
    let output = Renderer::default()
        .render(&GenerationRequest::new(payloads::URL).with_logo(logo))
        .unwrap();
    let p = output.logo_placement.unwrap();
    let ratio = p.width as f64 / p.height as f64;
    assert!((ratio - 2.0).abs() < 0.05, "ratio was {}", ratio);
}

#[test]
fn test_logo_centered_on_even_and_odd_canvases() {
    // module_size 10 gives even sides; 3 gives odd ones (module counts are odd)
    for module_size in [10, 3] {
        let renderer = Renderer::new(RenderOptions {
            module_size,
            ..Default::default()
        })
        .unwrap();

        for (w, h) in [(200, 200), (37, 53), (64, 9), (1, 2)] {
            let logo = logo_from(checker_logo(w, h, 3));
            let output = renderer
                .render(&GenerationRequest::new(payloads::URL).with_logo(logo))
                .unwrap();

            let (cx, cy) = output.logo_placement.unwrap().center();
            let half_w = output.width() as f64 / 2.0;
            let half_h = output.height() as f64 / 2.0;
            assert!((cx - half_w).abs() <= 1.0, "x center {} vs {}", cx, half_w);
            assert!((cy - half_h).abs() <= 1.0, "y center {} vs {}", cy, half_h);
        }
    }
}

#[test]
fn test_small_logo_is_upscaled() {
    let logo = logo_from(solid_logo(4, 4, [0, 128, 0, 255]));
    let output = Renderer::default()
        .render(&GenerationRequest::new(payloads::URL).with_logo(logo))
        .unwrap();
    let p = output.logo_placement.unwrap();
    assert!(p.width > 4);
    assert_eq!(p.width, p.height);

    let (cx, cy) = p.center();
    let center = output.image.get_pixel(cx as u32, cy as u32).0;
    assert!(center[0] <= 10 && center[1] >= 120 && center[2] <= 10, "{:?}", center);
    assert_eq!(center[3], 255);
}

#[test]
fn test_transparent_logo_shows_qr_beneath() {
    let renderer = Renderer::default();
    let plain = renderer.render(&GenerationRequest::new(payloads::URL)).unwrap();

    let logo = logo_from(solid_logo(50, 50, [255, 0, 255, 0]));
    let masked = renderer
        .render(&GenerationRequest::new(payloads::URL).with_logo(logo))
        .unwrap();

    assert_eq!(masked.image, plain.image);
}

#[test]
fn test_output_stays_opaque_with_translucent_logo() {
    let logo = logo_from(solid_logo(30, 30, [0, 0, 255, 128]));
    let output = Renderer::default()
        .render(&GenerationRequest::new(payloads::URL).with_logo(logo))
        .unwrap();
    assert!(output.image.pixels().all(|p| p[3] == 255));
}

#[test]
fn test_logo_without_alpha_rejected_by_default() {
    let rgb_png = png::encode_rgb(&to_image(checker_logo(32, 32, 4))).unwrap();
    let logo = Logo::decode(&rgb_png).unwrap();
    assert!(!logo.has_alpha());

    let request = GenerationRequest::new(payloads::URL).with_logo(logo);
    let err = Renderer::default().render(&request).unwrap_err();
    assert_eq!(err.error_code(), "ImageError");

    let lenient = Renderer::new(RenderOptions {
        allow_opaque_logo: true,
        ..Default::default()
    })
    .unwrap();
    let output = lenient.render(&request).unwrap();
    assert!(output.logo_placement.is_some());
}

#[test]
fn test_undecodable_logo_is_image_error() {
    let err = Logo::decode(b"\x89PNG\r\n\x1a\nthis is truncated").unwrap_err();
    assert_eq!(err.error_code(), "ImageError");
}

#[test]
fn test_write_png_to_disk() {
    let dir = test_utils::temp_test_dir_with_prefix("qr_render");
    let path = dir.path().join("qr_code_test.png");

    let output = Renderer::default()
        .render(&GenerationRequest::new(payloads::NUMERIC))
        .unwrap();
    output.write_png(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(decode_png(&bytes).as_deref(), Some(payloads::NUMERIC));
}
