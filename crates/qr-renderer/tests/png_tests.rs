//! PNG encoder tests: output re-decodes to the exact source pixels.

use image::{ColorType, RgbaImage};
use qr_renderer::{png, Color, GenerationRequest, Logo, Renderer};
use test_utils::{colors, gradient_logo, RgbaPixels};

fn to_image(pixels: RgbaPixels) -> RgbaImage {
    RgbaImage::from_raw(pixels.width, pixels.height, pixels.data).expect("buffer size matches")
}

fn reload(bytes: &[u8]) -> image::DynamicImage {
    image::load_from_memory_with_format(bytes, image::ImageFormat::Png).unwrap()
}

#[test]
fn test_two_color_qr_is_indexed_and_lossless() {
    let navy: Color = colors::RGBA_NAVY.parse().unwrap();
    let output = Renderer::default()
        .render(&GenerationRequest::new("indexed").with_colors(navy, Color::WHITE))
        .unwrap();

    let bytes = output.to_png().unwrap();
    // IHDR color type byte
    assert_eq!(bytes[25], 3);
    assert_eq!(reload(&bytes).to_rgba8(), output.image);
}

#[test]
fn test_translucent_gradient_is_rgba_and_lossless() {
    let image = to_image(gradient_logo(300, 40));
    let bytes = png::encode_auto(&image).unwrap();

    let decoded = reload(&bytes);
    assert_eq!(decoded.color(), ColorType::Rgba8);
    assert_eq!(decoded.to_rgba8(), image);
}

#[test]
fn test_rgb_drops_alpha_only() {
    let image = to_image(gradient_logo(300, 40));
    let decoded = reload(&png::encode_rgb(&image).unwrap());
    assert_eq!(decoded.color(), ColorType::Rgb8);

    let rgb = decoded.to_rgb8();
    for (src, out) in image.pixels().zip(rgb.pixels()) {
        assert_eq!(&src.0[..3], &out.0[..]);
    }
}

#[test]
fn test_qr_with_gradient_logo_round_trips() {
    let logo = Logo::decode(&png::encode_rgba(&to_image(gradient_logo(120, 120))).unwrap()).unwrap();
    let output = Renderer::default()
        .render(&GenerationRequest::new("https://example.com/menu").with_logo(logo))
        .unwrap();

    let bytes = output.to_png().unwrap();
    assert_eq!(reload(&bytes).to_rgba8(), output.image);
}
