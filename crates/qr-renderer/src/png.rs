//! PNG encoding for rendered QR images.
//!
//! Supports three color types:
//! - **Indexed (3)**: images with ≤256 unique colors. A plain QR code has
//!   exactly two, so this is the common case and yields tiny files.
//! - **RGB (2)**: fully opaque images with many colors (QR + logo).
//! - **RGBA (6)**: everything else.
//!
//! Only IHDR, PLTE, tRNS, IDAT and IEND are written.

use flate2::{write::ZlibEncoder, Compression};
use image::RgbaImage;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

/// Pixel count above which palette extraction runs on the rayon pool
const PARALLEL_THRESHOLD: usize = 65_536;

const COLOR_TYPE_RGB: u8 = 2;
const COLOR_TYPE_INDEXED: u8 = 3;
const COLOR_TYPE_RGBA: u8 = 6;

/// Encode with the most compact color type that represents `image` exactly.
pub fn encode_auto(image: &RgbaImage) -> io::Result<Vec<u8>> {
    if let Some(palette) = Palette::extract(image.as_raw()) {
        return encode_indexed(image.width(), image.height(), &palette);
    }
    if image.pixels().all(|p| p[3] == 255) {
        encode_rgb(image)
    } else {
        encode_rgba(image)
    }
}

/// Encode as truecolor with alpha.
pub fn encode_rgba(image: &RgbaImage) -> io::Result<Vec<u8>> {
    let (width, height) = image.dimensions();
    let idat = deflate_scanlines(image.as_raw(), width as usize * 4, height as usize)?;

    let mut png = start_png(width, height, COLOR_TYPE_RGBA);
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

/// Encode as truecolor, discarding alpha.
pub fn encode_rgb(image: &RgbaImage) -> io::Result<Vec<u8>> {
    let (width, height) = image.dimensions();
    let rgb: Vec<u8> = image
        .as_raw()
        .chunks_exact(4)
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();
    let idat = deflate_scanlines(&rgb, width as usize * 3, height as usize)?;

    let mut png = start_png(width, height, COLOR_TYPE_RGB);
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

fn encode_indexed(width: u32, height: u32, palette: &Palette) -> io::Result<Vec<u8>> {
    let mut png = start_png(width, height, COLOR_TYPE_INDEXED);

    let plte: Vec<u8> = palette.colors.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    if palette.colors.iter().any(|c| c[3] < 255) {
        let trns: Vec<u8> = palette.colors.iter().map(|c| c[3]).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_scanlines(&palette.indices, width as usize, height as usize)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

/// Signature plus IHDR for an 8-bit, non-interlaced image.
fn start_png(width: u32, height: u32, color_type: u8) -> Vec<u8> {
    let mut png = Vec::with_capacity(1024);
    png.extend_from_slice(&PNG_SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(color_type);
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr);

    png
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix every scanline with filter type 0 and zlib-compress.
fn deflate_scanlines(data: &[u8], row_bytes: usize, height: usize) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(
        Vec::with_capacity(data.len() / 4 + 64),
        Compression::default(),
    );
    for row in data.chunks_exact(row_bytes.max(1)).take(height) {
        encoder.write_all(&[0])?;
        encoder.write_all(row)?;
    }
    encoder.finish()
}

#[inline(always)]
fn pack(p: &[u8]) -> u32 {
    u32::from_le_bytes([p[0], p[1], p[2], p[3]])
}

/// Palette and per-pixel indices for an indexed PNG.
struct Palette {
    colors: Vec<[u8; 4]>,
    indices: Vec<u8>,
}

impl Palette {
    /// `None` when the image has more than 256 distinct RGBA values.
    fn extract(raw: &[u8]) -> Option<Self> {
        let pixel_count = raw.len() / 4;
        let unique = if pixel_count < PARALLEL_THRESHOLD {
            unique_colors(raw)?
        } else {
            let chunk = (pixel_count / rayon::current_num_threads()).max(4096) * 4;
            raw.par_chunks(chunk).map(unique_colors).try_reduce(HashSet::new, |mut a, b| {
                a.extend(b);
                (a.len() <= MAX_PALETTE_SIZE).then_some(a)
            })?
        };

        // Sorted for deterministic output
        let mut packed: Vec<u32> = unique.into_iter().collect();
        packed.sort_unstable();

        let lookup: HashMap<u32, u8> = packed
            .iter()
            .enumerate()
            .map(|(i, c)| (*c, i as u8))
            .collect();
        let colors: Vec<[u8; 4]> = packed.iter().map(|c| c.to_le_bytes()).collect();

        let index_of = |p: &[u8]| lookup.get(&pack(p)).copied().unwrap_or(0);
        let indices: Vec<u8> = if pixel_count < PARALLEL_THRESHOLD {
            raw.chunks_exact(4).map(index_of).collect()
        } else {
            raw.par_chunks_exact(4).map(index_of).collect()
        };

        Some(Self { colors, indices })
    }
}

fn unique_colors(raw: &[u8]) -> Option<HashSet<u32>> {
    let mut set = HashSet::with_capacity(16);
    for p in raw.chunks_exact(4) {
        if set.insert(pack(p)) && set.len() > MAX_PALETTE_SIZE {
            return None;
        }
    }
    Some(set)
}
