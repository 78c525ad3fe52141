//! Test fixtures: small photos written with the `image` crate.

use image::{ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// Panel colors as RGB triples
pub mod colors {
    pub const WHITE: [u8; 3] = [255, 255, 255];
    pub const BLACK: [u8; 3] = [0, 0, 0];
    pub const RED: [u8; 3] = [255, 0, 0];
    pub const BLUE: [u8; 3] = [0, 0, 255];
    pub const GREEN: [u8; 3] = [0, 128, 0];
}

/// Write a uniform PNG into `dir`
pub fn solid_png(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb(color))
        .save_with_format(&path, ImageFormat::Png)
        .expect("Failed to write PNG fixture");
    path
}

/// Write a gradient JPEG into `dir`
pub fn gradient_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    })
    .save_with_format(&path, ImageFormat::Jpeg)
    .expect("Failed to write JPEG fixture");
    path
}

/// Encode a uniform PNG in memory
pub fn solid_png_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbImage::from_pixel(width, height, Rgb(color))
        .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("Failed to encode PNG");
    bytes
}
