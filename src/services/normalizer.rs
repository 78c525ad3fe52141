//! Decode a photo and bring it to panel resolution.

use std::io::Cursor;
use std::path::Path;

use acep_dither::Raster;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageReader};

use crate::error::ConvertError;
use crate::models::DisplaySpec;

/// Resampling filter used for every conversion (bicubic).
pub const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Read and normalize an image file.
pub fn normalize_file(path: &Path, spec: DisplaySpec) -> Result<Raster, ConvertError> {
    let bytes = std::fs::read(path)?;
    normalize_bytes(&bytes, spec)
}

/// Decode an encoded image. The format is sniffed from the content, so a
/// JPEG saved as `.png` still decodes.
pub fn normalize_bytes(bytes: &[u8], spec: DisplaySpec) -> Result<Raster, ConvertError> {
    let image = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;
    normalize_image(&image, spec)
}

/// Drop alpha and stretch to exactly `spec.width` x `spec.height`.
/// Aspect ratio is not preserved.
pub fn normalize_image(image: &DynamicImage, spec: DisplaySpec) -> Result<Raster, ConvertError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(ConvertError::Resample(format!(
            "source image is {}x{}",
            image.width(),
            image.height()
        )));
    }
    if spec.width == 0 || spec.height == 0 {
        return Err(ConvertError::Resample(format!(
            "target size is {}x{}",
            spec.width, spec.height
        )));
    }

    let rgb = image.to_rgb8();
    let resized = if rgb.dimensions() == (spec.width, spec.height) {
        rgb
    } else {
        imageops::resize(&rgb, spec.width, spec.height, RESIZE_FILTER)
    };

    Raster::from_rgb_bytes(
        spec.width as usize,
        spec.height as usize,
        resized.as_raw(),
    )
    .map_err(|e| ConvertError::Resample(e.to_string()))
}
