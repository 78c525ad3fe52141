//! Working raster for error diffusion.
//!
//! [`Raster`] owns a dense row-major buffer of [`WideRgb`] samples. A raster
//! belongs to exactly one conversion and is mutated in place by the
//! diffuser.

use std::fmt;

use crate::color::{Rgb, WideRgb};

/// Error returned when a pixel buffer does not match the requested size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSizeError {
    /// Samples required by `width * height`
    pub expected: usize,
    /// Samples actually supplied
    pub actual: usize,
}

impl fmt::Display for RasterSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pixel buffer holds {} samples, expected {}",
            self.actual, self.expected
        )
    }
}

impl std::error::Error for RasterSizeError {}

/// A width × height image of widened color samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<WideRgb>,
}

impl Raster {
    /// Create a raster filled with a single color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![WideRgb::from(color); width * height],
        }
    }

    /// Create a raster from row-major colors.
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: &[Rgb],
    ) -> Result<Self, RasterSizeError> {
        if pixels.len() != width * height {
            return Err(RasterSizeError {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: pixels.iter().map(|&c| WideRgb::from(c)).collect(),
        })
    }

    /// Create a raster from interleaved `[R, G, B, R, G, B, ...]` bytes,
    /// the layout of a decoded RGB8 image buffer.
    ///
    /// # Example
    /// ```
    /// use acep_dither::Raster;
    /// let raster = Raster::from_rgb_bytes(2, 1, &[255, 0, 0, 0, 0, 255]).unwrap();
    /// assert_eq!(raster.width(), 2);
    /// assert!(Raster::from_rgb_bytes(2, 2, &[0; 6]).is_err());
    /// ```
    pub fn from_rgb_bytes(
        width: usize,
        height: usize,
        bytes: &[u8],
    ) -> Result<Self, RasterSizeError> {
        if bytes.len() != width * height * 3 {
            return Err(RasterSizeError {
                expected: width * height,
                actual: bytes.len() / 3,
            });
        }
        Ok(Self {
            width,
            height,
            pixels: bytes
                .chunks_exact(3)
                .map(|c| WideRgb::new(c[0] as i16, c[1] as i16, c[2] as i16))
                .collect(),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major samples.
    #[inline]
    pub fn pixels(&self) -> &[WideRgb] {
        &self.pixels
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> WideRgb {
        self.pixels[y * self.width + x]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut WideRgb {
        &mut self.pixels[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: WideRgb) {
        self.pixels[y * self.width + x] = color;
    }

    /// Samples clamped into `0..=255`, row-major.
    pub fn to_rgb(&self) -> Vec<Rgb> {
        self.pixels.iter().map(|p| p.clamp_to_rgb()).collect()
    }
}
