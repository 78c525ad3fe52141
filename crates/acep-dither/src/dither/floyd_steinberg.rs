//! Floyd-Steinberg error diffusion dithering algorithm.
//!
//! The pass is strictly sequential: every pixel's decision depends on the
//! error pushed into it by pixels earlier in raster order, so the output is
//! only reproducible when pixels are visited top-to-bottom, left-to-right.

use crate::output::QuantizedRaster;
use crate::palette::{Palette, PaletteEntry};
use crate::raster::Raster;

use super::FLOYD_STEINBERG;

/// Floyd-Steinberg error diffusion dithering.
///
/// # Algorithm
///
/// For each pixel in raster order:
///
/// 1. Quantize its current value (original plus any accumulated error)
/// 2. Compute `error = current - quantized` per channel
/// 3. Add `trunc(error * w / 16)` to the unvisited neighbors
/// 4. Overwrite the pixel with the quantized color
///
/// ```text
///        X   7
///    3   5   1
/// ```
///
/// Channels are clamped to `0..=255` only once the whole raster is done.
///
/// # Example
///
/// ```
/// use acep_dither::{FloydSteinberg, Palette, Raster, Rgb};
///
/// let mut raster = Raster::filled(4, 4, Rgb::new(255, 255, 255));
/// let quantized = FloydSteinberg.dither(&mut raster, Palette::acep());
/// assert!(quantized.codes().iter().all(|&c| c == 0xFF));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FloydSteinberg;

impl FloydSteinberg {
    /// Process a single pixel: quantize it, diffuse its error, and store
    /// the palette color in its place.
    ///
    /// Callers must visit pixels in raster order.
    pub fn step<'p>(
        &self,
        raster: &mut Raster,
        palette: &'p Palette,
        x: usize,
        y: usize,
    ) -> &'p PaletteEntry {
        let current = raster.get(x, y);
        let nearest = palette.find_nearest(current);
        let error = current.delta(nearest.wide());

        FLOYD_STEINBERG.diffuse(raster, x, y, error);
        raster.set(x, y, nearest.wide());

        nearest
    }

    /// Dither the whole raster in place and encode it as device codes.
    pub fn dither(&self, raster: &mut Raster, palette: &Palette) -> QuantizedRaster {
        for y in 0..raster.height() {
            for x in 0..raster.width() {
                self.step(raster, palette, x, y);
            }
        }

        QuantizedRaster::from_colors(&raster.to_rgb(), raster.width(), raster.height(), palette)
    }
}
