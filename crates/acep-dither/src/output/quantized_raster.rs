//! QuantizedRaster: one device code per pixel.
//!
//! [`QuantizedRaster`] is the canonical output of the dithering pass. Codes
//! are stored in raster order and every code is a palette entry's code.

use std::io;

use super::listing;
use crate::color::Rgb;
use crate::palette::{Palette, PaletteColor};

/// Device codes for a dithered image.
///
/// # Example
///
/// ```
/// use acep_dither::{Palette, QuantizedRaster, Rgb};
///
/// let colors = [Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)];
/// let raster = QuantizedRaster::from_colors(&colors, 2, 1, Palette::acep());
///
/// assert_eq!(raster.codes(), &[0xE0, 0x2B]);
/// assert_eq!(raster.to_listing(), "    0xE0, 0x2B,\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedRaster {
    /// Device codes, one per pixel, row-major order.
    codes: Vec<u8>,
    width: usize,
    height: usize,
}

impl QuantizedRaster {
    /// Map final raster colors to device codes.
    ///
    /// A color missing from the palette is encoded as white; the diffuser
    /// never produces one, so this only matters for hand-built inputs.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `colors.len() == width * height`.
    pub fn from_colors(colors: &[Rgb], width: usize, height: usize, palette: &Palette) -> Self {
        debug_assert_eq!(
            colors.len(),
            width * height,
            "colors length ({}) must match width * height ({}x{}={})",
            colors.len(),
            width,
            height,
            width * height,
        );
        Self {
            codes: colors.iter().map(|&c| palette.code_for(c)).collect(),
            width,
            height,
        }
    }

    /// Device codes in raster order.
    #[inline]
    pub fn codes(&self) -> &[u8] {
        &self.codes
    }

    #[inline]
    pub fn into_codes(self) -> Vec<u8> {
        self.codes
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Palette colors in raster order.
    pub fn colors(&self) -> impl Iterator<Item = PaletteColor> + '_ {
        self.codes
            .iter()
            .map(|&c| PaletteColor::try_from(c).unwrap_or(PaletteColor::White))
    }

    /// Count of pixels per palette color, in table order.
    pub fn histogram(&self) -> [(PaletteColor, usize); 7] {
        let mut counts = PaletteColor::ALL.map(|c| (c, 0usize));
        for color in self.colors() {
            if let Some(slot) = counts.iter_mut().find(|(c, _)| *c == color) {
                slot.1 += 1;
            }
        }
        counts
    }

    /// Text listing of the codes, see [`listing::format_listing`].
    pub fn to_listing(&self) -> String {
        listing::format_listing(&self.codes)
    }

    /// Write the text listing to `writer`.
    pub fn write_listing<W: io::Write>(&self, writer: W) -> io::Result<()> {
        listing::write_listing(&self.codes, writer)
    }
}
