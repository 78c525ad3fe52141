//! The fixed seven-color ACeP palette and nearest-color search.
//!
//! The table order is load-bearing: [`Palette::find_nearest`] keeps the
//! first entry with the minimal distance, so reordering the table changes
//! which color wins a tie and therefore the dither pattern.

use super::error::PaletteError;
use crate::color::{Rgb, WideRgb};

/// One of the seven colors the panel can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    White,
    Yellow,
    Orange,
    Red,
    Green,
    Blue,
    Black,
}

impl PaletteColor {
    /// All colors in table order.
    pub const ALL: [PaletteColor; 7] = [
        PaletteColor::White,
        PaletteColor::Yellow,
        PaletteColor::Orange,
        PaletteColor::Red,
        PaletteColor::Green,
        PaletteColor::Blue,
        PaletteColor::Black,
    ];

    /// Canonical sRGB value of this color.
    pub const fn rgb(self) -> Rgb {
        match self {
            PaletteColor::White => Rgb::new(255, 255, 255),
            PaletteColor::Yellow => Rgb::new(255, 255, 0),
            PaletteColor::Orange => Rgb::new(255, 165, 0),
            PaletteColor::Red => Rgb::new(255, 0, 0),
            PaletteColor::Green => Rgb::new(0, 128, 0),
            PaletteColor::Blue => Rgb::new(0, 0, 255),
            PaletteColor::Black => Rgb::new(0, 0, 0),
        }
    }

    /// Device code sent to the panel controller for this color.
    pub const fn code(self) -> u8 {
        match self {
            PaletteColor::White => 0xFF,
            PaletteColor::Yellow => 0xFC,
            PaletteColor::Orange => 0xEC,
            PaletteColor::Red => 0xE0,
            PaletteColor::Green => 0x35,
            PaletteColor::Blue => 0x2B,
            PaletteColor::Black => 0x00,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PaletteColor::White => "white",
            PaletteColor::Yellow => "yellow",
            PaletteColor::Orange => "orange",
            PaletteColor::Red => "red",
            PaletteColor::Green => "green",
            PaletteColor::Blue => "blue",
            PaletteColor::Black => "black",
        }
    }

    /// Exact reverse lookup from an sRGB value.
    pub fn from_rgb(rgb: Rgb) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.rgb() == rgb)
    }
}

impl TryFrom<u8> for PaletteColor {
    type Error = PaletteError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or(PaletteError::UnknownCode(code))
    }
}

/// A palette entry: color, its sRGB value and its device code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub color: PaletteColor,
    pub rgb: Rgb,
    pub code: u8,
}

impl PaletteEntry {
    const fn of(color: PaletteColor) -> Self {
        Self {
            color,
            rgb: color.rgb(),
            code: color.code(),
        }
    }

    /// The entry's color widened for diffusion arithmetic.
    #[inline]
    pub fn wide(&self) -> WideRgb {
        WideRgb::from(self.rgb)
    }
}

/// The immutable seven-entry palette table.
///
/// There is exactly one instance, [`Palette::acep()`], and it is shared
/// read-only by every conversion.
///
/// # Example
///
/// ```
/// use acep_dither::{Palette, PaletteColor, WideRgb};
///
/// let palette = Palette::acep();
/// assert_eq!(palette.len(), 7);
///
/// // Light grey lands on white
/// let nearest = palette.find_nearest(WideRgb::new(230, 230, 230));
/// assert_eq!(nearest.color, PaletteColor::White);
/// assert_eq!(nearest.code, 0xFF);
/// ```
#[derive(Debug)]
pub struct Palette {
    entries: [PaletteEntry; 7],
}

static ACEP: Palette = Palette {
    entries: [
        PaletteEntry::of(PaletteColor::White),
        PaletteEntry::of(PaletteColor::Yellow),
        PaletteEntry::of(PaletteColor::Orange),
        PaletteEntry::of(PaletteColor::Red),
        PaletteEntry::of(PaletteColor::Green),
        PaletteEntry::of(PaletteColor::Blue),
        PaletteEntry::of(PaletteColor::Black),
    ],
};

impl Palette {
    /// The seven-color ACeP palette.
    #[inline]
    pub fn acep() -> &'static Palette {
        &ACEP
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in table order.
    #[inline]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Find the entry with the smallest squared Euclidean RGB distance.
    ///
    /// The distance is computed in `i64`: a sample carrying accumulated
    /// diffusion error can sit anywhere in the `i16` range, and three squared
    /// deltas of that size do not fit in `i32`.
    /// Ties go to the earlier table entry.
    pub fn find_nearest(&self, pixel: WideRgb) -> &PaletteEntry {
        let mut best = &self.entries[0];
        let mut best_dist = i64::MAX;

        for entry in &self.entries {
            let dist = squared_distance(pixel, entry.wide());
            if dist < best_dist {
                best_dist = dist;
                best = entry;
            }
        }

        best
    }

    /// Device code for a final raster color.
    ///
    /// Colors that are not palette entries fall back to the white code.
    pub fn code_for(&self, rgb: Rgb) -> u8 {
        self.entries
            .iter()
            .find(|e| e.rgb == rgb)
            .map(|e| e.code)
            .unwrap_or(PaletteColor::White.code())
    }
}

#[inline]
fn squared_distance(a: WideRgb, b: WideRgb) -> i64 {
    let [dr, dg, db] = a.delta(b).map(i64::from);
    dr * dr + dg * dg + db * db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_codes() {
        let codes: Vec<u8> = Palette::acep().entries().iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![0xFF, 0xFC, 0xEC, 0xE0, 0x35, 0x2B, 0x00]);
    }

    #[test]
    fn test_table_order_matches_all() {
        for (entry, color) in Palette::acep().entries().iter().zip(PaletteColor::ALL) {
            assert_eq!(entry.color, color);
            assert_eq!(entry.rgb, color.rgb());
        }
    }

    #[test]
    fn test_palette_colors_map_to_themselves() {
        let palette = Palette::acep();
        for color in PaletteColor::ALL {
            let nearest = palette.find_nearest(WideRgb::from(color.rgb()));
            assert_eq!(nearest.color, color, "{} should be its own nearest", color.name());
        }
    }

    #[test]
    fn test_mid_grey_prefers_green() {
        // (100,100,100): green is 20784 away, black 30000
        let nearest = Palette::acep().find_nearest(WideRgb::new(100, 100, 100));
        assert_eq!(nearest.color, PaletteColor::Green);
    }

    #[test]
    fn test_closer_entry_wins() {
        // 127^2 from white, 128^2 from yellow
        let nearest = Palette::acep().find_nearest(WideRgb::new(255, 255, 128));
        assert_eq!(nearest.color, PaletteColor::White);

        let nearest = Palette::acep().find_nearest(WideRgb::new(255, 255, 127));
        assert_eq!(nearest.color, PaletteColor::Yellow);
    }

    #[test]
    fn test_exact_tie_goes_to_first_entry() {
        // 64^2 from both green (0,128,0) and black (0,0,0); green comes first
        let nearest = Palette::acep().find_nearest(WideRgb::new(0, 64, 0));
        assert_eq!(nearest.color, PaletteColor::Green);
    }

    #[test]
    fn test_find_nearest_is_deterministic() {
        let palette = Palette::acep();
        let px = WideRgb::new(200, 90, 40);
        let first = palette.find_nearest(px).code;
        for _ in 0..100 {
            assert_eq!(palette.find_nearest(px).code, first);
        }
    }

    #[test]
    fn test_out_of_range_samples() {
        let palette = Palette::acep();
        assert_eq!(
            palette.find_nearest(WideRgb::new(-300, -300, -300)).color,
            PaletteColor::Black
        );
        assert_eq!(
            palette.find_nearest(WideRgb::new(400, 400, 400)).color,
            PaletteColor::White
        );
    }

    #[test]
    fn test_extreme_samples_do_not_overflow_distance() {
        let palette = Palette::acep();
        // Squared deltas here sum to ~3.2e9, past i32::MAX.
        // Blue 3_204_448_257 beats white 3_204_578_817.
        assert_eq!(
            palette
                .find_nearest(WideRgb::new(i16::MIN, i16::MAX, i16::MAX))
                .color,
            PaletteColor::Blue
        );
        assert_eq!(
            palette.find_nearest(WideRgb::new(i16::MIN, i16::MIN, i16::MIN)).color,
            PaletteColor::Black
        );
        assert_eq!(
            palette.find_nearest(WideRgb::new(i16::MAX, i16::MAX, i16::MAX)).color,
            PaletteColor::White
        );
    }

    #[test]
    fn test_code_for_falls_back_to_white() {
        let palette = Palette::acep();
        assert_eq!(palette.code_for(Rgb::new(0, 0, 255)), 0x2B);
        assert_eq!(palette.code_for(Rgb::new(1, 2, 3)), 0xFF);
    }

    #[test]
    fn test_try_from_code() {
        assert_eq!(PaletteColor::try_from(0xEC), Ok(PaletteColor::Orange));
        assert_eq!(
            PaletteColor::try_from(0x12),
            Err(PaletteError::UnknownCode(0x12))
        );
    }

    #[test]
    fn test_from_rgb() {
        assert_eq!(
            PaletteColor::from_rgb(Rgb::new(0, 128, 0)),
            Some(PaletteColor::Green)
        );
        assert_eq!(PaletteColor::from_rgb(Rgb::new(0, 127, 0)), None);
    }
}
