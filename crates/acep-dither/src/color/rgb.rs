//! 8-bit and widened RGB sample types.
//!
//! Decoded images hand us [`Rgb`] samples. Error diffusion works on
//! [`WideRgb`], which keeps each channel as `i16` so that accumulated error
//! can push a sample below 0 or above 255.

/// An 8-bit sRGB color sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    ///
    /// # Example
    /// ```
    /// use acep_dither::Rgb;
    /// let orange = Rgb::new(255, 165, 0);
    /// assert_eq!(orange.g, 165);
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

/// A color sample widened to signed 16-bit channels.
///
/// Used while diffusing quantization error. Values outside `0..=255` are
/// expected mid-pass and only clamped once the pass has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WideRgb(pub [i16; 3]);

impl WideRgb {
    #[inline]
    pub const fn new(r: i16, g: i16, b: i16) -> Self {
        Self([r, g, b])
    }

    /// Per-channel difference `self - other`, in `i32`.
    #[inline]
    pub fn delta(self, other: WideRgb) -> [i32; 3] {
        [
            self.0[0] as i32 - other.0[0] as i32,
            self.0[1] as i32 - other.0[1] as i32,
            self.0[2] as i32 - other.0[2] as i32,
        ]
    }

    /// Add a per-channel offset with 16-bit two's complement wrap-around.
    ///
    /// Matches an `int16` sample buffer. Only colors the palette cannot
    /// reproduce (pure cyan, magenta) push the error far enough to wrap.
    ///
    /// # Example
    /// ```
    /// use acep_dither::WideRgb;
    /// let mut px = WideRgb::new(i16::MAX, 0, 0);
    /// px.add_wrapping([1, 0, 0]);
    /// assert_eq!(px, WideRgb::new(i16::MIN, 0, 0));
    /// ```
    #[inline]
    pub fn add_wrapping(&mut self, offset: [i32; 3]) {
        for (channel, off) in self.0.iter_mut().zip(offset) {
            *channel = (*channel as i32).wrapping_add(off) as i16;
        }
    }

    /// Clamp each channel into `0..=255`.
    ///
    /// # Example
    /// ```
    /// use acep_dither::{Rgb, WideRgb};
    /// assert_eq!(WideRgb::new(-12, 128, 300).clamp_to_rgb(), Rgb::new(0, 128, 255));
    /// ```
    #[inline]
    pub fn clamp_to_rgb(self) -> Rgb {
        Rgb::new(
            self.0[0].clamp(0, 255) as u8,
            self.0[1].clamp(0, 255) as u8,
            self.0[2].clamp(0, 255) as u8,
        )
    }
}

impl From<Rgb> for WideRgb {
    #[inline]
    fn from(c: Rgb) -> Self {
        Self([c.r as i16, c.g as i16, c.b as i16])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widen_preserves_channels() {
        let wide = WideRgb::from(Rgb::new(1, 128, 255));
        assert_eq!(wide, WideRgb::new(1, 128, 255));
    }

    #[test]
    fn test_delta_can_be_negative() {
        let a = WideRgb::new(0, 10, 255);
        let b = WideRgb::new(255, 10, 0);
        assert_eq!(a.delta(b), [-255, 0, 255]);
    }

    #[test]
    fn test_add_wrapping_keeps_out_of_range_values() {
        let mut px = WideRgb::new(250, 5, 128);
        px.add_wrapping([20, -30, 0]);
        // Not clamped to 0..=255 until the end of the pass
        assert_eq!(px, WideRgb::new(270, -25, 128));
    }

    #[test]
    fn test_add_wrapping_wraps_at_i16_bounds() {
        let mut px = WideRgb::new(i16::MAX - 1, i16::MIN + 1, 0);
        px.add_wrapping([10, -10, 0]);
        // 32766 + 10 = 32776 -> 32776 - 65536; -32767 - 10 = -32777 -> -32777 + 65536
        assert_eq!(px, WideRgb::new(-32760, 32759, 0));
    }

    #[test]
    fn test_add_wrapping_matches_int16_arithmetic() {
        let mut px = WideRgb::new(32000, -32000, 100);
        px.add_wrapping([14_335, -14_447, -111]);
        assert_eq!(
            px,
            WideRgb::new(
                32000i16.wrapping_add(14_335),
                (-32000i16).wrapping_add(-14_447),
                -11
            )
        );
    }

    #[test]
    fn test_clamp_to_rgb() {
        assert_eq!(WideRgb::new(-1, 256, 17).clamp_to_rgb(), Rgb::new(0, 255, 17));
    }
}
