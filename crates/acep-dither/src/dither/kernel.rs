//! Error diffusion kernel definition.

use crate::raster::Raster;

/// An error diffusion kernel.
///
/// Each entry is an offset `(dx, dy)` to a not-yet-visited neighbor and the
/// numerator of the error share it receives; the share is
/// `error * weight / divisor`, truncated toward zero.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries; `dy` is never negative.
    pub entries: &'static [(i32, i32, u8)],

    /// Divisor applied to every weight.
    pub divisor: u8,
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};

impl Kernel {
    /// Share of `error` for one kernel weight.
    ///
    /// Integer division truncates toward zero, so `-255 * 7 / 16` gives
    /// `-111`, not `-112`.
    #[inline]
    pub fn share(&self, error: [i32; 3], weight: u8) -> [i32; 3] {
        let w = weight as i32;
        let d = self.divisor as i32;
        [error[0] * w / d, error[1] * w / d, error[2] * w / d]
    }

    /// Add the shares of `error` produced at `(x, y)` to the neighbors that
    /// lie inside the raster. Neighbors outside the bounds are skipped.
    pub fn diffuse(&self, raster: &mut Raster, x: usize, y: usize, error: [i32; 3]) {
        let (width, height) = (raster.width(), raster.height());

        for &(dx, dy, weight) in self.entries {
            let nx = x as i64 + dx as i64;
            let ny = y as i64 + dy as i64;
            if nx < 0 || nx >= width as i64 || ny >= height as i64 {
                continue;
            }
            raster
                .get_mut(nx as usize, ny as usize)
                .add_wrapping(self.share(error, weight));
        }
    }
}
