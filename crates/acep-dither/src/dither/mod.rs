//! Error diffusion dithering.
//!
//! The panel only understands seven colors, so each photo is reduced with
//! Floyd-Steinberg error diffusion against the fixed [`Palette`](crate::Palette).
//!
//! # Example
//!
//! ```
//! use acep_dither::{FloydSteinberg, Palette, Raster, Rgb};
//!
//! let mut raster = Raster::filled(2, 2, Rgb::new(0, 0, 0));
//! let quantized = FloydSteinberg.dither(&mut raster, Palette::acep());
//! assert_eq!(quantized.codes(), &[0x00; 4]);
//! ```

mod floyd_steinberg;
mod kernel;

pub use floyd_steinberg::FloydSteinberg;
pub use kernel::{Kernel, FLOYD_STEINBERG};
