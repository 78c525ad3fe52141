//! acep-dither: seven-color quantization for ACeP e-paper panels
//!
//! This library turns an RGB raster into the byte stream a 7-color ACeP
//! panel controller expects: one device code per pixel, chosen by
//! Floyd-Steinberg error diffusion against a fixed palette.
//!
//! # Quick Start
//!
//! ```
//! use acep_dither::{FloydSteinberg, Palette, Raster, Rgb};
//!
//! let pixels = vec![Rgb::new(200, 120, 40); 16];
//! let mut raster = Raster::from_pixels(4, 4, &pixels).unwrap();
//!
//! let quantized = FloydSteinberg.dither(&mut raster, Palette::acep());
//! assert_eq!(quantized.codes().len(), 16);
//!
//! let listing = quantized.to_listing();
//! assert_eq!(listing.lines().count(), 1);
//! ```
//!
//! # Palette
//!
//! | Color  | sRGB          | Code   |
//! |--------|---------------|--------|
//! | white  | 255, 255, 255 | `0xFF` |
//! | yellow | 255, 255, 0   | `0xFC` |
//! | orange | 255, 165, 0   | `0xEC` |
//! | red    | 255, 0, 0     | `0xE0` |
//! | green  | 0, 128, 0     | `0x35` |
//! | blue   | 0, 0, 255     | `0x2B` |
//! | black  | 0, 0, 0       | `0x00` |
//!
//! Matching uses plain squared Euclidean distance in sRGB and the table
//! order above breaks ties. The codes must match the firmware exactly.
//!
//! # Arithmetic
//!
//! Samples are widened to `i16` for the duration of the pass
//! ([`WideRgb`]) so accumulated error can overshoot the 8-bit range.
//! Error shares are truncated toward zero and nothing is clamped until
//! the pass completes, which keeps the output bit-for-bit reproducible.

pub mod color;
pub mod dither;
pub mod output;
pub mod palette;
pub mod raster;


pub use color::{Rgb, WideRgb};
pub use dither::{FloydSteinberg, Kernel, FLOYD_STEINBERG};
pub use output::{format_listing, parse_listing, ListingError, QuantizedRaster, CODES_PER_LINE};
pub use palette::{Palette, PaletteColor, PaletteEntry, PaletteError};
pub use raster::{Raster, RasterSizeError};

/// Panel width in pixels.
pub const DISPLAY_WIDTH: usize = 600;

/// Panel height in pixels.
pub const DISPLAY_HEIGHT: usize = 448;
