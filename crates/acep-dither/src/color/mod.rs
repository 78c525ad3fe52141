//! Color sample types
//!
//! - [`Rgb`]: 8-bit color as decoded from image files and as stored in the palette.
//! - [`WideRgb`]: signed 16-bit working color used during error diffusion.

mod rgb;

pub use rgb::{Rgb, WideRgb};
