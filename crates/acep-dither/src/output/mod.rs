//! Output types for the dithering pipeline.
//!
//! - [`QuantizedRaster`]: device codes in raster order, the canonical result
//!   of a dithering pass.
//! - [`format_listing`] / [`write_listing`]: the grouped hexadecimal text
//!   artifact consumed by the display firmware build.

mod listing;
mod quantized_raster;

pub use listing::{format_listing, parse_listing, write_listing, ListingError, CODES_PER_LINE};
pub use quantized_raster::QuantizedRaster;
