//! Palette types
//!
//! The seven-color ACeP palette table, nearest-color matching against it,
//! and the error type for device code lookups.

mod error;
mod palette;

pub use error::PaletteError;
pub use palette::{Palette, PaletteColor, PaletteEntry};
