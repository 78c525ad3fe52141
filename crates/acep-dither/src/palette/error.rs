//! Error types for palette lookups

use std::fmt;

/// Error type for palette lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// Byte is not one of the seven device codes
    UnknownCode(u8),
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::UnknownCode(code) => {
                write!(f, "unknown palette code 0x{:02X}", code)
            }
        }
    }
}

impl std::error::Error for PaletteError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_code_display() {
        assert_eq!(
            PaletteError::UnknownCode(0x0A).to_string(),
            "unknown palette code 0x0A"
        );
    }
}
