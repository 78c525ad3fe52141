//! Text listing of device codes.
//!
//! The listing is pasted verbatim into a static array definition on the
//! display controller, so its layout is fixed: 16 codes per line written as
//! `0x%02X`, separated by `", "`, indented by four spaces, and every line
//! ends with `",\n"` (including the last). There is no header or footer;
//! the consumer knows the width and height out of band.
//!
//! ```text
//!     0xFF, 0xFF, 0x00, 0x2B, 0xFF, 0xFF, 0xFF, 0xFF, 0xE0, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x35, 0xFF,
//!     0xFF, 0xEC, 0xFC,
//! ```

use std::fmt;
use std::fmt::Write as _;
use std::io;

/// Codes per listing line.
pub const CODES_PER_LINE: usize = 16;

/// Leading indentation of each listing line.
const INDENT: &str = "    ";

/// Format codes as a listing.
///
/// # Example
/// ```
/// use acep_dither::output::format_listing;
/// assert_eq!(format_listing(&[0xFF, 0x00]), "    0xFF, 0x00,\n");
/// assert_eq!(format_listing(&[]), "");
/// ```
pub fn format_listing(codes: &[u8]) -> String {
    // "0xNN, " is 6 bytes per code, plus indent and newline per line
    let lines = codes.len().div_ceil(CODES_PER_LINE);
    let mut out = String::with_capacity(codes.len() * 6 + lines * (INDENT.len() + 1));

    for line in codes.chunks(CODES_PER_LINE) {
        out.push_str(INDENT);
        for (i, code) in line.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "0x{:02X}", code);
        }
        out.push_str(",\n");
    }

    out
}

/// Write codes as a listing, one line at a time.
pub fn write_listing<W: io::Write>(codes: &[u8], mut writer: W) -> io::Result<()> {
    for line in codes.chunks(CODES_PER_LINE) {
        writer.write_all(format_listing(line).as_bytes())?;
    }
    writer.flush()
}

/// Error returned when a listing cannot be read back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// A line does not follow the indent / trailing comma layout
    MalformedLine {
        /// 1-based line number
        line: usize,
    },
    /// A value is not a `0x`-prefixed two-digit uppercase hex byte
    InvalidCode {
        /// 1-based line number
        line: usize,
        /// The offending token
        token: String,
    },
    /// A line other than the last holds fewer than 16 codes
    ShortLine {
        /// 1-based line number
        line: usize,
        /// Codes found on the line
        count: usize,
    },
}

impl fmt::Display for ListingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingError::MalformedLine { line } => write!(f, "line {}: malformed", line),
            ListingError::InvalidCode { line, token } => {
                write!(f, "line {}: invalid code {:?}", line, token)
            }
            ListingError::ShortLine { line, count } => write!(
                f,
                "line {}: {} codes, expected {}",
                line, count, CODES_PER_LINE
            ),
        }
    }
}

impl std::error::Error for ListingError {}

/// Read codes back from a listing produced by [`format_listing`].
///
/// The layout is checked strictly so that a listing which parses is
/// byte-for-byte what [`format_listing`] would produce for the same codes.
pub fn parse_listing(text: &str) -> Result<Vec<u8>, ListingError> {
    let mut codes = Vec::new();
    let lines: Vec<&str> = text.lines().collect();

    for (i, raw) in lines.iter().enumerate() {
        let line = i + 1;
        let body = raw
            .strip_prefix(INDENT)
            .and_then(|s| s.strip_suffix(','))
            .ok_or(ListingError::MalformedLine { line })?;

        let mut count = 0;
        for token in body.split(", ") {
            codes.push(parse_code(token).ok_or_else(|| ListingError::InvalidCode {
                line,
                token: token.to_string(),
            })?);
            count += 1;
        }

        if count > CODES_PER_LINE || (count < CODES_PER_LINE && line != lines.len()) {
            return Err(ListingError::ShortLine { line, count });
        }
    }

    Ok(codes)
}

fn parse_code(token: &str) -> Option<u8> {
    let hex = token.strip_prefix("0x")?;
    if hex.len() != 2 || hex.chars().any(|c| c.is_ascii_lowercase()) {
        return None;
    }
    u8::from_str_radix(hex, 16).ok()
}
