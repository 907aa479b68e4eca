use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    #[error("invalid hex color: {0:?}")]
    InvalidHexFormat(String),
}

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn is_hex_digits(s: &str) -> bool {
    s.bytes().all(|c| nibble(c).is_some())
}

/// Expand `RGB` shorthand to `RRGGBB`. Anything that is not exactly three hex
/// digits (after an optional `#`) is returned unchanged.
pub fn expand_shorthand(hex: &str) -> String {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() == 3 && is_hex_digits(digits) {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        hex.to_string()
    }
}

/// Parse `#RGB` / `#RRGGBB` (the `#` is optional, case-insensitive).
pub fn parse_color(hex: &str) -> Result<Color, ParseColorError> {
    let invalid = || ParseColorError::InvalidHexFormat(hex.to_string());

    let expanded = expand_shorthand(hex);
    let digits = expanded.strip_prefix('#').unwrap_or(&expanded);
    let bytes = digits.as_bytes();
    if bytes.len() != 6 {
        return Err(invalid());
    }

    let channel = |hi: u8, lo: u8| -> Result<u8, ParseColorError> {
        let h = nibble(hi).ok_or_else(invalid)?;
        let l = nibble(lo).ok_or_else(invalid)?;
        Ok(h << 4 | l)
    };

    Ok(Color::new(
        channel(bytes[0], bytes[1])?,
        channel(bytes[2], bytes[3])?,
        channel(bytes[4], bytes[5])?,
    ))
}

/// Whether `hex` may be committed to state: a leading `#` followed by exactly
/// 3 or 6 hex digits.
pub fn is_valid_hex(hex: &str) -> bool {
    match hex.strip_prefix('#') {
        Some(digits) => matches!(digits.len(), 3 | 6) && is_hex_digits(digits),
        None => false,
    }
}
