//! Hex color parsing and WCAG 2 contrast math.

mod color;
mod contrast;
mod luminance;

pub use color::{expand_shorthand, is_valid_hex, parse_color, Color, ParseColorError};
pub use contrast::{
    compliance_flags, contrast_ratio, contrast_ratio_hex, format_ratio, rate,
    try_contrast_ratio_hex, ComplianceFlags, Rating,
};
pub use luminance::luminance;
