use serde::Serialize;

use super::color::{parse_color, Color, ParseColorError};
use super::luminance::luminance;

/// WCAG contrast ratio between two colors, in `[1, 21]`. Order does not matter.
pub fn contrast_ratio(fg: Color, bg: Color) -> f64 {
    let l1 = luminance(fg);
    let l2 = luminance(bg);

    let lighter = l1.max(l2);
    let darker = l1.min(l2);

    (lighter + 0.05) / (darker + 0.05)
}

pub fn try_contrast_ratio_hex(fg: &str, bg: &str) -> Result<f64, ParseColorError> {
    Ok(contrast_ratio(parse_color(fg)?, parse_color(bg)?))
}

/// Contrast ratio of two hex strings, or `0.0` if either does not parse.
pub fn contrast_ratio_hex(fg: &str, bg: &str) -> f64 {
    try_contrast_ratio_hex(fg, bg).unwrap_or(0.0)
}

/// Truncate (not round) to two decimals for display: `4.4999` shows as `4.49`.
pub fn format_ratio(ratio: f64) -> String {
    format!("{:.2}", (ratio * 100.0).floor() / 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Rating {
    pub fn label(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Fair => "Fair",
            Rating::Poor => "Poor",
        }
    }

    /// Badge color used by the UI.
    pub fn color_token(&self) -> &'static str {
        match self {
            Rating::Excellent => "#10b981",
            Rating::Good => "#3b82f6",
            Rating::Fair => "#f59e0b",
            Rating::Poor => "#ef4444",
        }
    }
}

pub fn rate(ratio: f64) -> Rating {
    if ratio >= 7.0 {
        Rating::Excellent
    } else if ratio >= 4.5 {
        Rating::Good
    } else if ratio >= 3.0 {
        Rating::Fair
    } else {
        Rating::Poor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceFlags {
    pub aa_normal: bool,
    pub aa_large: bool,
    pub aaa_normal: bool,
    pub aaa_large: bool,
}

pub fn compliance_flags(ratio: f64) -> ComplianceFlags {
    ComplianceFlags {
        aa_normal: ratio >= 4.5,
        aa_large: ratio >= 3.0,
        aaa_normal: ratio >= 7.0,
        aaa_large: ratio >= 4.5,
    }
}
