use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::{Action, ColorPair};
use crate::wcag::{
    compliance_flags, contrast_ratio, format_ratio, luminance, rate, ComplianceFlags,
    ParseColorError, Rating,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingBadge {
    pub label: &'static str,
    pub color_token: &'static str,
}

impl From<Rating> for RatingBadge {
    fn from(rating: Rating) -> Self {
        Self {
            label: rating.label(),
            color_token: rating.color_token(),
        }
    }
}

/// Everything the page renders for one color pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastReport {
    pub fg_hex: String,
    pub bg_hex: String,
    /// Six-digit forms, for inputs that reject shorthand.
    pub fg_full_hex: String,
    pub bg_full_hex: String,
    pub fg_luminance: f64,
    pub bg_luminance: f64,
    pub ratio: f64,
    pub ratio_display: String,
    pub rating: RatingBadge,
    pub compliance: ComplianceFlags,
}

impl ContrastReport {
    pub fn for_pair(pair: &ColorPair) -> Result<Self, ParseColorError> {
        let (fg, bg) = pair.colors()?;
        let ratio = contrast_ratio(fg, bg);

        Ok(Self {
            fg_hex: pair.fg.to_uppercase(),
            bg_hex: pair.bg.to_uppercase(),
            fg_full_hex: fg.to_hex(),
            bg_full_hex: bg.to_hex(),
            fg_luminance: luminance(fg),
            bg_luminance: luminance(bg),
            ratio,
            ratio_display: format_ratio(ratio),
            rating: rate(ratio).into(),
            compliance: compliance_flags(ratio),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
}

/// A toast shown by the page.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub at: i64,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContrastQuery {
    pub fg: String,
    pub bg: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActionRequest {
    pub state: ColorPair,
    pub action: Action,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    pub state: ColorPair,
    pub report: ContrastReport,
    pub accepted: bool,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateResponse {
    pub state: ColorPair,
    pub report: ContrastReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
