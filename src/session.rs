//! Page state and the edits the page can make to it.
//!
//! The page owns the only live [`ColorPair`] and replaces it wholesale with
//! whatever [`apply`] returns; nothing here keeps state between calls.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use crate::models::{Notification, NotificationKind};
use crate::wcag::{is_valid_hex, parse_color, Color, ParseColorError};

pub const DEFAULT_FG: &str = "#FFFFFF";
pub const DEFAULT_BG: &str = "#6366F1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub fg: String,
    pub bg: String,
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: DEFAULT_FG.to_string(),
            bg: DEFAULT_BG.to_string(),
        }
    }
}

/// Prefix a missing `#` and accept only `#RGB` / `#RRGGBB`.
fn gate(value: &str) -> Option<String> {
    let value = if value.starts_with('#') {
        value.to_string()
    } else {
        format!("#{value}")
    };
    is_valid_hex(&value).then_some(value)
}

impl ColorPair {
    pub fn new(fg: &str, bg: &str) -> Result<Self, ParseColorError> {
        let pair = Self {
            fg: fg.to_string(),
            bg: bg.to_string(),
        };
        pair.validate()?;
        Ok(pair)
    }

    pub fn validate(&self) -> Result<(), ParseColorError> {
        for hex in [&self.fg, &self.bg] {
            if !is_valid_hex(hex) {
                return Err(ParseColorError::InvalidHexFormat(hex.clone()));
            }
        }
        Ok(())
    }

    pub fn colors(&self) -> Result<(Color, Color), ParseColorError> {
        Ok((parse_color(&self.fg)?, parse_color(&self.bg)?))
    }

    pub fn with_foreground(&self, value: &str) -> Option<Self> {
        gate(value).map(|fg| Self {
            fg,
            bg: self.bg.clone(),
        })
    }

    pub fn with_background(&self, value: &str) -> Option<Self> {
        gate(value).map(|bg| Self {
            fg: self.fg.clone(),
            bg,
        })
    }

    pub fn swapped(&self) -> Self {
        Self {
            fg: self.bg.clone(),
            bg: self.fg.clone(),
        }
    }

    pub fn randomized(rng: &mut dyn RandomColorSource) -> Self {
        Self {
            fg: rng.next_color().to_hex(),
            bg: rng.next_color().to_hex(),
        }
    }
}

pub trait RandomColorSource {
    fn next_color(&mut self) -> Color;
}

/// Random colors from the OS generator behind `Uuid::new_v4`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidColorSource;

impl RandomColorSource for UuidColorSource {
    fn next_color(&mut self) -> Color {
        // the first six bytes of a v4 uuid carry no version bits
        let bytes = Uuid::new_v4().into_bytes();
        Color::new(bytes[0], bytes[1], bytes[2])
    }
}

/// Deterministic colors: the first three bytes of `sha256(seed:n)`.
#[derive(Debug, Clone)]
pub struct HashColorSource {
    seed: String,
    counter: u64,
}

impl HashColorSource {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            counter: 0,
        }
    }
}

impl RandomColorSource for HashColorSource {
    fn next_color(&mut self) -> Color {
        let mut hasher = Sha256::new();
        hasher.update(self.seed.as_bytes());
        hasher.update(b":");
        hasher.update(self.counter.to_be_bytes());
        let digest = hasher.finalize();
        self.counter += 1;

        Color::new(digest[0], digest[1], digest[2])
    }
}

pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    SetForeground { value: String },
    SetBackground { value: String },
    Swap,
    Randomize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub state: ColorPair,
    pub accepted: bool,
}

/// Apply one page action. A rejected edit hands back the previous state.
pub fn apply(
    state: &ColorPair,
    action: &Action,
    rng: &mut dyn RandomColorSource,
    sink: &mut dyn NotificationSink,
) -> Outcome {
    let next = match action {
        Action::SetForeground { value } => state.with_foreground(value),
        Action::SetBackground { value } => state.with_background(value),
        Action::Swap => {
            sink.notify(Notification::new(NotificationKind::Info, "Colors swapped!"));
            Some(state.swapped())
        }
        Action::Randomize => {
            let next = ColorPair::randomized(rng);
            sink.notify(Notification::new(
                NotificationKind::Success,
                "Colors randomized!",
            ));
            Some(next)
        }
    };

    match next {
        Some(state) => Outcome {
            state,
            accepted: true,
        },
        None => {
            debug!("Rejected edit {:?}", action);
            Outcome {
                state: state.clone(),
                accepted: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContrastReport;

    fn run(state: &ColorPair, action: Action) -> (Outcome, Vec<Notification>) {
        let mut rng = HashColorSource::new("test");
        let mut toasts: Vec<Notification> = Vec::new();
        let outcome = apply(state, &action, &mut rng, &mut toasts);
        (outcome, toasts)
    }

    #[test]
    fn test_edit_prefixes_hash() {
        let pair = ColorPair::default().with_background("03f").unwrap();
        assert_eq!(pair.bg, "#03f");
        assert_eq!(pair.fg, DEFAULT_FG);

        let pair = pair.with_foreground("#123456").unwrap();
        assert_eq!(pair.fg, "#123456");
    }

    #[test]
    fn test_invalid_edit_keeps_state() {
        let state = ColorPair::default();
        for bad in ["notacolor", "#12", "#1234567", ""] {
            let (outcome, toasts) = run(
                &state,
                Action::SetForeground {
                    value: bad.to_string(),
                },
            );
            assert!(!outcome.accepted, "{bad}");
            assert_eq!(outcome.state, state);
            assert!(toasts.is_empty());
        }
    }

    #[test]
    fn test_swap_keeps_ratio() {
        let state = ColorPair::default();
        let (outcome, toasts) = run(&state, Action::Swap);

        assert!(outcome.accepted);
        assert_eq!(outcome.state.fg, DEFAULT_BG);
        assert_eq!(outcome.state.bg, DEFAULT_FG);
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Info);
        assert_eq!(toasts[0].message, "Colors swapped!");

        let before = ContrastReport::for_pair(&state).unwrap();
        let after = ContrastReport::for_pair(&outcome.state).unwrap();
        assert_eq!(before.ratio, after.ratio);
        assert_eq!(before.rating, after.rating);
        assert_eq!(after.fg_hex, before.bg_hex);
    }

    #[test]
    fn test_randomize_is_deterministic_with_hash_source() {
        let mut a = HashColorSource::new("seed");
        let mut b = HashColorSource::new("seed");
        let first = ColorPair::randomized(&mut a);

        assert_eq!(first, ColorPair::randomized(&mut b));
        assert!(first.validate().is_ok());
        // successive draws advance the counter
        assert_ne!(first, ColorPair::randomized(&mut a));
    }

    #[test]
    fn test_randomize_notifies_success() {
        let (outcome, toasts) = run(&ColorPair::default(), Action::Randomize);

        assert!(outcome.accepted);
        assert!(outcome.state.validate().is_ok());
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Success);
    }

    #[test]
    fn test_uuid_source_yields_valid_hex() {
        let pair = ColorPair::randomized(&mut UuidColorSource);
        assert!(ColorPair::new(&pair.fg, &pair.bg).is_ok());
    }

    #[test]
    fn test_actions_chain_from_committed_state() {
        let mut rng = HashColorSource::new("chain");
        let mut toasts: Vec<Notification> = Vec::new();
        let actions = [
            Action::SetForeground {
                value: "#abc".to_string(),
            },
            Action::SetForeground {
                value: "#abcdef".to_string(),
            },
            Action::SetBackground {
                value: "#12".to_string(),
            },
            Action::Swap,
        ];

        let state = actions.iter().fold(ColorPair::default(), |state, action| {
            apply(&state, action, &mut rng, &mut toasts).state
        });

        assert_eq!(state.fg, DEFAULT_BG);
        assert_eq!(state.bg, "#abcdef");
        assert_eq!(toasts.len(), 1);
    }

    #[test]
    fn test_new_validates() {
        assert!(ColorPair::new("#fff", "#000000").is_ok());
        assert_eq!(
            ColorPair::new("fff", "#000"),
            Err(ParseColorError::InvalidHexFormat("fff".to_string()))
        );
    }
}
