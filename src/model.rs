//! Core data model for the finger chooser.
//! Touches, palette, selection attributes and the per-round configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier the host assigns to one finger contact.
pub type TouchId = i32;

/// Default countdown before a selection is made.
pub const DEFAULT_COUNTDOWN_MS: f64 = 1500.0;
/// Default period of the repeating tick.
pub const DEFAULT_TICK_INTERVAL_MS: i32 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Color(pub &'static str);

impl Color {
    pub const BLACK: Color = Color("black");
    pub const WHITE: Color = Color("white");

    pub fn css(&self) -> &'static str {
        self.0
    }
}

pub const PALETTE: [Color; 12] = [
    Color("#b91c1c"),
    Color("#c2410c"),
    Color("#b45309"),
    Color("#a16207"),
    Color("#4d7c0f"),
    Color("#15803d"),
    Color("#047857"),
    Color("#0f766e"),
    Color("#0369a1"),
    Color("#1d4ed8"),
    Color("#7e22ce"),
    Color("#be185d"),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Fingers,
    Groups,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Fingers => "Fingers",
            Mode::Groups => "Groups",
        }
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Fingers" => Ok(Mode::Fingers),
            "Groups" => Ok(Mode::Groups),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    NotANumber(String),
    NotPositive(i64),
    UnknownMode(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotANumber(raw) => write!(f, "count {:?} is not a number", raw),
            ConfigError::NotPositive(v) => write!(f, "count must be at least 1, got {}", v),
            ConfigError::UnknownMode(raw) => write!(f, "unknown selection mode {:?}", raw),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Values read from the page controls when a round completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChooserConfig {
    /// Winners in Fingers mode, groups in Groups mode.
    pub count: u32,
    pub mode: Mode,
}

impl Default for ChooserConfig {
    fn default() -> Self {
        Self {
            count: 1,
            mode: Mode::Fingers,
        }
    }
}

/// Parses the raw text of the count input.
pub fn parse_count(raw: &str) -> Result<u32, ConfigError> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::NotANumber(raw.to_string()))?;
    if value < 1 {
        return Err(ConfigError::NotPositive(value));
    }
    Ok(value.min(u32::MAX as i64) as u32)
}

/// Attributes a touch receives when the round completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Pending,
    /// Fingers mode: 1-based rank in the shuffled order.
    Ranked { position: u32, selected: bool },
    /// Groups mode: 1-based group id.
    Grouped { group: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Touch {
    pub id: TouchId,
    pub x: f64,
    pub y: f64,
    pub color: Color,
    pub outcome: Outcome,
    /// Finger already released while the result of a completed round is shown.
    pub lifted: bool,
}

impl Touch {
    pub fn new(id: TouchId, x: f64, y: f64, color: Color) -> Self {
        Self {
            id,
            x,
            y,
            color,
            outcome: Outcome::Pending,
            lifted: false,
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self.outcome, Outcome::Ranked { selected: true, .. })
    }
}

/// One `{identifier, x, y}` record of a host touch event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactPoint {
    pub id: TouchId,
    pub x: f64,
    pub y: f64,
}

/// Summary of a completed round, logged once per round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub mode: Mode,
    pub requested: u32,
    pub effective: u32,
    pub touches: usize,
    /// Fingers: winner ids in rank order. Groups: empty.
    pub winners: Vec<TouchId>,
    /// Groups: size of each group in group-id order. Fingers: empty.
    pub group_sizes: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn palette_colors_are_distinct() {
        let set: HashSet<_> = PALETTE.iter().collect();
        assert_eq!(set.len(), PALETTE.len());
    }

    #[test]
    fn count_parsing_rejects_garbage_and_non_positive() {
        assert_eq!(parse_count(" 3 "), Ok(3));
        assert_eq!(parse_count("0"), Err(ConfigError::NotPositive(0)));
        assert_eq!(parse_count("-2"), Err(ConfigError::NotPositive(-2)));
        assert!(matches!(parse_count("abc"), Err(ConfigError::NotANumber(_))));
        assert!(matches!(parse_count(""), Err(ConfigError::NotANumber(_))));
    }

    #[test]
    fn mode_parses_select_values() {
        assert_eq!("Fingers".parse::<Mode>(), Ok(Mode::Fingers));
        assert_eq!("Groups".parse::<Mode>(), Ok(Mode::Groups));
        assert!("teams".parse::<Mode>().is_err());
        assert_eq!(Mode::Groups.label().parse::<Mode>(), Ok(Mode::Groups));
    }

    #[test]
    fn only_ranked_selected_touches_count_as_selected() {
        let mut t = Touch::new(1, 0.0, 0.0, PALETTE[0]);
        assert!(!t.is_selected());
        t.outcome = Outcome::Grouped { group: 1 };
        assert!(!t.is_selected());
        t.outcome = Outcome::Ranked {
            position: 1,
            selected: true,
        };
        assert!(t.is_selected());
    }
}
