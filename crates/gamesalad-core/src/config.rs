//! Tunable game settings.
//!
//! Every field has a default, so a saved config only needs to carry the
//! values it overrides; anything missing falls back to the default.

use crate::selection::{SelectionTiming, DEFAULT_MOVE_THROTTLE_MS, DEFAULT_TAP_MAX_DELAY_MS};
use serde::{Deserialize, Serialize};

/// Pointer and touch handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchConfig {
    /// Longest press on the last cell that still deselects it
    pub tap_max_delay_ms: u64,
    /// Minimum spacing between processed drag moves
    pub move_throttle_ms: u64,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            tap_max_delay_ms: DEFAULT_TAP_MAX_DELAY_MS,
            move_throttle_ms: DEFAULT_MOVE_THROTTLE_MS,
        }
    }
}

/// Durations of the found-word and victory animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// How long a found word stays highlighted
    pub found_word_ms: u64,
    /// Stagger between letters of a found word
    pub letter_delay_ms: u64,
    /// Fade of cells leaving the board
    pub unused_fade_ms: u64,
    /// Pause before the victory screen
    pub victory_delay_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            found_word_ms: 600,
            letter_delay_ms: 25,
            unused_fade_ms: 200,
            victory_delay_ms: 300,
        }
    }
}

impl AnimationConfig {
    /// Total lock time for a found word of `letters` cells
    pub fn found_word_total_ms(&self, letters: usize) -> u64 {
        self.letter_delay_ms
            .saturating_mul(letters as u64)
            .saturating_add(self.found_word_ms)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub touch: TouchConfig,
    pub animation: AnimationConfig,
}

impl GameConfig {
    /// Parse a saved config, filling gaps with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn timing(&self) -> SelectionTiming {
        SelectionTiming {
            tap_max_delay_ms: self.touch.tap_max_delay_ms,
            move_throttle_ms: self.touch.move_throttle_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.touch.tap_max_delay_ms, 300);
        assert_eq!(config.touch.move_throttle_ms, 16);
        assert_eq!(config.animation.found_word_ms, 600);
        assert_eq!(config.timing(), SelectionTiming::default());
    }

    #[test]
    fn test_partial_json_merges_over_defaults() {
        let config = GameConfig::from_json(r#"{"animation": {"found_word_ms": 900}}"#).unwrap();
        assert_eq!(config.animation.found_word_ms, 900);
        assert_eq!(config.animation.letter_delay_ms, 25);
        assert_eq!(config.touch, TouchConfig::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
        assert!(GameConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_found_word_total() {
        let anim = AnimationConfig::default();
        assert_eq!(anim.found_word_total_ms(4), 700);
    }

    #[test]
    fn test_found_word_total_saturates() {
        let config = GameConfig::from_json(
            r#"{"animation": {"found_word_ms": 18446744073709551615, "letter_delay_ms": 18446744073709551615}}"#,
        )
        .unwrap();
        assert_eq!(config.animation.found_word_total_ms(7), u64::MAX);
    }
}
