use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Keystrokes per "word" when converting typing speed to WPM
pub const CHARS_PER_WORD: f64 = 5.0;

/// Difficulty tiers that are scored and partition the leaderboard.
///
/// The word lists know a fifth "extreme" tier, but it has no multiplier and no
/// leaderboard bucket. It is not a variant here, so parsing
/// `"extreme"` fails instead of being scored as `Easy`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Ultra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum GameMode {
    #[serde(rename = "2D")]
    #[strum(serialize = "2D")]
    TwoD,
    #[serde(rename = "3D")]
    #[strum(serialize = "3D")]
    ThreeD,
}

/// Raw statistics handed over by a game scene once a level ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    pub correct_keystrokes: u32,
    pub total_keystrokes: u32,
    pub enemies_defeated: u32,
    pub total_enemies: u32,
    /// Elapsed seconds
    pub time: f64,
    pub difficulty: Difficulty,
    pub pro_mode: bool,
    pub mode: GameMode,
    /// Level completed, as opposed to ended by losing all health
    pub success: bool,
}

impl GameStats {
    /// Share of correct keystrokes in percent, 0 when nothing was typed.
    /// Capped at 100 in case a caller reports more correct than total keystrokes.
    pub fn accuracy_percent(&self) -> f64 {
        if self.total_keystrokes == 0 {
            return 0.0;
        }
        let accuracy = self.correct_keystrokes as f64 / self.total_keystrokes as f64 * 100.0;
        accuracy.min(100.0)
    }

    /// Elapsed seconds clamped to a finite, non-negative value.
    /// Infinite or NaN times become 0 so they can never reach the stored blob.
    pub fn elapsed_seconds(&self) -> f64 {
        if self.time.is_finite() {
            self.time.max(0.0)
        } else {
            0.0
        }
    }

    /// Elapsed minutes, with one minute substituted when no time was recorded
    pub fn minutes(&self) -> f64 {
        let seconds = self.elapsed_seconds();
        if seconds > 0.0 {
            seconds / 60.0
        } else {
            1.0
        }
    }

    pub fn words_per_minute(&self) -> f64 {
        (self.correct_keystrokes as f64 / CHARS_PER_WORD) / self.minutes()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::perfect_easy_run;
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn difficulty_round_trips_through_lowercase_names() {
        for difficulty in Difficulty::iter() {
            let name = difficulty.to_string();
            assert_eq!(name, name.to_lowercase());
            assert_eq!(Difficulty::from_str(&name).unwrap(), difficulty);
        }
    }

    #[test]
    fn extreme_is_not_a_scored_difficulty() {
        assert!(Difficulty::from_str("extreme").is_err());
        assert!(serde_json::from_str::<Difficulty>("\"extreme\"").is_err());
    }

    #[test]
    fn game_mode_uses_display_names() {
        assert_eq!(serde_json::to_string(&GameMode::TwoD).unwrap(), "\"2D\"");
        assert_eq!(GameMode::from_str("3D").unwrap(), GameMode::ThreeD);
    }

    #[test]
    fn stats_deserialize_from_camel_case() {
        let json = r#"{
            "correctKeystrokes": 40,
            "totalKeystrokes": 50,
            "enemiesDefeated": 3,
            "totalEnemies": 8,
            "time": 42.5,
            "difficulty": "hard",
            "proMode": true,
            "mode": "3D",
            "success": false
        }"#;
        let stats: GameStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.correct_keystrokes, 40);
        assert_eq!(stats.difficulty, Difficulty::Hard);
        assert_eq!(stats.mode, GameMode::ThreeD);
        assert!(stats.pro_mode);
    }

    #[test]
    fn accuracy_is_zero_without_keystrokes() {
        let stats = GameStats {
            correct_keystrokes: 0,
            total_keystrokes: 0,
            ..perfect_easy_run()
        };
        assert_eq!(stats.accuracy_percent(), 0.0);
    }

    #[test]
    fn accuracy_is_capped_at_one_hundred() {
        let stats = GameStats {
            correct_keystrokes: 120,
            total_keystrokes: 100,
            ..perfect_easy_run()
        };
        assert_eq!(stats.accuracy_percent(), 100.0);
    }

    #[test]
    fn zero_time_counts_as_one_minute() {
        let stats = GameStats {
            time: 0.0,
            ..perfect_easy_run()
        };
        assert_eq!(stats.minutes(), 1.0);
        assert_eq!(stats.words_per_minute(), 20.0);
    }

    #[test]
    fn unusable_times_are_clamped() {
        for time in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN, -30.0] {
            let stats = GameStats {
                time,
                ..perfect_easy_run()
            };
            assert_eq!(stats.elapsed_seconds(), 0.0, "time {}", time);
            assert_eq!(stats.minutes(), 1.0, "time {}", time);
            assert_eq!(stats.words_per_minute(), 20.0, "time {}", time);
        }
        assert_eq!(perfect_easy_run().elapsed_seconds(), 60.0);
    }
}
