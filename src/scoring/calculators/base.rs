use super::super::{calculator_priority, GameStats, ScoreCalculator};

pub const POINTS_PER_KEYSTROKE: u64 = 10;
pub const POINTS_PER_ENEMY: u64 = 100;

pub struct BaseScoreCalculator;

impl Default for BaseScoreCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseScoreCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreCalculator for BaseScoreCalculator {
    fn calculate(&self, stats: &GameStats, _current: f64) -> f64 {
        let points = stats.correct_keystrokes as u64 * POINTS_PER_KEYSTROKE
            + stats.enemies_defeated as u64 * POINTS_PER_ENEMY;
        points as f64
    }

    fn priority(&self) -> u32 {
        calculator_priority::BASE_SCORE
    }

    fn name(&self) -> &'static str {
        "base_score"
    }
}
