use super::super::{calculator_priority, Difficulty, GameStats, ScoreCalculator};

pub const PRO_MODE_BONUS: f64 = 1.5;

pub struct DifficultyMultiplierCalculator;

impl Default for DifficultyMultiplierCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl DifficultyMultiplierCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn multiplier(difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
            Difficulty::Ultra => 3.0,
        }
    }
}

impl ScoreCalculator for DifficultyMultiplierCalculator {
    fn calculate(&self, stats: &GameStats, current: f64) -> f64 {
        current * Self::multiplier(stats.difficulty)
    }

    fn priority(&self) -> u32 {
        calculator_priority::DIFFICULTY
    }

    fn name(&self) -> &'static str {
        "difficulty_multiplier"
    }
}

pub struct ProModeBonusCalculator;

impl Default for ProModeBonusCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProModeBonusCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreCalculator for ProModeBonusCalculator {
    fn calculate(&self, stats: &GameStats, current: f64) -> f64 {
        if stats.pro_mode {
            current * PRO_MODE_BONUS
        } else {
            current
        }
    }

    fn priority(&self) -> u32 {
        calculator_priority::PRO_MODE
    }

    fn name(&self) -> &'static str {
        "pro_mode_bonus"
    }
}
