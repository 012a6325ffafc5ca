use super::super::{calculator_priority, GameStats, ScoreCalculator};

pub const FAILED_RUN_MULTIPLIER: f64 = 0.7;

pub struct TimePenaltyCalculator;

impl Default for TimePenaltyCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl TimePenaltyCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn penalty(seconds: f64) -> f64 {
        if seconds > 600.0 {
            0.8
        } else if seconds > 300.0 {
            0.9
        } else {
            1.0
        }
    }
}

impl ScoreCalculator for TimePenaltyCalculator {
    fn calculate(&self, stats: &GameStats, current: f64) -> f64 {
        current * Self::penalty(stats.elapsed_seconds())
    }

    fn priority(&self) -> u32 {
        calculator_priority::TIME_PENALTY
    }

    fn name(&self) -> &'static str {
        "time_penalty"
    }
}

pub struct SuccessMultiplierCalculator;

impl Default for SuccessMultiplierCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl SuccessMultiplierCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreCalculator for SuccessMultiplierCalculator {
    fn calculate(&self, stats: &GameStats, current: f64) -> f64 {
        if stats.success {
            current
        } else {
            current * FAILED_RUN_MULTIPLIER
        }
    }

    fn priority(&self) -> u32 {
        calculator_priority::SUCCESS
    }

    fn name(&self) -> &'static str {
        "success_multiplier"
    }
}
