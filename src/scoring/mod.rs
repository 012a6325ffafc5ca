pub mod calculators;
mod engine;
pub mod format;
pub mod models;

pub use engine::{ScoringEngine, ScoringEngineBuilder};
pub use format::{difficulty_emoji, format_score};
pub use models::{Difficulty, GameMode, GameStats};

/// Priority constants for score calculators.
/// Lower values run first. Multipliers are applied in ascending priority,
/// which fixes the floating-point evaluation order of the final product.
pub mod calculator_priority {
    /// Keystroke and enemy points
    pub const BASE_SCORE: u32 = 100;
    pub const DIFFICULTY: u32 = 200;
    pub const PRO_MODE: u32 = 210;
    pub const ACCURACY: u32 = 220;
    pub const SPEED: u32 = 230;
    pub const TIME_PENALTY: u32 = 240;
    pub const SUCCESS: u32 = 250;
}

/// One stage of the score pipeline.
///
/// The base calculator ignores `current` and produces the raw points, every
/// later stage scales the running value.
pub trait ScoreCalculator: Send + Sync {
    fn calculate(&self, stats: &GameStats, current: f64) -> f64;

    fn priority(&self) -> u32;

    fn name(&self) -> &'static str;
}
