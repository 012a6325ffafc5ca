mod base;
mod difficulty;
mod outcome;
mod performance;

pub use base::BaseScoreCalculator;
pub use difficulty::{DifficultyMultiplierCalculator, ProModeBonusCalculator};
pub use outcome::{SuccessMultiplierCalculator, TimePenaltyCalculator};
pub use performance::{AccuracyFactorCalculator, SpeedBonusCalculator};
