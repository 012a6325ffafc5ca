use std::sync::Arc;

use super::{
    calculators::{
        AccuracyFactorCalculator, BaseScoreCalculator, DifficultyMultiplierCalculator,
        ProModeBonusCalculator, SpeedBonusCalculator, SuccessMultiplierCalculator,
        TimePenaltyCalculator,
    },
    GameStats, ScoreCalculator,
};
use crate::highscore::HighscoreEntry;

/// Turns finished-game statistics into a leaderboard score.
///
/// Scoring is pure: the same stats always produce the same score, which is
/// what lets a projected mid-game score match the one that gets saved.
pub struct ScoringEngine {
    calculators: Vec<Arc<dyn ScoreCalculator>>,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringEngine {
    /// Engine with the standard base score and multiplier chain
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> ScoringEngineBuilder {
        ScoringEngineBuilder::new()
    }

    pub fn calculator_names(&self) -> Vec<&'static str> {
        self.calculators.iter().map(|c| c.name()).collect()
    }

    /// Unrounded result of the pipeline
    pub fn raw_score(&self, stats: &GameStats) -> f64 {
        self.calculators
            .iter()
            .fold(0.0, |current, calculator| calculator.calculate(stats, current))
    }

    pub fn calculate_score(&self, stats: &GameStats) -> u64 {
        let raw = self.raw_score(stats).round();
        if raw.is_finite() && raw > 0.0 {
            raw as u64
        } else {
            0
        }
    }

    /// Whole-percent accuracy shown to the player
    pub fn accuracy(&self, stats: &GameStats) -> u32 {
        stats.accuracy_percent().round() as u32
    }

    pub fn wpm(&self, stats: &GameStats) -> u32 {
        stats.words_per_minute().round() as u32
    }

    /// Scores a game and wraps it in a fresh, unsaved leaderboard entry
    pub fn create_entry(&self, stats: &GameStats) -> HighscoreEntry {
        HighscoreEntry::from_stats(
            stats,
            self.calculate_score(stats),
            self.accuracy(stats),
            self.wpm(stats),
        )
    }
}

pub struct ScoringEngineBuilder {
    calculators: Vec<Arc<dyn ScoreCalculator>>,
}

impl ScoringEngineBuilder {
    fn new() -> Self {
        Self {
            calculators: vec![
                Arc::new(BaseScoreCalculator::new()),
                Arc::new(DifficultyMultiplierCalculator::new()),
                Arc::new(ProModeBonusCalculator::new()),
                Arc::new(AccuracyFactorCalculator::new()),
                Arc::new(SpeedBonusCalculator::new()),
                Arc::new(TimePenaltyCalculator::new()),
                Arc::new(SuccessMultiplierCalculator::new()),
            ],
        }
    }

    pub fn with_calculator(mut self, calculator: Arc<dyn ScoreCalculator>) -> Self {
        self.calculators.push(calculator);
        self
    }

    /// Drops every default stage, leaving only calculators added afterwards
    pub fn without_defaults(mut self) -> Self {
        self.calculators.clear();
        self
    }

    pub fn build(mut self) -> ScoringEngine {
        self.calculators.sort_by_key(|c| c.priority());
        ScoringEngine {
            calculators: self.calculators,
        }
    }
}
