#![allow(dead_code)] // Test utilities may not all be used in every test

use typerspace_scores::{Difficulty, GameMode, GameStats};

// ============================================================================
// Game Stats Builder
// ============================================================================

/// Fluent builder for finished-game statistics. Starts from a flawless
/// one-minute easy run: 100 of 100 keystrokes, 10 of 10 enemies.
pub struct GameStatsBuilder {
    stats: GameStats,
}

impl GameStatsBuilder {
    pub fn new() -> Self {
        Self {
            stats: GameStats {
                correct_keystrokes: 100,
                total_keystrokes: 100,
                enemies_defeated: 10,
                total_enemies: 10,
                time: 60.0,
                difficulty: Difficulty::Easy,
                pro_mode: false,
                mode: GameMode::TwoD,
                success: true,
            },
        }
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.stats.difficulty = difficulty;
        self
    }

    pub fn pro(mut self) -> Self {
        self.stats.pro_mode = true;
        self
    }

    pub fn three_d(mut self) -> Self {
        self.stats.mode = GameMode::ThreeD;
        self
    }

    pub fn failed(mut self) -> Self {
        self.stats.success = false;
        self
    }

    pub fn keystrokes(mut self, correct: u32, total: u32) -> Self {
        self.stats.correct_keystrokes = correct;
        self.stats.total_keystrokes = total;
        self
    }

    pub fn enemies(mut self, defeated: u32, total: u32) -> Self {
        self.stats.enemies_defeated = defeated;
        self.stats.total_enemies = total;
        self
    }

    pub fn seconds(mut self, time: f64) -> Self {
        self.stats.time = time;
        self
    }

    pub fn build(self) -> GameStats {
        self.stats
    }
}
