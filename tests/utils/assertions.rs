//! Leaderboard assertion helpers - fluent API for verifying stored tables
#![allow(dead_code)] // Test utilities may not all be used in every test

use typerspace_scores::{Difficulty, HighscoreEntry, LeaderboardStore, MAX_ENTRIES_PER_DIFFICULTY};

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct LeaderboardAssertion {
    difficulty: Difficulty,
    entries: Vec<HighscoreEntry>,
}

impl LeaderboardAssertion {
    /// Snapshot every retained entry of one difficulty
    pub async fn for_difficulty(store: &LeaderboardStore, difficulty: Difficulty) -> Self {
        let entries = store
            .get_highscores(difficulty, MAX_ENTRIES_PER_DIFFICULTY)
            .await;
        Self {
            difficulty,
            entries,
        }
    }

    pub fn has_len(self, expected: usize) -> Self {
        assert_eq!(
            self.entries.len(),
            expected,
            "{} leaderboard length",
            self.difficulty
        );
        self
    }

    pub fn is_sorted_descending(self) -> Self {
        assert!(
            self.entries.windows(2).all(|pair| pair[0].score >= pair[1].score),
            "{} leaderboard is not sorted: {:?}",
            self.difficulty,
            self.scores()
        );
        self
    }

    pub fn has_scores(self, expected: &[u64]) -> Self {
        assert_eq!(self.scores(), expected, "{} leaderboard scores", self.difficulty);
        self
    }

    pub fn has_entry_at(self, position: usize, id: &str) -> Self {
        let actual = self.entries.get(position - 1).map(|entry| entry.id.as_str());
        assert_eq!(actual, Some(id), "{} leaderboard position {}", self.difficulty, position);
        self
    }

    pub fn entries(self) -> Vec<HighscoreEntry> {
        self.entries
    }

    fn scores(&self) -> Vec<u64> {
        self.entries.iter().map(|entry| entry.score).collect()
    }
}
