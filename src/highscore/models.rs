use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::HighscoreError;
use crate::scoring::{Difficulty, GameMode, GameStats};

/// Schema tag of the persisted blob. Data under any other tag is discarded.
pub const HIGHSCORE_VERSION: &str = "1.0";
/// Retention cap per difficulty
pub const MAX_ENTRIES_PER_DIFFICULTY: usize = 50;
/// Size of the "highscore" window, independent of retention
pub const HIGHSCORE_TABLE_SIZE: usize = 10;
/// Retention used when local storage refuses a full-size write
pub const REDUCED_ENTRIES_PER_DIFFICULTY: usize = 25;

pub const DEFAULT_PLAYER_NAME: &str = "Player";
pub const MAX_PLAYER_NAME_CHARS: usize = 20;

const ID_SUFFIX_LEN: usize = 9;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A single scored game as stored on the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighscoreEntry {
    /// `<unix-ms>_<random base36>`, only used to find an entry again after re-sorting
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    pub score: u64,
    /// Percent, 0-100
    pub accuracy: u32,
    pub wpm: u32,
    pub time: f64,
    pub difficulty: Difficulty,
    pub pro_mode: bool,
    pub mode: GameMode,
    pub success: bool,
    /// Unix milliseconds, informational
    pub timestamp: i64,
    pub enemies_defeated: u32,
    pub total_enemies: u32,
}

impl HighscoreEntry {
    /// Creates an entry with a fresh id and timestamp
    pub fn from_stats(stats: &GameStats, score: u64, accuracy: u32, wpm: u32) -> Self {
        let now = Utc::now().timestamp_millis();

        Self {
            id: Self::generate_id(now),
            player_name: None,
            score,
            accuracy,
            wpm,
            time: stats.elapsed_seconds(),
            difficulty: stats.difficulty,
            pro_mode: stats.pro_mode,
            mode: stats.mode,
            success: stats.success,
            timestamp: now,
            enemies_defeated: stats.enemies_defeated,
            total_enemies: stats.total_enemies,
        }
    }

    pub fn generate_id(timestamp_ms: i64) -> String {
        let mut rng = rand::rng();
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
            .collect();
        format!("{}_{}", timestamp_ms, suffix)
    }

    /// Attaches a display name. Blank input keeps the entry anonymous.
    pub fn with_player_name(mut self, name: &str) -> Self {
        let trimmed: String = name.trim().chars().take(MAX_PLAYER_NAME_CHARS).collect();
        let trimmed = trimmed.trim_end().to_string();
        self.player_name = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        };
        self
    }

    pub fn display_name(&self) -> &str {
        self.player_name.as_deref().unwrap_or(DEFAULT_PLAYER_NAME)
    }
}

/// One value per leaderboard difficulty, accessed exhaustively
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DifficultyBuckets<T> {
    pub easy: T,
    pub medium: T,
    pub hard: T,
    pub ultra: T,
}

impl<T> DifficultyBuckets<T> {
    pub fn get(&self, difficulty: Difficulty) -> &T {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
            Difficulty::Ultra => &self.ultra,
        }
    }

    pub fn get_mut(&mut self, difficulty: Difficulty) -> &mut T {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
            Difficulty::Ultra => &mut self.ultra,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Difficulty, &T)> + '_ {
        Difficulty::iter().map(move |difficulty| (difficulty, self.get(difficulty)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> DifficultyBuckets<U> {
        DifficultyBuckets {
            easy: f(&self.easy),
            medium: f(&self.medium),
            hard: f(&self.hard),
            ultra: f(&self.ultra),
        }
    }
}

/// Aggregates over every stored entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighscoreStats {
    pub total_games: usize,
    pub successful_games: usize,
    pub average_accuracy: u32,
    pub average_wpm: u32,
    pub personal_best: DifficultyBuckets<Option<HighscoreEntry>>,
}

/// The persisted blob: every leaderboard under one key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighscoreData {
    pub version: String,
    pub last_updated: i64,
    pub entries: DifficultyBuckets<Vec<HighscoreEntry>>,
}

impl Default for HighscoreData {
    fn default() -> Self {
        Self::empty()
    }
}

impl HighscoreData {
    pub fn empty() -> Self {
        Self {
            version: HIGHSCORE_VERSION.to_string(),
            last_updated: Utc::now().timestamp_millis(),
            entries: DifficultyBuckets::default(),
        }
    }

    pub fn touch(&mut self) {
        self.last_updated = Utc::now().timestamp_millis();
    }

    /// Inserts ahead of any equal scores and drops whatever falls past the
    /// retention cap. Returns the 1-based rank the entry landed on, or `None`
    /// if it was evicted immediately.
    pub fn insert(&mut self, entry: HighscoreEntry) -> Option<usize> {
        let list = self.entries.get_mut(entry.difficulty);
        let position = list.partition_point(|existing| existing.score > entry.score);
        list.insert(position, entry);
        list.truncate(MAX_ENTRIES_PER_DIFFICULTY);
        (position < MAX_ENTRIES_PER_DIFFICULTY).then_some(position + 1)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.entries
            .iter()
            .any(|(_, list)| list.iter().any(|entry| entry.id == id))
    }

    pub fn position_of(&self, difficulty: Difficulty, id: &str) -> Option<usize> {
        self.entries
            .get(difficulty)
            .iter()
            .position(|entry| entry.id == id)
            .map(|index| index + 1)
    }

    pub fn top(&self, difficulty: Difficulty, limit: usize) -> Vec<HighscoreEntry> {
        self.entries
            .get(difficulty)
            .iter()
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn is_new_highscore(&self, score: u64, difficulty: Difficulty) -> bool {
        match self.entries.get(difficulty).get(HIGHSCORE_TABLE_SIZE - 1) {
            Some(tenth) => score > tenth.score,
            None => true,
        }
    }

    /// Rank `score` would take if inserted now: one past every strictly
    /// greater stored score.
    pub fn score_rank(&self, score: u64, difficulty: Difficulty) -> usize {
        let ahead = self
            .entries
            .get(difficulty)
            .iter()
            .take(MAX_ENTRIES_PER_DIFFICULTY)
            .filter(|entry| entry.score > score)
            .count();
        ahead + 1
    }

    pub fn stats(&self) -> HighscoreStats {
        let all: Vec<&HighscoreEntry> = self
            .entries
            .iter()
            .flat_map(|(_, list)| list.iter())
            .collect();

        let total_games = all.len();
        let successful_games = all.iter().filter(|entry| entry.success).count();

        let average = |field: fn(&HighscoreEntry) -> u32| -> u32 {
            if total_games == 0 {
                return 0;
            }
            let sum: u64 = all.iter().map(|entry| field(entry) as u64).sum();
            (sum as f64 / total_games as f64).round() as u32
        };

        HighscoreStats {
            total_games,
            successful_games,
            average_accuracy: average(|entry| entry.accuracy),
            average_wpm: average(|entry| entry.wpm),
            personal_best: self.entries.map(|list| list.first().cloned()),
        }
    }

    pub fn clear(&mut self, difficulty: Option<Difficulty>) {
        match difficulty {
            Some(difficulty) => self.entries.get_mut(difficulty).clear(),
            None => self.entries = DifficultyBuckets::default(),
        }
    }

    /// Copy with every difficulty cut down to `max` entries
    pub fn truncated(&self, max: usize) -> Self {
        Self {
            version: self.version.clone(),
            last_updated: self.last_updated,
            entries: self
                .entries
                .map(|list| list.iter().take(max).cloned().collect()),
        }
    }

    /// Re-establishes ordering and the retention cap on externally supplied data.
    /// Stable, so already-sorted lists keep their order.
    pub fn normalize(&mut self) {
        for difficulty in Difficulty::iter() {
            let list = self.entries.get_mut(difficulty);
            list.sort_by(|a, b| b.score.cmp(&a.score));
            list.truncate(MAX_ENTRIES_PER_DIFFICULTY);
        }
    }

    /// Checks data coming from outside the process before it replaces the cache
    pub fn validate(&self) -> Result<(), HighscoreError> {
        if self.version != HIGHSCORE_VERSION {
            return Err(HighscoreError::VersionMismatch {
                expected: HIGHSCORE_VERSION.to_string(),
                found: self.version.clone(),
            });
        }

        for (difficulty, list) in self.entries.iter() {
            if let Some(misfiled) = list.iter().find(|entry| entry.difficulty != difficulty) {
                return Err(HighscoreError::InvalidData(format!(
                    "entry {} ({}) stored under {}",
                    misfiled.id, misfiled.difficulty, difficulty
                )));
            }
        }

        Ok(())
    }
}
