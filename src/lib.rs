// Library crate for TyperSpace scoring and highscore storage
// Exposes the scoring engine, the leaderboard store and the key-value service

pub mod config;
pub mod highscore;
pub mod kv;
pub mod proxy;
pub mod scoring;
pub mod shared;

pub use config::{ServerConfig, StorageConfig};
pub use highscore::{
    CacheState, DifficultyBuckets, HighscoreData, HighscoreEntry, HighscoreError, HighscoreStats,
    LeaderboardStore, HIGHSCORE_TABLE_SIZE, MAX_ENTRIES_PER_DIFFICULTY,
};
pub use kv::{
    BackendKind, BackendSelector, InMemoryKeyValueBackend, KeyValueBackend, KvError,
    LocalFileBackend, RemoteKeyValueBackend,
};
pub use scoring::{
    difficulty_emoji, format_score, Difficulty, GameMode, GameStats, ScoringEngine,
};
pub use shared::{AppError, AppState};
