mod errors;
pub mod models;
pub mod store;

pub use errors::HighscoreError;
pub use models::{
    DifficultyBuckets, HighscoreData, HighscoreEntry, HighscoreStats, HIGHSCORE_TABLE_SIZE,
    HIGHSCORE_VERSION, MAX_ENTRIES_PER_DIFFICULTY,
};
pub use store::{CacheState, LeaderboardStore, STORAGE_KEY};
