use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use strum_macros::Display;
use tokio::sync::{OnceCell, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use super::models::{
    HighscoreData, HighscoreEntry, HighscoreStats, REDUCED_ENTRIES_PER_DIFFICULTY,
};
use super::HighscoreError;
use crate::config::{StorageConfig, DEFAULT_INIT_TIMEOUT_MS};
use crate::kv::{KeyValueBackend, KvError, SelectedBackend};
use crate::scoring::Difficulty;

/// The single key holding the whole leaderboard blob
pub const STORAGE_KEY: &str = "typerspace_highscores";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CacheState {
    Uninitialized,
    Loading,
    Ready,
}

/// Marks the store as loading for as long as it is alive, so an abandoned
/// load does not leave `CacheState::Loading` behind.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn set(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug)]
struct Cache {
    data: HighscoreData,
    last_saved_id: Option<String>,
}

/// Bounded, sorted per-difficulty leaderboards backed by one key-value blob.
///
/// The blob is loaded on first use and cached for the life of the store; every
/// mutation is read-modify-written as a whole while holding the cache's write
/// lock, so at most one persist is in flight at a time.
pub struct LeaderboardStore {
    backend: Arc<dyn KeyValueBackend>,
    init_timeout: Duration,
    cache: OnceCell<RwLock<Cache>>,
    loading: AtomicBool,
}

impl LeaderboardStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self {
            backend,
            init_timeout: Duration::from_millis(DEFAULT_INIT_TIMEOUT_MS),
            cache: OnceCell::new(),
            loading: AtomicBool::new(false),
        }
    }

    pub fn from_selection(selected: SelectedBackend, config: &StorageConfig) -> Self {
        Self::new(selected.backend).with_init_timeout(config.init_timeout)
    }

    /// How long the first load may take before falling back to empty data
    pub fn with_init_timeout(mut self, timeout: Duration) -> Self {
        self.init_timeout = timeout;
        self
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    pub fn cache_state(&self) -> CacheState {
        if self.cache.initialized() {
            CacheState::Ready
        } else if self.loading.load(Ordering::SeqCst) {
            CacheState::Loading
        } else {
            CacheState::Uninitialized
        }
    }

    /// Waits until the cache is populated. Every operation does this
    /// implicitly; calling it early only moves the wait.
    pub async fn ready(&self) {
        self.cache().await;
    }

    async fn cache(&self) -> &RwLock<Cache> {
        self.cache.get_or_init(|| self.load()).await
    }

    #[instrument(skip(self), fields(backend = self.backend.backend_name()))]
    async fn load(&self) -> RwLock<Cache> {
        let _loading = LoadingGuard::set(&self.loading);

        let data = match tokio::time::timeout(self.init_timeout, self.load_from_backend()).await {
            Ok(data) => data,
            Err(_) => {
                warn!(
                    timeout_ms = self.init_timeout.as_millis() as u64,
                    "Timed out loading highscores, starting empty"
                );
                HighscoreData::empty()
            }
        };

        info!(
            total_entries = data.stats().total_games,
            "Highscore cache ready"
        );

        RwLock::new(Cache {
            data,
            last_saved_id: None,
        })
    }

    async fn load_from_backend(&self) -> HighscoreData {
        let raw = match self.backend.get(STORAGE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("No stored highscores, starting empty");
                return HighscoreData::empty();
            }
            Err(err) => {
                error!(?err, "Failed to load highscores, starting empty");
                return HighscoreData::empty();
            }
        };

        let mut data = match serde_json::from_str::<HighscoreData>(&raw) {
            Ok(data) => data,
            Err(err) => {
                warn!(?err, "Stored highscores are malformed, starting empty");
                return HighscoreData::empty();
            }
        };

        if let Err(err) = data.validate() {
            warn!(%err, "Stored highscores rejected, starting empty");
            return HighscoreData::empty();
        }

        data.normalize();
        data
    }

    /// Writes `data` through the backend and returns what was actually stored.
    /// A quota rejection is retried once with shorter lists.
    async fn persist(&self, data: HighscoreData) -> Result<HighscoreData, HighscoreError> {
        let json = serde_json::to_string(&data)?;

        match self.backend.set(STORAGE_KEY, &json).await {
            Ok(()) => {
                debug!(bytes = json.len(), "Highscores persisted");
                Ok(data)
            }
            Err(KvError::QuotaExceeded { size, limit }) => {
                warn!(
                    size,
                    limit,
                    retained = REDUCED_ENTRIES_PER_DIFFICULTY,
                    "Storage quota exceeded, reducing entries"
                );
                let reduced = data.truncated(REDUCED_ENTRIES_PER_DIFFICULTY);
                let json = serde_json::to_string(&reduced)?;
                self.backend.set(STORAGE_KEY, &json).await.map_err(|err| {
                    error!(?err, "Failed to persist even with reduced entries");
                    HighscoreError::from(err)
                })?;
                Ok(reduced)
            }
            Err(err) => {
                error!(?err, "Failed to persist highscores");
                Err(err.into())
            }
        }
    }

    /// Inserts an entry and persists the leaderboard.
    ///
    /// Saving an entry whose id is already stored is a no-op. On a failed
    /// write the cache keeps its previous contents.
    #[instrument(
        skip(self, entry),
        fields(entry_id = %entry.id, score = entry.score, difficulty = %entry.difficulty)
    )]
    pub async fn save(&self, entry: HighscoreEntry) -> Result<(), HighscoreError> {
        let mut cache = self.cache().await.write().await;

        if cache.data.contains_id(&entry.id) {
            debug!("Entry already on the leaderboard, skipping save");
            cache.last_saved_id = Some(entry.id);
            return Ok(());
        }

        let entry_id = entry.id.clone();
        let mut next = cache.data.clone();
        let rank = next.insert(entry);
        next.touch();

        cache.data = self.persist(next).await?;
        cache.last_saved_id = Some(entry_id);

        info!(rank = ?rank, "Highscore saved");
        Ok(())
    }

    /// Fire-and-forget save; failures are logged and never reach the caller
    pub fn save_in_background(self: &Arc<Self>, entry: HighscoreEntry) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let entry_id = entry.id.clone();
            if let Err(err) = store.save(entry).await {
                error!(?err, %entry_id, "Failed to save highscore");
            }
        })
    }

    pub async fn get_highscores(&self, difficulty: Difficulty, limit: usize) -> Vec<HighscoreEntry> {
        let cache = self.cache().await.read().await;
        cache.data.top(difficulty, limit)
    }

    /// True while the top ten is not full, or when `score` beats tenth place
    pub async fn is_new_highscore(&self, score: u64, difficulty: Difficulty) -> bool {
        let cache = self.cache().await.read().await;
        cache.data.is_new_highscore(score, difficulty)
    }

    pub async fn get_score_rank(&self, score: u64, difficulty: Difficulty) -> usize {
        let cache = self.cache().await.read().await;
        cache.data.score_rank(score, difficulty)
    }

    /// Previews the rank of an entry that has not been saved yet
    pub async fn get_entry_rank(&self, entry: &HighscoreEntry) -> usize {
        self.get_score_rank(entry.score, entry.difficulty).await
    }

    /// Position of the most recently saved entry, if it is still retained
    pub async fn last_saved_rank(&self, difficulty: Difficulty) -> Option<usize> {
        let cache = self.cache().await.read().await;
        let id = cache.last_saved_id.as_deref()?;
        cache.data.position_of(difficulty, id)
    }

    pub async fn get_stats(&self) -> HighscoreStats {
        let cache = self.cache().await.read().await;
        cache.data.stats()
    }

    /// Empties one difficulty, or all of them, and persists the result
    #[instrument(skip(self))]
    pub async fn clear_highscores(&self, difficulty: Option<Difficulty>) -> Result<(), HighscoreError> {
        let mut cache = self.cache().await.write().await;

        let mut next = cache.data.clone();
        next.clear(difficulty);
        next.touch();
        cache.data = self.persist(next).await?;

        match difficulty {
            Some(difficulty) => info!(%difficulty, "Highscores cleared"),
            None => info!("All highscores cleared"),
        }
        Ok(())
    }

    pub async fn export_highscores(&self) -> Result<String, HighscoreError> {
        let cache = self.cache().await.read().await;
        Ok(serde_json::to_string_pretty(&cache.data)?)
    }

    /// Replaces the leaderboard with a previously exported blob.
    /// Invalid input is rejected before anything is touched.
    #[instrument(skip(self, json), fields(bytes = json.len()))]
    pub async fn import_highscores(&self, json: &str) -> Result<(), HighscoreError> {
        let mut data: HighscoreData = serde_json::from_str(json).map_err(|err| {
            warn!(%err, "Rejected highscore import: malformed JSON");
            HighscoreError::from(err)
        })?;
        data.validate().map_err(|err| {
            warn!(%err, "Rejected highscore import");
            err
        })?;
        data.normalize();

        let mut cache = self.cache().await.write().await;
        cache.data = self.persist(data).await?;

        info!("Highscores imported");
        Ok(())
    }
}
