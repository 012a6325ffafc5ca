use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument, warn};

use super::{KeyValueBackend, KvError};

const VALUE_EXTENSION: &str = "json";

/// On-device storage: one file per key inside a data directory.
///
/// Writes go to a temporary file that is renamed over the target, so a crash
/// mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct LocalFileBackend {
    dir: PathBuf,
    quota_bytes: Option<usize>,
}

impl LocalFileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            quota_bytes: None,
        }
    }

    /// Rejects values larger than `bytes` with [`KvError::QuotaExceeded`]
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_stem: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.{}", file_stem, VALUE_EXTENSION))
    }
}

#[async_trait]
impl KeyValueBackend for LocalFileBackend {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No local value stored");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        if let Some(limit) = self.quota_bytes {
            if value.len() > limit {
                warn!(limit, "Local storage quota exceeded");
                return Err(KvError::QuotaExceeded {
                    size: value.len(),
                    limit,
                });
            }
        }

        fs::create_dir_all(&self.dir).await?;

        let target = self.path_for(key);
        let staging = target.with_extension("tmp");
        fs::write(&staging, value).await?;
        fs::rename(&staging, &target).await?;

        debug!(path = %target.display(), "Stored value on disk");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<bool, KvError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(skip(self))]
    async fn exists(&self, key: &str) -> Result<bool, KvError> {
        Ok(fs::try_exists(self.path_for(key)).await?)
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
