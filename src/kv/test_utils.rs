use async_trait::async_trait;
use std::future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use super::{InMemoryKeyValueBackend, KeyValueBackend, KvError};

/// Backend whose every call fails with a transport error
pub struct FailingBackend;

#[async_trait]
impl KeyValueBackend for FailingBackend {
    async fn get(&self, _key: &str) -> Result<Option<String>, KvError> {
        Err(KvError::Transport("down".into()))
    }
    async fn set(&self, _key: &str, _value: &str) -> Result<(), KvError> {
        Err(KvError::Transport("down".into()))
    }
    async fn delete(&self, _key: &str) -> Result<bool, KvError> {
        Err(KvError::Transport("down".into()))
    }
    async fn exists(&self, _key: &str) -> Result<bool, KvError> {
        Err(KvError::Transport("down".into()))
    }
    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

/// Backend that never answers
pub struct HangingBackend;

#[async_trait]
impl KeyValueBackend for HangingBackend {
    async fn get(&self, _key: &str) -> Result<Option<String>, KvError> {
        future::pending().await
    }
    async fn set(&self, _key: &str, _value: &str) -> Result<(), KvError> {
        future::pending().await
    }
    async fn delete(&self, _key: &str) -> Result<bool, KvError> {
        future::pending().await
    }
    async fn exists(&self, _key: &str) -> Result<bool, KvError> {
        future::pending().await
    }
    fn backend_name(&self) -> &'static str {
        "hanging"
    }
}

/// In-memory backend that counts calls and can be told to slow down reads,
/// fail writes, or reject writes above a size.
#[derive(Default)]
pub struct ScriptedBackend {
    pub inner: InMemoryKeyValueBackend,
    pub gets: AtomicUsize,
    pub sets: AtomicUsize,
    pub read_delay: Option<Duration>,
    pub fail_writes: AtomicBool,
    pub quota_bytes: Option<usize>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueBackend for ScriptedBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(KvError::Transport("write refused".into()));
        }
        if let Some(limit) = self.quota_bytes {
            if value.len() > limit {
                return Err(KvError::QuotaExceeded {
                    size: value.len(),
                    limit,
                });
            }
        }
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<bool, KvError> {
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> Result<bool, KvError> {
        self.inner.exists(key).await
    }

    fn backend_name(&self) -> &'static str {
        "scripted"
    }
}
