use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::{KeyValueBackend, KvError};

/// Process-local storage, used by tests and as the key-value service's
/// default store. Data is lost when the process exits.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKeyValueBackend {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueBackend {
    pub fn new() -> Self {
        Self {
            values: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a backend with pre-populated values
    pub fn with_values(values: Vec<(String, String)>) -> Self {
        Self {
            values: Arc::new(RwLock::new(values.into_iter().collect())),
        }
    }

    pub async fn key_count(&self) -> usize {
        self.values.read().await.len()
    }
}

#[async_trait]
impl KeyValueBackend for InMemoryKeyValueBackend {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let values = self.values.read().await;
        let value = values.get(key).cloned();
        debug!(found = value.is_some(), "Read value from memory");
        Ok(value)
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        let mut values = self.values.write().await;
        values.insert(key.to_string(), value.to_string());
        debug!("Stored value in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<bool, KvError> {
        let mut values = self.values.write().await;
        Ok(values.remove(key).is_some())
    }

    #[instrument(skip(self))]
    async fn exists(&self, key: &str) -> Result<bool, KvError> {
        let values = self.values.read().await;
        Ok(values.contains_key(key))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_returns_value() {
        let backend = InMemoryKeyValueBackend::new();
        backend.set("key", "value").await.unwrap();

        assert_eq!(backend.get("key").await.unwrap().as_deref(), Some("value"));
        assert!(backend.exists("key").await.unwrap());
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let backend = InMemoryKeyValueBackend::new();
        backend.set("key", "first").await.unwrap();
        backend.set("key", "second").await.unwrap();

        assert_eq!(backend.get("key").await.unwrap().as_deref(), Some("second"));
        assert_eq!(backend.key_count().await, 1);
    }

    #[tokio::test]
    async fn delete_reports_whether_value_existed() {
        let backend =
            InMemoryKeyValueBackend::with_values(vec![("key".to_string(), "v".to_string())]);

        assert!(backend.delete("key").await.unwrap());
        assert!(!backend.delete("key").await.unwrap());
        assert!(!backend.exists("key").await.unwrap());
        assert_eq!(backend.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let backend = InMemoryKeyValueBackend::new();
        let clone = backend.clone();
        clone.set("shared", "yes").await.unwrap();

        assert!(backend.exists("shared").await.unwrap());
    }
}
