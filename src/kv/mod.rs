mod errors;
pub mod local;
pub mod memory;
pub mod postgres;
pub mod remote;
pub mod selector;
#[cfg(test)]
pub mod test_utils;

pub use errors::KvError;
pub use local::LocalFileBackend;
pub use memory::InMemoryKeyValueBackend;
pub use postgres::PostgresKeyValueBackend;
pub use remote::RemoteKeyValueBackend;
pub use selector::{BackendKind, BackendSelector, ExistsProbe, ReachabilityProbe, SelectedBackend};

use async_trait::async_trait;

/// String key-value storage. The leaderboard keeps its whole blob under a
/// single key, so implementations only need whole-value reads and writes.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), KvError>;
    /// Returns whether a value was removed
    async fn delete(&self, key: &str) -> Result<bool, KvError>;
    async fn exists(&self, key: &str) -> Result<bool, KvError>;

    fn backend_name(&self) -> &'static str;
}
