use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = ".typerspace";
pub const DEFAULT_INIT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";

/// Where leaderboard data lives and how long to wait for it
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Base URL of the key-value service, e.g. `http://localhost:3001/api/redis`.
    /// Without it the local fallback is used and no probe is made.
    pub remote_url: Option<String>,
    pub remote_token: Option<String>,
    pub data_dir: PathBuf,
    pub init_timeout: Duration,
    pub probe_timeout: Duration,
    pub local_quota_bytes: Option<usize>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            remote_url: None,
            remote_token: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            init_timeout: Duration::from_millis(DEFAULT_INIT_TIMEOUT_MS),
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            local_quota_bytes: None,
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; unparseable numbers fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let millis = |name: &str| non_empty(name).and_then(|value| value.trim().parse::<u64>().ok());

        Self {
            remote_url: non_empty("HIGHSCORE_KV_URL"),
            remote_token: non_empty("HIGHSCORE_KV_TOKEN"),
            data_dir: non_empty("HIGHSCORE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            init_timeout: millis("HIGHSCORE_INIT_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.init_timeout),
            probe_timeout: millis("HIGHSCORE_PROBE_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.probe_timeout),
            local_quota_bytes: non_empty("HIGHSCORE_LOCAL_QUOTA_BYTES")
                .and_then(|value| value.trim().parse().ok()),
        }
    }
}

/// Settings for the key-value service binary
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub database_url: Option<String>,
    /// Bearer token required on `/api/redis` routes when set
    pub auth_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database_url: None,
            auth_token: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            bind_addr: non_empty("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            database_url: non_empty("DATABASE_URL"),
            auth_token: non_empty("HIGHSCORE_KV_TOKEN"),
        }
    }
}
