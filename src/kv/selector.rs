use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use strum_macros::Display;
use tracing::{info, instrument, warn};

use super::{KeyValueBackend, KvError, LocalFileBackend, RemoteKeyValueBackend};
use crate::config::StorageConfig;

pub const PROBE_KEY: &str = "typerspace_probe";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum BackendKind {
    Remote,
    Local,
}

/// Decides at startup whether the remote backend is usable
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    async fn is_reachable(&self, backend: &dyn KeyValueBackend) -> bool;
}

/// Considers a backend reachable when an `exists` call answers within the timeout
pub struct ExistsProbe {
    key: String,
    timeout: Duration,
}

impl ExistsProbe {
    pub fn new(timeout: Duration) -> Self {
        Self {
            key: PROBE_KEY.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl ReachabilityProbe for ExistsProbe {
    async fn is_reachable(&self, backend: &dyn KeyValueBackend) -> bool {
        match tokio::time::timeout(self.timeout, backend.exists(&self.key)).await {
            Ok(Ok(_)) => true,
            Ok(Err(err)) => {
                warn!(?err, backend = backend.backend_name(), "Reachability probe failed");
                false
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    backend = backend.backend_name(),
                    "Reachability probe timed out"
                );
                false
            }
        }
    }
}

/// The backend chosen for the whole process lifetime
#[derive(Clone)]
pub struct SelectedBackend {
    pub kind: BackendKind,
    pub backend: Arc<dyn KeyValueBackend>,
}

impl std::fmt::Debug for SelectedBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedBackend")
            .field("kind", &self.kind)
            .field("backend", &self.backend.backend_name())
            .finish()
    }
}

/// Chooses between the remote and local backend exactly once
pub struct BackendSelector {
    probe: Arc<dyn ReachabilityProbe>,
}

impl BackendSelector {
    pub fn new(probe: Arc<dyn ReachabilityProbe>) -> Self {
        Self { probe }
    }

    /// Selector using an [`ExistsProbe`] with the given timeout
    pub fn with_probe_timeout(timeout: Duration) -> Self {
        Self::new(Arc::new(ExistsProbe::new(timeout)))
    }

    #[instrument(skip_all)]
    pub async fn select(
        &self,
        remote: Option<Arc<dyn KeyValueBackend>>,
        local: Arc<dyn KeyValueBackend>,
    ) -> SelectedBackend {
        let selected = match remote {
            Some(remote) if self.probe.is_reachable(remote.as_ref()).await => SelectedBackend {
                kind: BackendKind::Remote,
                backend: remote,
            },
            Some(_) => {
                warn!("Remote highscore storage unreachable, falling back to local storage");
                SelectedBackend {
                    kind: BackendKind::Local,
                    backend: local,
                }
            }
            None => {
                warn!("Remote highscore storage not configured, using local storage");
                SelectedBackend {
                    kind: BackendKind::Local,
                    backend: local,
                }
            }
        };

        info!(
            kind = %selected.kind,
            backend = selected.backend.backend_name(),
            "Highscore storage selected"
        );
        selected
    }

    /// Selector probing with the configured `probe_timeout`
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::with_probe_timeout(config.probe_timeout)
    }

    /// Builds both candidates from configuration and selects one.
    /// Fails only when the configured remote URL is malformed.
    pub async fn select_from_config(&self, config: &StorageConfig) -> Result<SelectedBackend, KvError> {
        let remote: Option<Arc<dyn KeyValueBackend>> = match &config.remote_url {
            Some(url) => Some(Arc::new(RemoteKeyValueBackend::new(
                url,
                config.remote_token.clone(),
                config.init_timeout,
            )?)),
            None => None,
        };

        let mut local = LocalFileBackend::new(&config.data_dir);
        if let Some(quota) = config.local_quota_bytes {
            local = local.with_quota(quota);
        }

        Ok(self.select(remote, Arc::new(local)).await)
    }
}

impl Default for BackendSelector {
    fn default() -> Self {
        Self::with_probe_timeout(Duration::from_millis(
            crate::config::DEFAULT_PROBE_TIMEOUT_MS,
        ))
    }
}
