#![allow(dead_code)] // Test utilities may not all be used in every test

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use typerspace_scores::{
    kv::{InMemoryKeyValueBackend, KeyValueBackend, RemoteKeyValueBackend},
    proxy,
    shared::AppState,
    LeaderboardStore,
};

// ============================================================================
// Test Server Infrastructure
// ============================================================================

/// Key-value service running on an ephemeral local port
pub struct TestServer {
    pub addr: SocketAddr,
    pub storage: InMemoryKeyValueBackend,
    token: Option<String>,
    _server_handle: JoinHandle<()>,
}

impl TestServer {
    /// Base URL the remote backend is pointed at
    pub fn base_url(&self) -> String {
        format!("http://{}/api/redis", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Remote backend authenticated with the server's token, if any
    pub fn remote_backend(&self) -> RemoteKeyValueBackend {
        self.remote_backend_with_token(self.token.clone())
    }

    pub fn remote_backend_with_token(&self, token: Option<String>) -> RemoteKeyValueBackend {
        RemoteKeyValueBackend::new(&self.base_url(), token, Duration::from_secs(2))
            .expect("test server URL is valid")
    }

    /// A fresh leaderboard store talking to this server, as a newly started
    /// game process would see it
    pub fn leaderboard(&self) -> Arc<LeaderboardStore> {
        Arc::new(LeaderboardStore::new(Arc::new(self.remote_backend())))
    }
}

pub struct TestServerBuilder {
    token: Option<String>,
    values: Vec<(String, String)>,
}

impl TestServerBuilder {
    pub fn new() -> Self {
        Self {
            token: None,
            values: vec![],
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.push((key.to_string(), value.to_string()));
        self
    }

    pub async fn start(self) -> TestServer {
        let storage = InMemoryKeyValueBackend::with_values(self.values);
        let backend: Arc<dyn KeyValueBackend> = Arc::new(storage.clone());
        let state = AppState::new(backend).with_auth_token(self.token.clone());
        let app = proxy::router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("listener address");

        let server_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server");
        });

        TestServer {
            addr,
            storage,
            token: self.token,
            _server_handle: server_handle,
        }
    }
}
