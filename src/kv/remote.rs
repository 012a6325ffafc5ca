use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::{KeyValueBackend, KvError};

/// Envelope returned by every key-value service route
#[derive(Debug, Serialize, Deserialize)]
pub struct KvResult<T> {
    pub result: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetValueRequest {
    pub value: String,
}

/// Client for the REST key-value service (`/get/:key`, `/set/:key`,
/// `/del/:key`, `/exists/:key` below a base URL).
#[derive(Debug, Clone)]
pub struct RemoteKeyValueBackend {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl RemoteKeyValueBackend {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, KvError> {
        let base_url =
            Url::parse(base_url).map_err(|e| KvError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(KvError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn route(&self, verb: &str, key: &str) -> Result<Url, KvError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| KvError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(verb)
            .push(key);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<Response, KvError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(operation, status = status.as_u16(), "Key-value service rejected request");
            return Err(KvError::Status {
                operation,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl KeyValueBackend for RemoteKeyValueBackend {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let url = self.route("get", key)?;
        let response = self.send("GET", self.client.get(url)).await?;
        let body: KvResult<Option<String>> = response.json().await?;
        debug!(found = body.result.is_some(), "Fetched remote value");
        Ok(body.result)
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        let url = self.route("set", key)?;
        let request = self.client.post(url).json(&SetValueRequest {
            value: value.to_string(),
        });
        self.send("SET", request).await?;
        debug!("Stored remote value");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<bool, KvError> {
        let url = self.route("del", key)?;
        let response = self.send("DEL", self.client.delete(url)).await?;
        let body: KvResult<u64> = response.json().await?;
        Ok(body.result > 0)
    }

    #[instrument(skip(self))]
    async fn exists(&self, key: &str) -> Result<bool, KvError> {
        let url = self.route("exists", key)?;
        let response = self.send("EXISTS", self.client.get(url)).await?;
        let body: KvResult<u64> = response.json().await?;
        Ok(body.result == 1)
    }

    fn backend_name(&self) -> &'static str {
        "remote"
    }
}
