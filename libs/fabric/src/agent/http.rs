use std::sync::{Arc, RwLock};
use std::time::Duration;

use flowlink_core::ServiceAddress;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::agent::{Agent, AgentConnector};
use crate::codec::{BincodeCodec, Codec};
use crate::config::{ClientConfig, ClientConfigBuilder, Environment};
use crate::error::{Error, Result};

/// Envelope carried by every typed call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallEnvelope {
    pub method_name: String,
    pub arg: Vec<u8>,
}

/// Agent speaking to a replica over HTTP
///
/// Calls are `POST {host}/api/v2/canister/{address}/call` with a bincode
/// [`CallEnvelope`] body. The root key comes from `GET {host}/api/v2/status`.
pub struct HttpAgent {
    client: reqwest::Client,
    config: ClientConfig,
    codec: BincodeCodec,
    root_key: RwLock<Option<Vec<u8>>>,
}

impl HttpAgent {
    /// Create an agent for the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = config.http_client()?;
        Ok(Self {
            client,
            config,
            codec: BincodeCodec,
            root_key: RwLock::new(None),
        })
    }

    /// Create a builder for configuring the agent
    pub fn builder() -> HttpAgentBuilder {
        HttpAgentBuilder::new()
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// Root key fetched during bootstrap, if any
    pub fn root_key(&self) -> Option<Vec<u8>> {
        self.root_key.read().ok().and_then(|key| key.clone())
    }

    fn is_trusted(&self) -> bool {
        !self.config.environment.requires_bootstrap() || self.root_key().is_some()
    }
}

#[async_trait::async_trait]
impl Agent for HttpAgent {
    async fn fetch_root_key(&self) -> Result<()> {
        let url = self.config.status_url()?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::BootstrapFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::BootstrapFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            )));
        }

        let key = response
            .bytes()
            .await
            .map_err(|e| Error::BootstrapFailed(e.to_string()))?;
        if key.is_empty() {
            return Err(Error::BootstrapFailed("empty root key".to_string()));
        }

        let mut slot = self
            .root_key
            .write()
            .map_err(|_| Error::Custom("root key lock poisoned".to_string()))?;
        *slot = Some(key.to_vec());
        Ok(())
    }

    async fn call(&self, address: &ServiceAddress, method: &str, arg: Vec<u8>) -> Result<Vec<u8>> {
        if !self.is_trusted() {
            return Err(Error::AgentUnavailable(
                "root key has not been fetched".to_string(),
            ));
        }

        let envelope = CallEnvelope {
            method_name: method.to_string(),
            arg,
        };
        let body = self.codec.encode(&envelope)?;

        let response = self
            .client
            .post(self.config.call_url(address.as_str())?)
            .header(CONTENT_TYPE, self.codec.content_type())
            .body(body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.bytes().await?.to_vec())
    }

    fn is_healthy(&self) -> bool {
        !self.root_key.is_poisoned()
    }
}

/// Connector that builds an [`HttpAgent`] from the session configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpAgentConnector;

#[async_trait::async_trait]
impl AgentConnector for HttpAgentConnector {
    async fn connect(&self, config: &ClientConfig) -> Result<Arc<dyn Agent>> {
        let agent =
            HttpAgent::new(config.clone()).map_err(|e| Error::AgentUnavailable(e.to_string()))?;
        Ok(Arc::new(agent))
    }
}

/// Builder for configuring an HTTP agent
#[derive(Default)]
pub struct HttpAgentBuilder {
    config: ClientConfigBuilder,
}

impl HttpAgentBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the replica host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config = self.config.host(host);
        self
    }

    /// Set the deployment environment
    pub fn environment(mut self, environment: Environment) -> Self {
        self.config = self.config.environment(environment);
        self
    }

    /// Set the per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.request_timeout(timeout);
        self
    }

    /// Build the agent with the configured settings
    pub fn build(self) -> Result<HttpAgent> {
        HttpAgent::new(self.config.build()?)
    }
}
