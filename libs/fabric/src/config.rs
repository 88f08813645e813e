use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;

use crate::error::{Error, Result};

/// Loopback replica used when no host is configured
pub const DEFAULT_HOST: &str = "http://localhost:8000";

pub const HOST_ENV: &str = "FLOWLINK_HOST";
pub const ENVIRONMENT_ENV: &str = "FLOWLINK_ENV";

/// Deployment context of the remote replica
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local replica; the agent must fetch its root key before calling
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn requires_bootstrap(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Self::Development),
            "production" | "prod" | "ic" => Ok(Self::Production),
            other => Err(Error::Config(format!("unknown environment: {other}"))),
        }
    }
}

/// Settings shared by every channel of a session
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Replica base URL, validated when built through the builder
    pub host: String,
    pub environment: Environment,
    /// Applied to every HTTP request when set. Unset means a hung call
    /// blocks its caller indefinitely.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a builder for configuring the client
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Read `FLOWLINK_HOST` and `FLOWLINK_ENV`, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();
        if let Ok(host) = std::env::var(HOST_ENV) {
            builder = builder.host(host);
        }
        if let Ok(environment) = std::env::var(ENVIRONMENT_ENV) {
            builder = builder.environment(environment.parse()?);
        }
        builder.build()
    }

    /// Call endpoint of one canister
    ///
    /// The address is percent-encoded as a single path segment, so it can
    /// never reach another path or the query string.
    pub fn call_url(&self, address: &str) -> Result<Url> {
        // Dot segments are dropped when appended
        if matches!(address, "." | "..") {
            return Err(Error::InvalidAddress(address.to_string()));
        }
        self.endpoint(&["api", "v2", "canister", address, "call"])
    }

    pub fn status_url(&self) -> Result<Url> {
        self.endpoint(&["api", "v2", "status"])
    }

    /// HTTP client honouring this configuration's timeout
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(|e| Error::Config(e.to_string()))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = parse_host(&self.host)?;
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("host {:?} cannot be a base URL", self.host)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            environment: Environment::default(),
            request_timeout: None,
        }
    }
}

fn parse_host(host: &str) -> Result<Url> {
    Url::parse(host).map_err(|e| Error::Config(format!("invalid host {host:?}: {e}")))
}

/// Builder for configuring a client session
#[derive(Default)]
pub struct ClientConfigBuilder {
    host: Option<String>,
    environment: Option<Environment>,
    request_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the replica host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the deployment environment
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Set the per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ClientConfig> {
        let host = match self.host {
            Some(host) => {
                let host = host.trim().to_string();
                let url = parse_host(&host)?;
                if url.cannot_be_a_base() {
                    return Err(Error::Config(format!("host {host:?} cannot be a base URL")));
                }
                host
            }
            None => DEFAULT_HOST.to_string(),
        };

        Ok(ClientConfig {
            host,
            environment: self.environment.unwrap_or_default(),
            request_timeout: self.request_timeout,
        })
    }
}
