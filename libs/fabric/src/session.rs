use std::sync::Arc;

use flowlink_core::ServiceAddress;

use crate::agent::AgentConnector;
use crate::channel::{Channel, RawChannel, TypedChannelBuilder};
use crate::config::ClientConfig;
use crate::error::Result;

/// Connection state shared by every call a client makes
///
/// Owns the network agent (through the typed channel builder) and the
/// channel for the address in use. A channel is only ever returned for the
/// address it was built for; selecting a different address drops the
/// previous channel.
///
/// Methods take `&mut self`, so a session serializes its callers. Wrap it
/// in a mutex to share it between tasks.
pub struct Session {
    config: ClientConfig,
    client: reqwest::Client,
    typed: TypedChannelBuilder,
    current: Option<Arc<Channel>>,
}

impl Session {
    /// Create a session with an optional agent capability
    pub fn new(config: ClientConfig, connector: Option<Arc<dyn AgentConnector>>) -> Result<Self> {
        let client = config.http_client()?;
        let typed = TypedChannelBuilder::new(config.clone(), connector);
        Ok(Self {
            config,
            client,
            typed,
            current: None,
        })
    }

    /// Create a session that tries typed channels through `connector`
    pub fn with_agent(config: ClientConfig, connector: impl AgentConnector + 'static) -> Result<Self> {
        Self::new(config, Some(Arc::new(connector)))
    }

    /// Create a session that only builds raw channels
    pub fn raw_only(config: ClientConfig) -> Result<Self> {
        Self::new(config, None)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Return the channel for `address`, building it when the address changes
    ///
    /// Tries a typed channel and falls back to a raw one on any build
    /// error, so this never fails.
    pub async fn select(&mut self, address: &ServiceAddress) -> Arc<Channel> {
        if let Some(channel) = self.cached(address) {
            tracing::debug!(%address, kind = %channel.kind(), "reusing cached channel");
            return channel;
        }

        if let Some(previous) = self.current.take() {
            tracing::debug!(previous = %previous.address(), %address, "address changed, dropping channel");
        }

        let channel = match self.typed.build(address).await {
            Ok(typed) => Channel::Typed(typed),
            Err(e) => {
                tracing::warn!(%address, error = %e, "typed channel unavailable, using raw fallback");
                Channel::Raw(RawChannel::new(
                    address.clone(),
                    self.config.clone(),
                    self.client.clone(),
                ))
            }
        };
        tracing::debug!(%address, kind = %channel.kind(), "channel selected");

        let channel = Arc::new(channel);
        self.current = Some(channel.clone());
        channel
    }

    /// Channel already built for `address`, if any
    pub fn cached(&self, address: &ServiceAddress) -> Option<Arc<Channel>> {
        self.current
            .as_ref()
            .filter(|channel| channel.address() == address)
            .cloned()
    }

    /// Drop the channel for `address`; the next select rebuilds it
    pub fn invalidate(&mut self, address: &ServiceAddress) -> Option<Arc<Channel>> {
        if self.cached(address).is_some() {
            self.current.take()
        } else {
            None
        }
    }

    pub fn channel_count(&self) -> usize {
        usize::from(self.current.is_some())
    }

    /// Whether a network agent has been connected and bootstrapped
    pub fn has_agent(&self) -> bool {
        self.typed.has_agent()
    }
}
