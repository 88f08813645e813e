use std::sync::Arc;

use flowlink_core::{Operation, ServiceAddress, ServiceDescriptor, HELLO_WORLD};

use crate::agent::{Agent, AgentConnector};
use crate::codec::{BincodeCodec, Codec};
use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Channel backed by an authenticated agent and a service descriptor
pub struct TypedChannel {
    address: ServiceAddress,
    agent: Arc<dyn Agent>,
    descriptor: ServiceDescriptor,
    codec: BincodeCodec,
}

impl TypedChannel {
    /// Bind an agent to a service address
    pub fn bind(
        agent: Arc<dyn Agent>,
        address: ServiceAddress,
        descriptor: ServiceDescriptor,
    ) -> Result<Self> {
        if !address.is_well_formed() {
            return Err(Error::InvalidAddress(address.to_string()));
        }
        Ok(Self {
            address,
            agent,
            descriptor,
            codec: BincodeCodec,
        })
    }

    pub fn address(&self) -> &ServiceAddress {
        &self.address
    }

    pub fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    /// Perform a schema-checked call and decode the text reply
    pub async fn call(&self, op: &Operation) -> Result<String> {
        let signature = self.descriptor.check(op)?;
        let arg = self.codec.encode(&op.args())?;
        let reply = self.agent.call(&self.address, signature.name, arg).await?;
        self.codec.decode(&reply)
    }
}

enum AgentSlot {
    Untried,
    Ready(Arc<dyn Agent>),
    Failed(String),
}

/// Builds typed channels, owning the one agent they share
///
/// The agent is connected and bootstrapped on first use. A failure is
/// remembered, so later builds fall back immediately instead of repeating
/// the expensive attempt.
pub struct TypedChannelBuilder {
    connector: Option<Arc<dyn AgentConnector>>,
    config: ClientConfig,
    descriptor: ServiceDescriptor,
    slot: AgentSlot,
}

impl TypedChannelBuilder {
    pub fn new(config: ClientConfig, connector: Option<Arc<dyn AgentConnector>>) -> Self {
        Self {
            connector,
            config,
            descriptor: HELLO_WORLD,
            slot: AgentSlot::Untried,
        }
    }

    /// Bind channels to a different service descriptor
    pub fn descriptor(mut self, descriptor: ServiceDescriptor) -> Self {
        self.descriptor = descriptor;
        self
    }

    /// Build a typed channel, or report why the caller should fall back
    pub async fn build(&mut self, address: &ServiceAddress) -> Result<TypedChannel> {
        if !address.is_well_formed() {
            return Err(Error::InvalidAddress(address.to_string()));
        }
        let agent = self.agent().await?;
        TypedChannel::bind(agent, address.clone(), self.descriptor)
    }

    /// Whether an agent has been connected and bootstrapped
    pub fn has_agent(&self) -> bool {
        matches!(self.slot, AgentSlot::Ready(_))
    }

    async fn agent(&mut self) -> Result<Arc<dyn Agent>> {
        match &self.slot {
            AgentSlot::Ready(agent) if agent.is_healthy() => return Ok(agent.clone()),
            AgentSlot::Failed(reason) => return Err(Error::AgentUnavailable(reason.clone())),
            _ => {}
        }

        if matches!(self.slot, AgentSlot::Ready(_)) {
            tracing::warn!("discarding unhealthy network agent");
            let reason = "agent became unhealthy".to_string();
            self.slot = AgentSlot::Failed(reason.clone());
            return Err(Error::AgentUnavailable(reason));
        }

        match self.connect().await {
            Ok(agent) => {
                self.slot = AgentSlot::Ready(agent.clone());
                Ok(agent)
            }
            Err(e) => {
                self.slot = AgentSlot::Failed(e.to_string());
                Err(e)
            }
        }
    }

    async fn connect(&self) -> Result<Arc<dyn Agent>> {
        let connector = self
            .connector
            .as_ref()
            .ok_or_else(|| Error::AgentUnavailable("no agent connector".to_string()))?;

        let agent = connector.connect(&self.config).await.map_err(|e| match e {
            Error::AgentUnavailable(_) => e,
            other => Error::AgentUnavailable(other.to_string()),
        })?;

        if self.config.environment.requires_bootstrap() {
            agent.fetch_root_key().await.map_err(|e| match e {
                Error::BootstrapFailed(_) => e,
                other => Error::BootstrapFailed(other.to_string()),
            })?;
            tracing::info!(host = %self.config.host, "network agent bootstrapped");
        }

        Ok(agent)
    }
}
