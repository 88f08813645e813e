use std::sync::Arc;

use flowlink_core::ServiceAddress;

use crate::config::ClientConfig;
use crate::error::Result;

pub mod http;

pub use self::http::{HttpAgent, HttpAgentBuilder, HttpAgentConnector};

/// Authenticated network agent able to make schema-typed calls
///
/// Agents are expensive and stateful; a session creates at most one and
/// shares it between all typed channels.
#[async_trait::async_trait]
pub trait Agent: Send + Sync {
    /// Fetch and trust the replica's root key
    ///
    /// Required once before use against a development replica.
    async fn fetch_root_key(&self) -> Result<()>;

    /// Call `method` on the service at `address` with encoded arguments
    async fn call(&self, address: &ServiceAddress, method: &str, arg: Vec<u8>) -> Result<Vec<u8>>;

    /// Whether the agent can still be used
    fn is_healthy(&self) -> bool {
        true
    }
}

/// Capability to construct an [`Agent`]
///
/// Sessions receive this at construction time. A session without one
/// behaves as if no agent is available and only uses raw channels.
#[async_trait::async_trait]
pub trait AgentConnector: Send + Sync {
    async fn connect(&self, config: &ClientConfig) -> Result<Arc<dyn Agent>>;
}
