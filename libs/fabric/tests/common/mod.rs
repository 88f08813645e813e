#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use flowlink_core::ServiceAddress;
use flowlink_fabric::channel::RawChannel;
use flowlink_fabric::agent::{Agent, AgentConnector};
use flowlink_fabric::codec::{BincodeCodec, Codec};
use flowlink_fabric::error::{Error, Result};
use flowlink_fabric::ClientConfig;

pub const CANISTER: &str = "rkp4c-7iaaa-aaaaa-aaaca-cai";
pub const OTHER_CANISTER: &str = "ryjl3-tyaaa-aaaaa-aaaba-cai";

pub const TEST_PLACEHOLDER: &str =
    "The answer to 'In one sentence, what's the end of universe?' is 42, according to the Internet Computer!";

/// Agent that answers every call by echoing the method and arguments
#[derive(Default)]
pub struct EchoAgent {
    pub fail_bootstrap: bool,
    pub fail_calls: bool,
    pub unhealthy: AtomicBool,
    pub bootstraps: AtomicUsize,
    pub calls: AtomicUsize,
}

#[async_trait::async_trait]
impl Agent for EchoAgent {
    async fn fetch_root_key(&self) -> Result<()> {
        self.bootstraps.fetch_add(1, Ordering::SeqCst);
        if self.fail_bootstrap {
            return Err(Error::BootstrapFailed("replica not running".to_string()));
        }
        Ok(())
    }

    async fn call(&self, address: &ServiceAddress, method: &str, arg: Vec<u8>) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_calls {
            return Err(Error::Transport {
                status: 503,
                reason: "Service Unavailable".to_string(),
            });
        }
        let args: Vec<String> = BincodeCodec.decode(&arg)?;
        BincodeCodec.encode(&format!("{address}:{method}:{}", args.join(",")))
    }

    fn is_healthy(&self) -> bool {
        !self.unhealthy.load(Ordering::SeqCst)
    }
}

/// Connector handing out one shared agent and counting connects
pub struct SharedConnector {
    pub agent: Arc<EchoAgent>,
    pub connects: Arc<AtomicUsize>,
}

impl SharedConnector {
    pub fn new(agent: EchoAgent) -> Self {
        Self {
            agent: Arc::new(agent),
            connects: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait::async_trait]
impl AgentConnector for SharedConnector {
    async fn connect(&self, _config: &ClientConfig) -> Result<Arc<dyn Agent>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(self.agent.clone())
    }
}

/// Connector that can never produce an agent
pub struct FailingConnector {
    pub connects: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl AgentConnector for FailingConnector {
    async fn connect(&self, _config: &ClientConfig) -> Result<Arc<dyn Agent>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Err(Error::AgentUnavailable("no agent in this environment".to_string()))
    }
}

pub fn config_for(host: &str) -> ClientConfig {
    ClientConfig::builder().host(host).build().unwrap()
}

pub fn call_path(address: &str) -> String {
    format!("/api/v2/canister/{address}/call")
}

/// Raw channel whose HTTP client honours `config`
pub fn raw_channel(address: &str, config: ClientConfig) -> RawChannel {
    let client = config.http_client().unwrap();
    RawChannel::new(ServiceAddress::parse(address).unwrap(), config, client)
}
