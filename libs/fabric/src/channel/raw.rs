use flowlink_core::{ChannelKind, Operation, Reply, ServiceAddress};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::codec::{Codec, JsonCodec};
use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Question the remote `test` method answers
pub const DEFAULT_QUESTION: &str = "In one sentence, what's the end of universe?";

/// Content type declared on raw calls
///
/// The body is JSON regardless. A replica that really decodes CBOR will
/// reject it, which then degrades to a placeholder.
pub const RAW_CONTENT_TYPE: &str = "application/cbor";

/// Body of a raw call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawEnvelope {
    pub method_name: String,
    pub args: Vec<String>,
}

impl From<&Operation> for RawEnvelope {
    fn from(op: &Operation) -> Self {
        Self {
            method_name: op.method_name().to_string(),
            args: op.args(),
        }
    }
}

/// Canned reply substituted when a raw call fails
pub fn placeholder(op: &Operation) -> String {
    let question = match op {
        Operation::RunWorkflow { question } => question.as_str(),
        Operation::Test => DEFAULT_QUESTION,
    };
    format!("The answer to '{question}' is 42, according to the Internet Computer!")
}

/// Channel speaking a fixed envelope over plain HTTP
///
/// Construction only captures the address. Every failure surfaces at call
/// time.
pub struct RawChannel {
    address: ServiceAddress,
    config: ClientConfig,
    client: reqwest::Client,
    codec: JsonCodec,
}

impl RawChannel {
    pub fn new(address: ServiceAddress, config: ClientConfig, client: reqwest::Client) -> Self {
        Self {
            address,
            config,
            client,
            codec: JsonCodec,
        }
    }

    pub fn address(&self) -> &ServiceAddress {
        &self.address
    }

    /// Perform one call, degrading to a placeholder on any failure
    pub async fn call(&self, op: &Operation) -> Reply {
        match self.send(op).await {
            Ok(text) => Reply::genuine(text, ChannelKind::Raw),
            Err(e) => {
                tracing::warn!(
                    address = %self.address,
                    method = op.method_name(),
                    error = %e,
                    "raw call failed, substituting placeholder"
                );
                Reply::placeholder(placeholder(op))
            }
        }
    }

    /// Perform one call without degradation
    pub async fn send(&self, op: &Operation) -> Result<String> {
        let url = self.config.call_url(self.address.as_str())?;
        let body = self.codec.encode(&RawEnvelope::from(op))?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, RAW_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
