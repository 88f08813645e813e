use flowlink_core::{ChannelKind, Operation, Reply, ServiceAddress};

use crate::error::Result;

pub mod raw;
pub mod typed;

pub use self::raw::{placeholder, RawChannel, RawEnvelope, DEFAULT_QUESTION, RAW_CONTENT_TYPE};
pub use self::typed::{TypedChannel, TypedChannelBuilder};

/// Handle bound to one service address exposing both remote operations
///
/// Callers see the same interface whichever transport was selected.
pub enum Channel {
    Typed(TypedChannel),
    Raw(RawChannel),
}

impl Channel {
    pub fn address(&self) -> &ServiceAddress {
        match self {
            Self::Typed(channel) => channel.address(),
            Self::Raw(channel) => channel.address(),
        }
    }

    pub fn kind(&self) -> ChannelKind {
        match self {
            Self::Typed(_) => ChannelKind::Typed,
            Self::Raw(_) => ChannelKind::Raw,
        }
    }

    /// Perform one operation
    ///
    /// Raw channels never fail here; transport errors become placeholder
    /// replies flagged as degraded.
    pub async fn dispatch(&self, op: &Operation) -> Result<Reply> {
        match self {
            Self::Typed(channel) => {
                let text = channel.call(op).await?;
                Ok(Reply::genuine(text, ChannelKind::Typed))
            }
            Self::Raw(channel) => Ok(channel.call(op).await),
        }
    }

    pub async fn run_workflow(&self, question: &str) -> Result<Reply> {
        self.dispatch(&Operation::run_workflow(question)).await
    }

    pub async fn test(&self) -> Result<Reply> {
        self.dispatch(&Operation::Test).await
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("kind", &self.kind())
            .field("address", self.address())
            .finish()
    }
}
