use flowlink_core::{Operation, Reply, ServiceAddress};

use crate::error::Result;
use crate::session::Session;

/// Outcome of one invocation: the reply text, or why there is none
pub type InvocationResult = Result<Reply>;

/// Entry point for callers that only have an address and an operation
pub struct Invoker {
    session: Session,
}

impl Invoker {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Validate inputs, select a channel and dispatch `op`
    ///
    /// A blank address or question is rejected before any channel is
    /// built or any request is sent.
    pub async fn invoke(&mut self, address: &str, op: Operation) -> InvocationResult {
        let address = ServiceAddress::parse(address)?;
        op.validate()?;

        let channel = self.session.select(&address).await;
        let reply = channel.dispatch(&op).await?;
        if reply.degraded {
            tracing::warn!(%address, method = op.method_name(), "returning placeholder reply");
        }
        Ok(reply)
    }

    /// Run the workflow with a user-supplied question
    pub async fn run_workflow(&mut self, address: &str, question: &str) -> InvocationResult {
        self.invoke(address, Operation::run_workflow(question)).await
    }

    /// Run the service's built-in test with its default question
    pub async fn test(&mut self, address: &str) -> InvocationResult {
        self.invoke(address, Operation::Test).await
    }
}
