//! Flowlink Fabric - Transport layer for the workflow canister client
//!
//! Provides a typed channel over an authenticated network agent, a raw
//! HTTP fallback channel, and a session that picks between them per
//! service address.
//!
//! # Example
//!
//! ```no_run
//! use flowlink_fabric::{agent::HttpAgentConnector, ClientConfig, Invoker, Session};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::with_agent(ClientConfig::default(), HttpAgentConnector)?;
//! let mut invoker = Invoker::new(session);
//!
//! let reply = invoker
//!     .run_workflow("rkp4c-7iaaa-aaaaa-aaaca-cai", "What is the end of the universe?")
//!     .await?;
//! if reply.degraded {
//!     eprintln!("service unreachable, showing placeholder");
//! }
//! println!("{}", reply.text);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod channel;
pub mod codec;
pub mod config;
pub mod error;
pub mod invoke;
pub mod session;

// Re-exports for convenience
pub use channel::Channel;
pub use config::{ClientConfig, Environment};
pub use error::{Error, Result};
pub use invoke::{InvocationResult, Invoker};
pub use session::Session;
