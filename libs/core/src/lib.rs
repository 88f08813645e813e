//! Flowlink Core - Data model for the workflow canister client
//!
//! Defines the address of a remote service, the two operations it exposes,
//! the static descriptor of their signatures, and the reply shape every
//! channel produces.
//!
//! # Example
//!
//! ```
//! use flowlink_core::{Operation, ServiceAddress, HELLO_WORLD};
//!
//! let address = ServiceAddress::parse("  rkp4c-7iaaa-aaaaa-aaaca-cai ").unwrap();
//! assert_eq!(address.as_str(), "rkp4c-7iaaa-aaaaa-aaaca-cai");
//!
//! let op = Operation::run_workflow("What is the end of the universe?");
//! assert!(HELLO_WORLD.check(&op).is_ok());
//! ```

pub mod address;
pub mod descriptor;
pub mod error;
pub mod operation;
pub mod reply;

pub use address::ServiceAddress;
pub use descriptor::{MethodSignature, ServiceDescriptor, ValueType, HELLO_WORLD};
pub use error::{Error, Result};
pub use operation::Operation;
pub use reply::{ChannelKind, Reply};
