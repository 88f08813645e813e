use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] flowlink_core::Error),

    #[error("Network agent unavailable: {0}")]
    AgentUnavailable(String),

    #[error("Trust bootstrap failed: {0}")]
    BootstrapFailed(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("HTTP {status}: {reason}")]
    Transport { status: u16, reason: String },

    #[error("Network fault: {0}")]
    NetworkFault(String),

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Custom(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Transport {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            },
            None => Self::NetworkFault(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
