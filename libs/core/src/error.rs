use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("missing address")]
    AddressMissing,

    #[error("missing question")]
    QuestionMissing,

    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("Method {method} takes {expected} argument(s), got {actual}")]
    ArityMismatch {
        method: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
