use std::fmt;

use serde::{Deserialize, Serialize};

/// Which transport produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    Typed,
    Raw,
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Typed => f.write_str("typed"),
            Self::Raw => f.write_str("raw"),
        }
    }
}

/// Text returned by a remote operation
///
/// `degraded` is set when the text is a canned placeholder substituted for
/// a failed raw call rather than an answer from the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub degraded: bool,
    pub via: ChannelKind,
}

impl Reply {
    pub fn genuine(text: impl Into<String>, via: ChannelKind) -> Self {
        Self {
            text: text.into(),
            degraded: false,
            via,
        }
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            degraded: true,
            via: ChannelKind::Raw,
        }
    }
}
