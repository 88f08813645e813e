use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Longest run of characters between dashes in a textual principal
const MAX_GROUP_LEN: usize = 5;

/// Opaque identifier of a remote service instance
///
/// Always stored trimmed and non-empty. The text is never rewritten after
/// parsing, so a channel built for an address keeps targeting exactly it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceAddress(String);

impl ServiceAddress {
    /// Trim and validate user-supplied text
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::AddressMissing);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the text has the shape of a canister principal
    ///
    /// Principals are dash-separated groups of at most five lowercase
    /// base32 characters. This does not verify the embedded checksum.
    pub fn is_well_formed(&self) -> bool {
        self.0.split('-').all(|group| {
            !group.is_empty()
                && group.len() <= MAX_GROUP_LEN
                && group
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || ('2'..='7').contains(&c))
        })
    }
}

impl fmt::Display for ServiceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ServiceAddress {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ServiceAddress> for String {
    fn from(address: ServiceAddress) -> Self {
        address.0
    }
}

impl AsRef<str> for ServiceAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
