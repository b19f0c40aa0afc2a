use serde::{Deserialize, Serialize};
use std::fmt;

/// Classified result of a single CNAME query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsOutcome {
    /// A CNAME answer was returned; holds the trimmed target
    CnameFound(String),
    /// The query succeeded but carried no CNAME
    NoCname,
    /// The queried name does not exist
    NxDomain,
    /// The query itself failed; holds the diagnostic message
    QueryError(String),
}

impl DnsOutcome {
    /// The tag of this outcome, without its payload
    #[must_use]
    pub const fn state(&self) -> DnsState {
        match self {
            Self::CnameFound(_) => DnsState::CnameFound,
            Self::NoCname => DnsState::NoCname,
            Self::NxDomain => DnsState::NxDomain,
            Self::QueryError(_) => DnsState::QueryError,
        }
    }
}

/// Tag of a [`DnsOutcome`], as stored in result records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DnsState {
    /// CNAME record found
    CnameFound,
    /// No CNAME record
    NoCname,
    /// Name does not exist
    #[serde(rename = "NXDOMAIN")]
    NxDomain,
    /// Query failed
    QueryError,
}

impl fmt::Display for DnsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CnameFound => write!(f, "CNAME_FOUND"),
            Self::NoCname => write!(f, "NO_CNAME"),
            Self::NxDomain => write!(f, "NXDOMAIN"),
            Self::QueryError => write!(f, "QUERY_ERROR"),
        }
    }
}
