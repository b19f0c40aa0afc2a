use serde::Serialize;

use super::outcome::{DnsOutcome, DnsState};
use crate::fingerprint::FingerprintSet;
use crate::normalize::{normalize, NO_CNAME_SENTINEL};

/// Status text reported in place of a CNAME for non-existent names
pub const NXDOMAIN_STATUS: &str = "NXDOMAIN";

/// Verdict for one scanned subdomain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    /// Subdomain exactly as read from the input
    pub subdomain: String,

    /// CNAME target, or a status string for the other outcomes
    pub raw_answer: String,

    /// Classified DNS state
    pub state: DnsState,

    /// Whether the normalized target matched a fingerprint
    pub is_vulnerable: bool,

    /// First fingerprint that matched, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl ResultRecord {
    /// Build the record for `subdomain` from its classified outcome.
    ///
    /// Only a [`DnsOutcome::CnameFound`] target is normalized and matched;
    /// every other outcome is recorded as not vulnerable.
    #[must_use]
    pub fn evaluate(
        subdomain: impl Into<String>,
        outcome: DnsOutcome,
        fingerprints: &FingerprintSet,
    ) -> Self {
        let state = outcome.state();
        let (raw_answer, fingerprint) = match outcome {
            DnsOutcome::CnameFound(target) => {
                let hit = fingerprints
                    .first_match(&normalize(&target))
                    .map(str::to_string);
                (target, hit)
            }
            DnsOutcome::NoCname => (NO_CNAME_SENTINEL.to_string(), None),
            DnsOutcome::NxDomain => (NXDOMAIN_STATUS.to_string(), None),
            DnsOutcome::QueryError(message) => (message, None),
        };

        Self {
            subdomain: subdomain.into(),
            raw_answer,
            state,
            is_vulnerable: fingerprint.is_some(),
            fingerprint,
        }
    }
}

/// Per-state counts over a [`ResultSet`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Records in the set
    pub total: usize,
    /// Records with a CNAME answer
    pub cname_found: usize,
    /// Records without a CNAME
    pub no_cname: usize,
    /// Records for non-existent names
    pub nxdomain: usize,
    /// Records whose query failed
    pub query_error: usize,
    /// Records flagged vulnerable
    pub vulnerable: usize,
}

/// Ordered results of one scan run.
///
/// Records keep input order and duplicates are retained; [`ResultSet::get`]
/// gives the last-write-wins view for keyed lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet(Vec<ResultRecord>);

impl ResultSet {
    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no subdomain was scanned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate records in input order
    pub fn iter(&self) -> std::slice::Iter<'_, ResultRecord> {
        self.0.iter()
    }

    /// Latest record for `subdomain`
    #[must_use]
    pub fn get(&self, subdomain: &str) -> Option<&ResultRecord> {
        self.0.iter().rev().find(|r| r.subdomain == subdomain)
    }

    /// Iterate only the vulnerable records
    pub fn vulnerable(&self) -> impl Iterator<Item = &ResultRecord> {
        self.0.iter().filter(|r| r.is_vulnerable)
    }

    /// Count records per state
    #[must_use]
    pub fn summary(&self) -> ScanSummary {
        self.0.iter().fold(
            ScanSummary {
                total: self.0.len(),
                ..ScanSummary::default()
            },
            |mut acc, r| {
                match r.state {
                    DnsState::CnameFound => acc.cname_found += 1,
                    DnsState::NoCname => acc.no_cname += 1,
                    DnsState::NxDomain => acc.nxdomain += 1,
                    DnsState::QueryError => acc.query_error += 1,
                }
                if r.is_vulnerable {
                    acc.vulnerable += 1;
                }
                acc
            },
        )
    }
}

impl FromIterator<ResultRecord> for ResultSet {
    fn from_iter<I: IntoIterator<Item = ResultRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultRecord;
    type IntoIter = std::vec::IntoIter<ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ResultRecord;
    type IntoIter = std::slice::Iter<'a, ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
