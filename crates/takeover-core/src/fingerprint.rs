//! Vulnerable-service fingerprints and substring matching.

use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::input::read_lines;

/// Returns true if any fingerprint is a literal substring of `domain`.
///
/// Matching is case-sensitive containment, not label-aware: `notamazonaws.com`
/// matches `amazonaws.com`. An empty domain never matches.
#[must_use]
pub fn matches<S: AsRef<str>>(domain: &str, fingerprints: &[S]) -> bool {
    first_match(domain, fingerprints).is_some()
}

fn first_match<'a, S: AsRef<str>>(domain: &str, fingerprints: &'a [S]) -> Option<&'a str> {
    if domain.is_empty() {
        return None;
    }
    fingerprints
        .iter()
        .map(AsRef::as_ref)
        .find(|fp| domain.contains(fp))
}

/// Immutable, ordered set of fingerprint substrings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FingerprintSet(Vec<String>);

impl FingerprintSet {
    /// Build a set, trimming entries and dropping blank ones
    #[must_use]
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            patterns
                .into_iter()
                .map(|p| p.as_ref().trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        )
    }

    /// Load a newline-delimited pattern file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        read_lines(path).map(Self)
    }

    /// Returns true if `domain` contains any fingerprint
    #[must_use]
    pub fn matches(&self, domain: &str) -> bool {
        matches(domain, &self.0)
    }

    /// First fingerprint, in file order, contained in `domain`
    #[must_use]
    pub fn first_match(&self, domain: &str) -> Option<&str> {
        first_match(domain, &self.0)
    }

    /// Number of fingerprints
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no fingerprint was loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fingerprints in file order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
