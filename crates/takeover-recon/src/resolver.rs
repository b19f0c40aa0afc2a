//! Resolver collaborator contract.

use async_trait::async_trait;
use std::collections::HashMap;
use takeover_core::{classify, DnsOutcome, NXDOMAIN_MARKER};

/// Raw output of one CNAME lookup, shaped like a `dig` invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAnswer {
    /// CNAME target line, empty when there is none
    pub stdout: String,
    /// Diagnostic text; carries the NXDOMAIN marker for missing names
    pub stderr: String,
    /// Whether the lookup itself failed
    pub failed: bool,
}

impl RawAnswer {
    /// Successful lookup returning `target`
    pub fn answer(target: impl Into<String>) -> Self {
        Self {
            stdout: target.into(),
            ..Self::default()
        }
    }

    /// Successful lookup with no CNAME
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Negative answer for a non-existent name
    #[must_use]
    pub fn nxdomain() -> Self {
        Self {
            stdout: String::new(),
            stderr: format!(";; ->>HEADER<<- opcode: QUERY, {NXDOMAIN_MARKER}"),
            failed: true,
        }
    }

    /// Failed lookup with a diagnostic message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: message.into(),
            failed: true,
        }
    }

    /// Classify this answer
    #[must_use]
    pub fn classify(&self) -> DnsOutcome {
        classify(&self.stdout, &self.stderr, self.failed)
    }
}

/// CNAME lookup capability injected into the scanner.
///
/// Implementations never return errors: every failure is rendered into the
/// [`RawAnswer`] so the classifier decides what it means.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Look up the CNAME for `hostname`
    async fn resolve(&self, hostname: &str) -> RawAnswer;

    /// Short name used in logs
    fn name(&self) -> &'static str {
        "resolver"
    }
}

/// Deterministic resolver answering from a fixed table.
///
/// Hostnames missing from the table answer NXDOMAIN.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    answers: HashMap<String, RawAnswer>,
}

impl StaticResolver {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the answer for `hostname`
    #[must_use]
    pub fn with(mut self, hostname: impl Into<String>, answer: RawAnswer) -> Self {
        self.answers.insert(hostname.into(), answer);
        self
    }

    /// Set a CNAME answer for `hostname`
    #[must_use]
    pub fn with_cname(self, hostname: impl Into<String>, target: impl Into<String>) -> Self {
        self.with(hostname, RawAnswer::answer(target))
    }
}

#[async_trait]
impl Resolver for StaticResolver {
    async fn resolve(&self, hostname: &str) -> RawAnswer {
        self.answers
            .get(hostname)
            .cloned()
            .unwrap_or_else(RawAnswer::nxdomain)
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
