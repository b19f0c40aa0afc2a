//! Concurrent CNAME takeover scanning.

use std::sync::Arc;
use std::time::{Duration, Instant};

use takeover_core::{DnsOutcome, FingerprintSet, ResultRecord, ResultSet, TakeoverError};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::error::ReconError;
use crate::resolver::{RawAnswer, Resolver};

/// What to do when a single query fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort the whole scan on the first failed query, discarding results
    #[default]
    Abort,
    /// Record the failure as a `QUERY_ERROR` result and keep scanning
    Isolate,
}

/// Scanner configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Maximum queries in flight
    pub concurrency: usize,
    /// Timeout per query
    pub timeout: Duration,
    /// Failure handling
    pub error_policy: ErrorPolicy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: 10,
            timeout: Duration::from_secs(5),
            error_policy: ErrorPolicy::Abort,
        }
    }
}

/// One finished query, tagged with its input position
struct Finished {
    index: usize,
    subdomain: String,
    outcome: DnsOutcome,
}

/// CNAME takeover scanner
pub struct Scanner {
    resolver: Arc<dyn Resolver>,
    config: ScanConfig,
}

impl Scanner {
    /// Create a scanner with default configuration
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self::with_config(resolver, ScanConfig::default())
    }

    /// Create a scanner with custom configuration
    pub fn with_config(resolver: Arc<dyn Resolver>, config: ScanConfig) -> Self {
        Self { resolver, config }
    }

    /// Set the number of concurrent queries (at least one)
    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.config.concurrency = concurrency;
        self
    }

    /// Set the per-query timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the failure policy
    #[must_use]
    pub const fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.config.error_policy = policy;
        self
    }

    /// Current configuration
    #[must_use]
    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan every subdomain and return one record per input line, in input order.
    ///
    /// Under [`ErrorPolicy::Abort`] the first failed query cancels all
    /// in-flight work and the scan returns [`TakeoverError::Query`].
    pub async fn scan(
        &self,
        subdomains: &[String],
        fingerprints: &FingerprintSet,
    ) -> takeover_core::Result<ResultSet> {
        let start = Instant::now();
        let workers = self.config.concurrency.max(1);

        info!(
            subdomains = subdomains.len(),
            fingerprints = fingerprints.len(),
            workers,
            resolver = self.resolver.name(),
            "starting CNAME scan"
        );

        let mut pending = subdomains.iter().cloned().enumerate();
        let mut slots: Vec<Option<ResultRecord>> = vec![None; subdomains.len()];
        let mut tasks = JoinSet::new();

        for (index, subdomain) in pending.by_ref().take(workers) {
            self.spawn_query(&mut tasks, index, subdomain);
        }

        while let Some(joined) = tasks.join_next().await {
            let Finished {
                index,
                subdomain,
                outcome,
            } = joined.map_err(ReconError::from)?;

            if let DnsOutcome::QueryError(message) = &outcome {
                if self.config.error_policy == ErrorPolicy::Abort {
                    warn!(%subdomain, error = %message, "query failed, aborting scan");
                    tasks.abort_all();
                    return Err(TakeoverError::Query {
                        subdomain,
                        message: message.clone(),
                    });
                }
                warn!(%subdomain, error = %message, "query failed, recording and continuing");
            }

            let record = ResultRecord::evaluate(subdomain, outcome, fingerprints);
            debug!(
                subdomain = %record.subdomain,
                state = %record.state,
                vulnerable = record.is_vulnerable,
                "classified subdomain"
            );
            slots[index] = Some(record);

            if let Some((index, subdomain)) = pending.next() {
                self.spawn_query(&mut tasks, index, subdomain);
            }
        }

        let results: ResultSet = slots.into_iter().flatten().collect();
        let summary = results.summary();
        info!(
            total = summary.total,
            vulnerable = summary.vulnerable,
            nxdomain = summary.nxdomain,
            query_errors = summary.query_error,
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "scan complete"
        );

        Ok(results)
    }

    fn spawn_query(&self, tasks: &mut JoinSet<Finished>, index: usize, subdomain: String) {
        let resolver = Arc::clone(&self.resolver);
        let timeout = self.config.timeout;

        tasks.spawn(async move {
            let answer = tokio::time::timeout(timeout, resolver.resolve(&subdomain))
                .await
                .unwrap_or_else(|_| {
                    RawAnswer::failure(format!("query timed out after {timeout:?}"))
                });

            Finished {
                index,
                subdomain,
                outcome: answer.classify(),
            }
        });
    }
}
