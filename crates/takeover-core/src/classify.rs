//! Raw resolver output to [`DnsOutcome`].

use tracing::trace;

use crate::types::DnsOutcome;

/// Literal marker a resolver writes to stderr for a non-existent name
pub const NXDOMAIN_MARKER: &str = "status: NXDOMAIN";

const GENERIC_QUERY_FAILURE: &str = "DNS query failed without diagnostic output";

/// Classify one resolver invocation.
///
/// A failed invocation is `NxDomain` only when stderr carries
/// [`NXDOMAIN_MARKER`]; any other failure is a `QueryError`. A successful
/// invocation with blank stdout is `NoCname`.
#[must_use]
pub fn classify(raw_stdout: &str, raw_stderr: &str, process_failed: bool) -> DnsOutcome {
    let outcome = if process_failed {
        if raw_stderr.contains(NXDOMAIN_MARKER) {
            DnsOutcome::NxDomain
        } else {
            let message = raw_stderr.trim();
            DnsOutcome::QueryError(if message.is_empty() {
                GENERIC_QUERY_FAILURE.to_string()
            } else {
                message.to_string()
            })
        }
    } else {
        let target = raw_stdout.trim();
        if target.is_empty() {
            DnsOutcome::NoCname
        } else {
            DnsOutcome::CnameFound(target.to_string())
        }
    };

    trace!(state = %outcome.state(), "classified resolver output");
    outcome
}
