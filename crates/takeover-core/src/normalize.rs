//! CNAME target normalization ahead of fingerprint matching.

/// Placeholder the reference tooling reports when no CNAME exists
pub const NO_CNAME_SENTINEL: &str = "No CNAME record";

const WILDCARD_LABEL: &str = "*.";

/// Canonical form of a CNAME target for matching.
///
/// Strips exactly one leading `*.` label and surrounding whitespace. Empty
/// input and the [`NO_CNAME_SENTINEL`] yield an empty string. Trailing root
/// dots are kept.
#[must_use]
pub fn normalize(cname_target: &str) -> String {
    let target = cname_target.trim();
    if target.is_empty() || target == NO_CNAME_SENTINEL {
        return String::new();
    }

    target
        .strip_prefix(WILDCARD_LABEL)
        .unwrap_or(target)
        .to_string()
}
