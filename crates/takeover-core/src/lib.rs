//! Core types and decision logic for dangling-CNAME takeover detection.
//!
//! This crate holds everything that turns a raw DNS answer into a verdict:
//!
//! - **Classification**: raw resolver output to a [`DnsOutcome`] via [`classify`]
//! - **Normalization**: wildcard-label stripping via [`normalize`]
//! - **Matching**: substring fingerprint checks via [`FingerprintSet`]
//! - **Records**: [`ResultRecord`] and the ordered [`ResultSet`]
//! - **Errors**: the [`TakeoverError`] taxonomy
//!
//! Resolution itself and the scan loop live in `takeover-recon`.
//!
//! # Example
//!
//! ```rust
//! use takeover_core::{classify, normalize, FingerprintSet, DnsOutcome};
//!
//! let fingerprints = FingerprintSet::new(["amazonaws.com"]);
//! let outcome = classify("*.bucket.s3.amazonaws.com.\n", "", false);
//!
//! if let DnsOutcome::CnameFound(target) = &outcome {
//!     assert!(fingerprints.matches(&normalize(target)));
//! }
//! ```

mod classify;
mod error;
mod fingerprint;
pub mod input;
mod normalize;
pub mod report;
pub mod types;

pub use classify::{classify, NXDOMAIN_MARKER};
pub use error::{Result, TakeoverError};
pub use fingerprint::{matches, FingerprintSet};
pub use normalize::{normalize, NO_CNAME_SENTINEL};
pub use types::*;
