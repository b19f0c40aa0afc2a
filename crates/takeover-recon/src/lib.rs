//! DNS resolution and scan orchestration for CNAME takeover detection.
//!
//! Resolvers implement the [`Resolver`] contract and report raw
//! `(stdout, stderr, failed)` answers; the [`Scanner`] drives them through
//! classification and fingerprint matching from `takeover-core`.

#![doc(html_root_url = "https://docs.rs/takeover-recon/0.1.0")]

mod error;
pub mod resolver;
pub mod scanner;

#[cfg(feature = "dig")]
pub mod dig;

#[cfg(feature = "hickory")]
pub mod dns;

pub use error::{ReconError, ReconResult};
pub use resolver::{RawAnswer, Resolver, StaticResolver};
pub use scanner::{ErrorPolicy, ScanConfig, Scanner};

#[cfg(feature = "dig")]
pub use dig::DigResolver;

#[cfg(feature = "hickory")]
pub use dns::HickoryResolver;
