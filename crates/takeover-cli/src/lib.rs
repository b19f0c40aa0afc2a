//! # takeover-cli
//!
//! Command-line front end for dangling-CNAME takeover detection.
//!
//! ## Features
//!
//! - **Two resolvers**: `dig` subprocess or in-process hickory
//! - **Bounded concurrency** with a per-query timeout
//! - **Abort or keep going** when a single query fails
//! - **Multiple output formats**: colored lines, plain report lines, JSON, CSV, YAML
//! - **Filtered report file** listing only vulnerable subdomains

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
