//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::ResolverKind;
use crate::output::OutputFormat;

/// Flag subdomains whose CNAME points at takeover-prone infrastructure
///
/// Resolves the CNAME of every subdomain in SUBDOMAINS_FILE and matches the
/// target against the fingerprints in PATTERNS_FILE. When RESULTS_FILE is
/// given, only vulnerable subdomains are written to it.
#[derive(Parser, Debug)]
#[command(name = "cnamecheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Newline-delimited list of subdomains to scan
    pub subdomains: PathBuf,

    /// Newline-delimited list of fingerprint substrings
    pub patterns: PathBuf,

    /// Write only vulnerable subdomains to this file
    pub results: Option<PathBuf>,

    /// DNS resolver to use
    #[arg(short, long, value_enum)]
    pub resolver: Option<ResolverKind>,

    /// Path to the dig binary
    #[arg(long)]
    pub dig_path: Option<PathBuf>,

    /// Number of concurrent queries
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Timeout per query, in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Record failed queries and continue instead of aborting the scan
    #[arg(long)]
    pub keep_going: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Only print vulnerable subdomains to stdout
    #[arg(long)]
    pub vulnerable_only: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, env = "CNAMECHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
