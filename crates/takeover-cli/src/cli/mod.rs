//! CLI argument parsing and scan dispatch.

pub mod args;

use anyhow::{Context as _, Result};
use args::Cli;
use clap::Parser;
use std::io::Write;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use takeover_core::input::load_subdomains;
use takeover_core::report::{write_vulnerable_file, ReportFilter};
use takeover_core::FingerprintSet;
use takeover_recon::{DigResolver, HickoryResolver, Resolver, Scanner};

use crate::config::{Config, ResolverKind};
use crate::output::{self, OutputFormat};

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    execute(cli, config).await
}

/// Run a scan with parsed arguments and loaded configuration.
pub async fn execute(cli: Cli, config: Config) -> Result<()> {
    let config = merge(&cli, config);
    config.validate().context("Invalid scan settings")?;
    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);

    let subdomains = load_subdomains(&cli.subdomains)
        .context("Failed to read subdomains from file")?;
    let fingerprints = FingerprintSet::from_file(&cli.patterns)
        .context("Failed to read fingerprint patterns from file")?;

    if fingerprints.is_empty() {
        warn!(path = %cli.patterns.display(), "no fingerprints loaded; nothing will be flagged");
    }

    let resolver = build_resolver(&config)?;
    let scanner = Scanner::with_config(resolver, config.scan_config());

    let results = scanner
        .scan(&subdomains, &fingerprints)
        .await
        .context("Failed to check CNAME records")?;

    let filter = if cli.vulnerable_only {
        ReportFilter::VulnerableOnly
    } else {
        ReportFilter::All
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    output::render(&mut out, &results, output_format, filter)?;
    out.flush()?;

    if let Some(path) = &cli.results {
        let written = write_vulnerable_file(path, &results)
            .context("Failed to write vulnerable subdomains")?;
        info!(path = %path.display(), written, "results file written");
    }

    Ok(())
}

/// Command-line flags override configuration values.
fn merge(cli: &Cli, mut config: Config) -> Config {
    if let Some(resolver) = cli.resolver {
        config.resolver = resolver;
    }
    if let Some(path) = &cli.dig_path {
        config.dig_path.clone_from(path);
    }
    if let Some(concurrency) = cli.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if cli.keep_going {
        config.keep_going = true;
    }
    config
}

fn build_resolver(config: &Config) -> Result<Arc<dyn Resolver>> {
    Ok(match config.resolver {
        ResolverKind::Dig => Arc::new(
            DigResolver::with_program(&config.dig_path).args(config.dig_args.iter().cloned()),
        ),
        ResolverKind::Hickory => Arc::new(HickoryResolver::from_system_conf()?),
    })
}

/// Logs go to stderr so stdout stays the report.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
