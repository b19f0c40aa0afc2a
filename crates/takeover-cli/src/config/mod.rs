//! Configuration management.

use anyhow::{Context as _, Result};
use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use takeover_recon::{ErrorPolicy, ScanConfig};

use crate::output::OutputFormat;

/// Which resolver backs the scan.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    /// Run `dig` once per subdomain
    #[default]
    Dig,
    /// Resolve in-process with hickory
    Hickory,
}

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Concurrent queries.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-query timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Resolver backend.
    #[serde(default)]
    pub resolver: ResolverKind,

    /// `dig` binary used by the dig resolver.
    #[serde(default = "default_dig_path")]
    pub dig_path: PathBuf,

    /// Extra arguments passed to `dig`, e.g. `["@1.1.1.1"]`.
    #[serde(default)]
    pub dig_args: Vec<String>,

    /// Record failed queries instead of aborting.
    #[serde(default)]
    pub keep_going: bool,

    /// Default output format.
    pub output_format: Option<OutputFormat>,
}

const fn default_concurrency() -> usize {
    10
}

const fn default_timeout_secs() -> u64 {
    5
}

fn default_dig_path() -> PathBuf {
    PathBuf::from("dig")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
            resolver: ResolverKind::default(),
            dig_path: default_dig_path(),
            dig_args: Vec::new(),
            keep_going: false,
            output_format: None,
        }
    }
}

impl Config {
    /// Get the default config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("io", "cnamecheck", "cnamecheck")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default path, falling back to defaults.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the scanner cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            anyhow::bail!("concurrency must be at least 1");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout must be at least 1 second");
        }
        Ok(())
    }

    /// Scanner settings derived from this configuration.
    #[must_use]
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            concurrency: self.concurrency,
            timeout: Duration::from_secs(self.timeout_secs),
            error_policy: if self.keep_going {
                ErrorPolicy::Isolate
            } else {
                ErrorPolicy::Abort
            },
        }
    }
}
