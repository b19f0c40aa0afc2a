//! Line-oriented report rendering.
//!
//! Every record renders as
//! `Subdomain: <name>, CNAME: <value-or-status>, Vulnerable: <Yes|No>`.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::{Result, TakeoverError};
use crate::types::{ResultRecord, ResultSet};

/// Which records a report includes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFilter {
    /// Every scanned subdomain
    #[default]
    All,
    /// Only records flagged vulnerable
    VulnerableOnly,
}

impl ReportFilter {
    fn includes(self, record: &ResultRecord) -> bool {
        match self {
            Self::All => true,
            Self::VulnerableOnly => record.is_vulnerable,
        }
    }
}

impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Subdomain: {}, CNAME: {}, Vulnerable: {}",
            self.subdomain,
            self.raw_answer,
            if self.is_vulnerable { "Yes" } else { "No" }
        )
    }
}

/// Write report lines to `writer`, returning how many were written
pub fn write_report<W: Write>(
    writer: &mut W,
    results: &ResultSet,
    filter: ReportFilter,
) -> std::io::Result<usize> {
    let mut written = 0;
    for record in results.iter().filter(|r| filter.includes(r)) {
        writeln!(writer, "{record}")?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Write the vulnerable-only report to `path`, replacing any existing file
pub fn write_vulnerable_file(path: impl AsRef<Path>, results: &ResultSet) -> Result<usize> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| TakeoverError::file(path, e))?;
    let mut writer = BufWriter::new(file);

    let written = write_report(&mut writer, results, ReportFilter::VulnerableOnly)
        .map_err(|e| TakeoverError::file(path, e))?;

    info!(path = %path.display(), vulnerable = written, "wrote filtered report");
    Ok(written)
}
