//! Output formatting for different formats.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::Write;

use takeover_core::report::{write_report, ReportFilter};
use takeover_core::{DnsState, ResultRecord, ResultSet, ScanSummary};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored report lines with a summary
    #[default]
    Pretty,
    /// Bare report lines
    Plain,
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// YAML output
    Yaml,
}

/// Structured report envelope for JSON and YAML.
#[derive(Debug, Serialize)]
struct Report<'a> {
    generated_at: DateTime<Utc>,
    summary: ScanSummary,
    results: Vec<&'a ResultRecord>,
}

/// Flat CSV row; every column is always present.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    subdomain: &'a str,
    cname: &'a str,
    state: DnsState,
    vulnerable: bool,
    fingerprint: &'a str,
}

/// Render `results` to `out` in the requested format.
pub fn render<W: Write>(
    out: &mut W,
    results: &ResultSet,
    format: OutputFormat,
    filter: ReportFilter,
) -> Result<()> {
    let selected: Vec<&ResultRecord> = results
        .iter()
        .filter(|r| filter == ReportFilter::All || r.is_vulnerable)
        .collect();

    match format {
        OutputFormat::Plain => {
            write_report(out, results, filter)?;
        }
        OutputFormat::Pretty => render_pretty(out, &selected, results.summary())?,
        OutputFormat::Json => {
            let report = Report {
                generated_at: Utc::now(),
                summary: results.summary(),
                results: selected,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Yaml => {
            let report = Report {
                generated_at: Utc::now(),
                summary: results.summary(),
                results: selected,
            };
            serde_yaml::to_writer(&mut *out, &report)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for r in selected {
                writer.serialize(CsvRow {
                    subdomain: &r.subdomain,
                    cname: &r.raw_answer,
                    state: r.state,
                    vulnerable: r.is_vulnerable,
                    fingerprint: r.fingerprint.as_deref().unwrap_or(""),
                })?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}

fn render_pretty<W: Write>(
    out: &mut W,
    records: &[&ResultRecord],
    summary: ScanSummary,
) -> Result<()> {
    for r in records {
        let cname = match r.state {
            DnsState::CnameFound => r.raw_answer.cyan(),
            DnsState::QueryError => r.raw_answer.yellow(),
            DnsState::NoCname | DnsState::NxDomain => r.raw_answer.dimmed(),
        };
        let verdict = if r.is_vulnerable {
            "Yes".red().bold()
        } else {
            "No".green()
        };
        writeln!(
            out,
            "Subdomain: {}, CNAME: {}, Vulnerable: {}",
            r.subdomain.bold(),
            cname,
            verdict
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!(
            "Scanned {} subdomains: {} CNAME, {} no CNAME, {} NXDOMAIN, {} errors",
            summary.total,
            summary.cname_found,
            summary.no_cname,
            summary.nxdomain,
            summary.query_error
        )
        .dimmed()
    )?;

    let vulnerable = format!("{} vulnerable", summary.vulnerable);
    if summary.vulnerable > 0 {
        writeln!(out, "{}", vulnerable.red().bold())?;
    } else {
        writeln!(out, "{}", vulnerable.green())?;
    }

    Ok(())
}
