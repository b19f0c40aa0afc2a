//! Newline-delimited input files.
//!
//! Each line is trimmed and blank lines are dropped. There is no comment
//! syntax.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{Result, TakeoverError};

/// Read trimmed, non-blank lines from `path`
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| TakeoverError::file(path, e))?;
    let lines = parse_lines(BufReader::new(file)).map_err(|e| TakeoverError::file(path, e))?;

    debug!(path = %path.display(), count = lines.len(), "loaded input file");
    Ok(lines)
}

/// Read the subdomain list, keeping order and duplicates
pub fn load_subdomains(path: impl AsRef<Path>) -> Result<Vec<String>> {
    read_lines(path)
}

/// Trimmed, non-blank lines from any buffered reader
pub fn parse_lines<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    Ok(lines)
}
