//! CNAME lookups through the `dig` command-line tool.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::resolver::{RawAnswer, Resolver};

const HEADER_TAG: &str = "->>HEADER<<-";

/// Resolver that shells out to `dig` once per query
#[derive(Debug, Clone)]
pub struct DigResolver {
    program: PathBuf,
    extra_args: Vec<String>,
}

impl Default for DigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DigResolver {
    /// Use `dig` from `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("dig")
    }

    /// Use a specific `dig` binary
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }

    /// Append extra arguments, e.g. `@1.1.1.1` to pin a nameserver
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }
}

#[async_trait]
impl Resolver for DigResolver {
    async fn resolve(&self, hostname: &str) -> RawAnswer {
        debug!(hostname, program = %self.program.display(), "running dig");

        let output = Command::new(&self.program)
            .args(["+noall", "+comments", "+answer"])
            .args(&self.extra_args)
            .args(["-t", "CNAME", "-q", hostname])
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await;

        match output {
            Ok(out) => render(
                &String::from_utf8_lossy(&out.stdout),
                &String::from_utf8_lossy(&out.stderr),
                out.status.success(),
            ),
            Err(e) => RawAnswer::failure(format!(
                "failed to run {}: {e}",
                self.program.display()
            )),
        }
    }

    fn name(&self) -> &'static str {
        "dig"
    }
}

/// Reduce `dig +noall +comments +answer` output to the resolver contract.
///
/// NXDOMAIN and other non-NOERROR statuses become failures carrying the
/// header line; a NOERROR answer yields the first CNAME target.
fn render(stdout: &str, stderr: &str, success: bool) -> RawAnswer {
    if !success {
        // dig reports transport errors such as timeouts on stdout
        let message = if stderr.trim().is_empty() {
            stdout
        } else {
            stderr
        };
        return RawAnswer::failure(strip_comments(message));
    }

    if let Some(header) = stdout.lines().find(|l| l.contains(HEADER_TAG)) {
        if header_status(header).is_some_and(|status| status != "NOERROR") {
            return RawAnswer::failure(header.trim());
        }
    }

    let target = stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with(';'))
        .find_map(|l| {
            let fields: Vec<&str> = l.split_whitespace().collect();
            match fields.as_slice() {
                [_, _, _, "CNAME", target, ..] => Some((*target).to_string()),
                _ => None,
            }
        })
        .unwrap_or_default();

    RawAnswer::answer(target)
}

/// Drop dig's `;` comment markers so stdout diagnostics read like stderr ones.
fn strip_comments(message: &str) -> String {
    message
        .lines()
        .map(|l| l.trim_start_matches(';').trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn header_status(header: &str) -> Option<&str> {
    let rest = &header[header.find("status: ")? + "status: ".len()..];
    rest.split(',').next().map(str::trim)
}
