//! Run command implementation
//!
//! Resolves a profile, applies command-line overrides and streams the audit
//! report to stdout under the configured error policy.

use anyhow::{Context, Result, bail};
use clap::Args;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::audit::{AuditError, ChapterAuditor, ChapterRange};
use crate::cli::Output;
use crate::config::{AuditorConfig, ErrorPolicy};

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Profile to run (defaults to `audit.default_profile`)
    #[arg(value_name = "PROFILE")]
    pub profile: Option<String>,

    /// Directory holding the chapter files
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Glob selecting candidate file names
    #[arg(long, value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Lowest chapter number to include
    #[arg(long, value_name = "N")]
    pub min: Option<u32>,

    /// Highest chapter number to include
    #[arg(long, value_name = "N")]
    pub max: Option<u32>,

    /// Warn about unreadable chapters and keep going instead of stopping
    #[arg(long)]
    pub keep_going: bool,
}

pub fn execute(args: RunArgs, config: &AuditorConfig, output: &Output) -> Result<()> {
    let profile = args
        .profile
        .as_deref()
        .unwrap_or(&config.audit.default_profile);

    let mut plan = config.plan_for(profile)?;
    if let Some(root) = args.root {
        plan.root = root;
    }
    if let Some(pattern) = args.pattern {
        plan.pattern = pattern;
    }
    plan.range = ChapterRange::new(
        args.min.unwrap_or(plan.range.min),
        args.max.unwrap_or(plan.range.max),
    );

    let policy = if args.keep_going {
        ErrorPolicy::Skip
    } else {
        config.audit.on_error
    };

    let auditor = ChapterAuditor::new(plan)
        .with_context(|| format!("Profile '{}' is not a valid audit", profile))?;

    let plan = auditor.plan();
    tracing::info!(
        "Running profile '{}' over {} ({}, chapters {}..={}, on_error={:?})",
        profile,
        plan.root.display(),
        plan.pattern,
        plan.range.min,
        plan.range.max,
        policy
    );

    let mut report = auditor.audit().map_err(aborted)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut skipped = 0usize;

    for item in report.by_ref() {
        match item {
            Ok(line) => {
                if let Err(err) = output.report(&mut out, &line) {
                    if err.kind() == io::ErrorKind::BrokenPipe {
                        return Ok(());
                    }
                    return Err(err).context("Failed to write report");
                }
            }
            Err(err) if policy == ErrorPolicy::Skip && err.is_file_level() => {
                out.flush().ok();
                tracing::warn!("Skipping chapter: {}", err);
                output.warning(&format!("Skipped ({}): {}", err.kind(), err));
                skipped += 1;
            }
            Err(err) => {
                // Lines already produced are still delivered
                out.flush().ok();
                return Err(aborted(err));
            }
        }
    }

    match out.flush() {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => return Ok(()),
        other => other.context("Failed to write report")?,
    }

    output.audit_summary(report.stats());

    if skipped > 0 {
        bail!(
            "{} chapter file{} could not be audited",
            skipped,
            if skipped == 1 { "" } else { "s" }
        );
    }

    Ok(())
}

fn aborted(err: AuditError) -> anyhow::Error {
    let kind = err.kind();
    anyhow::Error::new(err).context(format!("Audit aborted ({})", kind))
}
