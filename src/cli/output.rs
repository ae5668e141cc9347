//! Output system for chapter-audit
//!
//! Report lines and command listings go to stdout untouched. Status messages
//! (warnings, errors, verbose summaries) are styled and go to stderr so they
//! never mix with an audit report that is being piped elsewhere.

use console::style;
use std::io::{self, Write};

use crate::audit::{AuditStats, ReportLine};

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Write one report line exactly as rendered, no styling
    pub fn report<W: Write>(&self, out: &mut W, line: &ReportLine) -> io::Result<()> {
        writeln!(out, "{line}")
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("✔").green().for_stderr(), message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        // Errors are always shown, even in quiet mode
        eprintln!("{} {}", style("✖").red().for_stderr(), message);
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("⚠").yellow().for_stderr(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            eprintln!(
                "{} {}",
                style("ℹ").dim().for_stderr(),
                style(message).dim().for_stderr()
            );
        }
    }

    /// Print a verbose summary with styling
    pub fn verbose_summary(&self, icon: &str, message: &str, count: usize) {
        if self.verbose && !self.quiet {
            eprintln!(
                "{} {} {}",
                style(icon).cyan().for_stderr(),
                style(message).dim().for_stderr(),
                style(format!("({})", count)).yellow().bold().for_stderr()
            );
        }
    }

    /// Print a verbose breakdown item
    pub fn verbose_breakdown(&self, label: &str, count: usize) {
        if self.verbose && !self.quiet {
            eprintln!(
                "  {} {} {}",
                style("•").cyan().for_stderr(),
                style(count.to_string()).yellow().bold().for_stderr(),
                style(label).dim().for_stderr()
            );
        }
    }

    /// Print the end-of-run counters (verbose only)
    pub fn audit_summary(&self, stats: &AuditStats) {
        self.verbose_summary("📚", "Chapters audited", stats.files_included);
        self.verbose_breakdown("matched the file pattern", stats.files_matched);
        self.verbose_breakdown("skipped without a chapter prefix", stats.files_without_prefix);
        self.verbose_breakdown("skipped outside the chapter range", stats.files_out_of_range);
        self.verbose_breakdown("produced output", stats.files_reported);
        self.verbose_breakdown("could not be read", stats.files_failed);
        self.verbose_breakdown("report lines", stats.lines_reported);
    }

    /// Get verbose mode status
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Print a section header on stdout
    pub fn header(&self, title: &str) {
        println!("{}", style(title).bold().cyan());
    }

    /// Print a key/value row on stdout
    pub fn key_value(&self, key: &str, value: &str) {
        println!("  {:<14} {}", style(key).dim(), value);
    }

    /// Print a list item on stdout
    pub fn list_item(&self, item: &str) {
        println!("    • {}", item);
    }

    /// Print blank line
    pub fn blank_line(&self) {
        println!();
    }
}
