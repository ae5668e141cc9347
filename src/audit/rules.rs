//! Compiled match rules
//!
//! Line rules are compiled into a single Aho-Corasick automaton so each line
//! is scanned once no matter how many needles the rule carries.

use aho_corasick::AhoCorasick;

use super::error::AuditError;
use super::types::{LineStyle, MatchRule, Probe, ReportLine};

#[derive(Debug)]
pub(crate) enum CompiledRule {
    Line {
        matcher: AhoCorasick,
        style: LineStyle,
    },
    File {
        probes: Vec<Probe>,
    },
}

impl CompiledRule {
    /// `index` is 1-based and only used in error messages
    pub(crate) fn compile(index: usize, rule: &MatchRule) -> Result<Self, AuditError> {
        if rule.is_empty() {
            return Err(AuditError::EmptyRule { index });
        }

        match rule {
            MatchRule::Line(line_rule) => {
                let matcher = AhoCorasick::new(&line_rule.needles)
                    .map_err(|source| AuditError::Matcher { index, source })?;
                Ok(CompiledRule::Line {
                    matcher,
                    style: line_rule.style,
                })
            }
            MatchRule::File(file_rule) => Ok(CompiledRule::File {
                probes: file_rule.probes.clone(),
            }),
        }
    }

    /// Append this rule's findings for one decoded file to `out`
    pub(crate) fn apply(&self, file_name: &str, content: &str, out: &mut Vec<ReportLine>) {
        match self {
            CompiledRule::Line { matcher, style } => {
                apply_line_rule(matcher, *style, file_name, content, out)
            }
            CompiledRule::File { probes } => apply_file_rule(probes, file_name, content, out),
        }
    }
}

fn apply_line_rule(
    matcher: &AhoCorasick,
    style: LineStyle,
    file_name: &str,
    content: &str,
    out: &mut Vec<ReportLine>,
) {
    let mut header_written = false;

    for (idx, line) in split_lines(content).enumerate() {
        if !matcher.is_match(line) {
            continue;
        }

        let line_number = idx + 1;
        let text = line.trim().to_string();

        match style {
            LineStyle::Header => {
                if !header_written {
                    out.push(ReportLine::Header {
                        file: file_name.to_string(),
                    });
                    header_written = true;
                }
                out.push(ReportLine::Hit { line_number, text });
            }
            LineStyle::Prefixed => out.push(ReportLine::PrefixedHit {
                file: file_name.to_string(),
                line_number,
                text,
            }),
        }
    }
}

/// Lines ended by `\r\n`, `\n` or a lone `\r`; a final terminator adds no
/// empty line
fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(end) = rest.find(['\r', '\n']) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..end];
        let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + terminator..];
        Some(line)
    })
}

fn apply_file_rule(probes: &[Probe], file_name: &str, content: &str, out: &mut Vec<ReportLine>) {
    let found: Vec<&Probe> = probes.iter().filter(|p| p.is_found_in(content)).collect();
    if found.is_empty() {
        return;
    }

    out.push(ReportLine::FileName {
        file: file_name.to_string(),
    });
    out.extend(
        found
            .into_iter()
            .filter(|probe| probe.report)
            .map(|probe| ReportLine::Contains {
                label: probe.label().to_string(),
            }),
    );
}
