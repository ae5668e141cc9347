use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Inclusive bounds on the two-digit chapter prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRange {
    pub min: u32,
    pub max: u32,
}

impl ChapterRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, chapter: u32) -> bool {
        self.min <= chapter && chapter <= self.max
    }
}

/// A candidate file and the chapter number derived from its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub file_name: String,
    /// `None` when the first two characters are not both ASCII digits
    pub chapter: Option<u32>,
}

impl FileEntry {
    /// Returns `None` for paths without a UTF-8 file name
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?.to_string();
        let chapter = chapter_prefix(&file_name);
        Some(Self {
            path: path.to_path_buf(),
            file_name,
            chapter,
        })
    }

    pub fn is_included(&self, range: &ChapterRange) -> bool {
        self.chapter.is_some_and(|n| range.contains(n))
    }
}

/// Parse the two leading characters of a file name as a chapter number
pub fn chapter_prefix(name: &str) -> Option<u32> {
    match name.as_bytes() {
        [tens @ b'0'..=b'9', ones @ b'0'..=b'9', ..] => {
            Some(u32::from(tens - b'0') * 10 + u32::from(ones - b'0'))
        }
        _ => None,
    }
}

/// How a line rule prints its hits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// `--- <file>` once, then `<n>: <text>`
    #[default]
    Header,
    /// `<file>:<n>: <text>`
    Prefixed,
}

impl LineStyle {
    pub fn name(&self) -> &'static str {
        match self {
            LineStyle::Header => "header",
            LineStyle::Prefixed => "prefixed",
        }
    }
}

/// Report every line containing any of the needles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRule {
    pub needles: Vec<String>,
    #[serde(default)]
    pub style: LineStyle,
}

/// One needle of a whole-file rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probe {
    pub needle: String,
    /// Printed as `contains <label>`; defaults to the needle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Only count the needle when it directly follows a line break
    #[serde(default)]
    pub after_line_break: bool,
    /// When false the probe only puts the file name in the report and
    /// prints no `contains` line of its own
    #[serde(default = "default_report", skip_serializing_if = "is_reported")]
    pub report: bool,
}

fn default_report() -> bool {
    true
}

fn is_reported(report: &bool) -> bool {
    *report
}

impl Probe {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
            label: None,
            after_line_break: false,
            report: true,
        }
    }

    /// Flag the file without a `contains` line
    pub fn trigger(needle: impl Into<String>) -> Self {
        Self {
            report: false,
            ..Self::new(needle)
        }
    }

    pub fn after_line_break(mut self, label: impl Into<String>) -> Self {
        self.after_line_break = true;
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.needle)
    }

    pub fn is_found_in(&self, content: &str) -> bool {
        if self.after_line_break {
            // A lone `\r` ends a line too; `\r\n` is covered by the `\n` form
            content.contains(&format!("\n{}", self.needle))
                || content.contains(&format!("\r{}", self.needle))
        } else {
            content.contains(self.needle.as_str())
        }
    }
}

/// Report which probes occur anywhere in the file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRule {
    pub probes: Vec<Probe>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MatchRule {
    Line(LineRule),
    File(FileRule),
}

impl MatchRule {
    pub fn line<S: Into<String>>(needles: impl IntoIterator<Item = S>, style: LineStyle) -> Self {
        MatchRule::Line(LineRule {
            needles: needles.into_iter().map(Into::into).collect(),
            style,
        })
    }

    pub fn file(probes: impl IntoIterator<Item = Probe>) -> Self {
        MatchRule::File(FileRule {
            probes: probes.into_iter().collect(),
        })
    }

    pub fn is_empty(&self) -> bool {
        match self {
            MatchRule::Line(rule) => rule.needles.is_empty(),
            MatchRule::File(rule) => rule.probes.is_empty(),
        }
    }
}

/// Everything one audit run needs
#[derive(Debug, Clone)]
pub struct AuditPlan {
    pub root: PathBuf,
    pub pattern: String,
    pub range: ChapterRange,
    pub rules: Vec<MatchRule>,
}

/// A single line of audit output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    /// `--- <file>`
    Header { file: String },
    /// `<n>: <text>`
    Hit { line_number: usize, text: String },
    /// `<file>:<n>: <text>`
    PrefixedHit {
        file: String,
        line_number: usize,
        text: String,
    },
    /// `<file>` ahead of a file rule's findings
    FileName { file: String },
    /// `  contains <label>`
    Contains { label: String },
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportLine::Header { file } => write!(f, "--- {file}"),
            ReportLine::Hit { line_number, text } => write!(f, "{line_number}: {text}"),
            ReportLine::PrefixedHit {
                file,
                line_number,
                text,
            } => write!(f, "{file}:{line_number}: {text}"),
            ReportLine::FileName { file } => write!(f, "{file}"),
            ReportLine::Contains { label } => write!(f, "  contains {label}"),
        }
    }
}

/// Counters gathered while an audit runs
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AuditStats {
    pub files_matched: usize,
    pub files_included: usize,
    pub files_without_prefix: usize,
    pub files_out_of_range: usize,
    pub files_reported: usize,
    pub files_failed: usize,
    pub lines_reported: usize,
}
