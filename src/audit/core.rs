use globset::GlobMatcher;
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::Path;

use super::error::AuditError;
use super::rules::CompiledRule;
use super::types::{AuditPlan, AuditStats, FileEntry, ReportLine};
use crate::shared::glob::{compile_file_glob, matching_files};

/// Scans a directory of numbered chapter files for configured terminology
///
/// Construction validates the plan (glob, range, rules); [`ChapterAuditor::audit`]
/// checks the root and enumerates candidates, and the returned [`AuditReport`]
/// reads and matches one file at a time as it is iterated.
#[derive(Debug)]
pub struct ChapterAuditor {
    plan: AuditPlan,
    matcher: GlobMatcher,
    rules: Vec<CompiledRule>,
}

impl ChapterAuditor {
    pub fn new(plan: AuditPlan) -> Result<Self, AuditError> {
        if plan.range.min > plan.range.max {
            return Err(AuditError::InvalidRange {
                min: plan.range.min,
                max: plan.range.max,
            });
        }

        if plan.rules.is_empty() {
            return Err(AuditError::NoRules);
        }

        let rules = plan
            .rules
            .iter()
            .enumerate()
            .map(|(idx, rule)| CompiledRule::compile(idx + 1, rule))
            .collect::<Result<Vec<_>, _>>()?;

        let matcher =
            compile_file_glob(&plan.pattern).map_err(|source| AuditError::InvalidPattern {
                pattern: plan.pattern.clone(),
                source,
            })?;

        Ok(Self {
            plan,
            matcher,
            rules,
        })
    }

    pub fn plan(&self) -> &AuditPlan {
        &self.plan
    }

    /// Start an audit
    ///
    /// Fails before producing any output when the root directory is missing
    /// or cannot be listed.
    pub fn audit(&self) -> Result<AuditReport<'_>, AuditError> {
        let root = &self.plan.root;
        check_root(root)?;

        let paths = matching_files(root, &self.matcher).map_err(|err| AuditError::Io {
            path: err.path().unwrap_or(root.as_path()).to_path_buf(),
            source: io::Error::from(err),
        })?;

        let mut stats = AuditStats {
            files_matched: paths.len(),
            ..AuditStats::default()
        };
        let mut entries = VecDeque::new();

        for path in &paths {
            let Some(entry) = FileEntry::from_path(path) else {
                tracing::debug!("Skipping non UTF-8 file name: {}", path.display());
                stats.files_without_prefix += 1;
                continue;
            };

            match entry.chapter {
                None => {
                    tracing::debug!("Skipping {}: no chapter prefix", entry.file_name);
                    stats.files_without_prefix += 1;
                }
                Some(chapter) if !self.plan.range.contains(chapter) => {
                    tracing::debug!(
                        "Skipping {}: chapter {} outside {}..={}",
                        entry.file_name,
                        chapter,
                        self.plan.range.min,
                        self.plan.range.max
                    );
                    stats.files_out_of_range += 1;
                }
                Some(_) => entries.push_back(entry),
            }
        }

        stats.files_included = entries.len();
        tracing::info!(
            "Auditing {} of {} matching files in {}",
            stats.files_included,
            stats.files_matched,
            root.display()
        );

        Ok(AuditReport {
            auditor: self,
            entries,
            pending: VecDeque::new(),
            stats,
        })
    }

    /// Read one included file and collect every rule's findings, in rule order
    pub fn audit_file(&self, entry: &FileEntry) -> Result<Vec<ReportLine>, AuditError> {
        let content = read_chapter(&entry.path)?;
        let mut lines = Vec::new();
        for rule in &self.rules {
            rule.apply(&entry.file_name, &content, &mut lines);
        }
        tracing::debug!("{}: {} report lines", entry.file_name, lines.len());
        Ok(lines)
    }
}

fn check_root(root: &Path) -> Result<(), AuditError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(AuditError::NotADirectory(root.to_path_buf())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(AuditError::NotFound(root.to_path_buf()))
        }
        Err(source) => Err(AuditError::Io {
            path: root.to_path_buf(),
            source,
        }),
    }
}

/// Read a file as strict UTF-8
pub fn read_chapter(path: &Path) -> Result<String, AuditError> {
    let bytes = fs::read(path).map_err(|source| AuditError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    String::from_utf8(bytes).map_err(|source| AuditError::Decode {
        path: path.to_path_buf(),
        offset: source.utf8_error().valid_up_to(),
        source,
    })
}

/// Lazy, single-pass stream of report lines
///
/// A file that fails to read or decode yields one `Err`; iteration can
/// continue past it with the next file.
#[derive(Debug)]
pub struct AuditReport<'a> {
    auditor: &'a ChapterAuditor,
    entries: VecDeque<FileEntry>,
    pending: VecDeque<ReportLine>,
    stats: AuditStats,
}

impl AuditReport<'_> {
    pub fn stats(&self) -> &AuditStats {
        &self.stats
    }
}

impl Iterator for AuditReport<'_> {
    type Item = Result<ReportLine, AuditError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                self.stats.lines_reported += 1;
                return Some(Ok(line));
            }

            let entry = self.entries.pop_front()?;
            match self.auditor.audit_file(&entry) {
                Ok(lines) => {
                    if !lines.is_empty() {
                        self.stats.files_reported += 1;
                    }
                    self.pending.extend(lines);
                }
                Err(err) => {
                    self.stats.files_failed += 1;
                    return Some(Err(err));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::types::{ChapterRange, LineStyle, MatchRule, Probe};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn terms_plan(root: PathBuf) -> AuditPlan {
        AuditPlan {
            root,
            pattern: "*_Ch*_*.md".to_string(),
            range: ChapterRange::new(1, 16),
            rules: vec![MatchRule::line(
                ["D3D12", "DirectX 12", "coordinate"],
                LineStyle::Header,
            )],
        }
    }

    fn collect(auditor: &ChapterAuditor) -> Vec<String> {
        auditor
            .audit()
            .unwrap()
            .map(|line| line.unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_scenario_pipeline_chapter() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("01_Ch01_Intro.md"), "# Intro\nWelcome\n").unwrap();
        fs::write(
            root.join("05_Ch05_Pipeline.md"),
            "# Pipeline\n\nUses D3D12 extensively\n",
        )
        .unwrap();

        let auditor = ChapterAuditor::new(terms_plan(root.to_path_buf())).unwrap();
        assert_eq!(
            collect(&auditor),
            vec!["--- 05_Ch05_Pipeline.md", "3: Uses D3D12 extensively"]
        );
    }

    #[test]
    fn test_out_of_range_and_non_numeric_excluded() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("99_Ch99_Appendix.md"), "D3D12\n").unwrap();
        fs::write(root.join("AA_Ch_Notes.md"), "D3D12\n").unwrap();
        fs::write(root.join("00_Ch00_Preface.md"), "D3D12\n").unwrap();
        fs::write(root.join("16_Ch16_Last.md"), "D3D12\n").unwrap();

        let auditor = ChapterAuditor::new(terms_plan(root.to_path_buf())).unwrap();
        let mut report = auditor.audit().unwrap();
        let lines: Vec<String> = report.by_ref().map(|l| l.unwrap().to_string()).collect();

        assert_eq!(lines, vec!["--- 16_Ch16_Last.md", "1: D3D12"]);
        let stats = report.stats();
        assert_eq!(stats.files_matched, 4);
        assert_eq!(stats.files_included, 1);
        assert_eq!(stats.files_out_of_range, 2);
        assert_eq!(stats.files_without_prefix, 1);
        assert_eq!(stats.files_reported, 1);
        assert_eq!(stats.lines_reported, 2);
    }

    #[test]
    fn test_files_visited_in_sorted_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        for name in ["12_Ch12_B.md", "03_Ch03_A.md", "07_Ch07_C.md"] {
            fs::write(root.join(name), "coordinate\n").unwrap();
        }

        let mut plan = terms_plan(root.to_path_buf());
        plan.rules = vec![MatchRule::line(["coordinate"], LineStyle::Prefixed)];
        let auditor = ChapterAuditor::new(plan).unwrap();

        let first = collect(&auditor);
        assert_eq!(
            first,
            vec![
                "03_Ch03_A.md:1: coordinate",
                "07_Ch07_C.md:1: coordinate",
                "12_Ch12_B.md:1: coordinate",
            ]
        );
        // Unchanged directory, identical output
        assert_eq!(collect(&auditor), first);
    }

    #[test]
    fn test_rules_reported_separately_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(
            root.join("02_Ch02_Math.md"),
            "left-handed system\nD3D12 uses it\n",
        )
        .unwrap();

        let mut plan = terms_plan(root.to_path_buf());
        plan.rules.push(MatchRule::file([
            Probe::new("left-handed"),
            Probe::new("right-handed"),
        ]));
        let auditor = ChapterAuditor::new(plan).unwrap();

        assert_eq!(
            collect(&auditor),
            vec![
                "--- 02_Ch02_Math.md",
                "2: D3D12 uses it",
                "02_Ch02_Math.md",
                "  contains left-handed",
            ]
        );
    }

    #[test]
    fn test_missing_root_fails_before_output() {
        let temp_dir = TempDir::new().unwrap();
        let auditor = ChapterAuditor::new(terms_plan(temp_dir.path().join("missing"))).unwrap();
        assert!(matches!(auditor.audit(), Err(AuditError::NotFound(_))));
    }

    #[test]
    fn test_root_must_be_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("01_Ch01_Intro.md");
        fs::write(&file, "x").unwrap();

        let auditor = ChapterAuditor::new(terms_plan(file)).unwrap();
        assert!(matches!(auditor.audit(), Err(AuditError::NotADirectory(_))));
    }

    #[test]
    fn test_decode_error_names_file_and_iteration_continues() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("01_Ch01_Bad.md"), b"ok\n\xff\xfe D3D12\n").unwrap();
        fs::write(root.join("02_Ch02_Good.md"), "D3D12 here\n").unwrap();

        let auditor = ChapterAuditor::new(terms_plan(root.to_path_buf())).unwrap();
        let mut report = auditor.audit().unwrap();

        match report.next() {
            Some(Err(AuditError::Decode { path, offset, .. })) => {
                assert!(path.ends_with("01_Ch01_Bad.md"));
                assert_eq!(offset, 3);
            }
            other => panic!("expected decode error, got {other:?}"),
        }

        let rest: Vec<String> = report.by_ref().map(|l| l.unwrap().to_string()).collect();
        assert_eq!(rest, vec!["--- 02_Ch02_Good.md", "1: D3D12 here"]);
        assert_eq!(report.stats().files_failed, 1);
    }

    #[test]
    fn test_invalid_plans_rejected() {
        let root = PathBuf::from(".");

        let mut plan = terms_plan(root.clone());
        plan.range = ChapterRange::new(10, 2);
        assert!(matches!(
            ChapterAuditor::new(plan),
            Err(AuditError::InvalidRange { min: 10, max: 2 })
        ));

        let mut plan = terms_plan(root.clone());
        plan.rules.clear();
        assert!(matches!(ChapterAuditor::new(plan), Err(AuditError::NoRules)));

        let mut plan = terms_plan(root);
        plan.pattern = "[oops".to_string();
        assert!(matches!(
            ChapterAuditor::new(plan),
            Err(AuditError::InvalidPattern { .. })
        ));
    }
}
