pub mod core;
pub mod error;
mod rules;
pub mod types;

// Re-export main types for easier access
pub use self::core::{AuditReport, ChapterAuditor, read_chapter};
pub use error::AuditError;
pub use types::{
    AuditPlan, AuditStats, ChapterRange, FileEntry, FileRule, LineRule, LineStyle, MatchRule,
    Probe, ReportLine, chapter_prefix,
};
