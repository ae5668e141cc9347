//! # chapter-audit - terminology audits for numbered chapter files
//!
//! Scans a directory of markdown chapters named with a two-digit chapter
//! prefix (`05_Ch05_Pipeline.md`) and reports lines or whole files that
//! mention configured terms.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the default profile against Docs/D3D12_Textbook
//! chapter-audit
//!
//! # Every "Direct3D 12" line, prefixed with file and line number
//! chapter-audit run direct3d
//!
//! # Which chapters mention left/right-handed coordinate systems
//! chapter-audit run handedness --root book --min 3 --max 9
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use chapter_audit::audit::{AuditPlan, ChapterAuditor, ChapterRange, LineStyle, MatchRule};
//!
//! let plan = AuditPlan {
//!     root: "Docs/D3D12_Textbook".into(),
//!     pattern: "*_Ch*_*.md".to_string(),
//!     range: ChapterRange::new(1, 16),
//!     rules: vec![MatchRule::line(["D3D12"], LineStyle::Header)],
//! };
//!
//! let auditor = ChapterAuditor::new(plan)?;
//! for line in auditor.audit()? {
//!     println!("{}", line?);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod shared;

pub use cli::{Cli, Output};
pub use config::AuditorConfig;

