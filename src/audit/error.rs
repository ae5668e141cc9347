use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Errors produced while planning or running an audit
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Root directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Root path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid chapter range: min {min} exceeds max {max}")]
    InvalidRange { min: u32, max: u32 },

    #[error("No match rules configured")]
    NoRules,

    #[error("Match rule #{index} has nothing to match")]
    EmptyRule { index: usize },

    #[error("Failed to build matcher for rule #{index}: {source}")]
    Matcher {
        index: usize,
        #[source]
        source: aho_corasick::BuildError,
    },

    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid UTF-8 in {} at byte {offset}", .path.display())]
    Decode {
        path: PathBuf,
        offset: usize,
        #[source]
        source: FromUtf8Error,
    },
}

impl AuditError {
    /// True for errors tied to a single file rather than the whole run
    pub fn is_file_level(&self) -> bool {
        matches!(self, AuditError::Io { .. } | AuditError::Decode { .. })
    }

    /// Short name of the error kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            AuditError::NotFound(_) => "NotFound",
            AuditError::NotADirectory(_) => "NotADirectory",
            AuditError::InvalidPattern { .. } => "InvalidPattern",
            AuditError::InvalidRange { .. } => "InvalidRange",
            AuditError::NoRules => "NoRules",
            AuditError::EmptyRule { .. } => "EmptyRule",
            AuditError::Matcher { .. } => "Matcher",
            AuditError::Io { .. } => "IOError",
            AuditError::Decode { .. } => "DecodeError",
        }
    }
}
