//! Configuration management for chapter-audit
//!
//! Audit defaults and named profiles, layered from embedded defaults, an
//! optional configuration file and the environment.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::audit::{AuditPlan, ChapterRange, MatchRule};

pub mod core;
mod smart_load;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditorConfig {
    /// Defaults shared by every profile
    pub audit: AuditDefaults,

    /// Named audits, keyed by profile name
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

/// Audit-wide defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditDefaults {
    /// Directory holding the chapter files
    pub root: PathBuf,

    /// Glob selecting candidate file names
    pub pattern: String,

    /// Lowest chapter number to include
    pub chapter_min: u32,

    /// Highest chapter number to include
    pub chapter_max: u32,

    /// What to do when a chapter cannot be read or decoded
    #[serde(default)]
    pub on_error: ErrorPolicy,

    /// Profile used when none is named on the command line
    pub default_profile: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop at the first failing file
    #[default]
    Abort,
    /// Warn, skip the file and keep going
    Skip,
}

/// A named set of match rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_min: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_max: Option<u32>,

    pub rules: Vec<MatchRule>,
}

impl AuditorConfig {
    /// Look up a profile by name
    pub fn profile(&self, name: &str) -> Result<&Profile> {
        match self.profiles.get(name) {
            Some(profile) => Ok(profile),
            None => {
                let known: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
                bail!(
                    "Unknown profile '{}' (available: {})",
                    name,
                    if known.is_empty() {
                        "none".to_string()
                    } else {
                        known.join(", ")
                    }
                )
            }
        }
    }

    /// Resolve a profile against the audit defaults
    pub fn plan_for(&self, name: &str) -> Result<AuditPlan> {
        let profile = self.profile(name)?;
        let defaults = &self.audit;

        Ok(AuditPlan {
            root: profile.root.clone().unwrap_or_else(|| defaults.root.clone()),
            pattern: profile
                .pattern
                .clone()
                .unwrap_or_else(|| defaults.pattern.clone()),
            range: ChapterRange::new(
                profile.chapter_min.unwrap_or(defaults.chapter_min),
                profile.chapter_max.unwrap_or(defaults.chapter_max),
            ),
            rules: profile.rules.clone(),
        })
    }
}
