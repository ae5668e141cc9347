//! Command implementations for the chapter-audit CLI
//!
//! Each command is organized into its own module.

pub mod config;
pub mod list;
pub mod run;
