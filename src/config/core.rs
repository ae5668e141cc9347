use anyhow::{Context, Result, bail};
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use std::path::Path;

use super::AuditorConfig;
use super::smart_load;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

const ENV_PREFIX: &str = "CHAPTER_AUDIT_";

impl AuditorConfig {
    /// Load embedded defaults, then the optional custom file, then the environment
    pub fn load(custom_config: Option<&Path>) -> Result<Self> {
        Self::load_with_env_prefix(custom_config, ENV_PREFIX)
    }

    /// Only the embedded defaults, ignoring files and environment
    pub fn defaults() -> Result<Self> {
        Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            .extract()
            .context("Embedded default configuration is invalid")
    }

    fn load_with_env_prefix(custom_config: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(custom_path) = custom_config {
            if !custom_path.is_file() {
                bail!("Configuration file not found: {}", custom_path.display());
            }
            tracing::debug!("Merging configuration from {}", custom_path.display());
            figment = figment.merge(smart_load::auto(custom_path));
        }

        // Environment variables always have highest priority
        figment = figment.merge(Env::prefixed(env_prefix).split("__"));

        let config: AuditorConfig = figment
            .extract()
            .context("Failed to load configuration")?;

        tracing::debug!(
            "Loaded configuration with {} profiles",
            config.profiles.len()
        );
        Ok(config)
    }
}
