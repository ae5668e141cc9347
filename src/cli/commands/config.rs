//! Config command implementation
//!
//! Shows the merged configuration and checks that every profile builds.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use crate::audit::ChapterAuditor;
use crate::cli::Output;
use crate::config::AuditorConfig;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the merged configuration as TOML
    Show,
    /// Check that every profile compiles into a valid audit
    Validate,
}

pub fn execute(args: ConfigArgs, config: &AuditorConfig, output: &Output) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            let rendered =
                toml::to_string_pretty(config).context("Failed to render configuration")?;
            print!("{}", rendered);
            Ok(())
        }
        ConfigCommands::Validate => validate(config, output),
    }
}

fn validate(config: &AuditorConfig, output: &Output) -> Result<()> {
    config
        .profile(&config.audit.default_profile)
        .context("audit.default_profile does not name a profile")?;

    let mut failures = 0usize;
    for name in config.profiles.keys() {
        let result = config
            .plan_for(name)
            .and_then(|plan| ChapterAuditor::new(plan).map_err(Into::into));

        match result {
            Ok(_) => output.verbose(&format!("Profile '{}' is valid", name)),
            Err(err) => {
                output.error(&format!("Profile '{}': {:#}", name, err));
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} invalid profile(s)", failures);
    }

    output.success(&format!(
        "Configuration is valid ({} profiles)",
        config.profiles.len()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = AuditorConfig::defaults().unwrap();
        assert!(validate(&config, &Output::new(false, true)).is_ok());
    }

    #[test]
    fn test_invalid_profile_fails_validation() {
        let mut config = AuditorConfig::defaults().unwrap();
        config
            .profiles
            .get_mut("terms")
            .unwrap()
            .pattern = Some("[broken".to_string());

        assert!(validate(&config, &Output::new(false, true)).is_err());
    }

    #[test]
    fn test_show_renders_round_trippable_toml() {
        let config = AuditorConfig::defaults().unwrap();
        let rendered = toml::to_string_pretty(&config).unwrap();
        let parsed: AuditorConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.profiles.len(), config.profiles.len());
        assert_eq!(parsed.audit.pattern, config.audit.pattern);
    }
}
