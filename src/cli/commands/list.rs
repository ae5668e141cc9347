//! List command implementation

use anyhow::Result;
use clap::Args;

use crate::audit::MatchRule;
use crate::cli::Output;
use crate::config::AuditorConfig;

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Also show each profile's rules
    #[arg(long)]
    pub rules: bool,
}

pub fn execute(args: ListArgs, config: &AuditorConfig, output: &Output) -> Result<()> {
    let show_rules = args.rules || output.is_verbose();

    for (name, profile) in &config.profiles {
        let marker = if *name == config.audit.default_profile {
            " (default)"
        } else {
            ""
        };
        output.header(&format!("{}{}", name, marker));

        if !profile.description.is_empty() {
            output.key_value("description", &profile.description);
        }
        if let Some(root) = &profile.root {
            output.key_value("root", &root.display().to_string());
        }
        if let Some(pattern) = &profile.pattern {
            output.key_value("pattern", pattern);
        }
        if profile.chapter_min.is_some() || profile.chapter_max.is_some() {
            let min = profile.chapter_min.unwrap_or(config.audit.chapter_min);
            let max = profile.chapter_max.unwrap_or(config.audit.chapter_max);
            output.key_value("chapters", &format!("{}..={}", min, max));
        }

        if show_rules {
            for rule in &profile.rules {
                output.list_item(&describe_rule(rule));
            }
        }
        output.blank_line();
    }

    Ok(())
}

fn describe_rule(rule: &MatchRule) -> String {
    match rule {
        MatchRule::Line(line_rule) => format!(
            "line ({}): {}",
            line_rule.style.name(),
            quoted(line_rule.needles.iter().map(String::as_str))
        ),
        MatchRule::File(file_rule) => {
            let probes: Vec<String> = file_rule
                .probes
                .iter()
                .map(|p| {
                    let mut text = format!("\"{}\"", p.needle);
                    if p.after_line_break {
                        text.push_str(" after line break");
                    }
                    if !p.report {
                        text.push_str(" (name only)");
                    }
                    text
                })
                .collect();
            format!("file: {}", probes.join(", "))
        }
    }
}

fn quoted<'a>(needles: impl Iterator<Item = &'a str>) -> String {
    needles
        .map(|n| format!("\"{}\"", n))
        .collect::<Vec<_>>()
        .join(", ")
}
