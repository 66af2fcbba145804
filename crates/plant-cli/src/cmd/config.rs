use super::load_config;
use crate::output::print_json;
use clap::Subcommand;
use plant_core::config::WarnLevel;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration (passwords hidden)
    Show,

    /// Validate the config for common mistakes
    Validate,
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate => validate(root, json),
    }
}

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let mut config = load_config(root)?;
    for user in &mut config.auth.users {
        user.password = "********".to_string();
    }
    if json {
        return print_json(&config);
    }
    println!("upcoming_window_days:  {}", config.upcoming_window_days);
    println!("attention_window_days: {}", config.attention_window_days);
    println!("activity_log_limit:    {}", config.activity_log_limit);
    println!("auth.required:         {}", config.auth.required);
    for user in &config.auth.users {
        println!("  user: {} ({})", user.email, user.role);
    }
    Ok(())
}

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = load_config(root)?;
    let warnings = config.validate();
    let errors = warnings
        .iter()
        .filter(|w| w.level == WarnLevel::Error)
        .count();

    if json {
        print_json(&serde_json::json!({ "valid": errors == 0, "warnings": warnings }))?;
    } else if warnings.is_empty() {
        println!("Config OK");
    } else {
        for w in &warnings {
            let tag = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("{tag}: {}", w.message);
        }
    }

    if errors > 0 {
        anyhow::bail!("config has {errors} error(s)");
    }
    Ok(())
}
