use super::Workspace;
use crate::output::print_json;
use clap::Subcommand;
use presscrm_core::config::WarnLevel;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration
    Show,
    /// Check the configuration against the dataset
    Validate,
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    let ws = Workspace::load(root)?;
    match subcmd {
        ConfigSubcommand::Show => {
            if json {
                print_json(&ws.config)?;
            } else {
                print!("{}", serde_yaml::to_string(&ws.config)?);
            }
            Ok(())
        }
        ConfigSubcommand::Validate => validate(&ws, json),
    }
}

fn validate(ws: &Workspace, json: bool) -> anyhow::Result<()> {
    let warnings = ws.config.validate(Some(&ws.data));
    let errors = warnings
        .iter()
        .filter(|w| w.level == WarnLevel::Error)
        .count();

    if json {
        print_json(&warnings)?;
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
