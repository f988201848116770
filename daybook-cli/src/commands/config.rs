use std::path::Path;

use anyhow::{Context, Result};
use daybook_core::{DaybookConfig, DaybookResult};
use owo_colors::OwoColorize;

/// Show the config path and settings. A config that fails to load still gets
/// its path printed before the error is returned.
pub fn run(loaded: DaybookResult<DaybookConfig>, init: bool) -> Result<()> {
    let config_path = DaybookConfig::config_path()?;

    if init {
        if DaybookConfig::write_default(&config_path)? {
            println!("{}", format!("Created {}", config_path.display()).green());
        } else {
            println!("{}", format!("{} already exists", config_path.display()).dimmed());
        }
    }

    println!("{}", report(&config_path, loaded.as_ref().ok())?);

    loaded
        .map(|_| ())
        .with_context(|| format!("Invalid config at {}", config_path.display()))
}

fn report(config_path: &Path, config: Option<&DaybookConfig>) -> Result<String> {
    let mut lines = vec![
        "Paths".bold().to_string(),
        format!("  Config:  {}", config_path.display()),
        String::new(),
    ];

    let Some(config) = config else {
        lines.push(format!("  {}", "Settings could not be loaded".red()));
        return Ok(lines.join("\n"));
    };

    lines.push("Effective settings".bold().to_string());
    for line in config.to_toml()?.lines() {
        lines.push(format!("  {}", line));
    }
    if config.timezone.is_none() {
        lines.push(format!("  {}", "timezone = (system)".dimmed()));
    }

    Ok(lines.join("\n"))
}
