//! User configuration at ~/.config/daybook/config.toml
//!
//! Every key may also be set through a `DAYBOOK_`-prefixed environment
//! variable, which takes precedence over the file.

use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{DaybookError, DaybookResult};

const DEFAULT_DAY_FORMAT: &str = "%a %b %-d";

fn default_day_format() -> String {
    DEFAULT_DAY_FORMAT.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaybookConfig {
    /// IANA zone applied to wall-clock input (e.g. "Europe/Amsterdam").
    /// When unset the system zone is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// strftime pattern for day headings
    #[serde(default = "default_day_format")]
    pub day_format: String,
}

impl Default for DaybookConfig {
    fn default() -> Self {
        DaybookConfig {
            timezone: None,
            day_format: default_day_format(),
        }
    }
}

impl DaybookConfig {
    pub fn config_path() -> DaybookResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DaybookError::Config("Could not determine config directory".into()))?
            .join("daybook");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> DaybookResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path` (a missing file is fine) layered under the environment.
    pub fn load_from(path: &Path) -> DaybookResult<Self> {
        Self::load_with_env(path, Environment::with_prefix("DAYBOOK"))
    }

    fn load_with_env(path: &Path, env: Environment) -> DaybookResult<Self> {
        let config: DaybookConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .map_err(|e| DaybookError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DaybookError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject a zone chrono-tz doesn't know and a day format chrono can't render.
    pub fn validate(&self) -> DaybookResult<()> {
        self.tz()?;

        if StrftimeItems::new(&self.day_format).any(|item| matches!(item, Item::Error)) {
            return Err(DaybookError::Config(format!(
                "Invalid day_format '{}'",
                self.day_format
            )));
        }

        Ok(())
    }

    /// The configured zone, if any.
    pub fn tz(&self) -> DaybookResult<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|_| DaybookError::Config(format!("Unknown timezone '{name}'")))
            })
            .transpose()
    }

    pub fn to_toml(&self) -> DaybookResult<String> {
        toml::to_string_pretty(self).map_err(|e| DaybookError::Config(e.to_string()))
    }

    /// Template config with every option commented out.
    pub fn default_config_contents() -> String {
        format!(
            "\
# daybook configuration

# Zone for dates typed without one (defaults to the system zone):
# timezone = \"Europe/Amsterdam\"

# Format of day headings:
# day_format = \"{}\"
",
            DEFAULT_DAY_FORMAT
        )
    }

    /// Write the template to `path` unless a file is already there.
    /// Returns true if the file was created.
    pub fn write_default(path: &Path) -> DaybookResult<bool> {
        if path.exists() {
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaybookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, Self::default_config_contents())?;

        Ok(true)
    }
}
