//! Global agenda configuration at ~/.config/agenda/config.toml

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{AgendaError, AgendaResult};

static DEFAULT_CALENDAR_DIR: &str = "~/calendar";
static PREFERENCES_FILE: &str = "preferences.toml";
static ENV_PREFIX: &str = "AGENDA";

fn default_calendar_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CALENDAR_DIR)
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AgendaConfig {
    /// Directory holding one subdirectory per calendar
    #[serde(default = "default_calendar_dir")]
    pub calendar_dir: PathBuf,

    /// Where preferences are stored; defaults to preferences.toml next to config.toml
    #[serde(default)]
    pub preferences_file: Option<PathBuf>,
}

impl AgendaConfig {
    pub fn config_dir() -> AgendaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AgendaError::Config("Could not determine config directory".into()))?
            .join("agenda");

        Ok(config_dir)
    }

    pub fn config_path() -> AgendaResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn load() -> AgendaResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, writing a commented default file first if it is missing.
    /// `AGENDA_*` environment variables override file values.
    pub fn load_from(path: &Path) -> AgendaResult<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: &Path, env: Environment) -> AgendaResult<Self> {
        if !path.exists() {
            Self::create_default_config(path)?;
        }

        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(env)
            .build()
            .map_err(|e| AgendaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AgendaError::Config(e.to_string()))
    }

    /// Calendar directory with `~` expanded.
    pub fn calendar_path(&self) -> PathBuf {
        expand(&self.calendar_dir)
    }

    pub fn preferences_path(&self) -> AgendaResult<PathBuf> {
        match &self.preferences_file {
            Some(path) => Ok(expand(path)),
            None => Ok(Self::config_dir()?.join(PREFERENCES_FILE)),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> AgendaResult<()> {
        let contents = format!(
            "\
# agenda configuration

# Where your calendars live (one directory per calendar):
# calendar_dir = \"{}\"

# Where display preferences and calendar selections are stored:
# preferences_file = \"~/.config/agenda/{}\"
",
            DEFAULT_CALENDAR_DIR, PREFERENCES_FILE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AgendaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AgendaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Environment source fed from `vars` instead of the process environment.
    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agenda").join("config.toml");

        let config = AgendaConfig::load_with_env(&path, env(&[])).unwrap();

        assert!(path.exists());
        assert_eq!(config.calendar_dir, PathBuf::from("~/calendar"));
        assert!(config.preferences_file.is_none());
    }

    #[test]
    fn reads_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "calendar_dir = \"/srv/calendars\"\npreferences_file = \"/srv/prefs.toml\"\n",
        )
        .unwrap();

        let config = AgendaConfig::load_with_env(&path, env(&[])).unwrap();

        assert_eq!(config.calendar_path(), PathBuf::from("/srv/calendars"));
        assert_eq!(
            config.preferences_path().unwrap(),
            PathBuf::from("/srv/prefs.toml")
        );
    }

    #[test]
    fn environment_overrides_file_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "calendar_dir = \"/srv/calendars\"\n").unwrap();

        let config =
            AgendaConfig::load_with_env(&path, env(&[("AGENDA_CALENDAR_DIR", "/tmp/cals")]))
                .unwrap();

        assert_eq!(config.calendar_path(), PathBuf::from("/tmp/cals"));
        assert!(config.preferences_file.is_none());
    }
}
