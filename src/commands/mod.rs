pub mod calendars;
pub mod list;
pub mod open;
pub mod select;
pub mod set;

use agenda_core::config::AgendaConfig;
use agenda_core::preferences::TomlPreferences;
use agenda_core::source::IcsDirectory;
use anyhow::Result;

/// Everything a command needs, loaded from the user's config.
pub struct Workspace {
    pub source: IcsDirectory,
    pub prefs: TomlPreferences,
}

impl Workspace {
    pub fn load() -> Result<Self> {
        let config = AgendaConfig::load()?;
        let source = IcsDirectory::new(config.calendar_path());
        let prefs = TomlPreferences::load(&config.preferences_path()?)?;

        Ok(Workspace { source, prefs })
    }
}
