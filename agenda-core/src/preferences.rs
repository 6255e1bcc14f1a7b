//! Preference lookups.
//!
//! Preferences live in a TOML file. Global values sit at the top level,
//! widget-specific values under `[scopes.<scope name>]`:
//!
//! ```toml
//! use_24_hour = false
//! num_days = "7"
//! enable_click_event = true
//! selected_calendars = ["work", "personal"]
//!
//! [scopes.widget_42]
//! selected_calendars = ["work"]
//! ```
//!
//! Lookups return `Option`; callers decide the fallback.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::{debug, warn};

use crate::error::{AgendaError, AgendaResult};
use crate::event::CalendarRef;

pub const USE_24_HOUR: &str = "use_24_hour";
pub const NUM_DAYS: &str = "num_days";
pub const ENABLE_CLICK_EVENT: &str = "enable_click_event";
pub const SELECTED_CALENDARS: &str = "selected_calendars";

/// Days shown when `num_days` is missing or malformed.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

const SCOPES_TABLE: &str = "scopes";

/// Preference namespace: the app-wide one, or one per home-screen widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    Widget(i32),
}

impl Scope {
    /// Scope for a launch, given the id of the widget that triggered it.
    pub fn for_launch(origin_widget_id: Option<i32>) -> Self {
        match origin_widget_id {
            Some(id) => Scope::Widget(id),
            None => Scope::Global,
        }
    }

    /// Table name under `[scopes]`; `None` for the global scope.
    pub fn name(&self) -> Option<String> {
        match self {
            Scope::Global => None,
            Scope::Widget(id) => Some(format!("widget_{id}")),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "global"),
        }
    }
}

/// Read access to stored preferences.
pub trait PreferenceStore {
    fn get_bool(&self, scope: &Scope, key: &str) -> Option<bool>;
    fn get_string(&self, scope: &Scope, key: &str) -> Option<String>;
    fn get_string_list(&self, scope: &Scope, key: &str) -> Option<Vec<String>>;
}

/// File-backed preference store.
#[derive(Debug, Clone)]
pub struct TomlPreferences {
    path: PathBuf,
    table: Table,
}

impl TomlPreferences {
    /// Load preferences from `path`. A missing file is an empty store.
    pub fn load(path: &Path) -> AgendaResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no preferences file yet");
            return Ok(TomlPreferences {
                path: path.to_path_buf(),
                table: Table::new(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(path, &content)
    }

    pub fn parse(path: &Path, content: &str) -> AgendaResult<Self> {
        let table: Table = toml::from_str(content)
            .map_err(|e| AgendaError::Preferences(format!("{}: {e}", path.display())))?;

        Ok(TomlPreferences {
            path: path.to_path_buf(),
            table,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> AgendaResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(&self.table)
            .map_err(|e| AgendaError::Preferences(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn set_bool(&mut self, scope: &Scope, key: &str, value: bool) {
        self.set_value(scope, key, Value::Boolean(value));
    }

    pub fn set_string(&mut self, scope: &Scope, key: &str, value: &str) {
        self.set_value(scope, key, Value::String(value.to_string()));
    }

    pub fn set_string_list(&mut self, scope: &Scope, key: &str, values: &[String]) {
        let list = values.iter().cloned().map(Value::String).collect();
        self.set_value(scope, key, Value::Array(list));
    }

    fn set_value(&mut self, scope: &Scope, key: &str, value: Value) {
        let table = match scope.name() {
            None => &mut self.table,
            Some(name) => {
                let scopes = table_entry(&mut self.table, SCOPES_TABLE);
                table_entry(scopes, &name)
            }
        };
        table.insert(key.to_string(), value);
    }

    fn lookup(&self, scope: &Scope, key: &str) -> Option<&Value> {
        match scope.name() {
            None => self.table.get(key),
            Some(name) => self
                .table
                .get(SCOPES_TABLE)?
                .as_table()?
                .get(&name)?
                .as_table()?
                .get(key),
        }
    }
}

/// Get or create the sub-table `key`, replacing any non-table value there.
fn table_entry<'a>(table: &'a mut Table, key: &str) -> &'a mut Table {
    let entry = table
        .entry(key.to_string())
        .or_insert(Value::Table(Table::new()));
    if !entry.is_table() {
        *entry = Value::Table(Table::new());
    }
    match entry {
        Value::Table(t) => t,
        _ => unreachable!("entry was just made a table"),
    }
}

impl PreferenceStore for TomlPreferences {
    fn get_bool(&self, scope: &Scope, key: &str) -> Option<bool> {
        self.lookup(scope, key)?.as_bool()
    }

    fn get_string(&self, scope: &Scope, key: &str) -> Option<String> {
        match self.lookup(scope, key)? {
            Value::String(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            _ => None,
        }
    }

    fn get_string_list(&self, scope: &Scope, key: &str) -> Option<Vec<String>> {
        let values = self.lookup(scope, key)?.as_array()?;
        Some(
            values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        )
    }
}

/// Display settings read from the global scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgendaSettings {
    pub use_24_hour: bool,
    /// Number of days, starting now, the agenda covers
    pub window_days: u32,
    /// Whether selecting an event opens it in the calendar app
    pub open_on_tap: bool,
}

impl Default for AgendaSettings {
    fn default() -> Self {
        AgendaSettings {
            use_24_hour: false,
            window_days: DEFAULT_WINDOW_DAYS,
            open_on_tap: true,
        }
    }
}

impl AgendaSettings {
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        let defaults = AgendaSettings::default();
        let scope = Scope::Global;

        AgendaSettings {
            use_24_hour: store
                .get_bool(&scope, USE_24_HOUR)
                .unwrap_or(defaults.use_24_hour),
            window_days: store
                .get_string(&scope, NUM_DAYS)
                .map(|raw| parse_window_days(&raw))
                .unwrap_or(defaults.window_days),
            open_on_tap: store
                .get_bool(&scope, ENABLE_CLICK_EVENT)
                .unwrap_or(defaults.open_on_tap),
        }
    }
}

/// Parse the stored window size, falling back to the default when malformed.
pub fn parse_window_days(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(days) => days,
        Err(_) => {
            warn!(value = raw, "invalid {NUM_DAYS} preference, using {DEFAULT_WINDOW_DAYS}");
            DEFAULT_WINDOW_DAYS
        }
    }
}

/// Calendars selected for `scope`, resolved against the available calendars.
///
/// Fails with [`AgendaError::ScopeNotFound`] when nothing is stored for the
/// scope. Stored slugs that no longer match a calendar are dropped.
pub fn selected_calendars<S: PreferenceStore + ?Sized>(
    store: &S,
    scope: &Scope,
    available: &[CalendarRef],
) -> AgendaResult<HashSet<CalendarRef>> {
    let slugs = store
        .get_string_list(scope, SELECTED_CALENDARS)
        .ok_or_else(|| AgendaError::ScopeNotFound(scope.to_string()))?;

    let selected = slugs
        .iter()
        .filter_map(|slug| {
            let found = available.iter().find(|c| &c.slug == slug);
            if found.is_none() {
                debug!(%scope, slug = slug.as_str(), "selected calendar no longer exists");
            }
            found.cloned()
        })
        .collect();

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
use_24_hour = true
num_days = "14"
enable_click_event = false
selected_calendars = ["work", "personal"]

[scopes.widget_42]
selected_calendars = ["work"]
"#;

    fn prefs(content: &str) -> TomlPreferences {
        TomlPreferences::parse(Path::new("preferences.toml"), content).unwrap()
    }

    fn calendars() -> Vec<CalendarRef> {
        vec![
            CalendarRef::new("personal", "Personal"),
            CalendarRef::new("work", "Work"),
        ]
    }

    #[test]
    fn settings_from_stored_values() {
        let settings = AgendaSettings::load(&prefs(SAMPLE));
        assert_eq!(
            settings,
            AgendaSettings {
                use_24_hour: true,
                window_days: 14,
                open_on_tap: false,
            }
        );
    }

    #[test]
    fn settings_default_when_nothing_stored() {
        assert_eq!(AgendaSettings::load(&prefs("")), AgendaSettings::default());
    }

    #[test]
    fn unparseable_window_falls_back_to_seven() {
        let settings = AgendaSettings::load(&prefs("num_days = \"abc\""));
        assert_eq!(settings.window_days, 7);
        assert_eq!(parse_window_days("-3"), 7);
        assert_eq!(parse_window_days(" 10 "), 10);
    }

    #[test]
    fn integer_window_is_accepted() {
        let settings = AgendaSettings::load(&prefs("num_days = 3"));
        assert_eq!(settings.window_days, 3);
    }

    #[test]
    fn widget_scope_reads_its_own_selection() {
        let store = prefs(SAMPLE);

        let widget = selected_calendars(&store, &Scope::Widget(42), &calendars()).unwrap();
        assert_eq!(widget, HashSet::from([CalendarRef::new("work", "Work")]));

        let global = selected_calendars(&store, &Scope::Global, &calendars()).unwrap();
        assert_eq!(global.len(), 2);
    }

    #[test]
    fn missing_scope_is_a_lookup_miss() {
        let store = prefs(SAMPLE);
        let result = selected_calendars(&store, &Scope::Widget(7), &calendars());
        assert!(matches!(result, Err(AgendaError::ScopeNotFound(name)) if name == "widget_7"));
    }

    #[test]
    fn stale_calendar_slugs_are_dropped() {
        let store = prefs("selected_calendars = [\"work\", \"gone\"]");
        let selected = selected_calendars(&store, &Scope::Global, &calendars()).unwrap();
        assert_eq!(selected, HashSet::from([CalendarRef::new("work", "Work")]));
    }

    #[test]
    fn set_and_save_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");

        let mut store = TomlPreferences::load(&path).unwrap();
        store.set_bool(&Scope::Global, USE_24_HOUR, true);
        store.set_string_list(&Scope::Widget(42), SELECTED_CALENDARS, &["work".to_string()]);
        store.save().unwrap();

        let reloaded = TomlPreferences::load(&path).unwrap();
        assert_eq!(reloaded.get_bool(&Scope::Global, USE_24_HOUR), Some(true));
        assert_eq!(
            reloaded.get_string_list(&Scope::Widget(42), SELECTED_CALENDARS),
            Some(vec!["work".to_string()])
        );
        assert_eq!(reloaded.get_string_list(&Scope::Global, SELECTED_CALENDARS), None);
    }

    #[test]
    fn scope_names() {
        assert_eq!(Scope::for_launch(None), Scope::Global);
        assert_eq!(Scope::for_launch(Some(42)).name().as_deref(), Some("widget_42"));
        assert_eq!(Scope::Global.to_string(), "global");
    }
}
