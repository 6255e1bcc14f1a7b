//! The agenda screen: resolves the calendar selection for the current launch,
//! loads events for the configured window and keeps the current display list.
//!
//! The list is rebuilt from scratch on every trigger (screen shown, settings
//! changed, widget launch) and replaced as a whole.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::agenda::{DayKeyFormat, DisplayRow, build_agenda};
use crate::error::{AgendaError, AgendaResult};
use crate::navigation::Navigator;
use crate::preferences::{AgendaSettings, PreferenceStore, Scope, selected_calendars};
use crate::source::{CalendarSource, EventWindow};

/// Notice shown when no application can open the tapped event.
pub const OPEN_FAILED_NOTICE: &str = "Unable to open event";

/// How the screen was started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchContext {
    /// Set when the launch came from a home-screen widget
    pub origin_widget_id: Option<i32>,
}

impl LaunchContext {
    pub fn from_widget(id: i32) -> Self {
        LaunchContext {
            origin_widget_id: Some(id),
        }
    }

    pub fn scope(&self) -> Scope {
        Scope::for_launch(self.origin_widget_id)
    }
}

/// Why the agenda has nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    NoCalendarsSelected,
    NoEvents,
}

impl EmptyState {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::NoCalendarsSelected => "No calendars selected",
            EmptyState::NoEvents => "No upcoming events",
        }
    }
}

/// Result of one rebuild.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgendaView {
    pub rows: Vec<DisplayRow>,
    pub empty_state: Option<EmptyState>,
    #[serde(skip)]
    pub settings: AgendaSettings,
}

impl AgendaView {
    fn empty(settings: AgendaSettings) -> Self {
        AgendaView {
            rows: Vec::new(),
            empty_state: None,
            settings,
        }
    }
}

/// What happened when a row was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    Opened,
    /// Not an event row, or opening events is switched off
    Ignored,
    /// Short-lived message for the user
    Notice(String),
}

pub struct AgendaScreen<'a> {
    source: &'a dyn CalendarSource,
    prefs: &'a dyn PreferenceStore,
    navigator: &'a dyn Navigator,
    day_key: &'a dyn DayKeyFormat,
    launch: LaunchContext,
    settings: AgendaSettings,
    view: AgendaView,
}

impl<'a> AgendaScreen<'a> {
    pub fn new(
        source: &'a dyn CalendarSource,
        prefs: &'a dyn PreferenceStore,
        navigator: &'a dyn Navigator,
        day_key: &'a dyn DayKeyFormat,
        launch: LaunchContext,
    ) -> Self {
        let settings = AgendaSettings::load(prefs);

        AgendaScreen {
            source,
            prefs,
            navigator,
            day_key,
            launch,
            settings,
            view: AgendaView::empty(settings),
        }
    }

    pub fn settings(&self) -> &AgendaSettings {
        &self.settings
    }

    pub fn view(&self) -> &AgendaView {
        &self.view
    }

    /// Re-read settings from the preference store, then rebuild.
    pub fn notify_settings_changed(&mut self) -> AgendaResult<&AgendaView> {
        self.settings = AgendaSettings::load(self.prefs);
        self.rebuild()
    }

    pub fn rebuild(&mut self) -> AgendaResult<&AgendaView> {
        self.rebuild_at(Utc::now())
    }

    /// Rebuild the display list for a window starting at `now`.
    pub fn rebuild_at(&mut self, now: DateTime<Utc>) -> AgendaResult<&AgendaView> {
        let scope = self.launch.scope();
        let available = self.source.calendars()?;

        let selected = match selected_calendars(self.prefs, &scope, &available) {
            Ok(selected) => selected,
            Err(AgendaError::ScopeNotFound(_)) => {
                debug!(%scope, "no stored calendar selection, showing none");
                HashSet::new()
            }
            Err(e) => return Err(e),
        };

        let window = EventWindow::starting_at(now, self.settings.window_days);
        let events = if selected.is_empty() {
            Vec::new()
        } else {
            self.source.events(&window, &selected)?
        };

        let empty_state = if selected.is_empty() {
            Some(EmptyState::NoCalendarsSelected)
        } else if events.is_empty() {
            Some(EmptyState::NoEvents)
        } else {
            None
        };

        let rows = build_agenda(events, self.day_key);
        debug!(%scope, rows = rows.len(), days = self.settings.window_days, "agenda rebuilt");

        self.view = AgendaView {
            rows,
            empty_state,
            settings: self.settings,
        };
        Ok(&self.view)
    }

    /// Handle selection of the row at `position` in the current view.
    pub fn tap(&self, position: usize) -> TapOutcome {
        if !self.settings.open_on_tap {
            return TapOutcome::Ignored;
        }

        let Some(event) = self.view.rows.get(position).and_then(DisplayRow::as_event) else {
            return TapOutcome::Ignored;
        };

        match self.navigator.open_event(event) {
            Ok(()) => TapOutcome::Opened,
            Err(_) => TapOutcome::Notice(OPEN_FAILED_NOTICE.to_string()),
        }
    }
}
