//! Calendar source backed by a directory of `.ics` files.
//!
//! Layout: one subdirectory per calendar, one `.ics` file per event. A
//! calendar may carry a display name in `.caldir/config.toml`:
//!
//! ```text
//! ~/calendar/
//!   work/
//!     .caldir/config.toml      # name = "Work"
//!     2025-03-20T1500__planning.ics
//!   personal/
//!     ...
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{AgendaError, AgendaResult};
use crate::event::{CalendarRef, Event};
use crate::ics::parse_event;
use crate::source::{CalendarSource, EventWindow, sort_events};

/// Optional per-calendar metadata.
#[derive(Debug, Default, Deserialize)]
struct CalendarMeta {
    name: Option<String>,
}

impl CalendarMeta {
    fn load(calendar_dir: &Path) -> AgendaResult<Self> {
        let path = calendar_dir.join(".caldir/config.toml");

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let meta: CalendarMeta = toml::from_str(&content)
                .map_err(|e| AgendaError::Config(format!("{}: {e}", path.display())))?;
            Ok(meta)
        } else {
            Ok(Self::default())
        }
    }
}

#[derive(Debug, Clone)]
pub struct IcsDirectory {
    root: PathBuf,
}

impl IcsDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        IcsDirectory { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read every parseable event of one calendar. Unreadable files are skipped.
    fn read_calendar(&self, calendar: &CalendarRef) -> AgendaResult<Vec<Event>> {
        let dir = self.root.join(&calendar.slug);
        if !dir.is_dir() {
            return Err(AgendaError::CalendarNotFound(calendar.slug.clone()));
        }

        let events = std::fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == "ics"))
            .filter_map(|path| {
                let parsed = std::fs::read_to_string(&path)
                    .ok()
                    .and_then(|content| parse_event(&content, calendar));
                match parsed {
                    Some(event) => Some(Event {
                        source: Some(path),
                        ..event
                    }),
                    None => {
                        warn!(path = %path.display(), "skipping unreadable event file");
                        None
                    }
                }
            })
            .collect();

        Ok(events)
    }
}

impl CalendarSource for IcsDirectory {
    fn calendars(&self) -> AgendaResult<Vec<CalendarRef>> {
        let Ok(entries) = std::fs::read_dir(&self.root) else {
            debug!(root = %self.root.display(), "calendar directory missing");
            return Ok(Vec::new());
        };

        let mut calendars = Vec::new();
        for path in entries.filter_map(|entry| entry.ok()).map(|entry| entry.path()) {
            if !path.is_dir() {
                continue;
            }
            let Some(slug) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if slug.starts_with('.') {
                continue;
            }

            let meta = CalendarMeta::load(&path)?;
            let name = meta.name.unwrap_or_else(|| slug.to_string());
            calendars.push(CalendarRef::new(slug, &name));
        }

        calendars.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(calendars)
    }

    fn events(
        &self,
        window: &EventWindow,
        selected: &HashSet<CalendarRef>,
    ) -> AgendaResult<Vec<Event>> {
        let mut events = Vec::new();

        for calendar in selected {
            let in_window = self
                .read_calendar(calendar)?
                .into_iter()
                .filter(|e| window.contains(e));
            events.extend(in_window);
        }

        sort_events(&mut events);
        debug!(count = events.len(), calendars = selected.len(), "loaded events");
        Ok(events)
    }
}
