//! Calendar and event types read by the agenda.
//!
//! Events are produced by a [`CalendarSource`](crate::source::CalendarSource)
//! and never modified afterwards: the list builder and the screen only read them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A calendar an event belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarRef {
    /// Directory name, also used as the stored selection key
    pub slug: String,
    pub name: String,
}

impl CalendarRef {
    pub fn new(slug: &str, name: &str) -> Self {
        CalendarRef {
            slug: slug.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for CalendarRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A single upcoming event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub calendar: CalendarRef,

    pub all_day: bool,
    pub location: Option<String>,

    /// File the event was read from, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl Event {
    /// Whether any part of the event falls inside `[from, to)`.
    pub fn overlaps(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        self.start < to && self.end > from
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(start_hour: u32, end_hour: u32) -> Event {
        Event {
            id: "e1".to_string(),
            title: "Standup".to_string(),
            start: Utc.with_ymd_and_hms(2025, 3, 20, start_hour, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 3, 20, end_hour, 0, 0).unwrap(),
            calendar: CalendarRef::new("work", "Work"),
            all_day: false,
            location: None,
            source: None,
        }
    }

    #[test]
    fn overlaps_includes_events_in_progress() {
        let e = event(9, 11);
        let from = Utc.with_ymd_and_hms(2025, 3, 20, 10, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2025, 3, 21, 10, 0, 0).unwrap();
        assert!(e.overlaps(from, to));
    }

    #[test]
    fn overlaps_excludes_events_ending_at_window_start() {
        let e = event(8, 10);
        let from = Utc.with_ymd_and_hms(2025, 3, 20, 10, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2025, 3, 21, 10, 0, 0).unwrap();
        assert!(!e.overlaps(from, to));
    }
}
