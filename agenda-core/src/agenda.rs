//! Day-grouped agenda construction.
//!
//! Turns a start-ordered stream of events into display rows, inserting a
//! separator row before the first event of each day. Days are identified by
//! their formatted label (the "day key"), not by calendar date: two events
//! share a group iff their labels are equal.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Default day label, e.g. "Tue, Jan 3".
pub const DEFAULT_DAY_PATTERN: &str = "%a, %b %-d";

/// One row of the rendered agenda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DisplayRow {
    Event(Event),
    Separator(String),
}

impl DisplayRow {
    pub fn as_event(&self) -> Option<&Event> {
        match self {
            DisplayRow::Event(event) => Some(event),
            DisplayRow::Separator(_) => None,
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, DisplayRow::Separator(_))
    }
}

/// Strategy that labels the day an event belongs to.
pub trait DayKeyFormat {
    fn day_key(&self, event: &Event) -> String;
}

impl<F> DayKeyFormat for F
where
    F: Fn(&Event) -> String,
{
    fn day_key(&self, event: &Event) -> String {
        self(event)
    }
}

/// Formats the event's start in a fixed time zone with a strftime pattern.
#[derive(Debug, Clone)]
pub struct PatternDayKey<Tz: TimeZone> {
    tz: Tz,
    pattern: String,
}

impl PatternDayKey<Local> {
    /// System time zone, default pattern.
    pub fn local() -> Self {
        PatternDayKey::new(Local, DEFAULT_DAY_PATTERN)
    }
}

impl<Tz: TimeZone> PatternDayKey<Tz> {
    pub fn new(tz: Tz, pattern: &str) -> Self {
        PatternDayKey {
            tz,
            pattern: pattern.to_string(),
        }
    }
}

impl<Tz> DayKeyFormat for PatternDayKey<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    fn day_key(&self, event: &Event) -> String {
        // All-day events are stored at UTC midnight of their date
        if event.all_day {
            return event.start.date_naive().format(&self.pattern).to_string();
        }
        event
            .start
            .with_timezone(&self.tz)
            .format(&self.pattern)
            .to_string()
    }
}

/// Build the display list for `events`, which must already be sorted by start.
///
/// A separator for a given key is emitted once, right before the first event
/// carrying that key. Input order is kept as is.
pub fn build_agenda<I, K>(events: I, day_key: &K) -> Vec<DisplayRow>
where
    I: IntoIterator<Item = Event>,
    K: DayKeyFormat + ?Sized,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut rows = Vec::new();

    for event in events {
        let key = day_key.day_key(&event);
        if !seen.contains(&key) {
            rows.push(DisplayRow::Separator(key.clone()));
            seen.insert(key);
        }
        rows.push(DisplayRow::Event(event));
    }

    rows
}

/// Time column for an event row, e.g. "09:00 - 10:30" or "9:00 AM - 10:30 AM".
pub fn time_label<Tz>(event: &Event, use_24_hour: bool, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if event.all_day {
        return "All day".to_string();
    }

    let format = |dt: &DateTime<Utc>| {
        let local = dt.with_timezone(tz);
        if use_24_hour {
            local.format("%H:%M").to_string()
        } else {
            local.format("%-I:%M %p").to_string()
        }
    };

    format!("{} - {}", format(&event.start), format(&event.end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::CalendarRef;
    use chrono::{FixedOffset, TimeZone};

    fn event_at(id: &str, day: u32, hour: u32) -> Event {
        let start = Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap();
        Event {
            id: id.to_string(),
            title: format!("Event {id}"),
            start,
            end: start + chrono::Duration::hours(1),
            calendar: CalendarRef::new("work", "Work"),
            all_day: false,
            location: None,
            source: None,
        }
    }

    fn utc_key() -> PatternDayKey<Utc> {
        PatternDayKey::new(Utc, DEFAULT_DAY_PATTERN)
    }

    fn separators(rows: &[DisplayRow]) -> Vec<&str> {
        rows.iter()
            .filter_map(|r| match r {
                DisplayRow::Separator(label) => Some(label.as_str()),
                DisplayRow::Event(_) => None,
            })
            .collect()
    }

    #[test]
    fn empty_input_gives_empty_list() {
        let rows = build_agenda(Vec::new(), &utc_key());
        assert!(rows.is_empty());
    }

    #[test]
    fn groups_two_days_with_one_separator_each() {
        // 2024-01-01 is a Monday
        let events = vec![
            event_at("a", 1, 9),
            event_at("b", 1, 14),
            event_at("c", 2, 10),
        ];

        let rows = build_agenda(events.clone(), &utc_key());

        assert_eq!(
            rows,
            vec![
                DisplayRow::Separator("Mon, Jan 1".to_string()),
                DisplayRow::Event(events[0].clone()),
                DisplayRow::Event(events[1].clone()),
                DisplayRow::Separator("Tue, Jan 2".to_string()),
                DisplayRow::Event(events[2].clone()),
            ]
        );
    }

    #[test]
    fn separator_count_matches_distinct_days() {
        let events = vec![
            event_at("a", 3, 8),
            event_at("b", 3, 9),
            event_at("c", 4, 9),
            event_at("d", 6, 7),
            event_at("e", 6, 20),
            event_at("f", 9, 12),
        ];

        let rows = build_agenda(events, &utc_key());

        assert_eq!(separators(&rows).len(), 4);
        assert_eq!(rows.len(), 10);
        // every separator is followed by an event of its own day
        for (i, row) in rows.iter().enumerate() {
            if let DisplayRow::Separator(label) = row {
                let next = rows[i + 1].as_event().expect("separator followed by event");
                assert_eq!(&utc_key().day_key(next), label);
            }
        }
    }

    #[test]
    fn rebuild_is_idempotent() {
        let events = vec![event_at("a", 1, 9), event_at("b", 2, 9)];
        let first = build_agenda(events.clone(), &utc_key());
        let second = build_agenda(events, &utc_key());
        assert_eq!(first, second);
    }

    #[test]
    fn groups_by_label_not_by_date() {
        // A coarse label puts different dates into one group
        let by_month = |e: &Event| e.start.format("%B").to_string();
        let events = vec![event_at("a", 1, 9), event_at("b", 15, 9)];

        let rows = build_agenda(events, &by_month);

        assert_eq!(separators(&rows), vec!["January"]);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn unsorted_input_keeps_order_and_never_repeats_a_separator() {
        let events = vec![
            event_at("a", 1, 9),
            event_at("b", 2, 9),
            event_at("c", 1, 18),
        ];

        let rows = build_agenda(events, &utc_key());

        assert_eq!(separators(&rows), vec!["Mon, Jan 1", "Tue, Jan 2"]);
        let ids: Vec<_> = rows
            .iter()
            .filter_map(|r| r.as_event())
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn day_key_uses_configured_time_zone() {
        // 23:30 UTC on Monday is already Tuesday at UTC+2
        let mut event = event_at("late", 1, 23);
        event.start += chrono::Duration::minutes(30);
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        let key = PatternDayKey::new(plus_two, DEFAULT_DAY_PATTERN).day_key(&event);

        assert_eq!(key, "Tue, Jan 2");
    }

    #[test]
    fn all_day_events_keep_their_date_in_any_zone() {
        let mut event = event_at("holiday", 1, 0);
        event.all_day = true;
        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();

        let key = PatternDayKey::new(minus_five, DEFAULT_DAY_PATTERN).day_key(&event);

        assert_eq!(key, "Mon, Jan 1");
    }

    #[test]
    fn time_label_formats() {
        let event = event_at("a", 1, 14);
        assert_eq!(time_label(&event, true, &Utc), "14:00 - 15:00");
        assert_eq!(time_label(&event, false, &Utc), "2:00 PM - 3:00 PM");

        let mut all_day = event_at("b", 1, 0);
        all_day.all_day = true;
        assert_eq!(time_label(&all_day, true, &Utc), "All day");
    }
}
