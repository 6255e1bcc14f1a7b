//! Where agenda events come from.

mod ics_dir;

use std::collections::HashSet;

use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone, Utc};

use crate::error::AgendaResult;
use crate::event::{CalendarRef, Event};

pub use ics_dir::IcsDirectory;

/// Time span the agenda covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl EventWindow {
    /// `days` days starting at `now`, ending no later than the last representable instant.
    pub fn starting_at(now: DateTime<Utc>, days: u32) -> Self {
        let to = now
            .checked_add_signed(Duration::days(i64::from(days)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        EventWindow { from: now, to }
    }

    /// Events still running at `from` are included.
    pub fn contains(&self, event: &Event) -> bool {
        event.overlaps(self.from, self.to)
    }
}

/// Read access to calendars and their events.
pub trait CalendarSource {
    /// All calendars the user could select.
    fn calendars(&self) -> AgendaResult<Vec<CalendarRef>>;

    /// Events of the `selected` calendars inside `window`, sorted by start.
    ///
    /// An empty selection yields no events.
    fn events(
        &self,
        window: &EventWindow,
        selected: &HashSet<CalendarRef>,
    ) -> AgendaResult<Vec<Event>>;
}

/// Sort events for display in the system time zone. See [`sort_events_in`].
pub fn sort_events(events: &mut [Event]) {
    sort_events_in(events, &Local);
}

/// Sort events for display in `tz`.
///
/// All-day events sort from midnight of their date in `tz`, ahead of timed
/// events starting at the same instant. Remaining ties are broken by end,
/// title, calendar, id and source file so the order never depends on the
/// order events were read in.
pub fn sort_events_in<Tz: TimeZone>(events: &mut [Event], tz: &Tz) {
    events.sort_by(|a, b| {
        display_start(a, tz)
            .cmp(&display_start(b, tz))
            .then_with(|| b.all_day.cmp(&a.all_day))
            .then_with(|| a.end.cmp(&b.end))
            .then_with(|| a.title.cmp(&b.title))
            .then_with(|| a.calendar.slug.cmp(&b.calendar.slug))
            .then_with(|| a.id.cmp(&b.id))
            .then_with(|| a.source.cmp(&b.source))
    });
}

/// Instant an event starts at on a clock in `tz`.
fn display_start<Tz: TimeZone>(event: &Event, tz: &Tz) -> DateTime<Utc> {
    if !event.all_day {
        return event.start;
    }

    let midnight = event.start.date_naive().and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(event.start)
}
