//! ICS file parsing using the icalendar crate's parser.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{read_calendar, unfold},
};

use crate::event::{CalendarRef, Event};

/// Parse the first VEVENT of an ICS document into an [`Event`] of `calendar`.
///
/// Recurrence rules are not expanded; a recurring event shows up once, at its
/// DTSTART.
pub fn parse_event(content: &str, calendar: &CalendarRef) -> Option<Event> {
    let unfolded = unfold(content);
    let ical = read_calendar(&unfolded).ok()?;
    let vevent = ical.components.iter().find(|c| c.name == "VEVENT")?;

    let id = vevent.find_prop("UID")?.val.to_string();
    let title = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| "(No title)".to_string());
    let location = vevent.find_prop("LOCATION").map(|p| p.val.to_string());

    let (start, all_day) = to_utc(DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?);

    // DTEND is optional: all-day events then last one day, timed events are instants
    let end = match vevent
        .find_prop("DTEND")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
    {
        Some(dpt) => to_utc(dpt).0,
        None if all_day => start + Duration::days(1),
        None => start,
    };

    Some(Event {
        id,
        title,
        start,
        end,
        calendar: calendar.clone(),
        all_day,
        location,
        source: None,
    })
}

/// Resolve an ICS time to a UTC instant, flagging date-only values.
fn to_utc(dpt: DatePerhapsTime) -> (DateTime<Utc>, bool) {
    match dpt {
        DatePerhapsTime::Date(d) => (date_to_utc(d), true),
        DatePerhapsTime::DateTime(cal_dt) => {
            let utc = match cal_dt {
                CalendarDateTime::Utc(dt) => dt,
                CalendarDateTime::Floating(naive) => local_to_utc(&Local, naive),
                CalendarDateTime::WithTimezone { date_time, tzid } => match tzid.parse::<Tz>() {
                    Ok(tz) => local_to_utc(&tz, date_time),
                    Err(_) => local_to_utc(&Local, date_time),
                },
            };
            (utc, false)
        }
    }
}

fn date_to_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Wall-clock time in `tz` to UTC. Times skipped by a DST jump are read as UTC.
fn local_to_utc<Z: TimeZone>(tz: &Z, naive: NaiveDateTime) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}
