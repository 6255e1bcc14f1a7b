//! Core of the agenda tool.
//!
//! - `agenda`: turns sorted events into day-grouped display rows
//! - `screen`: rebuild/tap logic tying preferences, sources and navigation together
//! - `source`, `preferences`, `navigation`: the collaborators behind it

pub mod agenda;
pub mod config;
pub mod error;
pub mod event;
pub mod ics;
pub mod navigation;
pub mod preferences;
pub mod screen;
pub mod source;

pub use agenda::{DayKeyFormat, DisplayRow, PatternDayKey, build_agenda};
pub use error::{AgendaError, AgendaResult};
pub use event::{CalendarRef, Event};
