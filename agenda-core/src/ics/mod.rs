//! ICS reading for the local calendar directory.

mod parse;

pub use parse::parse_event;
