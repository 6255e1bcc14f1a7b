use std::collections::HashSet;

use agenda_core::preferences::{Scope, selected_calendars};
use agenda_core::source::CalendarSource;
use anyhow::Result;
use owo_colors::OwoColorize;

use super::Workspace;

pub fn run(widget: Option<i32>) -> Result<()> {
    let ws = Workspace::load()?;
    let calendars = ws.source.calendars()?;

    if calendars.is_empty() {
        println!(
            "{}",
            format!("No calendars found in {}", ws.source.root().display()).dimmed()
        );
        return Ok(());
    }

    let scope = Scope::for_launch(widget);
    let selected =
        selected_calendars(&ws.prefs, &scope, &calendars).unwrap_or_else(|_| HashSet::new());

    for calendar in &calendars {
        let marker = if selected.contains(calendar) { "*" } else { " " };
        if calendar.name == calendar.slug {
            println!("{} {}", marker.green(), calendar.slug);
        } else {
            println!(
                "{} {} {}",
                marker.green(),
                calendar.slug,
                format!("({})", calendar).dimmed()
            );
        }
    }

    Ok(())
}
