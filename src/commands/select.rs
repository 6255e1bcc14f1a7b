use agenda_core::preferences::{SELECTED_CALENDARS, Scope};
use agenda_core::source::CalendarSource;
use anyhow::Result;

use super::Workspace;

pub fn run(slugs: Vec<String>, widget: Option<i32>) -> Result<()> {
    let mut ws = Workspace::load()?;
    let available = ws.source.calendars()?;

    for slug in &slugs {
        if !available.iter().any(|c| &c.slug == slug) {
            let names: Vec<_> = available.iter().map(|c| c.slug.clone()).collect();
            anyhow::bail!(
                "Calendar '{}' not found. Available: {}",
                slug,
                names.join(", ")
            );
        }
    }

    let scope = Scope::for_launch(widget);
    ws.prefs.set_string_list(&scope, SELECTED_CALENDARS, &slugs);
    ws.prefs.save()?;

    if slugs.is_empty() {
        println!("Cleared calendar selection for {}", scope);
    } else {
        println!("Selected for {}: {}", scope, slugs.join(", "));
    }

    Ok(())
}
