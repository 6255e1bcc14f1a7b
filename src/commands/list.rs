use agenda_core::PatternDayKey;
use agenda_core::navigation::SystemNavigator;
use agenda_core::screen::{AgendaScreen, LaunchContext};
use anyhow::Result;

use super::Workspace;
use crate::render::render_view;

pub fn run(widget: Option<i32>, json: bool) -> Result<()> {
    let ws = Workspace::load()?;
    let day_key = PatternDayKey::local();
    let launch = LaunchContext {
        origin_widget_id: widget,
    };

    let mut screen = AgendaScreen::new(&ws.source, &ws.prefs, &SystemNavigator, &day_key, launch);
    let view = screen.rebuild()?;

    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        println!("{}", render_view(view));
    }

    Ok(())
}
