use agenda_core::PatternDayKey;
use agenda_core::navigation::SystemNavigator;
use agenda_core::screen::{AgendaScreen, LaunchContext, TapOutcome};
use anyhow::Result;
use owo_colors::OwoColorize;

use super::Workspace;

pub fn run(row: usize, widget: Option<i32>) -> Result<()> {
    let ws = Workspace::load()?;
    let day_key = PatternDayKey::local();
    let launch = LaunchContext {
        origin_widget_id: widget,
    };

    let mut screen = AgendaScreen::new(&ws.source, &ws.prefs, &SystemNavigator, &day_key, launch);
    screen.rebuild()?;

    match screen.tap(row) {
        TapOutcome::Opened => {
            if let Some(event) = screen.view().rows.get(row).and_then(|r| r.as_event()) {
                println!("Opened {}", event.title.bold());
            }
        }
        TapOutcome::Notice(notice) => eprintln!("{}", notice.yellow()),
        TapOutcome::Ignored if !screen.settings().open_on_tap => {
            eprintln!(
                "{}",
                "Opening events is turned off. Enable it with `agenda set enable-click-event true`"
                    .dimmed()
            );
        }
        TapOutcome::Ignored => {
            anyhow::bail!("Row {} is not an event. Run `agenda list` to see row numbers", row);
        }
    }

    Ok(())
}
