//! Terminal rendering of the agenda.

use agenda_core::agenda::{DisplayRow, time_label};
use agenda_core::event::Event;
use agenda_core::screen::AgendaView;
use chrono::Local;
use owo_colors::OwoColorize;

/// Render the whole view: day headers, numbered event rows, or the empty-state text.
pub fn render_view(view: &AgendaView) -> String {
    if let Some(state) = view.empty_state {
        return state.message().dimmed().to_string();
    }

    let mut lines = Vec::new();

    for (position, row) in view.rows.iter().enumerate() {
        match row {
            DisplayRow::Separator(label) => {
                if position > 0 {
                    lines.push(String::new());
                }
                lines.push(label.bold().to_string());
            }
            DisplayRow::Event(event) => {
                lines.push(render_event(position, event, view.settings.use_24_hour));
            }
        }
    }

    lines.join("\n")
}

fn render_event(position: usize, event: &Event, use_24_hour: bool) -> String {
    let number = format!("{:>4}", format!("[{}]", position));
    let time = time_label(event, use_24_hour, &Local);
    let cal_tag = format!("[{}]", event.calendar.name);

    let mut line = format!(
        "{} {:<19} {} {}",
        number.dimmed(),
        time,
        event.title,
        cal_tag.dimmed()
    );
    if let Some(location) = &event.location {
        line.push_str(&format!(" {}", format!("@ {}", location).dimmed()));
    }
    line
}
