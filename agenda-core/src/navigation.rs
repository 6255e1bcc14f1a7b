//! Opening an event in an external calendar application.

use thiserror::Error;
use tracing::{debug, warn};

use crate::event::Event;

/// Base URI for events that have no file of their own.
pub const EVENTS_CONTENT_URI: &str = "content://com.android.calendar/events";

/// Request to view one event in whatever application handles it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewIntent {
    pub event_id: String,
    /// Event start, epoch milliseconds
    pub begin_time: i64,
    /// Event end, epoch milliseconds
    pub end_time: i64,
    /// What the handler is asked to open
    pub data: String,
}

impl ViewIntent {
    pub fn for_event(event: &Event) -> Self {
        let data = match &event.source {
            Some(path) => path.display().to_string(),
            None => format!("{EVENTS_CONTENT_URI}/{}", event.id),
        };

        ViewIntent {
            event_id: event.id.clone(),
            begin_time: event.start.timestamp_millis(),
            end_time: event.end.timestamp_millis(),
            data,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No application can open event '{event_id}'")]
pub struct NoHandlerFound {
    pub event_id: String,
}

/// Dispatches view requests for events.
pub trait Navigator {
    fn open_event(&self, event: &Event) -> Result<(), NoHandlerFound>;
}

/// Hands events to the operating system's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemNavigator;

impl Navigator for SystemNavigator {
    fn open_event(&self, event: &Event) -> Result<(), NoHandlerFound> {
        let intent = ViewIntent::for_event(event);
        debug!(?intent, "opening event");

        open::that(&intent.data).map_err(|e| {
            warn!(data = %intent.data, error = %e, "no handler for event");
            NoHandlerFound {
                event_id: intent.event_id.clone(),
            }
        })
    }
}
