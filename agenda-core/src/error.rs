//! Error types for agenda operations.

use thiserror::Error;

/// Errors that can occur while building an agenda.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Preferences error: {0}")]
    Preferences(String),

    /// No stored calendar selection for the requested scope.
    #[error("No calendar selection stored for scope '{0}'")]
    ScopeNotFound(String),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
