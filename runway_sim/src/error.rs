//! Error types for the simulation harness.

use runway_env::SeasonError;
use thiserror::Error;

/// Errors that can occur while preparing, running or exporting seasons.
#[derive(Debug, Error)]
pub enum SimError {
    /// The season refused to start (layout or entrant count)
    #[error("Season error: {0}")]
    Season(#[from] SeasonError),

    /// Reading a roster or writing an export failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Roster or export JSON was malformed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Roster file parsed but is unusable
    #[error("Roster error: {0}")]
    Roster(String),
}

impl SimError {
    /// Creates a roster error.
    pub fn roster(msg: impl Into<String>) -> Self {
        Self::Roster(msg.into())
    }
}
