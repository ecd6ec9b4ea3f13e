//! Error types shared by the Runway crates.

use thiserror::Error;

/// Errors raised before a season starts drawing.
///
/// Once validation passes the pipeline has no failure states.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeasonError {
    /// Competitor count does not match `bracket_count * bracket_size`
    #[error("Configuration mismatch: expected {expected} competitors, got {actual}")]
    ConfigurationMismatch { expected: usize, actual: usize },

    /// Bracket layout the pipeline cannot run
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Replay sequence that cannot honor the `[0, 1)` contract
    #[error("Invalid replay sequence: {0}")]
    InvalidReplay(String),
}

impl SeasonError {
    /// Creates a count mismatch error.
    pub fn mismatch(expected: usize, actual: usize) -> Self {
        Self::ConfigurationMismatch { expected, actual }
    }

    /// Creates an invalid layout error.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::InvalidLayout(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_names_both_counts() {
        let msg = SeasonError::mismatch(18, 17).to_string();
        assert!(msg.contains("18"));
        assert!(msg.contains("17"));
    }
}
