//! Wall-clock abstraction for result metadata.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Supplies the generation timestamp attached to a season result.
///
/// The timestamp is for audit only; no pipeline stage reads it. Tests that
/// compare whole results inject a `FixedClock`.
pub trait Clock {
    /// Returns the current wall-clock time.
    fn system_time(&self) -> SystemTime;

    /// Milliseconds since the Unix epoch (0 for pre-epoch clocks).
    fn unix_millis(&self) -> u64 {
        self.system_time()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn system_time(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: SystemTime,
}

impl FixedClock {
    /// Creates a clock frozen at `at`.
    pub fn new(at: SystemTime) -> Self {
        Self { at }
    }

    /// Creates a clock frozen `millis` after the Unix epoch.
    pub fn from_unix_millis(millis: u64) -> Self {
        Self::new(UNIX_EPOCH + Duration::from_millis(millis))
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        // 2024-01-01 00:00:00 UTC
        Self::from_unix_millis(1_704_067_200_000)
    }
}

impl Clock for FixedClock {
    fn system_time(&self) -> SystemTime {
        self.at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_millis() {
        let clock = FixedClock::from_unix_millis(1_234);
        assert_eq!(clock.unix_millis(), 1_234);
        assert_eq!(clock.unix_millis(), 1_234);
    }

    #[test]
    fn test_fixed_clock_default_epoch() {
        assert_eq!(FixedClock::default().unix_millis(), 1_704_067_200_000);
    }

    #[test]
    fn test_system_clock_after_2024() {
        assert!(SystemClock.unix_millis() > 1_704_067_200_000);
    }
}
