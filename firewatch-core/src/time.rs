//! Time Handling
//!
//! The evaluation pipeline is pure apart from one input: the current time.
//! It is read through [`TimeSource`] so that tests and backfill jobs can
//! replay stored history with a fixed clock, while the live ingest path uses
//! the system clock.
//!
//! All timestamps are milliseconds since the Unix epoch. Device boot times
//! arrive in the same unit (the device converts its uptime counter before
//! reporting).

/// Timestamp in milliseconds since the Unix epoch
pub type Timestamp = u64;

/// Source of the current time
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;

    /// Check if this source provides wall clock time (vs a replayed or fixed one)
    fn is_wall_clock(&self) -> bool;
}

/// System time source (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl TimeSource for SystemClock {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime, UNIX_EPOCH};

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }

    fn is_wall_clock(&self) -> bool {
        true
    }
}

/// Fixed time source for tests and history reprocessing
#[derive(Debug, Clone, Copy)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Clock stopped at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Move the clock to `timestamp`
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move the clock forward by `ms`
    pub fn advance(&mut self, ms: u64) {
        self.timestamp = self.timestamp.saturating_add(ms);
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }

    fn is_wall_clock(&self) -> bool {
        false
    }
}

/// Elapsed milliseconds between two timestamps, zero if `later` precedes `earlier`
pub fn elapsed_ms(earlier: Timestamp, later: Timestamp) -> u64 {
    later.saturating_sub(earlier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_time_advances() {
        let mut clock = FixedTime::new(1_000);
        assert_eq!(clock.now(), 1_000);

        clock.advance(500);
        assert_eq!(clock.now(), 1_500);

        clock.set(42);
        assert_eq!(clock.now(), 42);
        assert!(!clock.is_wall_clock());
    }

    #[test]
    fn elapsed_never_negative() {
        assert_eq!(elapsed_ms(100, 350), 250);
        assert_eq!(elapsed_ms(350, 100), 0);
    }

    #[cfg(feature = "std")]
    #[test]
    fn system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now() > 1_577_836_800_000);
        assert!(SystemClock.is_wall_clock());
    }
}
