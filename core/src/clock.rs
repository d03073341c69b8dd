//! Simulation clock — owns tick state and simulated wall time.

use crate::types::Tick;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimClock {
    pub current_tick:     Tick,
    pub tick_interval_ms: u64,
    /// Simulated wall time at tick 0.
    pub started_at:       NaiveDateTime,
}

impl SimClock {
    pub fn new(started_at: NaiveDateTime, tick_interval_ms: u64) -> Self {
        Self {
            current_tick: 0,
            tick_interval_ms,
            started_at,
        }
    }

    /// Advance one tick. Returns the new tick number.
    pub fn advance(&mut self) -> Tick {
        self.current_tick += 1;
        self.current_tick
    }

    /// Simulated wall time of the current tick.
    pub fn now(&self) -> NaiveDateTime {
        let elapsed_ms = self.current_tick.saturating_mul(self.tick_interval_ms);
        let elapsed = Duration::milliseconds(i64::try_from(elapsed_ms).unwrap_or(i64::MAX));
        self.started_at
            .checked_add_signed(elapsed)
            .unwrap_or(self.started_at)
    }

    /// `10:42 AM` style, used on alert log entries.
    pub fn hour_minute(&self) -> String {
        self.now().format("%I:%M %p").to_string()
    }

    /// `10:42:05` style, used on transparency entries.
    pub fn hour_minute_second(&self) -> String {
        self.now().format("%H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .and_then(|d| d.and_hms_opt(10, 42, 0))
            .expect("valid date")
    }

    #[test]
    fn timestamps_follow_ticks() {
        let mut clock = SimClock::new(start(), 2000);
        assert_eq!(clock.hour_minute(), "10:42 AM");
        for _ in 0..30 {
            clock.advance();
        }
        assert_eq!(clock.hour_minute(), "10:43 AM");
        assert_eq!(clock.hour_minute_second(), "10:43:00");
    }
}
