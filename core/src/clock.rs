//! Live-update clock — owns tick state, refresh period, pause, and the
//! simulated wall time used for renewal countdowns.

use crate::types::{RunId, Tick};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_PERIOD_SECS: u32 = 30;
pub const MAX_PERIOD_SECS: u32 = 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LiveClock {
    pub run_id:       RunId,
    pub current_tick: Tick,
    pub period_secs:  u32,
    pub paused:       bool,
    /// Simulated "now"; advances by one period per tick.
    pub now:          DateTime<Utc>,
}

impl LiveClock {
    pub fn new(run_id: RunId, start: DateTime<Utc>, period_secs: u32) -> Self {
        Self {
            run_id,
            current_tick: 0,
            period_secs: period_secs.clamp(MIN_PERIOD_SECS, MAX_PERIOD_SECS),
            paused: true,
            now: start,
        }
    }

    /// Advance one tick. Returns the new tick number.
    /// Panics if called while paused — callers must check.
    pub fn advance(&mut self) -> Tick {
        assert!(!self.paused, "advance() called on paused clock");
        self.current_tick += 1;
        self.now += Duration::seconds(i64::from(self.period_secs));
        self.current_tick
    }

    pub fn pause(&mut self)  { self.paused = true;  }
    pub fn resume(&mut self) { self.paused = false; }

    pub fn set_period(&mut self, period_secs: u32) {
        self.period_secs = period_secs.clamp(MIN_PERIOD_SECS, MAX_PERIOD_SECS);
    }

    /// Simulated seconds elapsed since tick 0.
    pub fn elapsed_secs(&self) -> u64 {
        self.current_tick * u64::from(self.period_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn advance_moves_time_by_period() {
        let mut clock = LiveClock::new("t".into(), start(), 30);
        clock.resume();
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, 2);
        assert_eq!(clock.now, start() + Duration::seconds(60));
        assert_eq!(clock.elapsed_secs(), 60);
    }

    #[test]
    fn period_is_clamped_to_refresh_window() {
        let clock = LiveClock::new("t".into(), start(), 5);
        assert_eq!(clock.period_secs, MIN_PERIOD_SECS);
        let mut clock = LiveClock::new("t".into(), start(), 600);
        assert_eq!(clock.period_secs, MAX_PERIOD_SECS);
        clock.set_period(45);
        assert_eq!(clock.period_secs, 45);
    }

    #[test]
    #[should_panic(expected = "paused clock")]
    fn advance_while_paused_panics() {
        let mut clock = LiveClock::new("t".into(), start(), 30);
        clock.advance();
    }
}
