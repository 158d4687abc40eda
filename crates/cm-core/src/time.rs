//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  The mapping to
//! wall-clock time is held in `SimClock`:
//!
//!   wall_time_ms = start_unix_ms + tick * tick_period_ms
//!
//! The default period is 3,000 ms.  Timestamps derived from the clock are
//! exact and strictly increasing, which keeps the history log ordered even
//! when ticks are stepped faster than real time.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::AlertTrigger;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and Unix wall-clock milliseconds.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Unix timestamp (ms since epoch) of tick 0.
    pub start_unix_ms:  i64,
    /// Milliseconds one tick represents.
    pub tick_period_ms: u64,
    /// Number of ticks completed so far.
    pub current_tick:   Tick,
}

impl SimClock {
    pub fn new(start_unix_ms: i64, tick_period_ms: u64) -> Self {
        Self { start_unix_ms, tick_period_ms, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.next();
    }

    #[inline]
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Unix milliseconds at the end of `tick` (i.e. when it was captured).
    #[inline]
    pub fn unix_ms_at(&self, tick: Tick) -> i64 {
        let elapsed = (tick.0 + 1).saturating_mul(self.tick_period_ms);
        self.start_unix_ms.saturating_add(i64::try_from(elapsed).unwrap_or(i64::MAX))
    }

    /// UTC timestamp at the end of `tick`.
    pub fn timestamp_at(&self, tick: Tick) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.unix_ms_at(tick)).unwrap_or_default()
    }

    /// UTC timestamp of the current position (tick 0 maps to the start).
    pub fn now(&self) -> DateTime<Utc> {
        let elapsed = self.current_tick.0.saturating_mul(self.tick_period_ms);
        let ms = self.start_unix_ms.saturating_add(i64::try_from(elapsed).unwrap_or(i64::MAX));
        DateTime::from_timestamp_millis(ms).unwrap_or_default()
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_tick, self.now().format("%H:%M:%S"))
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Run-level settings: timer period, history retention, alert trigger mode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RunConfig {
    /// Unix ms of tick 0.  Defaults to the current wall-clock time.
    pub start_unix_ms:    i64,
    /// Period of the tick timer.  Default: 3000 ms.
    pub tick_period_ms:   u64,
    /// Number of history entries retained.  Default: 200.
    pub history_capacity: usize,
    pub alert_trigger:    AlertTrigger,
}

impl RunConfig {
    pub const DEFAULT_TICK_PERIOD_MS: u64 = 3_000;
    pub const DEFAULT_HISTORY_CAPACITY: usize = 200;

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_ms, self.tick_period_ms)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            start_unix_ms:    Utc::now().timestamp_millis(),
            tick_period_ms:   Self::DEFAULT_TICK_PERIOD_MS,
            history_capacity: Self::DEFAULT_HISTORY_CAPACITY,
            alert_trigger:    AlertTrigger::default(),
        }
    }
}
