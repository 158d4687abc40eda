//! Per-tick reports and read-only state snapshots.

use chrono::{DateTime, Utc};

use cm_core::{Tick, ZoneCounts, ZoneId};
use cm_flow::{AlertTransition, TickFlows};

/// Everything that happened in one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub tick:        Tick,
    pub timestamp:   DateTime<Utc>,
    pub zones:       ZoneCounts,
    /// Edge flows, when the flow model reports them.
    pub flows:       Option<TickFlows>,
    pub overcrowded: bool,
    /// Zones at or over their safe limit.
    pub over_limit:  Vec<ZoneId>,
    pub transition:  AlertTransition,
    /// Whether the trigger mode asked for a notification this tick.  The
    /// notification itself is skipped when no notifier is available.
    pub notify:      bool,
}

impl TickReport {
    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            ticks:       self.tick.next(),
            timestamp:   self.timestamp,
            zones:       self.zones,
            overcrowded: self.overcrowded,
        }
    }
}

/// A consistent copy of the four zone counts and the alert flag.
///
/// Taken under a single borrow of the controller, so it never mixes
/// pre- and post-tick values.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SimSnapshot {
    /// Number of ticks completed.
    pub ticks:       Tick,
    pub timestamp:   DateTime<Utc>,
    pub zones:       ZoneCounts,
    pub overcrowded: bool,
}
