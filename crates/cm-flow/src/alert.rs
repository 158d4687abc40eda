//! Overcrowding evaluation.
//!
//! The predicate is stateless: a zone is over its limit when
//! `count >= limit`.  The Safe/Alert state machine has no hysteresis and no
//! cool-down; each tick's state is recomputed from that tick's counts alone.
//! The only memory is the previous tick's state, held by the caller, which is
//! needed to classify the [`AlertTransition`].

use cm_core::{AlertTrigger, SafeLimits, ZoneCounts, ZoneId};

/// True iff at least one zone is at or over its safe limit.
pub fn is_overcrowded(zones: &ZoneCounts, limits: &SafeLimits) -> bool {
    zones.iter().any(|(id, count)| count >= limits.limit(id))
}

/// Every zone at or over its safe limit, in topological order.
pub fn overcrowded_zones(zones: &ZoneCounts, limits: &SafeLimits) -> Vec<ZoneId> {
    zones
        .iter()
        .filter(|&(id, count)| count >= limits.limit(id))
        .map(|(id, _)| id)
        .collect()
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum AlertState {
    #[default]
    Safe,
    Alert,
}

impl AlertState {
    #[inline]
    pub fn from_overcrowded(overcrowded: bool) -> Self {
        if overcrowded { AlertState::Alert } else { AlertState::Safe }
    }

    #[inline]
    pub fn is_alert(self) -> bool {
        self == AlertState::Alert
    }
}

/// How the alert state changed between two consecutive ticks.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum AlertTransition {
    /// Safe → Alert.
    Raised,
    /// Alert → Alert.
    Held,
    /// Alert → Safe.
    Cleared,
    /// Safe → Safe.
    Quiet,
}

impl AlertTransition {
    pub fn between(prev: AlertState, now: AlertState) -> Self {
        match (prev, now) {
            (AlertState::Safe,  AlertState::Alert) => AlertTransition::Raised,
            (AlertState::Alert, AlertState::Alert) => AlertTransition::Held,
            (AlertState::Alert, AlertState::Safe)  => AlertTransition::Cleared,
            (AlertState::Safe,  AlertState::Safe)  => AlertTransition::Quiet,
        }
    }
}

/// Whether the notification should fire for `transition` under `trigger`.
///
/// `Level` fires on every tick that ends in Alert; `Edge` only on `Raised`.
#[inline]
pub fn should_notify(trigger: AlertTrigger, transition: AlertTransition) -> bool {
    match trigger {
        AlertTrigger::Level => {
            matches!(transition, AlertTransition::Raised | AlertTransition::Held)
        }
        AlertTrigger::Edge => transition == AlertTransition::Raised,
    }
}
