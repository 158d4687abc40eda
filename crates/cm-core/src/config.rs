//! Flow-control configuration mutated through the controller's public
//! operations.

use crate::ZoneId;

/// Global demand multiplier applied while festival mode is on.
pub const FESTIVAL_MULTIPLIER: f64 = 1.8;

/// When the overcrowding notification fires.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum AlertTrigger {
    /// Notify on every tick that ends overcrowded.
    #[default]
    Level,
    /// Notify only on the Safe → Alert transition.
    Edge,
}

/// Per-tick flow rates and the festival switch.
///
/// Rates are people per tick with all gates open and festival mode off.
/// Negative or non-finite rates are accepted and treated as zero by the flow
/// engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct SimulationConfig {
    pub festival_mode:     bool,
    pub entry_rate:        f64,
    pub exit_rate:         f64,
    pub parking_evac_rate: f64,
    /// Destination used by `redirect_to_target`.
    pub redirect_target:   ZoneId,
}

impl SimulationConfig {
    /// `1.8` in festival mode, `1.0` otherwise.
    #[inline]
    pub fn multiplier(&self) -> f64 {
        if self.festival_mode { FESTIVAL_MULTIPLIER } else { 1.0 }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            festival_mode:     false,
            entry_rate:        30.0,
            exit_rate:         10.0,
            parking_evac_rate: 5.0,
            redirect_target:   ZoneId::MainHall,
        }
    }
}
