//! Operator-controlled gate state.

use crate::ZoneId;

/// Throughput factor applied to a closed gate.  Gates never fully block flow.
pub const CLOSED_GATE_FACTOR: f64 = 0.3;

/// Open/closed flag for each gated zone (entry, exit, parking).
///
/// The Main Hall has no gate: it always reports open and cannot be toggled.
/// All gates start open.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GateState {
    pub entry:   bool,
    pub exit:    bool,
    pub parking: bool,
}

impl GateState {
    /// Every gate open.
    pub const ALL_OPEN: GateState = GateState { entry: true, exit: true, parking: true };

    #[inline]
    pub fn is_open(&self, id: ZoneId) -> bool {
        match id {
            ZoneId::Entry    => self.entry,
            ZoneId::MainHall => true,
            ZoneId::Exit     => self.exit,
            ZoneId::Parking  => self.parking,
        }
    }

    /// `1.0` when open, [`CLOSED_GATE_FACTOR`] when closed.
    #[inline]
    pub fn factor(&self, id: ZoneId) -> f64 {
        if self.is_open(id) { 1.0 } else { CLOSED_GATE_FACTOR }
    }

    /// Set a gate.  Returns `false` (and does nothing) for the Main Hall.
    pub fn set(&mut self, id: ZoneId, open: bool) -> bool {
        match self.slot(id) {
            Some(slot) => {
                *slot = open;
                true
            }
            None => false,
        }
    }

    /// Flip a gate and return its new state, or `None` for the Main Hall.
    pub fn toggle(&mut self, id: ZoneId) -> Option<bool> {
        let slot = self.slot(id)?;
        *slot = !*slot;
        Some(*slot)
    }

    fn slot(&mut self, id: ZoneId) -> Option<&mut bool> {
        match id {
            ZoneId::Entry    => Some(&mut self.entry),
            ZoneId::MainHall => None,
            ZoneId::Exit     => Some(&mut self.exit),
            ZoneId::Parking  => Some(&mut self.parking),
        }
    }
}

impl Default for GateState {
    fn default() -> Self {
        Self::ALL_OPEN
    }
}
