//! The deterministic Entry → Main Hall → Exit → Parking flow model.
//!
//! # Per-tick algorithm
//!
//! ```text
//! m            = festival ? 1.8 : 1.0
//! entry_flow   = rate(entry_rate,        gate(entry))
//! exit_req     = rate(exit_rate,         gate(exit))
//! evac_req     = rate(parking_evac_rate, gate(parking))
//! exit_flow    = min(exit_req, main_hall)
//! main_hall'   = clamp(main_hall + entry_flow - exit_flow, 0, capacity)
//! parking_in   = parking + exit_flow
//! parking'     = parking_in - min(evac_req, parking_in)
//! entry'       = entry_flow          (gauge, not an accumulator)
//! exit'        = exit_flow           (gauge, not an accumulator)
//! ```
//!
//! where `rate(r, g) = max(0, round(r * m * g))` and `g` is 1.0 for an open
//! gate, 0.3 for a closed one.

use tracing::trace;

use cm_core::{
    GateState, MAIN_HALL_CAPACITY, SimulationConfig, ZoneCounts, ZoneGraph, ZoneId,
};

use crate::{FlowModel, FlowOutcome, TickFlows};

/// People per tick after applying the demand multiplier and gate factor.
///
/// Rounds half away from zero, then floors at zero.  Negative, NaN and
/// infinite-negative rates yield 0; the result saturates at `u32::MAX`.
#[inline]
pub fn effective_rate(rate: f64, multiplier: f64, gate_factor: f64) -> u32 {
    let people = (rate * multiplier * gate_factor).round();
    if people.is_nan() || people <= 0.0 {
        0
    } else {
        // Float → int `as` casts saturate.
        people as u32
    }
}

/// Advance `zones` one tick with the Main Hall clamped to `main_hall_capacity`.
pub fn advance(
    zones:              &ZoneCounts,
    gates:              &GateState,
    config:             &SimulationConfig,
    main_hall_capacity: u32,
) -> FlowOutcome {
    let m = config.multiplier();
    let entry_flow     = effective_rate(config.entry_rate, m, gates.factor(ZoneId::Entry));
    let exit_requested = effective_rate(config.exit_rate, m, gates.factor(ZoneId::Exit));
    let evac_requested = effective_rate(config.parking_evac_rate, m, gates.factor(ZoneId::Parking));

    debug_assert_eq!(ZoneGraph::downstream(ZoneId::MainHall), Some(ZoneId::Exit));
    debug_assert_eq!(ZoneGraph::downstream(ZoneId::Exit), Some(ZoneId::Parking));

    // Nobody leaves who is not there.
    let exit_flow = exit_requested.min(zones.main_hall);

    let main_hall = (u64::from(zones.main_hall) + u64::from(entry_flow) - u64::from(exit_flow))
        .min(u64::from(main_hall_capacity)) as u32;

    let parking_in = zones.parking.saturating_add(exit_flow);
    let evac_flow  = evac_requested.min(parking_in);
    let parking    = parking_in - evac_flow;

    trace!(entry_flow, exit_flow, evac_flow, main_hall, parking, "flow step");

    FlowOutcome {
        zones: ZoneCounts {
            entry: entry_flow,
            main_hall,
            exit: exit_flow,
            parking,
        },
        flows: Some(TickFlows {
            entry_flow,
            exit_requested,
            exit_flow,
            evac_requested,
            evac_flow,
        }),
    }
}

/// [`FlowModel`] wrapper around [`advance`].  Stateless apart from the Main
/// Hall capacity.
#[derive(Copy, Clone, Debug)]
pub struct DeterministicFlow {
    pub main_hall_capacity: u32,
}

impl Default for DeterministicFlow {
    fn default() -> Self {
        Self { main_hall_capacity: MAIN_HALL_CAPACITY }
    }
}

impl FlowModel for DeterministicFlow {
    fn advance(
        &mut self,
        zones:  &ZoneCounts,
        gates:  &GateState,
        config: &SimulationConfig,
    ) -> FlowOutcome {
        advance(zones, gates, config, self.main_hall_capacity)
    }
}
