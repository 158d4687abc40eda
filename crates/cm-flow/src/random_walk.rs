//! Seeded per-zone jitter, the "live dashboard" flavour of the simulator.
//!
//! Each tick every zone moves by `floor(U(-8, 8) * m * g)` where `m` is the
//! festival multiplier and `g` the zone's gate factor, then floors at zero.
//! Zones are perturbed independently; nothing flows along the graph.  The
//! Main Hall is still clamped to its capacity.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use cm_core::{GateState, MAIN_HALL_CAPACITY, SimulationConfig, ZoneCounts, ZoneId};

use crate::{FlowModel, FlowOutcome};

/// Half-width of the uniform per-tick jitter.
const JITTER: f64 = 8.0;

/// Random-walk [`FlowModel`].  The same seed always yields the same run.
pub struct RandomWalkFlow {
    rng:                    SmallRng,
    pub main_hall_capacity: u32,
}

impl RandomWalkFlow {
    pub fn new(seed: u64) -> Self {
        Self {
            rng:                SmallRng::seed_from_u64(seed),
            main_hall_capacity: MAIN_HALL_CAPACITY,
        }
    }
}

impl FlowModel for RandomWalkFlow {
    fn advance(
        &mut self,
        zones:  &ZoneCounts,
        gates:  &GateState,
        config: &SimulationConfig,
    ) -> FlowOutcome {
        let m = config.multiplier();
        let mut next = *zones;
        for id in ZoneId::ALL {
            let delta = (self.rng.gen_range(-JITTER..JITTER) * m * gates.factor(id)).floor() as i64;
            let count = (i64::from(zones[id]) + delta).max(0);
            next[id] = u32::try_from(count).unwrap_or(u32::MAX);
        }
        next.main_hall = next.main_hall.min(self.main_hall_capacity);
        FlowOutcome { zones: next, flows: None }
    }
}
