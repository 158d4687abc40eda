//! Unit tests for cm-flow.

use cm_core::{GateState, SimulationConfig, ZoneCounts};

fn scenario_config() -> SimulationConfig {
    SimulationConfig {
        entry_rate:        30.0,
        exit_rate:         10.0,
        parking_evac_rate: 5.0,
        ..SimulationConfig::default()
    }
}

fn scenario_zones() -> ZoneCounts {
    ZoneCounts::new(80, 120, 60, 40)
}

// ── Deterministic flow ────────────────────────────────────────────────────────

#[cfg(test)]
mod deterministic_tests {
    use super::*;
    use cm_core::{CLOSED_GATE_FACTOR, MAIN_HALL_CAPACITY, ZoneId};

    use crate::{DeterministicFlow, FlowModel, TickFlows, advance, effective_rate};

    #[test]
    fn scenario_all_gates_open() {
        let out = advance(&scenario_zones(), &GateState::default(), &scenario_config(), 300);
        assert_eq!(out.zones, ZoneCounts::new(30, 140, 10, 45));
        assert_eq!(
            out.flows,
            Some(TickFlows {
                entry_flow:     30,
                exit_requested: 10,
                exit_flow:      10,
                evac_requested: 5,
                evac_flow:      5,
            })
        );
    }

    #[test]
    fn scenario_exit_gate_closed() {
        let mut gates = GateState::default();
        gates.toggle(ZoneId::Exit);
        let out = advance(&scenario_zones(), &gates, &scenario_config(), 300);
        let flows = out.flows.unwrap();
        assert_eq!(flows.exit_requested, 3);
        assert_eq!(flows.exit_flow, 3);
        assert_eq!(out.zones.main_hall, 147);
        assert_eq!(out.zones.exit, 3);
        assert_eq!(out.zones.parking, 40 + 3 - 5);
    }

    #[test]
    fn scenario_festival_entry() {
        let config = SimulationConfig { festival_mode: true, ..scenario_config() };
        let out = advance(&scenario_zones(), &GateState::default(), &config, 300);
        assert_eq!(out.flows.unwrap().entry_flow, 54);
        assert_eq!(out.zones.entry, 54);
    }

    #[test]
    fn entry_and_exit_are_gauges_not_accumulators() {
        let mut zones = scenario_zones();
        let mut model = DeterministicFlow::default();
        for _ in 0..5 {
            zones = model.advance(&zones, &GateState::default(), &scenario_config()).zones;
        }
        // Steady flows, so the gauges never grow past one tick's worth.
        assert_eq!(zones.entry, 30);
        assert_eq!(zones.exit, 10);
    }

    #[test]
    fn exit_capped_by_main_hall_occupancy() {
        let zones = ZoneCounts::new(0, 4, 0, 0);
        let config = SimulationConfig { entry_rate: 0.0, exit_rate: 50.0, ..scenario_config() };
        let out = advance(&zones, &GateState::default(), &config, 300);
        assert_eq!(out.zones.exit, 4);
        assert_eq!(out.zones.main_hall, 0);
        assert_eq!(out.zones.parking, 0); // 4 arrive, 5 requested, 4 evacuated
    }

    #[test]
    fn main_hall_clamped_at_capacity() {
        let zones = ZoneCounts::new(0, 295, 0, 0);
        let out = advance(&zones, &GateState::default(), &scenario_config(), MAIN_HALL_CAPACITY);
        assert_eq!(out.zones.main_hall, MAIN_HALL_CAPACITY);
    }

    #[test]
    fn main_hall_above_capacity_is_pulled_back() {
        let zones = ZoneCounts::new(0, 340, 0, 0);
        let out = advance(&zones, &GateState::default(), &scenario_config(), 300);
        assert_eq!(out.zones.main_hall, 300);
    }

    #[test]
    fn negative_and_nan_rates_are_zero() {
        assert_eq!(effective_rate(-12.0, 1.0, 1.0), 0);
        assert_eq!(effective_rate(f64::NAN, 1.0, 1.0), 0);
        assert_eq!(effective_rate(f64::NEG_INFINITY, 1.8, 1.0), 0);
        assert_eq!(effective_rate(-0.4, 1.0, 1.0), 0);
    }

    #[test]
    fn rounding_is_half_up_for_positive_rates() {
        assert_eq!(effective_rate(5.0, 1.0, CLOSED_GATE_FACTOR), 2); // 1.5 → 2
        assert_eq!(effective_rate(1.0, 1.0, CLOSED_GATE_FACTOR), 0); // 0.3 → 0
        assert_eq!(effective_rate(10.0, 1.0, CLOSED_GATE_FACTOR), 3);
    }

    #[test]
    fn closed_gate_never_exceeds_open_gate() {
        for rate in 0..200 {
            let r = rate as f64;
            for m in [1.0, 1.8] {
                let open = effective_rate(r, m, 1.0);
                let closed = effective_rate(r, m, CLOSED_GATE_FACTOR);
                assert!(closed <= open);
                if rate > 0 {
                    assert!(closed < open, "rate {r} m {m}");
                }
            }
        }
    }

    #[test]
    fn festival_scales_by_multiplier() {
        for rate in 0..200 {
            let r = rate as f64;
            let normal = effective_rate(r, 1.0, 1.0);
            let festival = effective_rate(r, 1.8, 1.0);
            assert_eq!(normal, rate);
            assert_eq!(festival, (r * 1.8).round() as u32);
        }
    }

    #[test]
    fn exit_flow_lands_in_parking() {
        let zones = ZoneCounts::new(0, 100, 0, 10);
        let config = SimulationConfig { parking_evac_rate: 0.0, ..scenario_config() };
        let out = advance(&zones, &GateState::default(), &config, 300);
        let removed = zones.main_hall + out.zones.entry - out.zones.main_hall;
        assert_eq!(removed, out.zones.exit);
        assert_eq!(out.zones.parking, zones.parking + out.zones.exit);
    }

    #[test]
    fn invariants_hold_over_random_runs() {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut zones = ZoneCounts::new(
                rng.gen_range(0..400),
                rng.gen_range(0..400),
                rng.gen_range(0..400),
                rng.gen_range(0..400),
            );
            let mut config = SimulationConfig {
                festival_mode:     rng.gen_bool(0.5),
                entry_rate:        rng.gen_range(-20.0..80.0),
                exit_rate:         rng.gen_range(-20.0..80.0),
                parking_evac_rate: rng.gen_range(-20.0..80.0),
                ..SimulationConfig::default()
            };
            let mut gates = GateState::default();
            for tick in 0..100 {
                if tick % 7 == 0 {
                    gates.toggle(ZoneId::ALL[tick % 4]);
                    config.festival_mode = !config.festival_mode;
                }
                let before = zones;
                let out = advance(&zones, &gates, &config, MAIN_HALL_CAPACITY);
                let flows = out.flows.unwrap();
                assert!(flows.exit_flow <= before.main_hall);
                assert!(out.zones.main_hall <= MAIN_HALL_CAPACITY);
                zones = out.zones;
            }
        }
    }
}

// ── Random walk ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod random_walk_tests {
    use super::*;
    use cm_core::MAIN_HALL_CAPACITY;

    use crate::{FlowModel, RandomWalkFlow};

    fn run(seed: u64, ticks: usize, start: ZoneCounts, config: &SimulationConfig) -> Vec<ZoneCounts> {
        let mut model = RandomWalkFlow::new(seed);
        let mut zones = start;
        (0..ticks)
            .map(|_| {
                zones = model.advance(&zones, &GateState::default(), config).zones;
                zones
            })
            .collect()
    }

    #[test]
    fn same_seed_same_run() {
        let config = scenario_config();
        assert_eq!(run(9, 50, scenario_zones(), &config), run(9, 50, scenario_zones(), &config));
    }

    #[test]
    fn step_is_bounded_by_jitter() {
        let config = scenario_config();
        let mut prev = scenario_zones();
        for zones in run(3, 200, scenario_zones(), &config) {
            for (id, count) in zones.iter() {
                let delta = (count as i64 - prev[id] as i64).abs();
                assert!(delta <= 8, "{id} moved by {delta}");
            }
            prev = zones;
        }
    }

    #[test]
    fn main_hall_stays_within_capacity() {
        let config = SimulationConfig { festival_mode: true, ..scenario_config() };
        let start = ZoneCounts::new(0, MAIN_HALL_CAPACITY, 0, 0);
        for zones in run(11, 500, start, &config) {
            assert!(zones.main_hall <= MAIN_HALL_CAPACITY);
        }
    }

    #[test]
    fn floor_at_zero_does_not_wrap() {
        let config = scenario_config();
        // Counts are unsigned; this checks the floor at zero does not wrap.
        for zones in run(5, 200, ZoneCounts::default(), &config) {
            assert!(zones.total() < 4 * 8 * 200);
        }
    }

    #[test]
    fn reports_no_edge_flows() {
        let mut model = RandomWalkFlow::new(1);
        let out = model.advance(&scenario_zones(), &GateState::default(), &scenario_config());
        assert!(out.flows.is_none());
    }
}

// ── Redirect ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod redirect_tests {
    use super::*;
    use cm_core::ZoneId;

    use crate::{REDIRECT_BATCH, REDIRECT_SOURCE, redirect, redirect_shift};

    #[test]
    fn moves_a_full_batch() {
        let zones = scenario_zones();
        let next = redirect(&zones, REDIRECT_SOURCE, ZoneId::Parking);
        assert_eq!(next.main_hall, 120 - REDIRECT_BATCH);
        assert_eq!(next.parking, 40 + REDIRECT_BATCH);
        assert_eq!(next.entry, zones.entry);
        assert_eq!(next.exit, zones.exit);
    }

    #[test]
    fn batch_capped_by_availability() {
        let zones = ZoneCounts::new(0, 7, 0, 0);
        assert_eq!(redirect_shift(&zones, ZoneId::MainHall, ZoneId::Exit), 7);
        let next = redirect(&zones, ZoneId::MainHall, ZoneId::Exit);
        assert_eq!(next.main_hall, 0);
        assert_eq!(next.exit, 7);
    }

    #[test]
    fn same_zone_is_noop() {
        let zones = scenario_zones();
        assert_eq!(redirect(&zones, ZoneId::MainHall, ZoneId::MainHall), zones);
        assert_eq!(redirect_shift(&zones, ZoneId::MainHall, ZoneId::MainHall), 0);
    }

    #[test]
    fn destination_may_overflow_its_limit() {
        let zones = ZoneCounts::new(0, 100, 0, 149);
        let next = redirect(&zones, ZoneId::MainHall, ZoneId::Parking);
        assert_eq!(next.parking, 169);
    }
}

// ── Alerting ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod alert_tests {
    use super::*;
    use cm_core::{AlertTrigger, SafeLimits, ZoneId};

    use crate::{AlertState, AlertTransition, is_overcrowded, overcrowded_zones, should_notify};

    #[test]
    fn main_hall_at_capacity_alerts() {
        let limits = SafeLimits::default();
        assert!(is_overcrowded(&ZoneCounts::new(0, 300, 0, 0), &limits));
        assert!(!is_overcrowded(&ZoneCounts::new(149, 299, 149, 149), &limits));
    }

    #[test]
    fn other_zones_alert_at_150() {
        let limits = SafeLimits::default();
        assert!(is_overcrowded(&ZoneCounts::new(150, 0, 0, 0), &limits));
        assert!(is_overcrowded(&ZoneCounts::new(0, 0, 0, 151), &limits));
        // Main hall between the two limits is still safe.
        assert!(!is_overcrowded(&ZoneCounts::new(0, 200, 0, 0), &limits));
    }

    #[test]
    fn lists_every_zone_over_limit() {
        let limits = SafeLimits::default();
        let zones = ZoneCounts::new(150, 300, 10, 200);
        assert_eq!(
            overcrowded_zones(&zones, &limits),
            vec![ZoneId::Entry, ZoneId::MainHall, ZoneId::Parking]
        );
        assert!(overcrowded_zones(&scenario_zones(), &limits).is_empty());
    }

    #[test]
    fn transitions() {
        use AlertState::{Alert, Safe};
        assert_eq!(AlertTransition::between(Safe, Alert), AlertTransition::Raised);
        assert_eq!(AlertTransition::between(Alert, Alert), AlertTransition::Held);
        assert_eq!(AlertTransition::between(Alert, Safe), AlertTransition::Cleared);
        assert_eq!(AlertTransition::between(Safe, Safe), AlertTransition::Quiet);
    }

    #[test]
    fn level_trigger_fires_while_alert() {
        assert!(should_notify(AlertTrigger::Level, AlertTransition::Raised));
        assert!(should_notify(AlertTrigger::Level, AlertTransition::Held));
        assert!(!should_notify(AlertTrigger::Level, AlertTransition::Cleared));
        assert!(!should_notify(AlertTrigger::Level, AlertTransition::Quiet));
    }

    #[test]
    fn edge_trigger_fires_on_rise_only() {
        assert!(should_notify(AlertTrigger::Edge, AlertTransition::Raised));
        assert!(!should_notify(AlertTrigger::Edge, AlertTransition::Held));
    }
}
