//! Unit tests for cm-core primitives.

#[cfg(test)]
mod zones {
    use crate::{SafeLimits, ZoneCounts, ZoneGraph, ZoneId};

    #[test]
    fn parse_round_trip() {
        for id in ZoneId::ALL {
            assert_eq!(id.as_str().parse::<ZoneId>().unwrap(), id);
        }
    }

    #[test]
    fn parse_unknown_errors() {
        assert!("lobby".parse::<ZoneId>().is_err());
        assert!("MainHall".parse::<ZoneId>().is_err()); // ids are case-sensitive
    }

    #[test]
    fn index_matches_all_order() {
        for (i, id) in ZoneId::ALL.into_iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn only_main_hall_is_ungated() {
        assert!(!ZoneId::MainHall.has_gate());
        assert!(ZoneId::Entry.has_gate());
        assert!(ZoneId::Exit.has_gate());
        assert!(ZoneId::Parking.has_gate());
    }

    #[test]
    fn counts_indexing() {
        let mut z = ZoneCounts::initial();
        assert_eq!(z[ZoneId::MainHall], 120);
        z[ZoneId::Parking] += 5;
        assert_eq!(z.parking, 45);
        assert_eq!(z.total(), 80 + 120 + 60 + 45);
    }

    #[test]
    fn zones_carry_limits() {
        let zones = ZoneCounts::new(1, 300, 3, 150).zones(&SafeLimits::default());
        assert_eq!(zones[1].name, "Main Hall");
        assert_eq!(zones[1].capacity, 300);
        assert!(zones[1].is_over_limit());
        assert_eq!(zones[0].capacity, 150);
        assert!(!zones[0].is_over_limit());
        assert!(zones[3].is_over_limit());
    }

    #[test]
    fn graph_is_a_chain() {
        assert_eq!(ZoneGraph::downstream(ZoneId::Entry), Some(ZoneId::MainHall));
        assert_eq!(ZoneGraph::downstream(ZoneId::Exit), Some(ZoneId::Parking));
        assert_eq!(ZoneGraph::downstream(ZoneId::Parking), None);
        assert_eq!(ZoneGraph::upstream(ZoneId::Entry), None);
        assert!(ZoneGraph::has_edge(ZoneId::MainHall, ZoneId::Exit));
        assert!(!ZoneGraph::has_edge(ZoneId::Exit, ZoneId::MainHall));
    }
}

#[cfg(test)]
mod gates {
    use crate::{CLOSED_GATE_FACTOR, GateState, ZoneId};

    #[test]
    fn default_all_open() {
        let g = GateState::default();
        assert!(ZoneId::ALL.into_iter().all(|z| g.is_open(z)));
    }

    #[test]
    fn toggle_flips_gated_zones() {
        let mut g = GateState::default();
        assert_eq!(g.toggle(ZoneId::Exit), Some(false));
        assert!(!g.is_open(ZoneId::Exit));
        assert_eq!(g.factor(ZoneId::Exit), CLOSED_GATE_FACTOR);
        assert_eq!(g.toggle(ZoneId::Exit), Some(true));
        assert_eq!(g.factor(ZoneId::Exit), 1.0);
    }

    #[test]
    fn main_hall_cannot_be_closed() {
        let mut g = GateState::default();
        assert_eq!(g.toggle(ZoneId::MainHall), None);
        assert!(!g.set(ZoneId::MainHall, false));
        assert!(g.is_open(ZoneId::MainHall));
    }
}

#[cfg(test)]
mod config {
    use crate::{FESTIVAL_MULTIPLIER, SimulationConfig, ZoneId};

    #[test]
    fn multiplier_follows_festival_flag() {
        let mut c = SimulationConfig::default();
        assert_eq!(c.multiplier(), 1.0);
        c.festival_mode = true;
        assert_eq!(c.multiplier(), FESTIVAL_MULTIPLIER);
    }

    #[test]
    fn default_redirect_target_is_main_hall() {
        assert_eq!(SimulationConfig::default().redirect_target, ZoneId::MainHall);
    }
}

#[cfg(test)]
mod time {
    use crate::{RunConfig, SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick(10) + 5, Tick(15));
        assert_eq!(Tick(3).next(), Tick(4));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(7).to_string(), "T7");
    }

    #[test]
    fn timestamps_are_end_of_tick() {
        let clock = SimClock::new(1_000, 3_000);
        assert_eq!(clock.unix_ms_at(Tick(0)), 4_000);
        assert_eq!(clock.unix_ms_at(Tick(9)), 31_000);
        assert_eq!(clock.timestamp_at(Tick(0)).timestamp_millis(), 4_000);
    }

    #[test]
    fn clock_now_advances() {
        let mut clock = SimClock::new(0, 3_000);
        assert_eq!(clock.now().timestamp_millis(), 0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert_eq!(clock.now().timestamp_millis(), 6_000);
    }

    #[test]
    fn run_config_defaults() {
        let rc = RunConfig::default();
        assert_eq!(rc.tick_period_ms, 3_000);
        assert_eq!(rc.history_capacity, 200);
        assert_eq!(rc.make_clock().period().as_millis(), 3_000);
    }
}
