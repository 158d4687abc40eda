//! Plain data row types written by output backends.

use cm_core::ZoneId;
use cm_sim::{TickReport, format_timestamp};

/// One tick's zone counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneCountRow {
    pub tick:        u64,
    /// ISO-8601 UTC, millisecond precision.
    pub time:        String,
    pub entry:       u32,
    pub main_hall:   u32,
    pub exit:        u32,
    pub parking:     u32,
    pub overcrowded: bool,
}

impl From<&TickReport> for ZoneCountRow {
    fn from(report: &TickReport) -> Self {
        Self {
            tick:        report.tick.0,
            time:        format_timestamp(&report.timestamp),
            entry:       report.zones[ZoneId::Entry],
            main_hall:   report.zones[ZoneId::MainHall],
            exit:        report.zones[ZoneId::Exit],
            parking:     report.zones[ZoneId::Parking],
            overcrowded: report.overcrowded,
        }
    }
}
