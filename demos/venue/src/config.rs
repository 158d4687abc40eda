//! JSON run configuration.
//!
//! ```json
//! {
//!   "simulation": { "festivalMode": false, "entryRate": 30, "exitRate": 10 },
//!   "run":        { "tickPeriodMs": 3000, "historyCapacity": 200, "alertTrigger": "edge" },
//!   "initialZones": { "entry": 80, "mainHall": 120, "exit": 60, "parking": 40 }
//! }
//! ```
//!
//! Every section is optional.  Within `simulation` and `run` every field is
//! optional too; `initialZones` and `limits` must be given in full.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use cm_core::{RunConfig, SafeLimits, SimulationConfig, ZoneCounts};

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VenueConfig {
    pub simulation:    SimulationConfig,
    pub run:           RunConfig,
    pub initial_zones: ZoneCounts,
    pub limits:        SafeLimits,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            simulation:    SimulationConfig::default(),
            run:           RunConfig::default(),
            initial_zones: ZoneCounts::initial(),
            limits:        SafeLimits::default(),
        }
    }
}

impl VenueConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
