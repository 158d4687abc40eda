//! `cm-core`: foundational types for the crowd-monitoring simulator.
//!
//! This crate is a dependency of every other `cm-*` crate.  It has no `cm-*`
//! dependencies and only a few external ones (`chrono`, `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`zone`]    | `ZoneId`, `ZoneCounts`, `Zone`, `ZoneGraph`, `SafeLimits` |
//! | [`gate`]    | `GateState`                                               |
//! | [`config`]  | `SimulationConfig`, `AlertTrigger`                        |
//! | [`time`]    | `Tick`, `SimClock`, `RunConfig`                           |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod gate;
pub mod time;
pub mod zone;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AlertTrigger, FESTIVAL_MULTIPLIER, SimulationConfig};
pub use error::{CoreError, CoreResult};
pub use gate::{CLOSED_GATE_FACTOR, GateState};
pub use time::{RunConfig, SimClock, Tick};
pub use zone::{
    DEFAULT_SAFE_LIMIT, MAIN_HALL_CAPACITY, SafeLimits, Zone, ZoneCounts, ZoneGraph, ZoneId,
};
