//! `cm-flow`: the pure simulation step functions.
//!
//! Everything here is a total function of its inputs (the random-walk model
//! aside, which owns a seeded RNG).  Nothing in this crate touches the
//! controller, the clock, or any I/O.
//!
//! | Module              | Contents                                            |
//! |---------------------|-----------------------------------------------------|
//! | [`model`]           | `FlowModel` trait, `FlowOutcome`, `TickFlows`       |
//! | [`deterministic`]   | `DeterministicFlow`, `effective_rate`               |
//! | [`random_walk`]     | `RandomWalkFlow`: seeded per-zone jitter           |
//! | [`redirect`]        | one-shot manual transfer between zones              |
//! | [`alert`]           | overcrowding predicate and alert state machine      |

pub mod alert;
pub mod deterministic;
pub mod model;
pub mod random_walk;
pub mod redirect;

#[cfg(test)]
mod tests;

pub use alert::{AlertState, AlertTransition, is_overcrowded, overcrowded_zones, should_notify};
pub use deterministic::{DeterministicFlow, advance, effective_rate};
pub use model::{FlowModel, FlowOutcome, TickFlows};
pub use random_walk::RandomWalkFlow;
pub use redirect::{REDIRECT_BATCH, REDIRECT_SOURCE, redirect, redirect_shift};
