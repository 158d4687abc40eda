//! `cm-sim`: the simulation controller and its tick loop.
//!
//! # Tick pipeline
//!
//! ```text
//! tick():
//!   ① Flow     : FlowModel::advance(zones, gates, config) → next zones
//!   ② Publish  : next zones replace the live state in one assignment
//!   ③ Alert    : recompute Safe/Alert from the new counts
//!   ④ History  : append {timestamp, counts} (ring buffer, oldest dropped)
//!   ⑤ Notify   : call the AlertNotifier if the trigger mode says so
//! ```
//!
//! Configuration changes made between ticks apply from the next tick on;
//! redirects apply to the live zones immediately.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cm_core::SimulationConfig;
//! use cm_sim::{ControllerBuilder, LogNotifier, NoopObserver};
//!
//! let mut ctrl = ControllerBuilder::new(SimulationConfig::default())
//!     .notifier(LogNotifier)
//!     .build()?;
//! ctrl.run_ticks(20, &mut NoopObserver);
//! let export = ctrl.export_history()?;
//! ```

pub mod builder;
pub mod controller;
pub mod error;
pub mod history;
pub mod notifier;
pub mod observer;
pub mod report;
pub mod ticker;


pub use builder::ControllerBuilder;
pub use controller::{SharedController, SimulationController};
pub use error::{SimError, SimResult};
pub use history::{HISTORY_HEADER, HistoryEntry, HistoryExport, HistoryLog, format_timestamp};
pub use notifier::{AlertNotifier, LogNotifier};
pub use observer::{NoopObserver, SimObserver};
pub use report::{SimSnapshot, TickReport};
pub use ticker::PeriodicTicker;
