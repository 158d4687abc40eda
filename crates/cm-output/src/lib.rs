//! `cm-output`: simulation output for the crowd-monitoring simulator.
//!
//! | Item                  | Produces                                              |
//! |-----------------------|-------------------------------------------------------|
//! | [`CsvWriter`]         | `zone_counts.csv`: every tick, unbounded             |
//! | [`save_history`]      | `crowd_logs_<unix_ms>.csv`: the retained history     |
//! | [`BroadcastObserver`] | JSON lines: `crowdUpdate` every tick, `alert` events  |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `cm_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cm_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! ctrl.run_ticks(100, &mut obs);
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod broadcast;
pub mod csv;
pub mod error;
pub mod export;
pub mod observer;
pub mod row;
pub mod writer;


pub use broadcast::{AlertBroadcast, BroadcastObserver, PushEvent, ZoneBroadcast, ZoneStatus};
pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use export::save_history;
pub use observer::SimOutputObserver;
pub use row::ZoneCountRow;
pub use writer::OutputWriter;
