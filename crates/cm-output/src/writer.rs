//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, ZoneCountRow};

/// Trait implemented by per-tick output backends.
///
/// Errors are surfaced to [`SimOutputObserver`][crate::SimOutputObserver],
/// which stores them for retrieval with `take_error`.
pub trait OutputWriter {
    /// Write one tick's counts.
    fn write_tick(&mut self, row: &ZoneCountRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
