//! Bounded rolling log of per-tick zone snapshots.
//!
//! The log keeps the most recent `capacity` entries (default 200) in capture
//! order; appending to a full log evicts the oldest entry.  Export always
//! walks the buffer oldest-first, so any newest-first presentation is left to
//! the consumer.

use std::collections::VecDeque;

use chrono::{DateTime, SecondsFormat, Utc};
use csv::{Terminator, WriterBuilder};

use cm_core::{Tick, ZoneCounts, ZoneId};

use crate::{SimError, SimResult};

/// Column header of the exported CSV.
pub const HISTORY_HEADER: [&str; 5] = ["time", "entry", "mainHall", "exit", "parking"];

/// ISO-8601 UTC with millisecond precision, e.g. `2025-03-14T09:00:03.000Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// One captured tick.  Immutable once appended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub tick:      Tick,
    pub timestamp: DateTime<Utc>,
    pub zones:     ZoneCounts,
}

impl HistoryEntry {
    pub fn iso_time(&self) -> String {
        format_timestamp(&self.timestamp)
    }

    /// `[time, entry, mainHall, exit, parking]`.
    pub fn row(&self) -> [String; 5] {
        [
            self.iso_time(),
            self.zones[ZoneId::Entry].to_string(),
            self.zones[ZoneId::MainHall].to_string(),
            self.zones[ZoneId::Exit].to_string(),
            self.zones[ZoneId::Parking].to_string(),
        ]
    }
}

/// A download-ready history export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryExport {
    /// `crowd_logs_<unix_ms>.csv`
    pub filename: String,
    /// Header row followed by one row per entry, oldest first.
    pub csv:      String,
    pub rows:     usize,
}

impl HistoryExport {
    pub fn filename_for(exported_at_unix_ms: i64) -> String {
        format!("crowd_logs_{exported_at_unix_ms}.csv")
    }
}

/// FIFO ring buffer of [`HistoryEntry`].
#[derive(Clone, Debug)]
pub struct HistoryLog {
    entries:  VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryLog {
    /// A log retaining at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    /// Append `entry`, returning the evicted oldest entry if the log was full.
    pub fn append(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries oldest-first.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    pub fn oldest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// One row per entry in capture order.
    pub fn export_rows(&self) -> Vec<[String; 5]> {
        self.entries.iter().map(HistoryEntry::row).collect()
    }

    /// Render the log as comma-separated text: header first, `\n` line ends.
    pub fn to_csv(&self) -> SimResult<String> {
        let mut wtr = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        wtr.write_record(HISTORY_HEADER)?;
        for row in self.export_rows() {
            wtr.write_record(&row)?;
        }
        let bytes = wtr.into_inner().map_err(|e| SimError::Io(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| SimError::Export(e.to_string()))
    }

    /// Build a [`HistoryExport`] stamped with `exported_at_unix_ms`.
    pub fn export(&self, exported_at_unix_ms: i64) -> SimResult<HistoryExport> {
        Ok(HistoryExport {
            filename: HistoryExport::filename_for(exported_at_unix_ms),
            csv:      self.to_csv()?,
            rows:     self.len(),
        })
    }
}
