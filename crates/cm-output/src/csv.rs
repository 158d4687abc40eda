//! CSV output backend.
//!
//! Creates `zone_counts.csv` in the configured output directory.  Unlike the
//! in-memory history, this file keeps every tick of the run.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, ZoneCountRow};

pub const ZONE_COUNTS_FILE: &str = "zone_counts.csv";

/// Streams one row per tick to `zone_counts.csv`.
pub struct CsvWriter {
    counts:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the CSV file in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut counts = Writer::from_path(dir.join(ZONE_COUNTS_FILE))?;
        counts.write_record(["tick", "time", "entry", "mainHall", "exit", "parking", "overcrowded"])?;
        Ok(Self { counts, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick(&mut self, row: &ZoneCountRow) -> OutputResult<()> {
        self.counts.write_record(&[
            row.tick.to_string(),
            row.time.clone(),
            row.entry.to_string(),
            row.main_hall.to_string(),
            row.exit.to_string(),
            row.parking.to_string(),
            (row.overcrowded as u8).to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.counts.flush()?;
        Ok(())
    }
}
