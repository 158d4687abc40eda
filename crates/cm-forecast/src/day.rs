//! Day classification.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

/// Kind of day, in increasing order of typical crowding.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Normal,
    Weekend,
    Holiday,
    Festival,
    Special,
}

impl DayType {
    /// Multiplier used when the date has no special-day entry of its own.
    pub fn multiplier(self) -> f64 {
        match self {
            DayType::Normal   => 1.0,
            DayType::Weekend  => 1.4,
            DayType::Holiday  => 1.8,
            DayType::Festival => 2.5,
            DayType::Special  => 2.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayType::Normal   => "Normal Day",
            DayType::Weekend  => "Weekend",
            DayType::Holiday  => "Holiday",
            DayType::Festival => "Festival",
            DayType::Special  => "Special Day",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayType::Normal   => "normal",
            DayType::Weekend  => "weekend",
            DayType::Holiday  => "holiday",
            DayType::Festival => "festival",
            DayType::Special  => "special",
        }
    }

    /// `Weekend` for Saturday and Sunday, `Normal` otherwise.  Special days
    /// are resolved by the calendar, not here.
    pub fn by_weekday(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => DayType::Weekend,
            _ => DayType::Normal,
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
