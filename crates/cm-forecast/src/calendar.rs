//! Special-day calendar.
//!
//! A date appears at most once.  When a table lists the same date twice, the
//! later listing replaces the earlier one.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::DayType;
use crate::predict::serialize_date;

/// A named day with its own crowd multiplier.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialDay {
    #[serde(serialize_with = "serialize_date")]
    pub date:             NaiveDate,
    #[serde(rename = "type")]
    pub kind:             DayType,
    pub name:             &'static str,
    pub crowd_multiplier: f64,
}

/// `(month, day, kind, name, multiplier)`, in listing order.
const SPECIAL_DAYS_2025: &[(u32, u32, DayType, &str, f64)] = &[
    // National holidays
    (1,  26, DayType::Holiday,  "Republic Day",     2.0),
    (8,  15, DayType::Holiday,  "Independence Day", 2.0),
    (10, 2,  DayType::Holiday,  "Gandhi Jayanti",   1.8),
    // Festivals
    (3,  14, DayType::Festival, "Holi",             2.5),
    (3,  30, DayType::Festival, "Ram Navami",       2.2),
    (4,  13, DayType::Festival, "Ugadi",            2.0),
    (4,  14, DayType::Festival, "Baisakhi",         2.0),
    (8,  16, DayType::Festival, "Janmashtami",      2.5),
    (9,  3,  DayType::Festival, "Ganesh Chaturthi", 2.8),
    (10, 2,  DayType::Festival, "Navratri Start",   2.3),
    (10, 11, DayType::Festival, "Dussehra",         2.5),
    (10, 20, DayType::Festival, "Diwali",           3.0),
    (11, 5,  DayType::Festival, "Chhath Puja",      2.2),
    // Other religious days
    (12, 25, DayType::Holiday,  "Christmas",        1.5),
    (4,  13, DayType::Festival, "Mahavir Jayanti",  1.8),
    // Temple-specific
    (1,  14, DayType::Special,  "Makar Sankranti",  2.0),
    (2,  26, DayType::Special,  "Maha Shivaratri",  2.5),
    (5,  23, DayType::Special,  "Buddha Purnima",   1.8),
];

/// Special days keyed by date.
#[derive(Clone, Debug, Default)]
pub struct SpecialCalendar {
    days: BTreeMap<NaiveDate, SpecialDay>,
}

impl SpecialCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in 2025 calendar.
    pub fn builtin() -> Self {
        let mut cal = Self::new();
        for &(month, day, kind, name, mult) in SPECIAL_DAYS_2025 {
            if let Some(date) = NaiveDate::from_ymd_opt(2025, month, day) {
                cal.insert(SpecialDay { date, kind, name, crowd_multiplier: mult });
            }
        }
        cal
    }

    /// Add `day`, replacing any entry already on that date.  Returns the
    /// replaced entry.
    pub fn insert(&mut self, day: SpecialDay) -> Option<SpecialDay> {
        self.days.insert(day.date, day)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&SpecialDay> {
        self.days.get(&date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// All entries in date order.
    pub fn iter(&self) -> impl Iterator<Item = &SpecialDay> + '_ {
        self.days.values()
    }

    /// Entries falling in `year`/`month` (1-based), in date order.
    pub fn in_month(&self, year: i32, month: u32) -> Vec<&SpecialDay> {
        self.days
            .values()
            .filter(|d| d.date.year() == year && d.date.month() == month)
            .collect()
    }
}
