//! Hourly crowd-level prediction.

use std::ops::RangeInclusive;

use chrono::{Days, NaiveDate};
use serde::{Serialize, Serializer};
use tracing::debug;

use cm_core::FESTIVAL_MULTIPLIER;

use crate::{DayType, ForecastError, ForecastResult, SpecialCalendar, SpecialDay};

/// Hours covered by a day forecast.
pub const FORECAST_HOURS: RangeInclusive<u32> = 6..=18;

/// Longest span accepted by [`Forecaster::range_forecast`], in days between
/// start and end.
pub const MAX_RANGE_DAYS: i64 = 90;

const OFF_HOURS_LEVEL: u32 = 20;

/// Base crowd level for `hour` on a normal day.
pub fn base_level(hour: u32) -> u32 {
    match hour {
        6  => 30,
        7  => 40,
        8  => 50,
        9  => 70,
        10 => 85,
        11 => 90,
        12 => 85,
        13 => 75,
        14 => 70,
        15 => 80,
        16 => 85,
        17 => 75,
        18 => 50,
        _  => OFF_HOURS_LEVEL,
    }
}

/// Parse `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> ForecastResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| ForecastError::InvalidDate(s.to_owned()))
}

pub(crate) fn serialize_date<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&date.format("%Y-%m-%d"))
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPrediction {
    pub hour:        u32,
    /// `"H:00"`, without zero padding.
    pub time:        String,
    pub crowd_level: u32,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayForecast {
    #[serde(serialize_with = "serialize_date")]
    pub date:        NaiveDate,
    pub day_type:    DayType,
    pub special_day: Option<SpecialDay>,
    pub multiplier:  f64,
    pub predictions: Vec<HourlyPrediction>,
}

impl DayForecast {
    /// Busiest predicted hour.
    pub fn peak(&self) -> Option<&HourlyPrediction> {
        self.predictions.iter().max_by_key(|p| p.crowd_level)
    }

    /// Whether the day is at least as busy as the simulator's festival mode.
    pub fn suggests_festival_mode(&self) -> bool {
        self.multiplier >= FESTIVAL_MULTIPLIER
    }
}

/// Forecasts against a [`SpecialCalendar`].
#[derive(Clone, Debug)]
pub struct Forecaster {
    calendar: SpecialCalendar,
}

impl Default for Forecaster {
    fn default() -> Self {
        Self::new(SpecialCalendar::builtin())
    }
}

impl Forecaster {
    pub fn new(calendar: SpecialCalendar) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &SpecialCalendar {
        &self.calendar
    }

    pub fn special_day(&self, date: NaiveDate) -> Option<&SpecialDay> {
        self.calendar.get(date)
    }

    /// The special day's kind if listed, otherwise weekend or normal.
    pub fn day_type(&self, date: NaiveDate) -> DayType {
        self.calendar
            .get(date)
            .map(|d| d.kind)
            .unwrap_or_else(|| DayType::by_weekday(date))
    }

    /// The special day's own multiplier if listed, otherwise the day type's.
    pub fn crowd_multiplier(&self, date: NaiveDate) -> f64 {
        match self.calendar.get(date) {
            Some(day) => day.crowd_multiplier,
            None      => DayType::by_weekday(date).multiplier(),
        }
    }

    /// Predicted crowd level in `0..=100`.
    pub fn predict_crowd_level(&self, date: NaiveDate, hour: u32) -> u32 {
        scaled_level(base_level(hour), self.crowd_multiplier(date))
    }

    pub fn day_forecast(&self, date: NaiveDate) -> DayForecast {
        let multiplier = self.crowd_multiplier(date);
        let predictions = FORECAST_HOURS
            .map(|hour| HourlyPrediction {
                hour,
                time:        format!("{hour}:00"),
                crowd_level: scaled_level(base_level(hour), multiplier),
            })
            .collect();
        DayForecast {
            date,
            day_type: self.day_type(date),
            special_day: self.special_day(date).cloned(),
            multiplier,
            predictions,
        }
    }

    /// One forecast per day from `start` to `end` inclusive.
    pub fn range_forecast(&self, start: NaiveDate, end: NaiveDate) -> ForecastResult<Vec<DayForecast>> {
        if start > end {
            return Err(ForecastError::InvertedRange { start, end });
        }
        let days = (end - start).num_days();
        if days > MAX_RANGE_DAYS {
            return Err(ForecastError::RangeTooLong { days, max: MAX_RANGE_DAYS });
        }
        debug!(%start, %end, days = days + 1, "range forecast");
        Ok((0..=days as u64)
            .filter_map(|offset| start.checked_add_days(Days::new(offset)))
            .map(|date| self.day_forecast(date))
            .collect())
    }

    /// Special days in `year`/`month` (1-based).
    pub fn special_days(&self, year: i32, month: u32) -> Vec<&SpecialDay> {
        self.calendar.in_month(year, month)
    }
}

fn scaled_level(base: u32, multiplier: f64) -> u32 {
    let level = (base as f64 * multiplier).round();
    if level.is_nan() || level <= 0.0 {
        0
    } else {
        level.min(100.0) as u32
    }
}
