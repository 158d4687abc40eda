//! `cm-forecast`: hourly crowd-level forecasts from a day-type calendar.
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`day`]      | [`DayType`] and its default crowd multipliers              |
//! | [`calendar`] | [`SpecialDay`], [`SpecialCalendar`], the built-in 2025 table |
//! | [`predict`]  | [`Forecaster`], [`DayForecast`], [`HourlyPrediction`]      |
//! | [`error`]    | [`ForecastError`]                                          |
//!
//! Crowd levels are percentages in `0..=100`: an hourly base profile scaled
//! by the day's multiplier and capped at 100.

pub mod calendar;
pub mod day;
pub mod error;
pub mod predict;

#[cfg(test)]
mod tests;

pub use calendar::{SpecialCalendar, SpecialDay};
pub use day::DayType;
pub use error::{ForecastError, ForecastResult};
pub use predict::{
    DayForecast, FORECAST_HOURS, Forecaster, HourlyPrediction, MAX_RANGE_DAYS, base_level, parse_date,
};
