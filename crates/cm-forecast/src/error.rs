use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("invalid date {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("range start {start} is after end {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("range spans {days} days, limit is {max}")]
    RangeTooLong { days: i64, max: i64 },
}

pub type ForecastResult<T> = Result<T, ForecastError>;
