//! Unit tests for cm-forecast.

use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[cfg(test)]
mod day_type_tests {
    use super::*;
    use crate::DayType;

    #[test]
    fn weekends_by_weekday() {
        assert_eq!(DayType::by_weekday(date(2025, 3, 15)), DayType::Weekend); // Saturday
        assert_eq!(DayType::by_weekday(date(2025, 3, 16)), DayType::Weekend); // Sunday
        assert_eq!(DayType::by_weekday(date(2025, 3, 17)), DayType::Normal);
    }

    #[test]
    fn default_multipliers() {
        assert_eq!(DayType::Normal.multiplier(), 1.0);
        assert_eq!(DayType::Weekend.multiplier(), 1.4);
        assert_eq!(DayType::Holiday.multiplier(), 1.8);
        assert_eq!(DayType::Festival.multiplier(), 2.5);
        assert_eq!(DayType::Special.multiplier(), 2.0);
    }
}

#[cfg(test)]
mod calendar_tests {
    use super::*;
    use crate::{DayType, SpecialCalendar};

    #[test]
    fn later_listing_wins() {
        let cal = SpecialCalendar::builtin();
        let oct2 = cal.get(date(2025, 10, 2)).unwrap();
        assert_eq!(oct2.name, "Navratri Start");
        assert_eq!(oct2.kind, DayType::Festival);
        assert_eq!(oct2.crowd_multiplier, 2.3);

        let apr13 = cal.get(date(2025, 4, 13)).unwrap();
        assert_eq!(apr13.name, "Mahavir Jayanti");
        assert_eq!(apr13.crowd_multiplier, 1.8);
    }

    #[test]
    fn duplicates_collapse() {
        assert_eq!(SpecialCalendar::builtin().len(), 16);
    }

    #[test]
    fn month_filter_in_date_order() {
        let cal = SpecialCalendar::builtin();
        let names: Vec<_> = cal.in_month(2025, 10).iter().map(|d| d.name).collect();
        assert_eq!(names, ["Navratri Start", "Dussehra", "Diwali"]);
        assert!(cal.in_month(2024, 10).is_empty());
        assert!(cal.in_month(2025, 7).is_empty());
    }
}

#[cfg(test)]
mod predict_tests {
    use super::*;
    use crate::{DayType, ForecastError, Forecaster, MAX_RANGE_DAYS, base_level, parse_date};

    #[test]
    fn hourly_profile() {
        assert_eq!(base_level(6), 30);
        assert_eq!(base_level(11), 90);
        assert_eq!(base_level(18), 50);
        assert_eq!(base_level(5), 20);
        assert_eq!(base_level(19), 20);
        assert_eq!(base_level(0), 20);
    }

    #[test]
    fn normal_day_uses_base_profile() {
        let f = Forecaster::default();
        let monday = date(2025, 3, 17);
        assert_eq!(f.day_type(monday), DayType::Normal);
        assert_eq!(f.predict_crowd_level(monday, 11), 90);
        assert_eq!(f.predict_crowd_level(monday, 3), 20);
    }

    #[test]
    fn weekend_scales_and_caps() {
        let f = Forecaster::default();
        let saturday = date(2025, 3, 15);
        assert_eq!(f.predict_crowd_level(saturday, 6), 42);
        assert_eq!(f.predict_crowd_level(saturday, 8), 70);
        assert_eq!(f.predict_crowd_level(saturday, 11), 100);
    }

    #[test]
    fn special_day_overrides_weekend() {
        let f = Forecaster::default();
        // Mahavir Jayanti falls on a Sunday.
        let d = date(2025, 4, 13);
        assert_eq!(f.day_type(d), DayType::Festival);
        assert_eq!(f.crowd_multiplier(d), 1.8);
    }

    #[test]
    fn day_forecast_covers_six_to_eighteen() {
        let f = Forecaster::default().day_forecast(date(2025, 3, 14));
        assert_eq!(f.predictions.len(), 13);
        assert_eq!(f.predictions[0].hour, 6);
        assert_eq!(f.predictions[0].time, "6:00");
        assert_eq!(f.predictions[0].crowd_level, 75);
        assert_eq!(f.predictions[12].time, "18:00");
        assert!(f.predictions.iter().all(|p| p.crowd_level <= 100));
        assert_eq!(f.special_day.as_ref().map(|d| d.name), Some("Holi"));
    }

    #[test]
    fn festival_mode_suggestion() {
        let f = Forecaster::default();
        assert!(f.day_forecast(date(2025, 3, 14)).suggests_festival_mode());
        assert!(f.day_forecast(date(2025, 5, 23)).suggests_festival_mode());
        assert!(!f.day_forecast(date(2025, 3, 15)).suggests_festival_mode());
        assert!(!f.day_forecast(date(2025, 3, 17)).suggests_festival_mode());
    }

    #[test]
    fn peak_hour() {
        let f = Forecaster::default().day_forecast(date(2025, 3, 17));
        assert_eq!(f.peak().unwrap().hour, 11);
    }

    #[test]
    fn range_is_inclusive() {
        let days = Forecaster::default().range_forecast(date(2025, 3, 14), date(2025, 3, 16)).unwrap();
        let dates: Vec<_> = days.iter().map(|d| d.date).collect();
        assert_eq!(dates, [date(2025, 3, 14), date(2025, 3, 15), date(2025, 3, 16)]);
    }

    #[test]
    fn single_day_range() {
        let d = date(2025, 6, 1);
        assert_eq!(Forecaster::default().range_forecast(d, d).unwrap().len(), 1);
    }

    #[test]
    fn inverted_range_rejected() {
        let err = Forecaster::default().range_forecast(date(2025, 3, 16), date(2025, 3, 14));
        assert!(matches!(err, Err(ForecastError::InvertedRange { .. })));
    }

    #[test]
    fn range_limit() {
        let f = Forecaster::default();
        let start = date(2025, 1, 1);
        let at_limit = date(2025, 4, 1);
        assert_eq!((at_limit - start).num_days(), MAX_RANGE_DAYS);
        assert_eq!(f.range_forecast(start, at_limit).unwrap().len(), 91);

        let err = f.range_forecast(start, date(2025, 4, 2));
        assert!(matches!(err, Err(ForecastError::RangeTooLong { days: 91, .. })));
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2025-10-20").unwrap(), date(2025, 10, 20));
        assert!(matches!(parse_date("20-10-2025"), Err(ForecastError::InvalidDate(_))));
        assert!(parse_date("2025-02-30").is_err());
    }
}

#[cfg(test)]
mod serialize_tests {
    use serde_json::Value;

    use super::*;
    use crate::Forecaster;

    #[test]
    fn day_forecast_json_shape() {
        let f = Forecaster::default().day_forecast(date(2025, 3, 14));
        let json: Value = serde_json::to_value(&f).unwrap();
        assert_eq!(json["date"], "2025-03-14");
        assert_eq!(json["dayType"], "festival");
        assert_eq!(json["specialDay"]["type"], "festival");
        assert_eq!(json["specialDay"]["name"], "Holi");
        assert_eq!(json["specialDay"]["date"], "2025-03-14");
        assert_eq!(json["predictions"][0]["crowdLevel"], 75);
        assert_eq!(json["predictions"][0]["time"], "6:00");
    }

    #[test]
    fn plain_day_has_null_special_day() {
        let f = Forecaster::default().day_forecast(date(2025, 3, 17));
        let json: Value = serde_json::to_value(&f).unwrap();
        assert_eq!(json["dayType"], "normal");
        assert!(json["specialDay"].is_null());
    }
}
