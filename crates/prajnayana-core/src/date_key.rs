//! Canonical calendar-day keys (`YYYY-MM-DD`).
//!
//! Completion records and tracking entries are keyed by day, never by
//! instant, so two calls on the same calendar day always yield the same key.

use chrono::{Local, NaiveDate};

use crate::error::ValidationError;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Format a day as its canonical key.
pub fn date_key(day: NaiveDate) -> String {
    day.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a canonical key back into a day.
pub fn parse_date_key(key: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT)
        .map_err(|_| ValidationError::InvalidDateKey(key.to_string()))
}

/// Today in the local time zone.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_zero_padded_iso_day() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert_eq!(date_key(day), "2024-01-03");
    }

    #[test]
    fn key_ignores_time_of_day() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let morning = day.and_hms_opt(0, 5, 0).unwrap();
        let night = day.and_hms_opt(23, 55, 0).unwrap();
        assert_eq!(date_key(morning.date()), date_key(night.date()));
    }

    #[test]
    fn parse_reverses_format() {
        let day = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(parse_date_key(&date_key(day)).unwrap(), day);
    }

    #[test]
    fn parse_rejects_other_shapes() {
        assert!(parse_date_key("03/01/2024").is_err());
        assert!(parse_date_key("2024-02-30").is_err());
        assert_eq!(
            parse_date_key("yesterday"),
            Err(ValidationError::InvalidDateKey("yesterday".to_string()))
        );
    }
}
