//! Temporal cell values and their wire formatting.
//!
//! Every temporal value, whatever precision the driver reports it in, is
//! rendered with the single pattern [`ISO_DATE_FORMAT`] in UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// The ISO-8601 pattern applied to all temporal values.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// A temporal value as reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Temporal {
    /// A calendar date without a time of day.
    Date(NaiveDate),
    /// A time of day without a date.
    Time(NaiveTime),
    /// A date and time without a zone, interpreted as UTC.
    DateTime(NaiveDateTime),
    /// An instant in UTC.
    Timestamp(DateTime<Utc>),
}

impl Temporal {
    /// Converts to a UTC instant.
    ///
    /// Dates resolve to midnight and times of day to the Unix epoch date.
    pub fn to_utc_datetime(&self) -> DateTime<Utc> {
        match self {
            Self::Date(date) => date.and_time(NaiveTime::MIN).and_utc(),
            Self::Time(time) => DateTime::UNIX_EPOCH.date_naive().and_time(*time).and_utc(),
            Self::DateTime(dt) => dt.and_utc(),
            Self::Timestamp(dt) => *dt,
        }
    }

    /// Formats the value with [`ISO_DATE_FORMAT`].
    pub fn to_iso_string(&self) -> String {
        format_iso(&self.to_utc_datetime())
    }
}

impl From<DateTime<Utc>> for Temporal {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Timestamp(dt)
    }
}

impl From<NaiveDate> for Temporal {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<NaiveDateTime> for Temporal {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl From<NaiveTime> for Temporal {
    fn from(time: NaiveTime) -> Self {
        Self::Time(time)
    }
}

/// Formats a UTC instant with [`ISO_DATE_FORMAT`].
pub fn format_iso(dt: &DateTime<Utc>) -> String {
    dt.format(ISO_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use regex::Regex;

    fn iso_pattern() -> Regex {
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z$").unwrap()
    }

    #[test]
    fn timestamp_formatting() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 5).unwrap();
        assert_eq!(Temporal::from(dt).to_iso_string(), "2024-03-15T09:30:05.000Z");
    }

    #[test]
    fn millisecond_precision_is_kept() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_milli_opt(9, 30, 5, 123)
            .unwrap();
        assert_eq!(Temporal::from(dt).to_iso_string(), "2024-03-15T09:30:05.123Z");
    }

    #[test]
    fn date_formats_as_midnight() {
        let date = NaiveDate::from_ymd_opt(2021, 12, 31).unwrap();
        assert_eq!(Temporal::from(date).to_iso_string(), "2021-12-31T00:00:00.000Z");
    }

    #[test]
    fn time_formats_on_epoch_date() {
        let time = NaiveTime::from_hms_opt(23, 59, 1).unwrap();
        assert_eq!(Temporal::from(time).to_iso_string(), "1970-01-01T23:59:01.000Z");
    }

    #[test]
    fn every_variant_matches_pattern() {
        let date = NaiveDate::from_ymd_opt(1999, 1, 2).unwrap();
        let values = [
            Temporal::Date(date),
            Temporal::Time(NaiveTime::from_hms_micro_opt(1, 2, 3, 456_789).unwrap()),
            Temporal::DateTime(date.and_hms_nano_opt(4, 5, 6, 7).unwrap()),
            Temporal::Timestamp(Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap()),
        ];

        let pattern = iso_pattern();
        for value in values {
            let formatted = value.to_iso_string();
            assert!(pattern.is_match(&formatted), "{formatted} does not match");
        }
    }

    #[test]
    fn serde_roundtrip() {
        let value = Temporal::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"type":"date","value":"2024-02-29"}"#);

        let parsed: Temporal = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, value);
    }
}
