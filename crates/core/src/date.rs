//! Calendar dates as the backend sends them.
//!
//! Restock dates and shift dates are plain calendar days. The backend writes
//! them either as `YYYY-MM-DD` or as a full ISO timestamp whose date part is
//! the intended day. Only the leading `Y-M-D` is read, with no timezone
//! conversion, so a `...T17:00:00.000Z` suffix can never shift the day.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::DomainError;

/// Parse the calendar day at the start of `raw`.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, DomainError> {
    let trimmed = raw.trim();
    let head = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .map_err(|e| DomainError::validation(format!("invalid date '{raw}': {e}")))
}

/// `DD/MM/YYYY`, the format used in tables and chart labels.
pub fn format_dmy(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `YYYY-MM-DD`, the format the backend expects in request bodies.
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Serde adapter for a required calendar date (`#[serde(with = "calendar_date")]`).
pub mod calendar_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_iso(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_calendar_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for a nullable calendar date.
pub mod optional_calendar_date {
    use super::*;

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&format_iso(*d)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => parse_calendar_date(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_suffix_does_not_shift_the_day() {
        let d = parse_calendar_date("2024-03-31T23:30:00.000Z").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn plain_dates_parse_and_format() {
        let d = parse_calendar_date("2024-01-05").unwrap();
        assert_eq!(format_dmy(d), "05/01/2024");
        assert_eq!(format_iso(d), "2024-01-05");
    }

    #[test]
    fn garbage_is_a_validation_error() {
        assert!(parse_calendar_date("yesterday").is_err());
        assert!(parse_calendar_date("").is_err());
    }
}
