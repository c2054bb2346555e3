//! Lenient timestamp parsing
//!
//! The API emits RFC 3339, offset-less `YYYY-MM-DDTHH:MM:SS[.f]` (UTC) or plain dates.
//! All three become `DateTime<Utc>`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized timestamp: {0}")]
pub struct TimestampError(pub String);

pub fn parse(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Some(date) = parse_date(raw) {
        return Ok(start_of_day(date));
    }
    Err(TimestampError(raw.to_string()))
}

/// Parse a form date (`YYYY-MM-DD`)
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

/// Value for an `<input type="date">`
pub fn to_input_date(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// Human-readable form used in tables and the history trail
pub fn display(value: &DateTime<Utc>) -> String {
    value.format("%d.%m.%Y %H:%M").to_string()
}

pub fn display_date(value: &DateTime<Utc>) -> String {
    value.format("%d.%m.%Y").to_string()
}

pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339())
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_some(&value.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => super::parse(&raw).map(Some).map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_variants() {
        let rfc = parse("2024-05-01T10:30:00+03:00").unwrap();
        assert_eq!(rfc.hour(), 7);

        let naive = parse("2024-05-01T10:30:00.123").unwrap();
        assert_eq!(naive.hour(), 10);

        let date = parse("2024-05-01").unwrap();
        assert_eq!((date.year(), date.month(), date.day(), date.hour()), (2024, 5, 1, 0));

        assert!(parse("yesterday").is_err());
    }

    #[test]
    fn test_input_date_round_trip() {
        let value = parse("2024-12-31T23:00:00Z").unwrap();
        assert_eq!(to_input_date(&value), "2024-12-31");
        assert_eq!(parse_date("2024-12-31").map(start_of_day).unwrap().day(), 31);
    }
}
