use super::records::value_text;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Number, Value};

/// Local date-time layouts accepted when no offset is present. These are read
/// as UTC.
const NAIVE_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats an ISO-8601 date or timestamp as `YYYY-MM-DD` in UTC. Numbers are
/// epoch milliseconds. Values that do not parse come back verbatim; absent and
/// falsy values (`null`, `false`, `0`, `""`) become `""`.
#[must_use]
pub fn pretty_date(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => String::new(),
        Some(Value::String(text)) => match parse_iso_date(text) {
            Some(date) => date.format(DATE_FORMAT).to_string(),
            None => text.clone(),
        },
        Some(Value::Number(number)) if number.as_f64() == Some(0.0) => String::new(),
        Some(Value::Number(number)) => match epoch_millis_date(number) {
            Some(date) => date.format(DATE_FORMAT).to_string(),
            None => number.to_string(),
        },
        // `true` coerces to one millisecond past the epoch.
        Some(Value::Bool(true)) => epoch_date(1).map_or_else(String::new, |date| {
            date.format(DATE_FORMAT).to_string()
        }),
        Some(other) => value_text(Some(other)),
    }
}

/// Fractional milliseconds are truncated toward zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn epoch_millis_date(number: &Number) -> Option<NaiveDate> {
    let millis = match number.as_i64() {
        Some(millis) => millis,
        None => {
            let millis = number.as_f64()?.trunc();
            if !(i64::MIN as f64..=i64::MAX as f64).contains(&millis) {
                return None;
            }
            millis as i64
        }
    };
    epoch_date(millis)
}

fn epoch_date(millis: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|timestamp| timestamp.date_naive())
}

fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }

    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|timestamp| timestamp.date())
        .or_else(|| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok())
}
