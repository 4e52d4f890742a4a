//! Wire format for due dates.
//!
//! The store serializes due dates as ISO `YYYY-MM-DD` strings or `null`.
//! Documents written by older backends may instead carry a full ISO
//! datetime or an empty string; both are accepted on read (a datetime
//! keeps its date part, an empty string reads as unset). Strings that
//! fail to parse also read as unset, so one malformed document cannot
//! take down a whole list fetch.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer};

/// Date format used on the wire.
pub const WIRE_FORMAT: &str = "%Y-%m-%d";

/// Parses a wire due-date string into a date, tolerantly.
///
/// Accepts `YYYY-MM-DD` or any longer ISO datetime (the first ten
/// characters are taken). Returns `None` for empty or unparseable input.
#[must_use]
pub fn parse(raw: &str) -> Option<NaiveDate> {
    // get() rather than a slice: a non-boundary index must not panic.
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, WIRE_FORMAT).ok()
}

/// Serde adapter for `Option<NaiveDate>` fields carried as `dueDate`.
///
/// # Errors
///
/// Propagates serializer errors; the conversion itself cannot fail.
pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(date) => serializer.serialize_str(&date.format(WIRE_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

/// Serde adapter for `Option<NaiveDate>` fields carried as `dueDate`.
///
/// # Errors
///
/// Fails only when the field is present but not a string or null.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse))
}
