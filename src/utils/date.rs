//! Document dates.
//!
//! Front matter carries dates as text (`2024-01-15`, `2024-01-15T09:30:00Z`, ...)
//! while callers may hand in native chrono values. Both normalize to a
//! [`Timestamp`], which orders by instant and remembers whether it was date-only
//! so it serializes back the way it was written.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Serialize, Serializer};
use std::{cmp::Ordering, fmt, str::FromStr};

/// Date-time layouts accepted without an explicit offset (read as UTC).
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A normalized, comparable point in time.
#[derive(Debug, Clone, Copy)]
pub struct Timestamp {
    instant: DateTime<FixedOffset>,
    date_only: bool,
}

impl Timestamp {
    /// Parse a date-like string.
    ///
    /// Accepts `YYYY-MM-DD`, RFC 3339, RFC 2822 and the offset-less layouts in
    /// [`NAIVE_LAYOUTS`]. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(Self::from(date));
        }
        if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
            return Some(Self { instant, date_only: false });
        }
        if let Some(naive) = NAIVE_LAYOUTS
            .iter()
            .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
        {
            return Some(Self::from(naive.and_utc()));
        }
        DateTime::parse_from_rfc2822(s)
            .ok()
            .map(|instant| Self { instant, date_only: false })
    }

    /// Midnight UTC on the given calendar day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from)
    }

    /// 1970-01-01T00:00:00Z, the stand-in for a missing date when sorting.
    pub fn epoch() -> Self {
        Self::from(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp_millis(&self) -> i64 {
        self.instant.timestamp_millis()
    }

    pub fn is_date_only(&self) -> bool {
        self.date_only
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.instant.with_timezone(&Utc)
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        let instant = date.and_time(NaiveTime::MIN).and_utc().fixed_offset();
        Self { instant, date_only: true }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self { instant: instant.fixed_offset(), date_only: false }
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(instant: DateTime<FixedOffset>) -> Self {
        Self { instant, date_only: false }
    }
}

impl FromStr for Timestamp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("`{s}` is not a recognized date"))
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.date_only {
            write!(f, "{}", self.instant.format("%Y-%m-%d"))
        } else {
            write!(f, "{}", self.instant.to_rfc3339())
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let ts = Timestamp::parse("2024-06-15").unwrap();
        assert!(ts.is_date_only());
        assert_eq!(ts.to_string(), "2024-06-15");
        assert_eq!(ts, Timestamp::from_ymd(2024, 6, 15).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_keeps_offset() {
        let ts = Timestamp::parse("2024-06-15T14:30:45+02:00").unwrap();
        assert!(!ts.is_date_only());
        assert_eq!(ts.to_string(), "2024-06-15T14:30:45+02:00");
        assert_eq!(ts.to_utc().to_rfc3339(), "2024-06-15T12:30:45+00:00");
    }

    #[test]
    fn test_parse_naive_layouts_as_utc() {
        let a = Timestamp::parse("2024-06-15T14:30:00").unwrap();
        let b = Timestamp::parse("2024-06-15 14:30").unwrap();
        let c = Timestamp::parse("2024-06-15T14:30:00Z").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_parse_rfc2822() {
        let ts = Timestamp::parse("Sat, 15 Jun 2024 14:30:45 GMT").unwrap();
        assert_eq!(ts, Timestamp::parse("2024-06-15T14:30:45Z").unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Timestamp::parse("").is_none());
        assert!(Timestamp::parse("   ").is_none());
        assert!(Timestamp::parse("next tuesday").is_none());
        assert!(Timestamp::parse("2024-13-01").is_none());
        assert!(Timestamp::parse("2023-02-29").is_none());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(Timestamp::parse("  2024-02-29 ").is_some());
    }

    #[test]
    fn test_ordering_across_offsets() {
        let earlier = Timestamp::parse("2024-06-15T12:00:00+02:00").unwrap();
        let later = Timestamp::parse("2024-06-15T11:00:00Z").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_epoch_is_zero() {
        assert_eq!(Timestamp::epoch().timestamp_millis(), 0);
        assert!(Timestamp::epoch() < Timestamp::from_ymd(1970, 1, 2).unwrap());
    }

    #[test]
    fn test_from_str_error_message() {
        let err = "soon".parse::<Timestamp>().unwrap_err();
        assert!(err.contains("soon"));
    }

    #[test]
    fn test_serialize_as_string() {
        let ts = Timestamp::from_ymd(2025, 1, 2).unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2025-01-02\"");
    }
}
