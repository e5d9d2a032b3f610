//! Value objects: equality by value, fixed textual formats.
//!
//! Records carry dates as chrono values in memory and as fixed-width strings
//! on disk. The newtypes here own the conversion in both directions so every
//! record type formats and parses them identically.

use core::str::FromStr;

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

use crate::error::RecordError;

/// Marker trait for value objects.
///
/// Value objects have no identity; two instances with the same attribute
/// values are interchangeable. Only value objects can be parsed out of raw
/// input or document strings (see `fields::parse_value` and
/// `document::parsed_field`).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// On-disk format of a [`Timestamp`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// On-disk format of an [`ExpiryDate`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Local wall-clock time at second precision (`YYYY-MM-DD HH:MM:SS`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

/// Calendar date (`YYYY-MM-DD`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpiryDate(NaiveDate);

macro_rules! impl_formatted_newtype {
    ($t:ty, $inner:ty, $format:expr, $name:literal, $hint:literal) => {
        impl $t {
            pub fn as_inner(&self) -> &$inner {
                &self.0
            }
        }

        impl ValueObject for $t {}

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0.format($format), f)
            }
        }

        impl From<$t> for $inner {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = RecordError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let parsed = <$inner>::parse_from_str(s.trim(), $format).map_err(|e| {
                    RecordError::parse(format!(
                        "{} {:?}: {} (expected {})",
                        $name, s, e, $hint
                    ))
                })?;
                Ok(Self::from(parsed))
            }
        }
    };
}

impl_formatted_newtype!(
    Timestamp,
    NaiveDateTime,
    TIMESTAMP_FORMAT,
    "timestamp",
    "YYYY-MM-DD HH:MM:SS"
);
impl_formatted_newtype!(ExpiryDate, NaiveDate, DATE_FORMAT, "date", "YYYY-MM-DD");

impl Timestamp {
    /// Current local time, truncated to whole seconds so it survives a save/load cycle.
    pub fn now() -> Self {
        Self::from(Local::now().naive_local())
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self(value.with_nanosecond(0).unwrap_or(value))
    }
}

impl From<NaiveDate> for ExpiryDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_uses_fixed_width_format() {
        let ts: Timestamp = "2024-01-15 10:30:00".parse().unwrap();
        assert_eq!(ts.to_string(), "2024-01-15 10:30:00");
    }

    #[test]
    fn timestamp_drops_subsecond_precision() {
        let raw = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_nano_opt(10, 30, 0, 123_456_789)
            .unwrap();
        let ts = Timestamp::from(raw);
        assert_eq!(ts.as_inner().nanosecond(), 0);
        assert_eq!(ts.to_string().parse::<Timestamp>().unwrap(), ts);
    }

    #[test]
    fn malformed_timestamp_is_a_parse_error() {
        let err = "15/01/2024".parse::<Timestamp>().unwrap_err();
        assert!(matches!(err, RecordError::Parse(msg) if msg.contains("YYYY-MM-DD HH:MM:SS")));
    }

    #[test]
    fn expiry_date_round_trips() {
        let date: ExpiryDate = " 2025-06-30 ".parse().unwrap();
        assert_eq!(date.to_string(), "2025-06-30");
        assert!("2025-02-30".parse::<ExpiryDate>().is_err());
    }
}
