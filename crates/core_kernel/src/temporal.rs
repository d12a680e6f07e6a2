//! Calendar math for occupancy windows
//!
//! All ledger dates are plain calendar days. Occupancy is measured over
//! inclusive date ranges, and reconciliation caps elapsed occupancy at
//! "today" in the household's timezone.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Errors related to calendar operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod { start: String, end: String },
}

/// An inclusive range of calendar days
///
/// A one-day stay has `start == end` and counts as one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range (inclusive)
    pub start: NaiveDate,
    /// Last day of the range (inclusive)
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new range, rejecting end-before-start
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Returns true if the range contains the given day
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days in the range, counting both endpoints
    pub fn inclusive_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Intersection with another range, or None if they do not overlap
    pub fn overlap(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start <= end {
            Some(DateRange { start, end })
        } else {
            None
        }
    }

    /// Clips the range so it ends no later than `last`, or None if the
    /// whole range lies after `last`
    pub fn clamp_end(&self, last: NaiveDate) -> Option<DateRange> {
        if self.start > last {
            return None;
        }
        Some(DateRange {
            start: self.start,
            end: self.end.min(last),
        })
    }
}

/// Formats a date as dd/mm/yy, the ledger's note and status format
pub fn format_dmy(date: NaiveDate) -> String {
    date.format("%d/%m/%y").to_string()
}

/// Household timezone wrapper
///
/// Wraps chrono_tz::Tz with serde support; used to decide what calendar
/// day "today" is when reconciling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// The current calendar day in this timezone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.0).date_naive()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

/// Source of the current calendar day
///
/// The reconciliation engine asks the clock rather than the OS so tests
/// can pin "today".
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time in the household timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock(pub Timezone);

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        self.0.today()
    }
}

/// Clock pinned to a fixed day, for tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_range_rejects_end_before_start() {
        assert!(DateRange::new(d(2024, 1, 10), d(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_inclusive_days_counts_both_endpoints() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 5)).unwrap();
        assert_eq!(range.inclusive_days(), 5);

        let single = DateRange::new(d(2024, 1, 1), d(2024, 1, 1)).unwrap();
        assert_eq!(single.inclusive_days(), 1);
    }

    #[test]
    fn test_overlap() {
        let a = DateRange::new(d(2024, 1, 1), d(2024, 1, 10)).unwrap();
        let b = DateRange::new(d(2024, 1, 8), d(2024, 1, 20)).unwrap();
        let c = DateRange::new(d(2024, 2, 1), d(2024, 2, 5)).unwrap();

        let ab = a.overlap(&b).unwrap();
        assert_eq!(ab.start, d(2024, 1, 8));
        assert_eq!(ab.end, d(2024, 1, 10));
        assert_eq!(ab.inclusive_days(), 3);

        assert!(a.overlap(&c).is_none());
    }

    #[test]
    fn test_clamp_end() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();

        let clamped = range.clamp_end(d(2024, 1, 15)).unwrap();
        assert_eq!(clamped.end, d(2024, 1, 15));

        // Cap after the range leaves it untouched.
        assert_eq!(range.clamp_end(d(2024, 2, 1)), Some(range));

        // Range entirely in the future.
        assert!(range.clamp_end(d(2023, 12, 31)).is_none());
    }

    #[test]
    fn test_format_dmy() {
        assert_eq!(format_dmy(d(2024, 1, 5)), "05/01/24");
        assert_eq!(format_dmy(d(2026, 12, 31)), "31/12/26");
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(d(2024, 6, 1));
        assert_eq!(clock.today(), d(2024, 6, 1));
    }
}
