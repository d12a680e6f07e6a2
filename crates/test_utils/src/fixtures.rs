//! Pre-built test data for common entities

use chrono::NaiveDate;
use core_kernel::{DateRange, Money};
use domain_ledger::Person;
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;

/// The standard three-person household used across suites
pub static HOUSEHOLD: Lazy<Vec<Person>> = Lazy::new(|| {
    vec![
        Person::new("AL", "AL - Alice", "NL01BANK0000000001"),
        Person::new("BO", "BO - Bob", "NL01BANK0000000002"),
        Person::new("CA", "CA - Cara", "NL01BANK0000000003"),
    ]
});

/// Common money amounts
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn rent() -> Money {
        Money::eur(dec!(1500.00))
    }

    pub fn utilities() -> Money {
        Money::eur(dec!(120.00))
    }

    /// An amount that does not divide evenly three ways
    pub fn awkward_hundred() -> Money {
        Money::eur(dec!(100.00))
    }
}

/// Common dates and windows
pub struct TemporalFixtures;

impl TemporalFixtures {
    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
    }

    pub fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
        DateRange::new(
            Self::date(start.0, start.1, start.2),
            Self::date(end.0, end.1, end.2),
        )
        .expect("valid fixture range")
    }

    /// The January provisioning window most scenarios use
    pub fn january_window() -> DateRange {
        Self::range((2024, 1, 1), (2024, 1, 31))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_household_codes_are_unique() {
        let mut codes: Vec<_> = HOUSEHOLD.iter().map(|p| p.code.clone()).collect();
        codes.dedup();
        assert_eq!(codes.len(), HOUSEHOLD.len());
    }
}
