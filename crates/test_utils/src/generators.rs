//! Property-based test data generators

use chrono::NaiveDate;
use core_kernel::{DateRange, Money};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Euro amounts with two decimal places, 0.01 ..= 100_000.00
pub fn money_amount() -> impl Strategy<Value = Money> {
    (1i64..10_000_000i64).prop_map(|cents| Money::eur(Decimal::new(cents, 2)))
}

/// Fraction lists of 1..=8 positive weights, normalised to sum to 1
pub fn share_fractions() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(1u32..1000u32, 1..=8).prop_map(|weights| {
        let total: u32 = weights.iter().sum();
        weights
            .into_iter()
            .map(|w| Decimal::from(w) / Decimal::from(total))
            .collect()
    })
}

/// Date ranges of 1..=60 days somewhere in 2024
pub fn date_range() -> impl Strategy<Value = DateRange> {
    (0i64..300i64, 0i64..60i64).prop_map(|(offset, len)| {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(offset);
        let end = start + chrono::Duration::days(len);
        DateRange::new(start, end).unwrap()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn fractions_sum_close_to_one(fractions in share_fractions()) {
            let total: Decimal = fractions.iter().sum();
            let drift = (total - Decimal::ONE).abs();
            prop_assert!(drift < Decimal::new(1, 10));
        }

        #[test]
        fn ranges_are_valid(range in date_range()) {
            prop_assert!(range.inclusive_days() >= 1);
        }
    }
}
