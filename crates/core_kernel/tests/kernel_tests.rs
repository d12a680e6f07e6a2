//! Cross-type tests for core_kernel

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, DateRange, FixedClock, Clock, Money, PersonCode};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn test_split_over_occupancy_fractions() {
    // Shares derived from day counts split a bill the way the ledger
    // expects: rounded parts, remainder on the last.
    let window = DateRange::new(d(2024, 1, 1), d(2024, 1, 30)).unwrap();
    let days = [10i64, 10, 10];
    let total: i64 = days.iter().sum();
    assert_eq!(window.inclusive_days(), total);

    let fractions: Vec<Decimal> = days
        .iter()
        .map(|d| Decimal::from(*d) / Decimal::from(total))
        .collect();

    let parts = Money::eur(dec!(500.00))
        .split_by_fractions(&fractions)
        .unwrap();

    assert_eq!(parts[0].amount(), dec!(166.67));
    assert_eq!(parts[1].amount(), dec!(166.67));
    assert_eq!(parts[2].amount(), dec!(166.66));

    let sum: Decimal = parts.iter().map(|p| p.amount()).sum();
    assert_eq!(sum, dec!(500.00));
}

#[test]
fn test_clock_caps_a_window() {
    let clock = FixedClock(d(2024, 1, 15));
    let window = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();

    let capped = window.clamp_end(clock.today()).unwrap();
    assert_eq!(capped.inclusive_days(), 15);
}

#[test]
fn test_person_code_prefix_convention() {
    let code = PersonCode::from_display_name("AL - Alice").unwrap();
    assert_eq!(code, PersonCode::new("AL"));

    // Codes survive a display round trip through formatting.
    assert_eq!(format!("{} - Alice", code), "AL - Alice");
}

#[test]
fn test_money_display_uses_currency_symbol() {
    assert_eq!(Money::eur(dec!(12.3)).to_string(), "€ 12.30");
    assert_eq!(
        Money::new(dec!(-4.5), Currency::GBP).to_string(),
        "£ -4.50"
    );
}
