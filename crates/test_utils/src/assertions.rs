//! Custom assertions for ledger types

use core_kernel::Money;
use domain_ledger::{EntryKind, LedgerEntry};
use rust_decimal::Decimal;

/// Asserts that the charge entries of a batch sum to minus the expense
/// amount exactly
///
/// # Panics
///
/// Panics with the offending sum if the batch does not balance.
pub fn assert_charges_balance(entries: &[LedgerEntry], expense_amount: &Money) {
    let charges: Vec<&LedgerEntry> = entries
        .iter()
        .filter(|e| e.kind == EntryKind::Charge)
        .collect();
    assert!(!charges.is_empty(), "No charge entries in batch");

    let total: Decimal = charges.iter().map(|e| e.amount.amount()).sum();
    let expected = -expense_amount.round2().amount();
    assert_eq!(
        total, expected,
        "Charge batch sums to {} instead of {}",
        total, expected
    );
}

/// Asserts that a set of adjustment entries nets to zero
pub fn assert_adjustments_net_to_zero(entries: &[LedgerEntry]) {
    let total: Decimal = entries
        .iter()
        .filter(|e| e.kind == EntryKind::Reconciliation)
        .map(|e| e.amount.amount())
        .sum();
    assert_eq!(
        total,
        Decimal::ZERO,
        "Adjustments net to {} instead of 0",
        total
    );
}

/// Asserts two Money values are equal, with a readable failure
pub fn assert_money_eq(actual: &Money, expected: &Money) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );
    assert_eq!(
        actual.amount(),
        expected.amount(),
        "Amounts differ: actual={}, expected={}",
        actual.amount(),
        expected.amount()
    );
}
