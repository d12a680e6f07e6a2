//! Test store builder
//!
//! Builds a populated [`MemoryStore`] while letting tests state only what
//! matters to them. People default to the standard household.

use chrono::NaiveDate;
use core_kernel::{DateRange, ExpenseId, Money, PersonCode, SplitMethodId};
use domain_ledger::{
    CustomSplit, ExpenseDraft, ExpenseStatus, LedgerStore, MemoryStore, Person, ShareDraft,
    SplitKind,
};
use rust_decimal::Decimal;

use crate::fixtures::HOUSEHOLD;

/// Builder for a populated in-memory store
pub struct StoreBuilder {
    store: MemoryStore,
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreBuilder {
    /// Starts with the standard household people
    pub fn new() -> Self {
        let mut store = MemoryStore::new();
        for person in HOUSEHOLD.iter() {
            store
                .add_person(person.clone())
                .expect("fixture people are unique");
        }
        Self { store }
    }

    /// Starts with no people at all
    pub fn empty() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }

    pub fn with_person(mut self, person: Person) -> Self {
        self.store.add_person(person).expect("unique person code");
        self
    }

    /// Adds an ownership set effective from `date` with (owner, pct) shares
    pub fn with_ownership_set(mut self, date: NaiveDate, shares: &[(&str, Decimal)]) -> Self {
        self.store
            .add_ownership_set(
                date,
                shares
                    .iter()
                    .map(|(owner, pct)| ShareDraft {
                        owner: owner.to_string(),
                        percentage: *pct,
                    })
                    .collect(),
            )
            .expect("valid ownership set");
        self
    }

    pub fn with_split_method(mut self, kind: SplitKind) -> (Self, SplitMethodId) {
        let id = self
            .store
            .add_split_method(kind, None)
            .expect("valid split method");
        (self, id)
    }

    pub fn with_custom_split_method(mut self, json: &str) -> (Self, SplitMethodId) {
        let custom = CustomSplit::parse(json).expect("valid custom payload");
        let id = self
            .store
            .add_split_method(SplitKind::Custom, Some(custom))
            .expect("valid split method");
        (self, id)
    }

    pub fn with_stay(mut self, code: &str, period: DateRange, heads: u32) -> Self {
        self.store
            .add_stay(PersonCode::new(code), period, heads)
            .expect("stay for known person");
        self
    }

    /// Adds a Pending expense and hands its id back
    pub fn with_expense(
        mut self,
        date: NaiveDate,
        expense_type: &str,
        amount: Money,
        method: SplitMethodId,
        period: Option<DateRange>,
    ) -> (Self, ExpenseId) {
        let id = self
            .store
            .add_expense(ExpenseDraft {
                date,
                expense_type: expense_type.to_string(),
                amount,
                split_method_id: method,
                period,
            })
            .expect("valid expense");
        (self, id)
    }

    /// Overrides an expense's status directly, bypassing the engines
    pub fn with_status(mut self, id: ExpenseId, status: ExpenseStatus) -> Self {
        self.store
            .set_expense_status(id, status)
            .expect("known expense");
        self
    }

    pub fn build(self) -> MemoryStore {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::TemporalFixtures;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builder_round_trip() {
        let (builder, method) = StoreBuilder::new()
            .with_ownership_set(
                TemporalFixtures::date(2024, 1, 1),
                &[("AL - Alice", dec!(50)), ("BO - Bob", dec!(50))],
            )
            .with_split_method(SplitKind::Equal);
        let (builder, expense) = builder.with_expense(
            TemporalFixtures::date(2024, 2, 1),
            "UTIL",
            Money::eur(dec!(100)),
            method,
            None,
        );
        let store = builder.build();

        assert_eq!(store.people().unwrap().len(), 3);
        assert!(store.expense(expense).unwrap().is_some());
    }
}
