//! Ledger Domain - Typed household records and the record-store port
//!
//! This crate models the household's tables as typed entities and exposes
//! the [`LedgerStore`] repository interface the settlement engines consume:
//!
//! - **People**: reference data, keyed by short code
//! - **Ownership sets/shares**: versioned ownership splits
//! - **Split methods**: how an expense is apportioned, including parsed
//!   custom payloads
//! - **Overnight stays**: occupancy records driving occupancy splits and
//!   reconciliation
//! - **Expenses**: the charge/reconcile lifecycle state machine
//! - **Ledger entries**: signed money movements with audit notes

pub mod entry;
pub mod expense;
pub mod ownership;
pub mod person;
pub mod split_method;
pub mod stay;
pub mod store;

pub use entry::{EntryDraft, EntryKind, LedgerEntry};
pub use expense::{Expense, ExpenseStatus};
pub use ownership::{applicable_set, validate_percentages, OwnershipSet, OwnershipShare};
pub use person::Person;
pub use split_method::{CustomSplit, FixedSplit, PercentageSplit, SplitKind, SplitMethod, WeightSplit};
pub use stay::OvernightStay;
pub use store::{ExpenseDraft, LedgerStore, MemoryStore, ShareDraft};
