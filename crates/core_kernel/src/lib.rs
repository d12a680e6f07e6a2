//! Core Kernel - Foundational types for the hearthshare ledger
//!
//! This crate provides the building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic and the N−1 split rule
//! - Calendar ranges, occupancy day math, and the household clock
//! - Strongly-typed integer row identifiers with per-table seeds

pub mod error;
pub mod identifiers;
pub mod money;
pub mod temporal;

pub use error::CoreError;
pub use identifiers::{
    EntryId, ExpenseId, OwnershipSetId, OwnershipShareId, PersonCode, SplitMethodId, StayId,
};
pub use money::{Currency, Money, MoneyError};
pub use temporal::{format_dmy, Clock, DateRange, FixedClock, SystemClock, Timezone};
