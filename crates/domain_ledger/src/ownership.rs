//! Ownership sets and shares
//!
//! Ownership is versioned: each set takes effect on its effective date and
//! supersedes earlier sets from that day forward. Equal and ownership
//! splits both draw their owner list from the set applicable on the
//! expense date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{CoreError, OwnershipSetId, OwnershipShareId};

/// A point-in-time ownership split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipSet {
    pub id: OwnershipSetId,
    /// First day this set applies
    pub effective_date: NaiveDate,
}

/// One owner's slice of an ownership set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipShare {
    pub id: OwnershipShareId,
    pub set_id: OwnershipSetId,
    /// Owner display name as written on ledger rows
    pub owner: String,
    /// Ownership percentage, 0–100
    pub percentage: Decimal,
}

/// Picks the ownership set applicable on a given date
///
/// Applicable = latest effective date that is on or before the expense
/// date. A tie on effective date is broken by the highest set id, so the
/// choice is deterministic regardless of row order.
pub fn applicable_set(sets: &[OwnershipSet], on: NaiveDate) -> Option<&OwnershipSet> {
    sets.iter()
        .filter(|set| set.effective_date <= on)
        .max_by_key(|set| (set.effective_date, set.id))
}

/// Checks that a set's percentages sum to exactly 100
pub fn validate_percentages(shares: &[OwnershipShare]) -> Result<(), CoreError> {
    let total: Decimal = shares.iter().map(|s| s.percentage).sum();
    if total != dec!(100) {
        return Err(CoreError::validation(format!(
            "Ownership percentages do not sum to 100% (current: {}%)",
            total
        )));
    }
    Ok(())
}
