//! Split resolution
//!
//! Turns an expense plus its split method into an ordered list of
//! (person, fraction) shares summing to 1. The order is deterministic and
//! matters: the charge engine hands the rounding remainder to whoever is
//! last.
//!
//! - equal/ownership: ownership-share row order of the applicable set
//! - occupancy: person-code order
//! - custom: payload order

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::PersonCode;
use domain_ledger::{
    applicable_set, validate_percentages, CustomSplit, Expense, LedgerStore, SplitKind,
};

use crate::error::SettlementError;
use crate::occupancy::{stay_tallies, total_stays};

/// One participant's slice of an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    /// Display name written on the ledger row
    pub person_name: String,
    /// Person code when one is known; None for ownership rows whose owner
    /// name carries no code prefix
    pub person_code: Option<PersonCode>,
    /// Fraction of the expense, 0..=1
    pub fraction: Decimal,
    /// Person-nights backing an occupancy share
    pub stays: Option<u64>,
}

/// What the shares were derived from; drives the audit note wording
#[derive(Debug, Clone, PartialEq)]
pub enum SplitBasis {
    Equal { owner_count: usize },
    Ownership,
    Occupancy { total_stays: u64 },
    Custom(CustomSplit),
}

/// The result of resolving an expense's split method
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSplit {
    pub shares: Vec<Share>,
    pub basis: SplitBasis,
}

/// Resolves an expense into ordered per-person share fractions
pub fn resolve_splits<S: LedgerStore + ?Sized>(
    store: &S,
    expense: &Expense,
) -> Result<ResolvedSplit, SettlementError> {
    let resolved = match expense.split_kind {
        SplitKind::Equal | SplitKind::Ownership => resolve_ownership_based(store, expense)?,
        SplitKind::Occupancy => resolve_occupancy(store, expense)?,
        SplitKind::Custom => resolve_custom(store, expense)?,
    };

    if resolved.shares.is_empty() {
        return Err(SettlementError::not_found("No owners found"));
    }

    Ok(resolved)
}

fn resolve_ownership_based<S: LedgerStore + ?Sized>(
    store: &S,
    expense: &Expense,
) -> Result<ResolvedSplit, SettlementError> {
    let sets = store.ownership_sets()?;
    let set = applicable_set(&sets, expense.date)
        .ok_or_else(|| SettlementError::not_found("No ownership set found"))?;

    let shares = store.shares_for_set(set.id)?;
    if shares.is_empty() {
        return Err(SettlementError::not_found(format!(
            "Ownership set {} has no shares",
            set.id
        )));
    }

    if expense.split_kind == SplitKind::Ownership {
        validate_percentages(&shares)?;
    }

    let owner_count = shares.len();
    let equal_fraction = Decimal::ONE / Decimal::from(owner_count as i64);

    let shares = shares
        .into_iter()
        .map(|row| {
            let fraction = match expense.split_kind {
                SplitKind::Equal => equal_fraction,
                _ => row.percentage / dec!(100),
            };
            Share {
                person_code: PersonCode::from_display_name(&row.owner),
                person_name: row.owner,
                fraction,
                stays: None,
            }
        })
        .collect();

    let basis = match expense.split_kind {
        SplitKind::Equal => SplitBasis::Equal { owner_count },
        _ => SplitBasis::Ownership,
    };

    Ok(ResolvedSplit { shares, basis })
}

fn resolve_occupancy<S: LedgerStore + ?Sized>(
    store: &S,
    expense: &Expense,
) -> Result<ResolvedSplit, SettlementError> {
    let window = expense.period.ok_or_else(|| {
        SettlementError::validation("Occupancy splits require start and end dates")
    })?;

    let tallies = stay_tallies(store, &window)?;
    let total = total_stays(&tallies);
    if total == 0 {
        return Err(SettlementError::not_found("No overnight stays found"));
    }

    let shares = tallies
        .into_iter()
        .map(|tally| Share {
            person_name: tally.person_name,
            person_code: Some(tally.person_code),
            fraction: Decimal::from(tally.stays) / Decimal::from(total),
            stays: Some(tally.stays),
        })
        .collect();

    Ok(ResolvedSplit {
        shares,
        basis: SplitBasis::Occupancy { total_stays: total },
    })
}

fn resolve_custom<S: LedgerStore + ?Sized>(
    store: &S,
    expense: &Expense,
) -> Result<ResolvedSplit, SettlementError> {
    let method = store.split_method(expense.split_method_id)?.ok_or_else(|| {
        SettlementError::not_found(format!(
            "Split method {} not found",
            expense.split_method_id
        ))
    })?;
    let custom = method.custom.ok_or_else(|| {
        SettlementError::not_found(format!(
            "No custom split payload for method {}",
            expense.split_method_id
        ))
    })?;

    let fractions: Vec<(String, Decimal)> = match &custom {
        CustomSplit::Percentage { splits } => splits
            .iter()
            .map(|s| (s.pid.clone(), s.pct / dec!(100)))
            .collect(),
        CustomSplit::Fixed { splits } => {
            let total: Decimal = splits.iter().map(|s| s.amt).sum();
            if total.is_zero() {
                return Err(SettlementError::validation(
                    "Custom fixed amounts sum to zero",
                ));
            }
            splits
                .iter()
                .map(|s| (s.pid.clone(), s.amt / total))
                .collect()
        }
        CustomSplit::Weights { splits } => {
            let total: Decimal = splits.iter().map(|s| s.w).sum();
            if total.is_zero() {
                return Err(SettlementError::validation("Custom weights sum to zero"));
            }
            splits
                .iter()
                .map(|s| (s.pid.clone(), s.w / total))
                .collect()
        }
    };

    let mut shares = Vec::with_capacity(fractions.len());
    for (pid, fraction) in fractions {
        let code = PersonCode::new(pid.clone());
        // An unknown pid passes through as-is; the row is still written,
        // just without a resolvable account.
        let person_name = store
            .person_by_code(&code)?
            .map(|p| p.display_name)
            .unwrap_or(pid);
        shares.push(Share {
            person_name,
            person_code: Some(code),
            fraction,
            stays: None,
        });
    }

    Ok(ResolvedSplit {
        shares,
        basis: SplitBasis::Custom(custom),
    })
}
