//! Charge engine
//!
//! Turns one expense plus its resolved split into a batch of signed
//! charge entries. Every share except the last is rounded independently;
//! the last share takes the exact remainder, so the batch always sums to
//! the (rounded) expense amount. Charges are stored negative: a charge is
//! what the person owes.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use core_kernel::{EntryId, ExpenseId};
use domain_ledger::{
    CustomSplit, EntryDraft, EntryKind, Expense, ExpenseStatus, LedgerStore,
};

use crate::error::SettlementError;
use crate::splits::{resolve_splits, ResolvedSplit, Share, SplitBasis};

/// What a successful charge run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeOutcome {
    pub expense_id: ExpenseId,
    pub entry_ids: Vec<EntryId>,
}

/// Result of a delete-charges request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Entries removed, expense back to Pending
    Deleted { removed: usize },
    /// Nothing to do: the expense had no charges
    NothingToDelete,
}

/// Creates the charge entries for an expense (single-phase)
///
/// Guards: positive amount, no existing entries for the expense. On
/// success the expense advances Pending → Charged; provisional and
/// reconciled statuses are never overwritten by this path.
pub fn create_charges<S: LedgerStore + ?Sized>(
    store: &mut S,
    expense_id: ExpenseId,
) -> Result<ChargeOutcome, SettlementError> {
    let expense = load_expense(store, expense_id)?;

    if !expense.amount.is_positive() {
        return Err(SettlementError::validation(format!(
            "Expense {} has no positive amount",
            expense_id
        )));
    }

    if !store.entries_for_expense(expense_id)?.is_empty() {
        return Err(SettlementError::conflict(format!(
            "Charges already exist for Expense ID {}",
            expense_id
        )));
    }

    let resolved = resolve_splits(store, &expense)?;
    let drafts = plan_charges(store, &expense, &resolved)?;

    let entry_ids = store.append_entries(drafts)?;

    if expense.status.is_pending() {
        store.set_expense_status(expense_id, ExpenseStatus::Charged)?;
    }

    tracing::info!(
        expense_id = expense_id.value(),
        entries = entry_ids.len(),
        "charges created"
    );

    Ok(ChargeOutcome {
        expense_id,
        entry_ids,
    })
}

/// Creates charges for the two-phase workflow
///
/// Identical to [`create_charges`], except the expense ends up
/// ProvisionallyCharged. Refuses expenses that are already provisional or
/// reconciled, and requires the provisioning period up front so the later
/// reconciliation has a window to work with.
pub fn create_provisional_charges<S: LedgerStore + ?Sized>(
    store: &mut S,
    expense_id: ExpenseId,
) -> Result<ChargeOutcome, SettlementError> {
    let expense = load_expense(store, expense_id)?;

    if expense.status.is_provisional() {
        return Err(SettlementError::conflict(format!(
            "Provisional charges already exist for Expense ID {}",
            expense_id
        )));
    }
    if expense.status.is_reconciled() {
        return Err(SettlementError::conflict(format!(
            "Expense {} has already been reconciled",
            expense_id
        )));
    }
    if expense.period.is_none() {
        return Err(SettlementError::validation(
            "Start and end dates must be set for provisional charges",
        ));
    }

    let outcome = create_charges(store, expense_id)?;

    // The charge run above leaves the status at Charged; the two-phase
    // workflow supersedes that.
    store.set_expense_status(expense_id, ExpenseStatus::ProvisionallyCharged)?;

    Ok(outcome)
}

/// Deletes an expense's charges while they are still deletable
///
/// Pending expenses (or expenses whose entries are already gone) are a
/// reported no-op. Reconciled expenses are refused outright: adjustments
/// are corrected by re-reconciling, never by deletion.
pub fn delete_charges<S: LedgerStore + ?Sized>(
    store: &mut S,
    expense_id: ExpenseId,
) -> Result<DeleteOutcome, SettlementError> {
    let expense = load_expense(store, expense_id)?;

    if expense.status.is_reconciled() {
        return Err(SettlementError::conflict(format!(
            "Expense {} has already been reconciled; reconciliation adjustments must not be \
             deleted. To correct the distribution, run reconciliation again for the period.",
            expense_id
        )));
    }

    if !expense.status.allows_charge_deletion() {
        return Ok(DeleteOutcome::NothingToDelete);
    }

    let removed = store.remove_entries_for_expense(expense_id)?;
    if removed == 0 {
        return Ok(DeleteOutcome::NothingToDelete);
    }

    store.set_expense_status(expense_id, ExpenseStatus::Pending)?;

    tracing::info!(
        expense_id = expense_id.value(),
        removed,
        "charges deleted"
    );

    Ok(DeleteOutcome::Deleted { removed })
}

fn load_expense<S: LedgerStore + ?Sized>(
    store: &S,
    expense_id: ExpenseId,
) -> Result<Expense, SettlementError> {
    store
        .expense(expense_id)?
        .ok_or_else(|| SettlementError::not_found(format!("Expense {} not found", expense_id)))
}

/// Builds the charge entry batch for a resolved split
fn plan_charges<S: LedgerStore + ?Sized>(
    store: &S,
    expense: &Expense,
    resolved: &ResolvedSplit,
) -> Result<Vec<EntryDraft>, SettlementError> {
    let fractions: Vec<Decimal> = resolved.shares.iter().map(|s| s.fraction).collect();
    let parts = expense.amount.split_by_fractions(&fractions)?;

    let mut drafts = Vec::with_capacity(parts.len());
    for (share, part) in resolved.shares.iter().zip(parts) {
        drafts.push(EntryDraft {
            date: expense.date,
            kind: EntryKind::Charge,
            expense_id: Some(expense.id),
            expense_type: Some(expense.expense_type.clone()),
            amount: -part,
            person: share.person_name.clone(),
            account: account_for_share(store, share)?,
            note: charge_note(expense, share, &resolved.basis),
        });
    }

    Ok(drafts)
}

/// Resolves the account reference for a share's person, empty if unknown
fn account_for_share<S: LedgerStore + ?Sized>(
    store: &S,
    share: &Share,
) -> Result<String, SettlementError> {
    if let Some(code) = &share.person_code {
        if let Some(person) = store.person_by_code(code)? {
            return Ok(person.account);
        }
    }
    if let Some(person) = store.person_by_name(&share.person_name)? {
        return Ok(person.account);
    }
    Ok(String::new())
}

/// Renders the per-person audit note for a charge
fn charge_note(expense: &Expense, share: &Share, basis: &SplitBasis) -> String {
    let pct = two_dp(share.fraction * dec!(100));
    let base = two_dp(expense.amount.amount());

    match basis {
        SplitBasis::Equal { owner_count } => format!(
            "{}% of {} based on equal split between {} owners.",
            pct, base, owner_count
        ),
        SplitBasis::Ownership => format!("{}% of {} based on ownership%.", pct, base),
        SplitBasis::Occupancy { total_stays } => format!(
            "{}% of {} based on {}/{} overnight stays.",
            pct,
            base,
            share.stays.unwrap_or(0),
            total_stays
        ),
        SplitBasis::Custom(custom) => match custom {
            CustomSplit::Percentage { splits } => {
                let breakdown = splits
                    .iter()
                    .map(|s| format!("{} ({}%)", s.pid, s.pct))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}% of {} based on custom split: {}.", pct, base, breakdown)
            }
            CustomSplit::Fixed { splits } => {
                let breakdown = splits
                    .iter()
                    .map(|s| format!("{} ({} EUR)", s.pid, s.amt))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "{}% of {} based on custom fixed amounts: {}.",
                    pct, base, breakdown
                )
            }
            CustomSplit::Weights { splits } => {
                let breakdown = splits
                    .iter()
                    .map(|s| format!("{} (weight {})", s.pid, s.w))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "{}% of {} based on custom weights: {}.",
                    pct, base, breakdown
                )
            }
        },
    }
}

/// Formats a decimal at exactly two decimal places, half away from zero
pub(crate) fn two_dp(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::{DateRange, Money, SplitMethodId};
    use domain_ledger::{ExpenseDraft, MemoryStore, Person, ShareDraft, SplitKind};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn base_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store
            .add_person(Person::new("AL", "AL - Alice", "ACC-AL"))
            .unwrap();
        store
            .add_person(Person::new("BO", "BO - Bob", "ACC-BO"))
            .unwrap();
        store
            .add_person(Person::new("CA", "CA - Cara", "ACC-CA"))
            .unwrap();
        store
    }

    fn add_equal_setup(store: &mut MemoryStore, owners: &[(&str, Decimal)]) -> SplitMethodId {
        store
            .add_ownership_set(
                d(2024, 1, 1),
                owners
                    .iter()
                    .map(|(owner, pct)| ShareDraft {
                        owner: owner.to_string(),
                        percentage: *pct,
                    })
                    .collect(),
            )
            .unwrap();
        store.add_split_method(SplitKind::Equal, None).unwrap()
    }

    fn add_expense(
        store: &mut MemoryStore,
        amount: Decimal,
        method: SplitMethodId,
        period: Option<DateRange>,
    ) -> ExpenseId {
        store
            .add_expense(ExpenseDraft {
                date: d(2024, 2, 1),
                expense_type: "UTIL".to_string(),
                amount: Money::eur(amount),
                split_method_id: method,
                period,
            })
            .unwrap()
    }

    #[test]
    fn test_equal_three_way_charges_sum_and_remainder() {
        let mut store = base_store();
        let method = add_equal_setup(
            &mut store,
            &[
                ("AL - Alice", dec!(50)),
                ("BO - Bob", dec!(30)),
                ("CA - Cara", dec!(20)),
            ],
        );
        let id = add_expense(&mut store, dec!(100.00), method, None);

        create_charges(&mut store, id).unwrap();

        let entries = store.entries_for_expense(id).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].amount.amount(), dec!(-33.33));
        assert_eq!(entries[1].amount.amount(), dec!(-33.33));
        // Last owner in share order absorbs the remainder.
        assert_eq!(entries[2].amount.amount(), dec!(-33.34));

        let total: Decimal = entries.iter().map(|e| e.amount.amount()).sum();
        assert_eq!(total, dec!(-100.00));

        assert_eq!(
            entries[0].note,
            "33.33% of 100.00 based on equal split between 3 owners."
        );
        assert_eq!(entries[0].account, "ACC-AL");
        assert_eq!(entries[0].kind, EntryKind::Charge);

        let expense = store.expense(id).unwrap().unwrap();
        assert_eq!(expense.status, ExpenseStatus::Charged);
    }

    #[test]
    fn test_duplicate_charges_rejected_and_ledger_untouched() {
        let mut store = base_store();
        let method = add_equal_setup(&mut store, &[("AL - Alice", dec!(100))]);
        let id = add_expense(&mut store, dec!(80.00), method, None);

        create_charges(&mut store, id).unwrap();
        let before = store.entries().unwrap();

        let second = create_charges(&mut store, id);
        assert!(matches!(second, Err(SettlementError::Conflict(_))));
        assert_eq!(store.entries().unwrap(), before);
    }

    #[test]
    fn test_single_owner_takes_whole_amount() {
        let mut store = base_store();
        let method = add_equal_setup(&mut store, &[("AL - Alice", dec!(100))]);
        let id = add_expense(&mut store, dec!(123.45), method, None);

        create_charges(&mut store, id).unwrap();

        let entries = store.entries_for_expense(id).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].amount.amount(), dec!(-123.45));
    }

    #[test]
    fn test_occupancy_scenario_from_stay_records() {
        // Two people, five days each: both owe exactly half.
        let mut store = base_store();
        let method = store.add_split_method(SplitKind::Occupancy, None).unwrap();
        store
            .add_stay(
                "AL".into(),
                DateRange::new(d(2024, 1, 1), d(2024, 1, 5)).unwrap(),
                1,
            )
            .unwrap();
        store
            .add_stay(
                "BO".into(),
                DateRange::new(d(2024, 1, 6), d(2024, 1, 10)).unwrap(),
                1,
            )
            .unwrap();

        let window = DateRange::new(d(2024, 1, 1), d(2024, 1, 10)).unwrap();
        let id = add_expense(&mut store, dec!(100.00), method, Some(window));

        create_charges(&mut store, id).unwrap();

        let entries = store.entries_for_expense(id).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].amount.amount(), dec!(-50.00));
        assert_eq!(entries[1].amount.amount(), dec!(-50.00));
        assert!(entries[0].note.contains("5/10 overnight stays"));
        assert!(entries[1].note.contains("5/10 overnight stays"));
    }

    #[test]
    fn test_custom_note_enumerates_breakdown() {
        let mut store = base_store();
        let custom = CustomSplit::parse(
            r#"{"type":"fixed","splits":[{"pid":"AL","amt":30},{"pid":"BO","amt":70}]}"#,
        )
        .unwrap();
        let method = store
            .add_split_method(SplitKind::Custom, Some(custom))
            .unwrap();
        let id = add_expense(&mut store, dec!(200.00), method, None);

        create_charges(&mut store, id).unwrap();

        let entries = store.entries_for_expense(id).unwrap();
        assert_eq!(
            entries[0].note,
            "30.00% of 200.00 based on custom fixed amounts: AL (30 EUR), BO (70 EUR)."
        );
        assert_eq!(entries[0].amount.amount(), dec!(-60.00));
        assert_eq!(entries[1].amount.amount(), dec!(-140.00));
    }

    #[test]
    fn test_provisional_forces_status_and_requires_period() {
        let mut store = base_store();
        let method = add_equal_setup(&mut store, &[("AL - Alice", dec!(100))]);

        let without_period = add_expense(&mut store, dec!(50.00), method, None);
        let result = create_provisional_charges(&mut store, without_period);
        assert!(matches!(result, Err(SettlementError::Validation(_))));

        let window = DateRange::new(d(2024, 2, 1), d(2024, 2, 29)).unwrap();
        let id = add_expense(&mut store, dec!(50.00), method, Some(window));
        create_provisional_charges(&mut store, id).unwrap();

        let expense = store.expense(id).unwrap().unwrap();
        assert_eq!(expense.status, ExpenseStatus::ProvisionallyCharged);

        // Running it again is a conflict, not a double charge.
        let again = create_provisional_charges(&mut store, id);
        assert!(matches!(again, Err(SettlementError::Conflict(_))));
    }

    #[test]
    fn test_delete_charges_gating() {
        let mut store = base_store();
        let method = add_equal_setup(&mut store, &[("AL - Alice", dec!(100))]);
        let id = add_expense(&mut store, dec!(40.00), method, None);

        // Pending: reported no-op.
        assert_eq!(
            delete_charges(&mut store, id).unwrap(),
            DeleteOutcome::NothingToDelete
        );

        create_charges(&mut store, id).unwrap();
        assert_eq!(
            delete_charges(&mut store, id).unwrap(),
            DeleteOutcome::Deleted { removed: 1 }
        );
        assert!(store.entries_for_expense(id).unwrap().is_empty());
        assert_eq!(
            store.expense(id).unwrap().unwrap().status,
            ExpenseStatus::Pending
        );

        // Reconciled: refused.
        create_charges(&mut store, id).unwrap();
        store
            .set_expense_status(id, ExpenseStatus::Reconciled { on: d(2024, 3, 1) })
            .unwrap();
        let blocked = delete_charges(&mut store, id);
        assert!(matches!(blocked, Err(SettlementError::Conflict(_))));
        assert_eq!(store.entries_for_expense(id).unwrap().len(), 1);
    }

    #[test]
    fn test_two_dp_formatting() {
        assert_eq!(two_dp(dec!(33.335)), "33.34");
        assert_eq!(two_dp(dec!(50)), "50.00");
        assert_eq!(two_dp(dec!(-166.666)), "-166.67");
    }
}
