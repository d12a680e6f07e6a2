//! Reconciliation engine
//!
//! Provisional charges go out when an expense is booked, weighted by the
//! stay records known at that time. Reconciliation runs later: it gathers
//! every expense sharing the trigger's provisioning period and category,
//! re-derives fair shares from actual elapsed occupancy, and appends
//! adjustment entries that move each person from what they were charged to
//! their fair share.
//!
//! The two phases deliberately weigh differently: initial charging uses
//! stays (person-nights), the final adjustment uses days capped at today.
//! Adjustments for a group always net to zero, so re-running reconciliation
//! converges instead of drifting.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use core_kernel::{format_dmy, EntryId, ExpenseId, Money, PersonCode};
use domain_ledger::{EntryDraft, EntryKind, Expense, ExpenseStatus, LedgerStore};

use crate::charges::two_dp;
use crate::error::SettlementError;
use crate::occupancy::{day_tallies, stay_tallies, total_days, total_stays};

/// What a reconciliation run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Expenses swept into this run, lowest id first
    pub group: Vec<ExpenseId>,
    /// Appended adjustment entries (may be empty when already converged)
    pub adjustment_ids: Vec<EntryId>,
    pub reconciled_on: NaiveDate,
}

/// Reconciles the group anchored at the trigger expense
///
/// Preconditions: the trigger is ProvisionallyCharged or already
/// Reconciled (re-runs are allowed and supersede the prior result), and
/// carries a provisioning period. On success every group member is marked
/// `Reconciled (today)`.
pub fn reconcile_charges<S: LedgerStore + ?Sized>(
    store: &mut S,
    trigger_id: ExpenseId,
    today: NaiveDate,
) -> Result<ReconcileOutcome, SettlementError> {
    let trigger = store
        .expense(trigger_id)?
        .ok_or_else(|| SettlementError::not_found(format!("Expense {} not found", trigger_id)))?;

    let window = trigger.period.ok_or_else(|| {
        SettlementError::validation("Start and end dates must be set for reconciliation")
    })?;

    if !trigger.status.is_reconcilable() {
        return Err(SettlementError::conflict(
            "Only expenses with status Provisionally Charged or Reconciled can be reconciled",
        ));
    }

    // 1. Group: same provisioning period (exact dates), same category.
    let mut group: Vec<Expense> = store
        .expenses()?
        .into_iter()
        .filter(|e| {
            e.status.is_reconcilable()
                && e.period == Some(window)
                && e.expense_type == trigger.expense_type
        })
        .collect();
    group.sort_by_key(|e| e.id);

    let currency = trigger.amount.currency();

    // 2. Total of the original expense amounts.
    let mut total_cost = Money::zero(currency);
    for expense in &group {
        total_cost = total_cost.checked_add(&expense.amount)?;
    }
    if total_cost.is_zero() {
        return Err(SettlementError::validation(
            "Total cost for this reconciliation group is zero",
        ));
    }

    // 3. Stays-weighted shares over the full window. Their person set
    //    gates the run; the amounts are the booking-time reference
    //    allocation, logged for comparison against the final one.
    let stays = stay_tallies(store, &window)?;
    let all_stays = total_stays(&stays);
    if all_stays == 0 {
        return Err(SettlementError::not_found(
            "No overnight stays found in this period; nothing to reconcile",
        ));
    }
    for tally in &stays {
        let reference = total_cost
            .multiply(Decimal::from(tally.stays) / Decimal::from(all_stays))
            .round2();
        tracing::debug!(
            person = %tally.person_code,
            stays = tally.stays,
            reference = %reference,
            "stays-weighted reference allocation"
        );
    }

    // 4. What each person has been charged so far, charges and prior
    //    adjustments alike, grouped by display name.
    let mut charged_so_far: BTreeMap<String, Money> = BTreeMap::new();
    for expense in &group {
        for entry in store.entries_for_expense(expense.id)? {
            let slot = charged_so_far
                .entry(entry.person.clone())
                .or_insert_with(|| Money::zero(currency));
            *slot = slot.checked_add(&entry.amount)?;
        }
    }

    let mut group_total_charged = Money::zero(currency);
    for amount in charged_so_far.values() {
        group_total_charged = group_total_charged.checked_add(amount)?;
    }

    // 5. Days-weighted fair shares, capped at today, N−1 remainder to the
    //    last person in code order.
    let days = day_tallies(store, &window, today)?;
    let elapsed_days = total_days(&days);

    let cost_label = if today > window.end {
        "final cost".to_string()
    } else {
        format!("cost ({})", format_dmy(today))
    };

    let primary = &group[0];
    let mut drafts: Vec<EntryDraft> = Vec::new();
    let mut settled_names: BTreeSet<String> = BTreeSet::new();

    let mut running = Money::zero(currency);
    for (i, tally) in days.iter().enumerate() {
        let fair = if i + 1 == days.len() {
            group_total_charged.checked_sub(&running)?.round2()
        } else {
            let fraction = Decimal::from(tally.days) / Decimal::from(elapsed_days);
            group_total_charged.multiply(fraction).round2()
        };
        running = running.checked_add(&fair)?;

        let person_name = display_name_for(store, &tally.person_code)?;
        settled_names.insert(person_name.clone());

        let charged = charged_so_far
            .get(&person_name)
            .copied()
            .unwrap_or_else(|| Money::zero(currency));
        let adjustment = fair.checked_sub(&charged)?.round2();
        if adjustment.is_zero() {
            continue;
        }

        drafts.push(EntryDraft {
            date: today,
            kind: EntryKind::Reconciliation,
            expense_id: Some(primary.id),
            expense_type: Some(primary.expense_type.clone()),
            amount: adjustment,
            person: person_name,
            account: account_by_code(store, &tally.person_code)?,
            note: adjustment_note(
                &window,
                &cost_label,
                &fair,
                &charged,
                &adjustment,
                tally.days,
                elapsed_days,
            ),
        });
    }

    // 6. Full refunds for people charged earlier but absent from the
    //    elapsed window.
    for (person_name, charged) in &charged_so_far {
        if settled_names.contains(person_name) || charged.is_zero() {
            continue;
        }
        let adjustment = (-*charged).round2();
        let zero = Money::zero(currency);

        drafts.push(EntryDraft {
            date: today,
            kind: EntryKind::Reconciliation,
            expense_id: Some(primary.id),
            expense_type: Some(primary.expense_type.clone()),
            amount: adjustment,
            person: person_name.clone(),
            account: account_by_name(store, person_name)?,
            note: adjustment_note(
                &window,
                &cost_label,
                &zero,
                charged,
                &adjustment,
                0,
                elapsed_days,
            ),
        });
    }

    let adjustment_ids = store.append_entries(drafts)?;

    // 7. The whole group is reconciled as of today.
    for expense in &group {
        store.set_expense_status(expense.id, ExpenseStatus::Reconciled { on: today })?;
        store.set_last_reconciled(expense.id, today)?;
    }

    tracing::info!(
        trigger = trigger_id.value(),
        group_size = group.len(),
        adjustments = adjustment_ids.len(),
        "reconciliation completed"
    );

    Ok(ReconcileOutcome {
        group: group.into_iter().map(|e| e.id).collect(),
        adjustment_ids,
        reconciled_on: today,
    })
}

fn display_name_for<S: LedgerStore + ?Sized>(
    store: &S,
    code: &PersonCode,
) -> Result<String, SettlementError> {
    Ok(store
        .person_by_code(code)?
        .map(|p| p.display_name)
        .unwrap_or_else(|| code.to_string()))
}

fn account_by_code<S: LedgerStore + ?Sized>(
    store: &S,
    code: &PersonCode,
) -> Result<String, SettlementError> {
    Ok(store
        .person_by_code(code)?
        .map(|p| p.account)
        .unwrap_or_default())
}

fn account_by_name<S: LedgerStore + ?Sized>(
    store: &S,
    name: &str,
) -> Result<String, SettlementError> {
    if let Some(person) = store.person_by_name(name)? {
        return Ok(person.account);
    }
    if let Some(code) = PersonCode::from_display_name(name) {
        return account_by_code(store, &code);
    }
    Ok(String::new())
}

#[allow(clippy::too_many_arguments)]
fn adjustment_note(
    window: &core_kernel::DateRange,
    cost_label: &str,
    fair: &Money,
    charged: &Money,
    adjustment: &Money,
    days: i64,
    elapsed_days: i64,
) -> String {
    format!(
        "Period: {} – {}, {}: {}, charged so far: {}, adjustment: {} ({}/{}).",
        format_dmy(window.start),
        format_dmy(window.end),
        cost_label,
        two_dp(fair.amount()),
        two_dp(charged.amount()),
        two_dp(adjustment.amount()),
        days,
        elapsed_days
    )
}
