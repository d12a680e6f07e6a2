//! Occupancy aggregation
//!
//! Two measures over the overnight-stay records:
//!
//! - **stays** (person-nights): inclusive overlap days × head count, over
//!   the full window. Drives initial occupancy-split charging.
//! - **days**: inclusive overlap days capped at "today", independent of
//!   head count. Drives reconciliation's final fair shares.
//!
//! Tallies iterate in person-code order, which makes downstream remainder
//! placement deterministic.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use core_kernel::{DateRange, PersonCode};
use domain_ledger::LedgerStore;

use crate::error::SettlementError;

/// Person-nights one person accumulated in a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StayTally {
    pub person_code: PersonCode,
    pub person_name: String,
    pub stays: u64,
}

/// Elapsed occupancy days one person accumulated in a (capped) window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTally {
    pub person_code: PersonCode,
    pub days: i64,
}

/// Sums person-nights per person over the window
///
/// People with no overlapping stay do not appear. Result is ordered by
/// person code.
pub fn stay_tallies<S: LedgerStore + ?Sized>(
    store: &S,
    window: &DateRange,
) -> Result<Vec<StayTally>, SettlementError> {
    let mut by_code: BTreeMap<PersonCode, (String, u64)> = BTreeMap::new();

    for stay in store.stays()? {
        let stays = stay.stays_within(window);
        if stays == 0 {
            continue;
        }
        let slot = by_code
            .entry(stay.person_code.clone())
            .or_insert_with(|| (stay.person_name.clone(), 0));
        slot.1 += stays;
    }

    Ok(by_code
        .into_iter()
        .map(|(person_code, (person_name, stays))| StayTally {
            person_code,
            person_name,
            stays,
        })
        .collect())
}

/// Total person-nights across tallies
pub fn total_stays(tallies: &[StayTally]) -> u64 {
    tallies.iter().map(|t| t.stays).sum()
}

/// Sums elapsed occupancy days per person, capped at `as_of`
///
/// The window is clipped to end no later than `as_of`; a window entirely
/// in the future yields no tallies. Head count is deliberately ignored.
/// Result is ordered by person code.
pub fn day_tallies<S: LedgerStore + ?Sized>(
    store: &S,
    window: &DateRange,
    as_of: NaiveDate,
) -> Result<Vec<DayTally>, SettlementError> {
    let capped = match window.clamp_end(as_of) {
        Some(capped) => capped,
        None => return Ok(Vec::new()),
    };

    let mut by_code: BTreeMap<PersonCode, i64> = BTreeMap::new();

    for stay in store.stays()? {
        if let Some(overlap) = stay.period.overlap(&capped) {
            *by_code.entry(stay.person_code.clone()).or_insert(0) += overlap.inclusive_days();
        }
    }

    Ok(by_code
        .into_iter()
        .map(|(person_code, days)| DayTally { person_code, days })
        .collect())
}

/// Total elapsed days across tallies
pub fn total_days(tallies: &[DayTally]) -> i64 {
    tallies.iter().map(|t| t.days).sum()
}
