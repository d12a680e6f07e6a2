//! DTOs for the transaction ledger

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use domain_ledger::LedgerEntry;

/// One ledger row, in (date, id) order
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub id: i64,
    pub date: NaiveDate,
    /// Coded label, e.g. "401 - Charge"
    pub entry_type: String,
    pub expense_id: Option<i64>,
    pub expense_type: Option<String>,
    pub amount: Decimal,
    pub person: String,
    pub account: String,
    pub note: String,
}

impl From<LedgerEntry> for EntryResponse {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            id: entry.id.value(),
            date: entry.date,
            entry_type: entry.kind.label().to_string(),
            expense_id: entry.expense_id.map(|id| id.value()),
            expense_type: entry.expense_type,
            amount: entry.amount.amount(),
            person: entry.person,
            account: entry.account,
            note: entry.note,
        }
    }
}
