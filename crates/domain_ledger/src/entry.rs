//! Ledger entries
//!
//! Every money movement is one signed row: charges and adjustments are
//! negative when the person owes, positive when the person is refunded.
//! Engines build [`EntryDraft`]s; the store assigns ids on append.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{EntryId, ExpenseId, Money};

/// What kind of movement a ledger row records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Money paid into the household account
    Deposit,
    /// Money paid out of the household account
    Withdrawal,
    /// A person's share of an expense
    Charge,
    /// Correction issued by a reconciliation run
    Reconciliation,
}

impl EntryKind {
    /// Coded label as written in the ledger's type column
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Deposit => "101 - Deposit",
            EntryKind::Withdrawal => "201 - Withdrawal",
            EntryKind::Charge => "401 - Charge",
            EntryKind::Reconciliation => "402 - Reconciliation",
        }
    }
}

/// A ledger row before the store has assigned its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub date: NaiveDate,
    pub kind: EntryKind,
    /// Expense this row settles, if any
    pub expense_id: Option<ExpenseId>,
    /// Denormalized copy of the expense's category
    pub expense_type: Option<String>,
    /// Signed amount: negative = owed by the person, positive = refund
    pub amount: Money,
    /// Person display name
    pub person: String,
    /// Account reference resolved from the person, empty when unknown
    pub account: String,
    /// Audit trail for the amount
    pub note: String,
}

/// A persisted ledger row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub expense_id: Option<ExpenseId>,
    pub expense_type: Option<String>,
    pub amount: Money,
    pub person: String,
    pub account: String,
    pub note: String,
}

impl LedgerEntry {
    pub fn from_draft(id: EntryId, draft: EntryDraft) -> Self {
        Self {
            id,
            date: draft.date,
            kind: draft.kind,
            expense_id: draft.expense_id,
            expense_type: draft.expense_type,
            amount: draft.amount,
            person: draft.person,
            account: draft.account,
            note: draft.note,
        }
    }
}
