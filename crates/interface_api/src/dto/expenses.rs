//! DTOs for expenses and the operator actions

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::Currency;
use domain_ledger::Expense;
use domain_settlement::{ChargeOutcome, DeleteOutcome, OperationReport, ReconcileOutcome};

/// Request to record a shared expense
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExpenseRequest {
    pub date: NaiveDate,
    #[validate(length(min = 1))]
    pub expense_type: String,
    pub amount: Decimal,
    #[serde(default)]
    pub currency: Option<Currency>,
    pub split_method_id: i64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// A recorded expense
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub id: i64,
    pub date: NaiveDate,
    pub expense_type: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub split_method_id: i64,
    pub split_kind: String,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub last_reconciled: Option<NaiveDate>,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id.value(),
            date: expense.date,
            expense_type: expense.expense_type,
            amount: expense.amount.amount(),
            currency: expense.amount.currency(),
            split_method_id: expense.split_method_id.value(),
            split_kind: format!("{:?}", expense.split_kind).to_lowercase(),
            status: expense.status.to_string(),
            start_date: expense.period.map(|p| p.start),
            end_date: expense.period.map(|p| p.end),
            last_reconciled: expense.last_reconciled,
        }
    }
}

/// Outcome of CreateCharges / CreateProvisionalCharges
#[derive(Debug, Serialize)]
pub struct ChargeResponse {
    pub message: String,
    pub expense_id: i64,
    pub entry_ids: Vec<i64>,
}

impl ChargeResponse {
    pub fn new(outcome: ChargeOutcome, report: OperationReport) -> Self {
        Self {
            message: report.message,
            expense_id: outcome.expense_id.value(),
            entry_ids: outcome.entry_ids.iter().map(|id| id.value()).collect(),
        }
    }
}

/// Outcome of ReconcileCharges
#[derive(Debug, Serialize)]
pub struct ReconcileResponse {
    pub message: String,
    pub group: Vec<i64>,
    pub adjustment_ids: Vec<i64>,
    pub reconciled_on: NaiveDate,
}

impl ReconcileResponse {
    pub fn new(outcome: ReconcileOutcome, report: OperationReport) -> Self {
        Self {
            message: report.message,
            group: outcome.group.iter().map(|id| id.value()).collect(),
            adjustment_ids: outcome
                .adjustment_ids
                .iter()
                .map(|id| id.value())
                .collect(),
            reconciled_on: outcome.reconciled_on,
        }
    }
}

/// Outcome of DeleteCharges
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub removed: usize,
}

impl DeleteResponse {
    pub fn new(outcome: DeleteOutcome, report: OperationReport) -> Self {
        let removed = match outcome {
            DeleteOutcome::Deleted { removed } => removed,
            DeleteOutcome::NothingToDelete => 0,
        };
        Self {
            message: report.message,
            removed,
        }
    }
}
