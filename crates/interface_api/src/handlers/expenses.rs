//! Expense handlers

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use core_kernel::{Currency, DateRange, ExpenseId, Money, SplitMethodId};
use domain_ledger::{ExpenseDraft, LedgerStore};

use crate::dto::expenses::{CreateExpenseRequest, ExpenseResponse};
use crate::{error::ApiError, AppState};

/// Records a shared expense, status Pending
pub async fn create_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    request.validate()?;

    let period = match (request.start_date, request.end_date) {
        (Some(start), Some(end)) => Some(
            DateRange::new(start, end).map_err(|e| ApiError::Validation(e.to_string()))?,
        ),
        (None, None) => None,
        _ => {
            return Err(ApiError::Validation(
                "start_date and end_date must both be set or both be empty".to_string(),
            ))
        }
    };

    let amount = Money::new(request.amount, request.currency.unwrap_or(Currency::EUR));

    let mut ledger = state.ledger.write().await;
    let id = ledger.store_mut().add_expense(ExpenseDraft {
        date: request.date,
        expense_type: request.expense_type,
        amount,
        split_method_id: SplitMethodId::new(request.split_method_id),
        period,
    })?;

    let expense = ledger
        .store()
        .expense(id)?
        .expect("expense was just inserted");

    Ok(Json(expense.into()))
}

/// Lists expenses
pub async fn list_expenses(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    let ledger = state.ledger.read().await;
    let expenses = ledger.store().expenses()?;
    Ok(Json(expenses.into_iter().map(Into::into).collect()))
}

/// Fetches one expense
pub async fn get_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    let ledger = state.ledger.read().await;
    let expense = ledger
        .store()
        .expense(ExpenseId::new(id))?
        .ok_or_else(|| ApiError::NotFound(format!("Expense {} not found", id)))?;
    Ok(Json(expense.into()))
}
