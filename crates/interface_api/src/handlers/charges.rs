//! Operator action handlers
//!
//! Each endpoint maps 1:1 onto a settlement engine operation.

use axum::{
    extract::{Path, State},
    Json,
};

use core_kernel::ExpenseId;

use crate::dto::expenses::{ChargeResponse, DeleteResponse, ReconcileResponse};
use crate::{error::ApiError, AppState};

/// CreateCharges: single-phase charging
pub async fn create_charges(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ChargeResponse>, ApiError> {
    let mut ledger = state.ledger.write().await;
    let (outcome, report) = ledger.create_charges(ExpenseId::new(id))?;
    Ok(Json(ChargeResponse::new(outcome, report)))
}

/// CreateProvisionalCharges: first phase of the two-phase workflow
pub async fn create_provisional_charges(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ChargeResponse>, ApiError> {
    let mut ledger = state.ledger.write().await;
    let (outcome, report) = ledger.create_provisional_charges(ExpenseId::new(id))?;
    Ok(Json(ChargeResponse::new(outcome, report)))
}

/// ReconcileCharges: settles the group sharing the trigger's period/type
pub async fn reconcile_charges(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ReconcileResponse>, ApiError> {
    let mut ledger = state.ledger.write().await;
    let (outcome, report) = ledger.reconcile_charges(ExpenseId::new(id))?;
    Ok(Json(ReconcileResponse::new(outcome, report)))
}

/// DeleteCharges: removes charges while the status still allows it
pub async fn delete_charges(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let mut ledger = state.ledger.write().await;
    let (outcome, report) = ledger.delete_charges(ExpenseId::new(id))?;
    Ok(Json(DeleteResponse::new(outcome, report)))
}
