//! Transaction ledger handlers

use axum::{extract::State, Json};

use domain_ledger::LedgerStore;

use crate::dto::ledger::EntryResponse;
use crate::{error::ApiError, AppState};

/// Lists the full ledger, ordered by (date, id)
pub async fn list_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<EntryResponse>>, ApiError> {
    let ledger = state.ledger.read().await;
    let entries = ledger.store().entries()?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}
