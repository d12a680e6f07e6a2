//! Ownership set and split method handlers

use axum::{extract::State, Json};
use validator::Validate;

use domain_ledger::{CustomSplit, LedgerStore, ShareDraft, SplitKind};

use crate::dto::records::{
    CreateOwnershipSetRequest, CreateSplitMethodRequest, OwnershipSetResponse, SplitMethodResponse,
};
use crate::{error::ApiError, AppState};

/// Registers an ownership set together with its shares
pub async fn create_ownership_set(
    State(state): State<AppState>,
    Json(request): Json<CreateOwnershipSetRequest>,
) -> Result<Json<OwnershipSetResponse>, ApiError> {
    request.validate()?;

    let shares = request
        .shares
        .into_iter()
        .map(|s| ShareDraft {
            owner: s.owner,
            percentage: s.percentage,
        })
        .collect();

    let mut ledger = state.ledger.write().await;
    let id = ledger
        .store_mut()
        .add_ownership_set(request.effective_date, shares)?;

    Ok(Json(OwnershipSetResponse { id: id.value() }))
}

/// Registers a split method; custom payloads are parsed here, once
pub async fn create_split_method(
    State(state): State<AppState>,
    Json(request): Json<CreateSplitMethodRequest>,
) -> Result<Json<SplitMethodResponse>, ApiError> {
    let kind = SplitKind::from_code(request.type_code)?;

    let custom = match request.custom {
        Some(value) => Some(
            serde_json::from_value::<CustomSplit>(value)
                .map_err(|e| ApiError::Validation(format!("Invalid JSON for custom split: {}", e)))?,
        ),
        None => None,
    };

    let mut ledger = state.ledger.write().await;
    let id = ledger.store_mut().add_split_method(kind, custom)?;

    Ok(Json(SplitMethodResponse { id: id.value() }))
}
