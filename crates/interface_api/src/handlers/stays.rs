//! Overnight stay handlers

use axum::{extract::State, Json};
use validator::Validate;

use core_kernel::{DateRange, PersonCode};
use domain_ledger::LedgerStore;

use crate::dto::records::{CreateStayRequest, StayResponse};
use crate::{error::ApiError, AppState};

/// Records an overnight stay
pub async fn create_stay(
    State(state): State<AppState>,
    Json(request): Json<CreateStayRequest>,
) -> Result<Json<StayResponse>, ApiError> {
    request.validate()?;

    let period = DateRange::new(request.start_date, request.end_date)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let mut ledger = state.ledger.write().await;
    let id = ledger.store_mut().add_stay(
        PersonCode::new(request.person_code),
        period,
        request.head_count,
    )?;

    let stay = ledger
        .store()
        .stays()?
        .into_iter()
        .find(|s| s.id == id)
        .expect("stay was just inserted");

    Ok(Json(StayResponse {
        id: stay.id.value(),
        person_code: stay.person_code.to_string(),
        person_name: stay.person_name,
        start_date: stay.period.start,
        end_date: stay.period.end,
        head_count: stay.head_count,
    }))
}

/// Lists overnight stays
pub async fn list_stays(
    State(state): State<AppState>,
) -> Result<Json<Vec<StayResponse>>, ApiError> {
    let ledger = state.ledger.read().await;
    let stays = ledger.store().stays()?;

    Ok(Json(
        stays
            .into_iter()
            .map(|s| StayResponse {
                id: s.id.value(),
                person_code: s.person_code.to_string(),
                person_name: s.person_name,
                start_date: s.period.start,
                end_date: s.period.end,
                head_count: s.head_count,
            })
            .collect(),
    ))
}
