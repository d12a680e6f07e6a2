//! People handlers

use axum::{extract::State, Json};
use validator::Validate;

use domain_ledger::{LedgerStore, Person};

use crate::dto::records::{CreatePersonRequest, PersonResponse};
use crate::{error::ApiError, AppState};

/// Registers a household member
pub async fn create_person(
    State(state): State<AppState>,
    Json(request): Json<CreatePersonRequest>,
) -> Result<Json<PersonResponse>, ApiError> {
    request.validate()?;

    let person = Person::new(
        request.code.as_str(),
        request.display_name,
        request.account,
    );

    let mut ledger = state.ledger.write().await;
    ledger.store_mut().add_person(person.clone())?;

    Ok(Json(person.into()))
}

/// Lists household members
pub async fn list_people(
    State(state): State<AppState>,
) -> Result<Json<Vec<PersonResponse>>, ApiError> {
    let ledger = state.ledger.read().await;
    let people = ledger.store().people()?;
    Ok(Json(people.into_iter().map(Into::into).collect()))
}
