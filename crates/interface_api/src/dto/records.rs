//! DTOs for household record maintenance

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_ledger::Person;

/// Request to register a household member
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePersonRequest {
    #[validate(length(min = 1, max = 8))]
    pub code: String,
    #[validate(length(min = 1))]
    pub display_name: String,
    #[serde(default)]
    pub account: String,
}

/// A household member
#[derive(Debug, Serialize)]
pub struct PersonResponse {
    pub code: String,
    pub display_name: String,
    pub account: String,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            code: person.code.to_string(),
            display_name: person.display_name,
            account: person.account,
        }
    }
}

/// One share of a new ownership set
#[derive(Debug, Deserialize, Serialize)]
pub struct ShareRequest {
    pub owner: String,
    pub percentage: Decimal,
}

/// Request to register an ownership set with its shares
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOwnershipSetRequest {
    pub effective_date: NaiveDate,
    #[validate(length(min = 1))]
    pub shares: Vec<ShareRequest>,
}

#[derive(Debug, Serialize)]
pub struct OwnershipSetResponse {
    pub id: i64,
}

/// Request to register a split method
///
/// `type_code` is 1..=4; custom methods (4) carry their payload inline.
#[derive(Debug, Deserialize)]
pub struct CreateSplitMethodRequest {
    pub type_code: i64,
    #[serde(default)]
    pub custom: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct SplitMethodResponse {
    pub id: i64,
}

/// Request to record an overnight stay
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStayRequest {
    #[validate(length(min = 1))]
    pub person_code: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(range(min = 1))]
    pub head_count: u32,
}

/// An overnight stay record
#[derive(Debug, Serialize)]
pub struct StayResponse {
    pub id: i64,
    pub person_code: String,
    pub person_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub head_count: u32,
}
