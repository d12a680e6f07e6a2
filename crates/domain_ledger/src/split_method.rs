//! Split methods
//!
//! A split method says how an expense is apportioned. The first three
//! kinds carry no payload; custom methods carry a JSON payload that is
//! parsed into [`CustomSplit`] once, at the store boundary, and never
//! re-parsed downstream.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CoreError, SplitMethodId};

/// The four ways an expense can be split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitKind {
    /// Equal shares across the applicable ownership set
    Equal,
    /// Shares proportional to ownership percentages
    Ownership,
    /// Shares proportional to overnight stays in the expense period
    Occupancy,
    /// Shares from a custom payload
    Custom,
}

impl SplitKind {
    /// Numeric code as stored on expense rows
    pub fn code(&self) -> i64 {
        match self {
            SplitKind::Equal => 1,
            SplitKind::Ownership => 2,
            SplitKind::Occupancy => 3,
            SplitKind::Custom => 4,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, CoreError> {
        match code {
            1 => Ok(SplitKind::Equal),
            2 => Ok(SplitKind::Ownership),
            3 => Ok(SplitKind::Occupancy),
            4 => Ok(SplitKind::Custom),
            other => Err(CoreError::validation(format!(
                "Unsupported split method type: {}",
                other
            ))),
        }
    }
}

/// A configured split method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitMethod {
    pub id: SplitMethodId,
    pub kind: SplitKind,
    /// Present only for custom methods
    pub custom: Option<CustomSplit>,
}

/// Custom split payload
///
/// Mirrors the JSON shape `{"type": "...", "splits": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CustomSplit {
    /// Listed people each take a fixed percentage
    Percentage { splits: Vec<PercentageSplit> },
    /// Listed people each take a fixed amount; fractions are amount/total
    Fixed { splits: Vec<FixedSplit> },
    /// Listed people are weighted; fractions are weight/total
    Weights { splits: Vec<WeightSplit> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageSplit {
    pub pid: String,
    pub pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedSplit {
    pub pid: String,
    pub amt: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSplit {
    pub pid: String,
    pub w: Decimal,
}

impl CustomSplit {
    /// Parses the JSON payload of a custom split method
    pub fn parse(json: &str) -> Result<CustomSplit, CoreError> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::validation(format!("Invalid JSON for custom split: {}", e)))
    }

    /// Person ids listed in the payload, in payload order
    pub fn pids(&self) -> Vec<&str> {
        match self {
            CustomSplit::Percentage { splits } => splits.iter().map(|s| s.pid.as_str()).collect(),
            CustomSplit::Fixed { splits } => splits.iter().map(|s| s.pid.as_str()).collect(),
            CustomSplit::Weights { splits } => splits.iter().map(|s| s.pid.as_str()).collect(),
        }
    }
}

impl SplitMethod {
    /// Builds a method without payload; rejects kind Custom
    pub fn simple(id: SplitMethodId, kind: SplitKind) -> Result<Self, CoreError> {
        if kind == SplitKind::Custom {
            return Err(CoreError::validation(
                "Custom split methods require a payload",
            ));
        }
        Ok(Self {
            id,
            kind,
            custom: None,
        })
    }

    /// Builds a custom method from its JSON payload
    pub fn custom_from_json(id: SplitMethodId, json: &str) -> Result<Self, CoreError> {
        Ok(Self {
            id,
            kind: SplitKind::Custom,
            custom: Some(CustomSplit::parse(json)?),
        })
    }
}
