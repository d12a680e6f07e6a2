//! Expenses and their lifecycle
//!
//! An expense moves along `Pending → (Charged | ProvisionallyCharged) →
//! Reconciled`. The status is a tagged variant, not a string: prefix
//! matching on status text is confined to the Display/FromStr boundary.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use core_kernel::{format_dmy, CoreError, DateRange, ExpenseId, Money, SplitMethodId};

use crate::split_method::SplitKind;

/// Where an expense stands in the charge/reconcile workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseStatus {
    /// Created, no charges yet
    Pending,
    /// Charged in one phase; charges are final unless deleted
    Charged,
    /// Charged provisionally; awaits reconciliation
    ProvisionallyCharged,
    /// Reconciled on the given date; adjustments are immutable
    Reconciled { on: NaiveDate },
}

impl ExpenseStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, ExpenseStatus::Pending)
    }

    pub fn is_provisional(&self) -> bool {
        matches!(self, ExpenseStatus::ProvisionallyCharged)
    }

    pub fn is_reconciled(&self) -> bool {
        matches!(self, ExpenseStatus::Reconciled { .. })
    }

    /// True for statuses the reconciliation engine accepts as group members
    pub fn is_reconcilable(&self) -> bool {
        matches!(
            self,
            ExpenseStatus::ProvisionallyCharged | ExpenseStatus::Reconciled { .. }
        )
    }

    /// True while charges may still be deleted
    pub fn allows_charge_deletion(&self) -> bool {
        matches!(
            self,
            ExpenseStatus::Charged | ExpenseStatus::ProvisionallyCharged
        )
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseStatus::Pending => write!(f, "Pending"),
            ExpenseStatus::Charged => write!(f, "Charged"),
            ExpenseStatus::ProvisionallyCharged => write!(f, "Provisionally Charged"),
            ExpenseStatus::Reconciled { on } => write!(f, "Reconciled ({})", format_dmy(*on)),
        }
    }
}

impl FromStr for ExpenseStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        let lower = normalized.to_lowercase();

        if lower.is_empty() || lower == "pending" {
            return Ok(ExpenseStatus::Pending);
        }
        if lower == "charged" {
            return Ok(ExpenseStatus::Charged);
        }
        if lower.starts_with("provisionally charged") {
            return Ok(ExpenseStatus::ProvisionallyCharged);
        }
        if lower.starts_with("reconciled") {
            let on = normalized
                .split_once('(')
                .and_then(|(_, rest)| rest.split_once(')'))
                .map(|(date, _)| date.trim())
                .and_then(|date| NaiveDate::parse_from_str(date, "%d/%m/%y").ok())
                .ok_or_else(|| {
                    CoreError::validation(format!("Unparseable reconciled status: '{}'", s))
                })?;
            return Ok(ExpenseStatus::Reconciled { on });
        }

        Err(CoreError::validation(format!(
            "Unrecognized expense status: '{}'",
            s
        )))
    }
}

impl Serialize for ExpenseStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ExpenseStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// A shared expense to be apportioned across the household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    /// Expense date; charges are dated to this day
    pub date: NaiveDate,
    /// Category code, e.g. "UTIL" or "CLEANING"
    pub expense_type: String,
    /// Amount to apportion; must be positive
    pub amount: Money,
    pub split_method_id: SplitMethodId,
    /// Denormalized copy of the method's kind
    pub split_kind: SplitKind,
    pub status: ExpenseStatus,
    /// Provisioning period; required for occupancy splits and reconciliation
    pub period: Option<DateRange>,
    /// When this expense was last swept up by a reconciliation run
    pub last_reconciled: Option<NaiveDate>,
}

impl Expense {
    /// Advances Pending to Charged; any other status is left untouched
    ///
    /// Single-phase charging must never clobber a provisional or
    /// reconciled status.
    pub fn mark_charged_if_pending(&mut self) {
        if self.status.is_pending() {
            self.status = ExpenseStatus::Charged;
        }
    }
}
