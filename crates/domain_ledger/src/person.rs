//! Household members

use core_kernel::PersonCode;
use serde::{Deserialize, Serialize};

/// A person who can be charged or refunded
///
/// Reference data: the code is the stable key, the display name is what
/// ledger rows carry, and the account is where settlements are paid.
/// Display names follow the `"<CODE> - <Name>"` convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Short unique code, e.g. "AL"
    pub code: PersonCode,
    /// Name as written on ledger rows, e.g. "AL - Alice"
    pub display_name: String,
    /// Account reference for settlements
    pub account: String,
}

impl Person {
    pub fn new(
        code: impl Into<PersonCode>,
        display_name: impl Into<String>,
        account: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
            account: account.into(),
        }
    }
}
