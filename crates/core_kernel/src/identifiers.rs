//! Strongly-typed row identifiers
//!
//! Ledger tables are keyed by integer row ids. Each table has its own
//! newtype and its own seed: the first row of a table takes the seed, and
//! every subsequent row takes max(existing)+1. Newtypes keep an expense id
//! from ever being passed where a transaction id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_row_id {
    ($name:ident, $seed:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// First id assigned when the table is empty
            pub const SEED: $name = $name($seed);

            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn value(&self) -> i64 {
                self.0
            }

            /// The id following this one
            pub fn next(&self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_row_id!(OwnershipSetId, 100_001);
define_row_id!(OwnershipShareId, 100_001);
define_row_id!(StayId, 100_001);
define_row_id!(ExpenseId, 100_001);
define_row_id!(SplitMethodId, 101);
define_row_id!(EntryId, 1);

/// Short person code, the stable key of the people table
///
/// Display names follow the convention `"<CODE> - <Name>"`; the code can
/// be recovered from such a name when only the name is at hand.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonCode(String);

impl PersonCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extracts the code prefix from a `"<CODE> - <Name>"` display name
    pub fn from_display_name(name: &str) -> Option<PersonCode> {
        let (prefix, _) = name.split_once(" - ")?;
        let prefix = prefix.trim();
        if prefix.is_empty() {
            None
        } else {
            Some(PersonCode::new(prefix))
        }
    }
}

impl fmt::Display for PersonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
