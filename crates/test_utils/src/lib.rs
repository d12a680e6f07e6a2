//! Test Utilities Crate
//!
//! Shared test infrastructure for the hearthshare test suites:
//!
//! - `fixtures`: pre-built people, amounts, and windows
//! - `builders`: a populated-store builder
//! - `assertions`: balance and equality assertions for ledger types
//! - `generators`: property-based data generators

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;
