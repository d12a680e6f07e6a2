//! Request handlers

pub mod charges;
pub mod expenses;
pub mod health;
pub mod ledger;
pub mod people;
pub mod records;
pub mod stays;
