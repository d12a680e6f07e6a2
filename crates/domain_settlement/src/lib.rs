//! Settlement Domain - Charge and Reconciliation Engine
//!
//! This crate turns one expense plus a chosen split method into a balanced
//! batch of signed ledger entries, and later re-derives fair shares from
//! actual occupancy and emits adjusting entries against what was already
//! charged.
//!
//! # Workflow
//!
//! - Single-phase: `Pending → Charged` via [`charges::create_charges`]
//! - Two-phase: `Pending → ProvisionallyCharged` via
//!   [`charges::create_provisional_charges`], then `→ Reconciled (date)`
//!   via [`reconciliation::reconcile_charges`]
//! - Charges are deletable until reconciliation; adjustments never are
//!
//! # Invariants
//!
//! - Charge batches sum to minus the (rounded) expense amount exactly;
//!   the last share in resolver order absorbs the rounding remainder
//! - At most one charge batch exists per expense
//! - Reconciliation adjustments for a group net to zero, so re-running
//!   converges instead of drifting

pub mod charges;
pub mod error;
pub mod notify;
pub mod occupancy;
pub mod reconciliation;
pub mod service;
pub mod splits;

pub use charges::{ChargeOutcome, DeleteOutcome};
pub use error::SettlementError;
pub use notify::{Notifier, NullNotifier, Severity, TracingNotifier};
pub use reconciliation::ReconcileOutcome;
pub use service::{OperationReport, SettlementService};
pub use splits::{ResolvedSplit, Share, SplitBasis};
