//! Operator-facing settlement service
//!
//! One method per operator action, mapping 1:1 onto the engine operations.
//! This is the error boundary: every operation either fully succeeds or
//! fully aborts, and either way exactly one notification goes to the sink.
//! Errors are still returned so transport layers can map them to status
//! codes, but they never escape with partial writes behind them.

use core_kernel::{Clock, ExpenseId};
use domain_ledger::LedgerStore;

use crate::charges::{
    create_charges, create_provisional_charges, delete_charges, ChargeOutcome, DeleteOutcome,
};
use crate::error::SettlementError;
use crate::notify::{Notifier, Severity};
use crate::reconciliation::{reconcile_charges, ReconcileOutcome};

/// Outcome of an operator action, echoed to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationReport {
    pub severity: Severity,
    pub message: String,
}

/// The settlement engine behind the operator surface
pub struct SettlementService<S, N, C> {
    store: S,
    notifier: N,
    clock: C,
}

impl<S, N, C> SettlementService<S, N, C>
where
    S: LedgerStore,
    N: Notifier,
    C: Clock,
{
    pub fn new(store: S, notifier: N, clock: C) -> Self {
        Self {
            store,
            notifier,
            clock,
        }
    }

    /// Read access to the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write access for record maintenance outside the engine operations
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// CreateCharges operator action
    pub fn create_charges(
        &mut self,
        expense_id: ExpenseId,
    ) -> Result<(ChargeOutcome, OperationReport), SettlementError> {
        match create_charges(&mut self.store, expense_id) {
            Ok(outcome) => {
                let report = self.report(
                    Severity::Success,
                    "Success",
                    format!("Charges created with notes for Expense ID {}", expense_id),
                );
                Ok((outcome, report))
            }
            Err(err) => Err(self.reject("Cannot Create Charges", err)),
        }
    }

    /// CreateProvisionalCharges operator action
    pub fn create_provisional_charges(
        &mut self,
        expense_id: ExpenseId,
    ) -> Result<(ChargeOutcome, OperationReport), SettlementError> {
        match create_provisional_charges(&mut self.store, expense_id) {
            Ok(outcome) => {
                let report = self.report(
                    Severity::Success,
                    "Provisional",
                    format!("Provisional charges created for Expense ID {}", expense_id),
                );
                Ok((outcome, report))
            }
            Err(err) => Err(self.reject("Cannot Create Provisional Charges", err)),
        }
    }

    /// ReconcileCharges operator action
    pub fn reconcile_charges(
        &mut self,
        expense_id: ExpenseId,
    ) -> Result<(ReconcileOutcome, OperationReport), SettlementError> {
        let today = self.clock.today();
        match reconcile_charges(&mut self.store, expense_id, today) {
            Ok(outcome) => {
                let report = self.report(
                    Severity::Success,
                    "Reconciled",
                    "Reconciliation completed for this period and expense type".to_string(),
                );
                Ok((outcome, report))
            }
            Err(err) => Err(self.reject("Cannot Reconcile Charges", err)),
        }
    }

    /// DeleteCharges operator action
    pub fn delete_charges(
        &mut self,
        expense_id: ExpenseId,
    ) -> Result<(DeleteOutcome, OperationReport), SettlementError> {
        match delete_charges(&mut self.store, expense_id) {
            Ok(DeleteOutcome::Deleted { removed }) => {
                let report = self.report(
                    Severity::Success,
                    "Deleted",
                    format!("Charges deleted for Expense ID {}", expense_id),
                );
                Ok((DeleteOutcome::Deleted { removed }, report))
            }
            Ok(DeleteOutcome::NothingToDelete) => {
                let report = self.report(
                    Severity::Info,
                    "Info",
                    "This expense has no charges to delete".to_string(),
                );
                Ok((DeleteOutcome::NothingToDelete, report))
            }
            Err(err) => Err(self.reject("Cannot Delete Charges", err)),
        }
    }

    fn report(&self, severity: Severity, title: &str, message: String) -> OperationReport {
        self.notifier.notify(severity, title, &message);
        OperationReport { severity, message }
    }

    fn reject(&self, title: &str, err: SettlementError) -> SettlementError {
        self.notifier.notify(Severity::Error, title, &err.to_string());
        err
    }
}
