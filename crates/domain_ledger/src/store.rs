//! The record-store port and its in-memory adapter
//!
//! [`LedgerStore`] is the typed repository interface the engines consume.
//! It replaces positional column lookups with named-field access, and it
//! replaces the source system's physical resort-after-append with a
//! read-time ordering guarantee: [`LedgerStore::entries`] always returns
//! rows ordered by (date, id).
//!
//! The port is synchronous: every engine operation runs to completion
//! under a single writer, so there is nothing to await.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use core_kernel::{
    CoreError, DateRange, EntryId, ExpenseId, Money, OwnershipSetId, OwnershipShareId, PersonCode,
    SplitMethodId, StayId,
};

use crate::entry::{EntryDraft, LedgerEntry};
use crate::expense::{Expense, ExpenseStatus};
use crate::ownership::{OwnershipSet, OwnershipShare};
use crate::person::Person;
use crate::split_method::{CustomSplit, SplitKind, SplitMethod};
use crate::stay::OvernightStay;

/// Fields of a new ownership share, before the store assigns its id
#[derive(Debug, Clone)]
pub struct ShareDraft {
    pub owner: String,
    pub percentage: Decimal,
}

/// Fields of a new expense row
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub date: NaiveDate,
    pub expense_type: String,
    pub amount: Money,
    pub split_method_id: SplitMethodId,
    pub period: Option<DateRange>,
}

/// Typed repository interface over the household's record tables
///
/// Implementations assign row ids on insert: max(existing)+1, or the
/// table's seed when empty.
pub trait LedgerStore {
    // --- reference data ---
    fn people(&self) -> Result<Vec<Person>, CoreError>;
    fn person_by_code(&self, code: &PersonCode) -> Result<Option<Person>, CoreError>;
    fn person_by_name(&self, display_name: &str) -> Result<Option<Person>, CoreError>;
    fn add_person(&mut self, person: Person) -> Result<(), CoreError>;

    // --- ownership ---
    fn ownership_sets(&self) -> Result<Vec<OwnershipSet>, CoreError>;
    /// Shares of one set, in row (id) order
    fn shares_for_set(&self, set: OwnershipSetId) -> Result<Vec<OwnershipShare>, CoreError>;
    fn add_ownership_set(
        &mut self,
        effective_date: NaiveDate,
        shares: Vec<ShareDraft>,
    ) -> Result<OwnershipSetId, CoreError>;

    // --- split methods ---
    fn split_method(&self, id: SplitMethodId) -> Result<Option<SplitMethod>, CoreError>;
    fn add_split_method(
        &mut self,
        kind: SplitKind,
        custom: Option<CustomSplit>,
    ) -> Result<SplitMethodId, CoreError>;

    // --- overnight stays ---
    fn stays(&self) -> Result<Vec<OvernightStay>, CoreError>;
    fn add_stay(
        &mut self,
        person_code: PersonCode,
        period: DateRange,
        head_count: u32,
    ) -> Result<StayId, CoreError>;

    // --- expenses ---
    fn expense(&self, id: ExpenseId) -> Result<Option<Expense>, CoreError>;
    fn expenses(&self) -> Result<Vec<Expense>, CoreError>;
    fn add_expense(&mut self, draft: ExpenseDraft) -> Result<ExpenseId, CoreError>;
    fn set_expense_status(
        &mut self,
        id: ExpenseId,
        status: ExpenseStatus,
    ) -> Result<(), CoreError>;
    fn set_last_reconciled(&mut self, id: ExpenseId, on: NaiveDate) -> Result<(), CoreError>;

    // --- ledger entries ---
    /// All entries, ordered by (date asc, id asc)
    fn entries(&self) -> Result<Vec<LedgerEntry>, CoreError>;
    fn entries_for_expense(&self, id: ExpenseId) -> Result<Vec<LedgerEntry>, CoreError>;
    /// Appends drafts in order, assigning contiguous ids
    fn append_entries(&mut self, drafts: Vec<EntryDraft>) -> Result<Vec<EntryId>, CoreError>;
    /// Removes every entry referencing the expense; returns how many went
    fn remove_entries_for_expense(&mut self, id: ExpenseId) -> Result<usize, CoreError>;
}

/// In-process store backing the API binary and the test suites
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    people: Vec<Person>,
    ownership_sets: Vec<OwnershipSet>,
    ownership_shares: Vec<OwnershipShare>,
    split_methods: Vec<SplitMethod>,
    stays: Vec<OvernightStay>,
    expenses: Vec<Expense>,
    entries: Vec<LedgerEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_set_id(&self) -> OwnershipSetId {
        self.ownership_sets
            .iter()
            .map(|s| s.id)
            .max()
            .map(|id| id.next())
            .unwrap_or(OwnershipSetId::SEED)
    }

    fn next_share_id(&self) -> OwnershipShareId {
        self.ownership_shares
            .iter()
            .map(|s| s.id)
            .max()
            .map(|id| id.next())
            .unwrap_or(OwnershipShareId::SEED)
    }

    fn next_split_method_id(&self) -> SplitMethodId {
        self.split_methods
            .iter()
            .map(|m| m.id)
            .max()
            .map(|id| id.next())
            .unwrap_or(SplitMethodId::SEED)
    }

    fn next_stay_id(&self) -> StayId {
        self.stays
            .iter()
            .map(|s| s.id)
            .max()
            .map(|id| id.next())
            .unwrap_or(StayId::SEED)
    }

    fn next_expense_id(&self) -> ExpenseId {
        self.expenses
            .iter()
            .map(|e| e.id)
            .max()
            .map(|id| id.next())
            .unwrap_or(ExpenseId::SEED)
    }

    fn next_entry_id(&self) -> EntryId {
        self.entries
            .iter()
            .map(|e| e.id)
            .max()
            .map(|id| id.next())
            .unwrap_or(EntryId::SEED)
    }

    fn expense_mut(&mut self, id: ExpenseId) -> Result<&mut Expense, CoreError> {
        self.expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CoreError::not_found(format!("Expense {} not found", id)))
    }
}

impl LedgerStore for MemoryStore {
    fn people(&self) -> Result<Vec<Person>, CoreError> {
        Ok(self.people.clone())
    }

    fn person_by_code(&self, code: &PersonCode) -> Result<Option<Person>, CoreError> {
        Ok(self.people.iter().find(|p| &p.code == code).cloned())
    }

    fn person_by_name(&self, display_name: &str) -> Result<Option<Person>, CoreError> {
        Ok(self
            .people
            .iter()
            .find(|p| p.display_name == display_name)
            .cloned())
    }

    fn add_person(&mut self, person: Person) -> Result<(), CoreError> {
        if self.people.iter().any(|p| p.code == person.code) {
            return Err(CoreError::conflict(format!(
                "Person code {} already exists",
                person.code
            )));
        }
        self.people.push(person);
        Ok(())
    }

    fn ownership_sets(&self) -> Result<Vec<OwnershipSet>, CoreError> {
        Ok(self.ownership_sets.clone())
    }

    fn shares_for_set(&self, set: OwnershipSetId) -> Result<Vec<OwnershipShare>, CoreError> {
        let mut shares: Vec<OwnershipShare> = self
            .ownership_shares
            .iter()
            .filter(|s| s.set_id == set)
            .cloned()
            .collect();
        shares.sort_by_key(|s| s.id);
        Ok(shares)
    }

    fn add_ownership_set(
        &mut self,
        effective_date: NaiveDate,
        shares: Vec<ShareDraft>,
    ) -> Result<OwnershipSetId, CoreError> {
        if shares.is_empty() {
            return Err(CoreError::validation(
                "An ownership set needs at least one share",
            ));
        }

        let set_id = self.next_set_id();
        self.ownership_sets.push(OwnershipSet {
            id: set_id,
            effective_date,
        });

        let mut share_id = self.next_share_id();
        for draft in shares {
            self.ownership_shares.push(OwnershipShare {
                id: share_id,
                set_id,
                owner: draft.owner,
                percentage: draft.percentage,
            });
            share_id = share_id.next();
        }

        Ok(set_id)
    }

    fn split_method(&self, id: SplitMethodId) -> Result<Option<SplitMethod>, CoreError> {
        Ok(self.split_methods.iter().find(|m| m.id == id).cloned())
    }

    fn add_split_method(
        &mut self,
        kind: SplitKind,
        custom: Option<CustomSplit>,
    ) -> Result<SplitMethodId, CoreError> {
        if kind == SplitKind::Custom && custom.is_none() {
            return Err(CoreError::validation(
                "Custom split methods require a payload",
            ));
        }
        if kind != SplitKind::Custom && custom.is_some() {
            return Err(CoreError::validation(
                "Only custom split methods carry a payload",
            ));
        }

        let id = self.next_split_method_id();
        self.split_methods.push(SplitMethod { id, kind, custom });
        Ok(id)
    }

    fn stays(&self) -> Result<Vec<OvernightStay>, CoreError> {
        Ok(self.stays.clone())
    }

    fn add_stay(
        &mut self,
        person_code: PersonCode,
        period: DateRange,
        head_count: u32,
    ) -> Result<StayId, CoreError> {
        if head_count == 0 {
            return Err(CoreError::validation("Head count must be at least 1"));
        }
        let person = self
            .person_by_code(&person_code)?
            .ok_or_else(|| CoreError::not_found(format!("Person {} not found", person_code)))?;

        let id = self.next_stay_id();
        self.stays.push(OvernightStay {
            id,
            person_code,
            person_name: person.display_name,
            period,
            head_count,
        });
        Ok(id)
    }

    fn expense(&self, id: ExpenseId) -> Result<Option<Expense>, CoreError> {
        Ok(self.expenses.iter().find(|e| e.id == id).cloned())
    }

    fn expenses(&self) -> Result<Vec<Expense>, CoreError> {
        Ok(self.expenses.clone())
    }

    fn add_expense(&mut self, draft: ExpenseDraft) -> Result<ExpenseId, CoreError> {
        let method = self.split_method(draft.split_method_id)?.ok_or_else(|| {
            CoreError::not_found(format!(
                "Split method {} not found",
                draft.split_method_id
            ))
        })?;

        let id = self.next_expense_id();
        self.expenses.push(Expense {
            id,
            date: draft.date,
            expense_type: draft.expense_type,
            amount: draft.amount,
            split_method_id: draft.split_method_id,
            split_kind: method.kind,
            status: ExpenseStatus::Pending,
            period: draft.period,
            last_reconciled: None,
        });
        Ok(id)
    }

    fn set_expense_status(
        &mut self,
        id: ExpenseId,
        status: ExpenseStatus,
    ) -> Result<(), CoreError> {
        self.expense_mut(id)?.status = status;
        Ok(())
    }

    fn set_last_reconciled(&mut self, id: ExpenseId, on: NaiveDate) -> Result<(), CoreError> {
        self.expense_mut(id)?.last_reconciled = Some(on);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<LedgerEntry>, CoreError> {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|e| (e.date, e.id));
        Ok(entries)
    }

    fn entries_for_expense(&self, id: ExpenseId) -> Result<Vec<LedgerEntry>, CoreError> {
        let mut entries: Vec<LedgerEntry> = self
            .entries
            .iter()
            .filter(|e| e.expense_id == Some(id))
            .cloned()
            .collect();
        entries.sort_by_key(|e| (e.date, e.id));
        Ok(entries)
    }

    fn append_entries(&mut self, drafts: Vec<EntryDraft>) -> Result<Vec<EntryId>, CoreError> {
        let mut id = self.next_entry_id();
        let mut assigned = Vec::with_capacity(drafts.len());

        for draft in drafts {
            self.entries.push(LedgerEntry::from_draft(id, draft));
            assigned.push(id);
            id = id.next();
        }

        tracing::debug!(appended = assigned.len(), "ledger entries appended");
        Ok(assigned)
    }

    fn remove_entries_for_expense(&mut self, id: ExpenseId) -> Result<usize, CoreError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.expense_id != Some(id));
        let removed = before - self.entries.len();
        tracing::debug!(expense_id = id.value(), removed, "ledger entries removed");
        Ok(removed)
    }
}
