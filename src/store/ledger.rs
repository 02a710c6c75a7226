use anyhow::Result;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use super::{LocalStore, BUDGET_KEY, EXPENSES_KEY};
use crate::models::ExpenseRecord;

/// Reasons the ledger declines an input without changing state.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum LedgerError {
    #[error("Amount is required")]
    MissingAmount,
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),
    #[error("Date is required")]
    MissingDate,
    #[error("Invalid budget: '{0}'")]
    InvalidBudget(String),
}

/// Owns the expense collection and the budget scalar. Records are kept
/// newest-date-first in memory, and every successful mutation rewrites
/// the affected storage key before returning.
pub(crate) struct Ledger {
    store: LocalStore,
    records: Vec<ExpenseRecord>,
    budget: Decimal,
}

impl Ledger {
    /// Hydrate state from storage. A missing or malformed value falls
    /// back to the empty collection / zero budget; only storage access
    /// itself can fail here, bad data never does.
    pub(crate) fn initialize(store: LocalStore) -> Result<Self> {
        let mut records: Vec<ExpenseRecord> = match store.get(EXPENSES_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            None => Vec::new(),
        };
        // Stored data is already sorted, but a hand-edited value must
        // not be able to break the ordering invariant.
        records.sort_by(|a, b| b.date.cmp(&a.date));

        let budget = match store.get(BUDGET_KEY)? {
            Some(raw) => Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO),
            None => Decimal::ZERO,
        };

        Ok(Self {
            store,
            records,
            budget,
        })
    }

    pub(crate) fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub(crate) fn budget(&self) -> Decimal {
        self.budget
    }

    /// Validate raw form input and insert a new record, keeping the
    /// newest-date-first order. Returns the assigned id. A rejection
    /// leaves both memory and storage untouched.
    pub(crate) fn add_expense(
        &mut self,
        amount: &str,
        category: &str,
        date: &str,
        note: &str,
    ) -> Result<i64> {
        let amount = amount.trim();
        if amount.is_empty() {
            return Err(LedgerError::MissingAmount.into());
        }
        let amount = Decimal::from_str(amount)
            .map_err(|_| LedgerError::InvalidAmount(amount.to_string()))?;
        if amount < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount.to_string()).into());
        }
        let date = date.trim();
        if date.is_empty() {
            return Err(LedgerError::MissingDate.into());
        }

        let id = self.next_record_id();
        self.records.insert(
            0,
            ExpenseRecord {
                id,
                amount,
                category: category.trim().to_string(),
                date: date.to_string(),
                note: note.trim().to_string(),
            },
        );
        // Stable sort: records sharing a date stay newest-added first.
        self.records.sort_by(|a, b| b.date.cmp(&a.date));
        self.persist_records()?;
        Ok(id)
    }

    /// Remove a record by id. An absent id is a no-op, not an error;
    /// the collection is persisted either way.
    pub(crate) fn delete_expense(&mut self, id: i64) -> Result<bool> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() < before;
        self.persist_records()?;
        Ok(removed)
    }

    /// Replace the budget. Non-numeric or negative input is rejected
    /// and the previous value kept.
    pub(crate) fn set_budget(&mut self, value: &str) -> Result<()> {
        let value = value.trim();
        let parsed =
            Decimal::from_str(value).map_err(|_| LedgerError::InvalidBudget(value.to_string()))?;
        if parsed < Decimal::ZERO {
            return Err(LedgerError::InvalidBudget(value.to_string()).into());
        }
        self.budget = parsed;
        self.persist_budget()?;
        Ok(())
    }

    /// Ids are creation timestamps in milliseconds, bumped past the
    /// current maximum so rapid inserts within one tick stay unique.
    fn next_record_id(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let max_seen = self.records.iter().map(|r| r.id).max().unwrap_or(0);
        now.max(max_seen + 1)
    }

    fn persist_records(&self) -> Result<()> {
        let encoded = serde_json::to_string(&self.records)?;
        self.store.set(EXPENSES_KEY, &encoded)
    }

    fn persist_budget(&self) -> Result<()> {
        self.store.set(BUDGET_KEY, &self.budget.to_string())
    }
}
