use chrono::{Local, NaiveDate, Utc};
use tracing::{info, warn};

use crate::currency::Currency;
use crate::errors::{Result, TrackerError};
use crate::import::merge;
use crate::storage::{StorageBackend, TRANSACTIONS_SLOT};

use super::category::CategoryId;
use super::transaction::{
    generate_id, ImportedRecord, Transaction, TransactionDraft, TransactionPatch,
};
use super::validate::validate;

/// Outcome of opening a store: the store itself plus any recovery
/// warnings the caller should surface.
pub struct LoadReport {
    pub store: TransactionStore,
    pub warnings: Vec<String>,
}

/// Ordered collection of transactions (newest first) with slot-backed
/// persistence. Every mutation rewrites the full list into the
/// `transactions` slot.
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    storage: Box<dyn StorageBackend>,
}

impl TransactionStore {
    /// Opens the store from `storage`. A missing slot starts empty; an
    /// unreadable slot also starts empty and reports a warning instead of
    /// failing.
    pub fn open(storage: Box<dyn StorageBackend>) -> LoadReport {
        let mut warnings = Vec::new();
        let transactions = match storage.read(TRANSACTIONS_SLOT) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Transaction>>(&raw) {
                Ok(list) => list,
                Err(err) => {
                    warn!(%err, "stored transactions unreadable, starting empty");
                    warnings.push(format!("Stored transactions could not be read: {err}"));
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(%err, "transaction slot unavailable, starting empty");
                warnings.push(format!("Stored transactions could not be loaded: {err}"));
                Vec::new()
            }
        };
        LoadReport {
            store: Self {
                transactions,
                storage,
            },
            warnings,
        }
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    /// Full current list, insertion order (newest first).
    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Validates `draft`, assigns a fresh id and creation timestamp,
    /// inserts at the front, and persists. On a persist failure the
    /// in-memory insert stands and the error reports the write problem.
    pub fn add(&mut self, draft: TransactionDraft) -> Result<Transaction> {
        let transaction = build_transaction(draft, Local::now().date_naive())?;
        self.transactions.insert(0, transaction.clone());
        info!(id = %transaction.id, "transaction added");
        self.persist()?;
        Ok(transaction)
    }

    /// Merges `patch` over the transaction with `id` in place: position,
    /// id, kind, and creation timestamp are preserved, the merged value is
    /// re-validated, and the list is persisted.
    pub fn update(&mut self, id: &str, patch: TransactionPatch) -> Result<Transaction> {
        let position = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TrackerError::TransactionNotFound(id.to_string()))?;
        let existing = &self.transactions[position];

        let amount = patch.amount.unwrap_or(existing.amount);
        let date = patch.date.unwrap_or(existing.date);
        let description = patch
            .description
            .unwrap_or_else(|| existing.description.clone());
        let category = match patch.category {
            Some(raw) => CategoryId::from_id(raw.trim()),
            None => existing.category.clone(),
        };
        let currency = patch.currency.unwrap_or(existing.currency);

        let draft = TransactionDraft {
            kind: existing.kind,
            amount: Some(amount),
            date: Some(date),
            description: description.clone(),
            category: category.as_str().to_string(),
            currency,
        };
        let report = validate(&draft, Local::now().date_naive());
        if !report.is_valid() {
            return Err(TrackerError::Validation(report.errors));
        }

        let updated = Transaction {
            id: existing.id.clone(),
            kind: existing.kind,
            amount,
            date,
            description: description.trim().to_string(),
            category,
            currency,
            created_at: existing.created_at,
        };
        self.transactions[position] = updated.clone();
        info!(id = %updated.id, "transaction updated");
        self.persist()?;
        Ok(updated)
    }

    /// Removes the transaction with `id`. Returns whether anything was
    /// removed; nothing is persisted when the id was absent.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() == before {
            return Ok(false);
        }
        info!(id, "transaction removed");
        self.persist()?;
        Ok(true)
    }

    /// Merges screened import records into the list (appended after the
    /// existing entries) and persists. Returns how many records were
    /// actually added.
    pub fn merge_import(
        &mut self,
        incoming: Vec<ImportedRecord>,
        fallback_currency: Currency,
    ) -> Result<usize> {
        let outcome = merge(&self.transactions, incoming, fallback_currency);
        self.transactions = outcome.merged;
        info!(accepted = outcome.accepted, "import merged");
        self.persist()?;
        Ok(outcome.accepted)
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.transactions)?;
        self.storage.write(TRANSACTIONS_SLOT, &json)
    }
}

fn build_transaction(draft: TransactionDraft, today: NaiveDate) -> Result<Transaction> {
    let report = validate(&draft, today);
    match (draft.amount, draft.date) {
        (Some(amount), Some(date)) if report.is_valid() => Ok(Transaction {
            id: generate_id(),
            kind: draft.kind,
            amount,
            date,
            description: draft.description.trim().to_string(),
            category: CategoryId::from_id(draft.category.trim()),
            currency: draft.currency,
            created_at: Utc::now(),
        }),
        _ => Err(TrackerError::Validation(report.errors)),
    }
}
