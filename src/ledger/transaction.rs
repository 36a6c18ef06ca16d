use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::Currency;

use super::category::CategoryId;

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Resolves a kind label, ignoring case.
    pub fn parse(value: &str) -> Option<TransactionKind> {
        if value.eq_ignore_ascii_case("income") {
            Some(TransactionKind::Income)
        } else if value.eq_ignore_ascii_case("expense") {
            Some(TransactionKind::Expense)
        } else {
            None
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded income or expense entry.
///
/// `id` and `created_at` are assigned once at creation and never change;
/// edits merge over the remaining fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub category: CategoryId,
    pub currency: Currency,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Returns a fresh opaque transaction id, unique within a session.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Candidate transaction as captured from user input, before validation.
///
/// `amount` and `date` stay optional so the validator can report missing
/// fields instead of the caller inventing placeholders; `category` is the
/// raw id string for the same reason.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub description: String,
    pub category: String,
    pub currency: Currency,
}

/// Field-level edit applied to an existing transaction. Unset fields keep
/// their current value; `id`, `kind`, and `created_at` are not patchable.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub currency: Option<Currency>,
}

/// Transaction-shaped record read from an import file. Fields that were
/// absent or unparsable in the source stay `None`; the merge step decides
/// whether the record is usable.
#[derive(Debug, Clone, Default)]
pub struct ImportedRecord {
    pub id: Option<String>,
    pub kind: Option<TransactionKind>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub currency: Option<Currency>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ImportedRecord {
    /// True when every field required for import is present: id, kind,
    /// date, description, category, and a non-zero finite amount.
    pub fn is_complete(&self) -> bool {
        let has_amount = self
            .amount
            .map_or(false, |amount| amount != 0.0 && !amount.is_nan());
        self.id.as_deref().map_or(false, |id| !id.is_empty())
            && self.kind.is_some()
            && has_amount
            && self.date.is_some()
            && self
                .description
                .as_deref()
                .map_or(false, |description| !description.is_empty())
            && self
                .category
                .as_deref()
                .map_or(false, |category| !category.is_empty())
    }

    /// Converts a complete record into a stored transaction, filling the
    /// currency and creation time when the source omitted them. `None`
    /// when the record is incomplete.
    pub fn into_transaction(self, fallback_currency: Currency) -> Option<Transaction> {
        if !self.is_complete() {
            return None;
        }
        Some(Transaction {
            id: self.id?,
            kind: self.kind?,
            amount: self.amount?,
            date: self.date?,
            description: self.description?,
            category: CategoryId::from_id(&self.category?),
            currency: self.currency.unwrap_or(fallback_currency),
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}
