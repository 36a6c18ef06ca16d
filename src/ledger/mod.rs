//! Transaction domain models, validation, and reporting helpers.

pub mod category;
pub mod filter;
pub mod store;
pub mod summary;
pub mod transaction;
pub mod validate;

pub use category::{CategoryId, KNOWN_CATEGORIES};
pub use filter::{filter_transactions, FilterCriteria};
pub use store::{LoadReport, TransactionStore};
pub use summary::{
    category_totals, monthly_trends, summarize, CategoryTotal, MonthlyTrend, Summary,
};
pub use transaction::{
    generate_id, ImportedRecord, Transaction, TransactionDraft, TransactionKind, TransactionPatch,
};
pub use validate::{
    one_year_before, validate, ValidationReport, MAX_AMOUNT, MAX_DESCRIPTION_CHARS,
};
