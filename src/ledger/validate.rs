use chrono::{Months, NaiveDate};

use super::transaction::TransactionDraft;

/// Largest accepted transaction amount.
pub const MAX_AMOUNT: f64 = 10_000_000.0;
/// Longest accepted description, in characters, after trimming.
pub const MAX_DESCRIPTION_CHARS: usize = 100;

/// Outcome of checking a candidate transaction against the business
/// rules. `errors` keeps the order the rules are checked in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Checks `draft` against every rule and collects all violations; no
/// short-circuiting. `today` is injected so date-boundary behaviour stays
/// deterministic under test.
pub fn validate(draft: &TransactionDraft, today: NaiveDate) -> ValidationReport {
    let mut errors = Vec::new();

    if !draft.amount.map_or(false, |amount| amount > 0.0) {
        errors.push("Amount must be a positive number".to_string());
    }
    if draft.amount.map_or(false, |amount| amount > MAX_AMOUNT) {
        errors.push("Amount cannot exceed 10,000,000".to_string());
    }

    let description = draft.description.trim();
    if description.is_empty() {
        errors.push("Description is required".to_string());
    }
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        errors.push("Description must be less than 100 characters".to_string());
    }

    if draft.category.is_empty() {
        errors.push("Category is required".to_string());
    }

    match draft.date {
        None => errors.push("Date is required".to_string()),
        Some(date) => {
            if date > today {
                errors.push("Date cannot be in the future".to_string());
            }
            if date < one_year_before(today) {
                errors.push("Date cannot be more than one year ago".to_string());
            }
        }
    }

    ValidationReport { errors }
}

/// Oldest accepted transaction date: twelve calendar months before
/// `today`, clamped for short months.
pub fn one_year_before(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(12))
        .unwrap_or(NaiveDate::MIN)
}
