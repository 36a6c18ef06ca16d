use chrono::NaiveDate;

use super::category::CategoryId;
use super::transaction::{Transaction, TransactionKind};

/// Criteria applied when listing transactions. Unset fields match
/// everything; set fields are ANDed together.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against the description or the
    /// resolved category display name.
    pub search: Option<String>,
    pub kind: Option<TransactionKind>,
    pub category: Option<CategoryId>,
    /// Inclusive lower date bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub to: Option<NaiveDate>,
}

/// Returns the transactions matching `criteria`, preserving input order.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    criteria: &FilterCriteria,
) -> Vec<&'a Transaction> {
    let search = criteria
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase);

    transactions
        .iter()
        .filter(|transaction| {
            if let Some(term) = &search {
                let in_description = transaction.description.to_lowercase().contains(term);
                let in_category = transaction
                    .category
                    .display_name()
                    .to_lowercase()
                    .contains(term);
                if !in_description && !in_category {
                    return false;
                }
            }
            if let Some(kind) = criteria.kind {
                if transaction.kind != kind {
                    return false;
                }
            }
            if let Some(category) = &criteria.category {
                if &transaction.category != category {
                    return false;
                }
            }
            if let Some(from) = criteria.from {
                if transaction.date < from {
                    return false;
                }
            }
            if let Some(to) = criteria.to {
                if transaction.date > to {
                    return false;
                }
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::currency::Currency;

    use super::*;

    fn transaction(
        id: &str,
        kind: TransactionKind,
        description: &str,
        category: CategoryId,
        date: (i32, u32, u32),
    ) -> Transaction {
        Transaction {
            id: id.to_string(),
            kind,
            amount: 100.0,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid date"),
            description: description.to_string(),
            category,
            currency: Currency::Inr,
            created_at: Utc::now(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            transaction(
                "a",
                TransactionKind::Expense,
                "Morning coffee",
                CategoryId::Food,
                (2024, 3, 10),
            ),
            transaction(
                "b",
                TransactionKind::Income,
                "March salary",
                CategoryId::Salary,
                (2024, 3, 1),
            ),
            transaction(
                "c",
                TransactionKind::Expense,
                "Train ticket",
                CategoryId::Transportation,
                (2024, 2, 20),
            ),
        ]
    }

    #[test]
    fn no_criteria_returns_everything_in_order() {
        let list = sample();
        let result = filter_transactions(&list, &FilterCriteria::default());
        let ids: Vec<_> = result.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn search_matches_description_case_insensitively() {
        let list = sample();
        let criteria = FilterCriteria {
            search: Some("COFFEE".to_string()),
            ..FilterCriteria::default()
        };
        let result = filter_transactions(&list, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "a");
    }

    #[test]
    fn search_also_matches_the_category_display_name() {
        let list = sample();
        let criteria = FilterCriteria {
            search: Some("dining".to_string()),
            ..FilterCriteria::default()
        };
        let result = filter_transactions(&list, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, CategoryId::Food);
    }

    #[test]
    fn blank_search_matches_everything() {
        let list = sample();
        let criteria = FilterCriteria {
            search: Some("   ".to_string()),
            ..FilterCriteria::default()
        };
        assert_eq!(filter_transactions(&list, &criteria).len(), 3);
    }

    #[test]
    fn kind_and_category_narrow_the_result() {
        let list = sample();
        let criteria = FilterCriteria {
            kind: Some(TransactionKind::Expense),
            ..FilterCriteria::default()
        };
        assert_eq!(filter_transactions(&list, &criteria).len(), 2);

        let criteria = FilterCriteria {
            kind: Some(TransactionKind::Expense),
            category: Some(CategoryId::Transportation),
            ..FilterCriteria::default()
        };
        let result = filter_transactions(&list, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "c");
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let list = sample();
        let criteria = FilterCriteria {
            from: NaiveDate::from_ymd_opt(2024, 3, 1),
            to: NaiveDate::from_ymd_opt(2024, 3, 10),
            ..FilterCriteria::default()
        };
        let result = filter_transactions(&list, &criteria);
        let ids: Vec<_> = result.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn open_ended_ranges_only_bound_one_side() {
        let list = sample();
        let criteria = FilterCriteria {
            to: NaiveDate::from_ymd_opt(2024, 2, 28),
            ..FilterCriteria::default()
        };
        let result = filter_transactions(&list, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "c");
    }

    #[test]
    fn criteria_are_anded() {
        let list = sample();
        let criteria = FilterCriteria {
            search: Some("salary".to_string()),
            kind: Some(TransactionKind::Expense),
            ..FilterCriteria::default()
        };
        assert!(filter_transactions(&list, &criteria).is_empty());
    }

    #[test]
    fn input_list_is_untouched() {
        let list = sample();
        let before = list.clone();
        let _ = filter_transactions(&list, &FilterCriteria::default());
        assert_eq!(list, before);
    }
}
