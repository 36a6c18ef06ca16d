use std::collections::BTreeMap;

use super::category::CategoryId;
use super::transaction::{Transaction, TransactionKind};

/// Income and expense totals over a transaction list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_income: f64,
    pub count: usize,
}

/// Per-category amount sum.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: CategoryId,
    pub amount: f64,
}

/// Per-month income/expense totals, keyed by `YYYY-MM`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTrend {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

/// Sums the list into overall totals. Empty input gives all zeros.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut summary = Summary {
        count: transactions.len(),
        ..Summary::default()
    };
    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => summary.total_income += transaction.amount,
            TransactionKind::Expense => summary.total_expenses += transaction.amount,
        }
    }
    summary.net_income = summary.total_income - summary.total_expenses;
    summary
}

/// Sums amounts per category, one entry per distinct category, in
/// first-seen order.
pub fn category_totals(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for transaction in transactions {
        match totals
            .iter_mut()
            .find(|entry| entry.category == transaction.category)
        {
            Some(entry) => entry.amount += transaction.amount,
            None => totals.push(CategoryTotal {
                category: transaction.category.clone(),
                amount: transaction.amount,
            }),
        }
    }
    totals
}

/// Groups totals by the `YYYY-MM` prefix of the date, ascending by month.
pub fn monthly_trends(transactions: &[Transaction]) -> Vec<MonthlyTrend> {
    let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for transaction in transactions {
        let month = transaction.date.format("%Y-%m").to_string();
        let entry = months.entry(month).or_default();
        match transaction.kind {
            TransactionKind::Income => entry.0 += transaction.amount,
            TransactionKind::Expense => entry.1 += transaction.amount,
        }
    }
    months
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyTrend {
            month,
            income,
            expenses,
            net: income - expenses,
        })
        .collect()
}
