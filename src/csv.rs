//! CSV serialization for transaction export and import.
//!
//! The format is fixed at six columns. Only the description is quoted;
//! parsing still honours quotes on any field since exports from other
//! tools may quote more aggressively.

use chrono::{NaiveDate, Utc};

use crate::currency::Currency;
use crate::ledger::category::CategoryId;
use crate::ledger::transaction::{generate_id, ImportedRecord, Transaction, TransactionKind};

pub const CSV_HEADER: &str = "Date,Type,Description,Category,Amount,Currency";

/// Renders transactions as CSV. The description is double-quoted with
/// internal quotes doubled; the category appears as its display name.
pub fn encode(transactions: &[Transaction]) -> String {
    let mut lines = Vec::with_capacity(transactions.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for transaction in transactions {
        let description = transaction.description.replace('"', "\"\"");
        lines.push(format!(
            "{},{},\"{}\",{},{},{}",
            transaction.date,
            transaction.kind,
            description,
            transaction.category.display_name(),
            transaction.amount,
            transaction.currency,
        ));
    }
    lines.join("\n")
}

/// Parses CSV text into import records, skipping the header line, blank
/// lines, and rows with fewer than six fields. Every decoded record gets
/// a fresh id and creation timestamp; fields that fail to parse stay
/// empty so the merge step can discard the record.
pub fn decode(text: &str) -> Vec<ImportedRecord> {
    let mut records = Vec::new();
    for line in text.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_line(line);
        if fields.len() < 6 {
            continue;
        }
        let category = CategoryId::from_display_name(&fields[3])
            .cloned()
            .unwrap_or(CategoryId::OtherExpense);
        records.push(ImportedRecord {
            id: Some(generate_id()),
            kind: TransactionKind::parse(fields[1].trim()),
            amount: fields[4].trim().parse::<f64>().ok(),
            date: NaiveDate::parse_from_str(fields[0].trim(), "%Y-%m-%d").ok(),
            description: non_empty(&fields[2]),
            category: Some(category.as_str().to_string()),
            currency: Currency::parse(&fields[5]),
            created_at: Some(Utc::now()),
        });
    }
    records
}

/// Suggested file name for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("spendifix-transactions-{}.csv", date)
}

// Two-state scanner: outside quotes a comma ends the field; inside
// quotes everything is literal except `""`, which emits one quote.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn transaction(
        kind: TransactionKind,
        amount: f64,
        description: &str,
        category: CategoryId,
    ) -> Transaction {
        Transaction {
            id: generate_id(),
            kind,
            amount,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).expect("date"),
            description: description.to_string(),
            category,
            currency: Currency::Inr,
            created_at: Utc
                .with_ymd_and_hms(2024, 1, 15, 9, 0, 0)
                .single()
                .expect("timestamp"),
        }
    }

    #[test]
    fn split_line_handles_plain_fields() {
        assert_eq!(
            split_line("2024-01-15,expense,Lunch,Food & Dining,45.99,INR"),
            vec!["2024-01-15", "expense", "Lunch", "Food & Dining", "45.99", "INR"]
        );
    }

    #[test]
    fn split_line_keeps_commas_inside_quotes() {
        assert_eq!(
            split_line("a,\"b, c\",d"),
            vec!["a", "b, c", "d"]
        );
    }

    #[test]
    fn split_line_unescapes_doubled_quotes() {
        assert_eq!(
            split_line("\"He said \"\"hi\"\"\",rest"),
            vec!["He said \"hi\"", "rest"]
        );
    }

    #[test]
    fn encode_produces_the_fixed_header_and_quoted_descriptions() {
        let list = vec![transaction(
            TransactionKind::Expense,
            45.99,
            "Lunch, with \"friends\"",
            CategoryId::Food,
        )];
        let text = encode(&list);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some("2024-01-15,expense,\"Lunch, with \"\"friends\"\"\",Food & Dining,45.99,INR")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn decode_skips_the_header_blank_lines_and_short_rows() {
        let text = format!(
            "{}\n\n2024-01-15,expense,\"Lunch\",Food & Dining,45.99,INR\nonly,three,fields\n",
            CSV_HEADER
        );
        let records = decode(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description.as_deref(), Some("Lunch"));
        assert_eq!(records[0].amount, Some(45.99));
    }

    #[test]
    fn decode_resolves_display_names_and_falls_back_to_other_expense() {
        let text = format!(
            "{}\n2024-01-15,expense,\"Bus\",Transportation,10,INR\n2024-01-16,expense,\"Gift\",Presents,25,INR",
            CSV_HEADER
        );
        let records = decode(&text);
        assert_eq!(records[0].category.as_deref(), Some("transportation"));
        assert_eq!(records[1].category.as_deref(), Some("other-expense"));
    }

    #[test]
    fn decode_leaves_unparsable_fields_empty() {
        let text = format!(
            "{}\nnot-a-date,mystery,\"x\",Travel,abc,XYZ",
            CSV_HEADER
        );
        let records = decode(&text);
        assert_eq!(records.len(), 1);
        assert!(records[0].date.is_none());
        assert!(records[0].kind.is_none());
        assert!(records[0].amount.is_none());
        assert!(records[0].currency.is_none());
        assert!(!records[0].is_complete());
    }

    #[test]
    fn decode_assigns_fresh_ids() {
        let text = format!(
            "{}\n2024-01-15,expense,\"a\",Travel,10,INR\n2024-01-16,expense,\"b\",Travel,20,INR",
            CSV_HEADER
        );
        let records = decode(&text);
        assert_eq!(records.len(), 2);
        assert_ne!(records[0].id, records[1].id);
        assert!(records[0].id.as_deref().map_or(false, |id| !id.is_empty()));
    }

    // Ids and timestamps are not round-tripped; everything else is.
    #[test]
    fn encode_then_decode_preserves_the_data_fields() {
        let list = vec![
            transaction(
                TransactionKind::Expense,
                45.99,
                "Lunch, with a \"quote\"",
                CategoryId::Food,
            ),
            transaction(TransactionKind::Income, 5000.0, "Salary", CategoryId::Salary),
        ];
        let records = decode(&encode(&list));
        assert_eq!(records.len(), list.len());
        for (record, original) in records.iter().zip(&list) {
            assert_eq!(record.amount, Some(original.amount));
            assert_eq!(record.date, Some(original.date));
            assert_eq!(record.kind, Some(original.kind));
            assert_eq!(record.description.as_deref(), Some(original.description.as_str()));
            assert_eq!(record.category.as_deref(), Some(original.category.as_str()));
            assert_ne!(record.id.as_deref(), Some(original.id.as_str()));
        }
    }

    #[test]
    fn export_file_name_embeds_the_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 5).expect("date");
        assert_eq!(
            export_file_name(date),
            "spendifix-transactions-2024-02-05.csv"
        );
    }
}
