//! Batch command-line surface over the tracker library.
//!
//! Every invocation opens the store from the data directory, runs one
//! operation, and exits. Syntax errors (bad flags, malformed dates) are
//! clap's job; business rules are enforced by the library and rendered
//! here as an itemized error list.

pub mod output;

use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use tracing::warn;

use crate::csv;
use crate::currency::{format_amount, Currency, ALL_CURRENCIES};
use crate::errors::{Result, TrackerError};
use crate::import::{parse_records, ImportFormat};
use crate::ledger::{
    category_totals, filter_transactions, monthly_trends, summarize, CategoryId, FilterCriteria,
    Transaction, TransactionDraft, TransactionKind, TransactionPatch, TransactionStore,
};
use crate::settings::{self, Theme};
use crate::storage::JsonFileStorage;

#[derive(Parser, Debug)]
#[command(
    name = "spendifix",
    version,
    about = "Track income and expenses from the terminal"
)]
pub struct Cli {
    /// Data directory override (defaults to $SPENDIFIX_HOME, then ~/.spendifix).
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a new transaction.
    Add {
        /// Transaction type.
        #[arg(long = "type", value_parser = ["income", "expense"], default_value = "expense")]
        kind: String,
        /// Amount in the active currency. Must be positive.
        #[arg(long)]
        amount: Option<f64>,
        /// Transaction date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// What the money was for.
        #[arg(long)]
        description: Option<String>,
        /// Category id (see `categories`).
        #[arg(long)]
        category: Option<String>,
    },
    /// List transactions, newest first, with optional filters.
    List {
        /// Substring match against description or category name.
        #[arg(long)]
        search: Option<String>,
        /// Transaction type, or `all`.
        #[arg(long = "type", value_parser = ["all", "income", "expense"], default_value = "all")]
        kind: String,
        /// Category id, or `all`.
        #[arg(long, default_value = "all")]
        category: String,
        /// Earliest date to include (YYYY-MM-DD).
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest date to include (YYYY-MM-DD).
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Change fields of an existing transaction.
    Edit {
        /// Id of the transaction to change.
        id: String,
        /// New amount.
        #[arg(long)]
        amount: Option<f64>,
        /// New date (YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,
        /// New description.
        #[arg(long)]
        description: Option<String>,
        /// New category id.
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a transaction.
    Delete {
        /// Id of the transaction to delete.
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Show income, expense, and net totals.
    Summary,
    /// Show per-category totals for one transaction type.
    Breakdown {
        /// Transaction type to break down.
        #[arg(long = "type", value_parser = ["income", "expense"], default_value = "expense")]
        kind: String,
    },
    /// Show per-month income and expense totals.
    Trends,
    /// List the category registry.
    Categories {
        /// Restrict to one transaction type.
        #[arg(long = "type", value_parser = ["all", "income", "expense"], default_value = "all")]
        kind: String,
    },
    /// Export all transactions to a CSV file.
    Export {
        /// Output file path. Defaults to spendifix-transactions-<today>.csv.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Import transactions from a JSON or CSV file.
    Import {
        /// File to import.
        file: PathBuf,
    },
    /// Show or set the active currency.
    Currency {
        /// Currency code to activate; prints the current one when omitted.
        #[arg(value_parser = ["INR", "USD", "EUR", "GBP"])]
        code: Option<String>,
    },
    /// Show or set the presentation theme.
    Theme {
        /// Theme to activate; prints the current one when omitted.
        #[arg(value_parser = ["light", "dark"])]
        value: Option<String>,
    },
}

/// Parses the command line, runs it, and returns the process exit code.
pub fn run() -> i32 {
    let cli = Cli::parse();
    match execute(cli) {
        Ok(()) => 0,
        Err(TrackerError::Validation(errors)) => {
            output::error("Please fix the following errors:");
            for message in &errors {
                output::error(format!("  - {message}"));
            }
            1
        }
        Err(err) => {
            output::error(err.to_string());
            1
        }
    }
}

fn execute(cli: Cli) -> Result<()> {
    let storage = match cli.data_dir {
        Some(dir) => JsonFileStorage::new(dir)?,
        None => JsonFileStorage::new_default()?,
    };
    let session_currency = settings::load_currency(&storage);

    let report = TransactionStore::open(Box::new(storage));
    for warning in &report.warnings {
        output::warning(warning);
    }
    let mut store = report.store;

    match cli.command {
        Command::Add {
            kind,
            amount,
            date,
            description,
            category,
        } => handle_add(
            &mut store,
            session_currency,
            parse_kind(&kind),
            amount,
            date,
            description,
            category,
        ),
        Command::List {
            search,
            kind,
            category,
            from,
            to,
        } => handle_list(&store, search, &kind, &category, from, to),
        Command::Edit {
            id,
            amount,
            date,
            description,
            category,
        } => handle_edit(
            &mut store,
            session_currency,
            id,
            amount,
            date,
            description,
            category,
        ),
        Command::Delete { id, yes } => handle_delete(&mut store, id, yes),
        Command::Summary => handle_summary(&store, session_currency),
        Command::Breakdown { kind } => {
            handle_breakdown(&store, session_currency, parse_kind(&kind))
        }
        Command::Trends => handle_trends(&store, session_currency),
        Command::Categories { kind } => handle_categories(TransactionKind::parse(&kind)),
        Command::Export { output } => handle_export(&store, output),
        Command::Import { file } => handle_import(&mut store, session_currency, file),
        Command::Currency { code } => handle_currency(&store, session_currency, code),
        Command::Theme { value } => handle_theme(&store, value),
    }
}

/// Maps the clap-screened type flag; `all` and anything unexpected fall
/// back to expense for commands that need a concrete kind.
fn parse_kind(value: &str) -> TransactionKind {
    TransactionKind::parse(value).unwrap_or(TransactionKind::Expense)
}

/// A failed save leaves the change applied in memory; surface it as a
/// warning and keep the exit code at zero.
fn report_save_failure(err: TrackerError) -> Result<()> {
    match err {
        TrackerError::Persistence(message) => {
            warn!(%message, "state changed but could not be saved");
            output::warning("Failed to save data");
            Ok(())
        }
        other => Err(other),
    }
}

/// Rejects category ids outside the registry partition for `kind`.
/// Blank input is left for the draft validator to report.
fn ensure_category_matches(kind: TransactionKind, raw: &str) -> Result<()> {
    let id = raw.trim();
    if id.is_empty() {
        return Ok(());
    }
    match CategoryId::from_id(id).kind() {
        Some(partition) if partition == kind => Ok(()),
        Some(_) => Err(TrackerError::Validation(vec![format!(
            "Category '{id}' is not an {kind} category"
        )])),
        None => Err(TrackerError::Validation(vec![format!(
            "Unknown category '{id}'"
        )])),
    }
}

fn handle_add(
    store: &mut TransactionStore,
    session_currency: Currency,
    kind: TransactionKind,
    amount: Option<f64>,
    date: Option<NaiveDate>,
    description: Option<String>,
    category: Option<String>,
) -> Result<()> {
    if let Some(raw) = category.as_deref() {
        ensure_category_matches(kind, raw)?;
    }
    let draft = TransactionDraft {
        kind,
        amount,
        date: Some(date.unwrap_or_else(|| Local::now().date_naive())),
        description: description.unwrap_or_default(),
        category: category.unwrap_or_default(),
        currency: session_currency,
    };
    match store.add(draft) {
        Ok(stored) => {
            output::success("Transaction added successfully!");
            output::detail(format!("id: {}", stored.id));
            Ok(())
        }
        Err(err) => report_save_failure(err),
    }
}

fn handle_list(
    store: &TransactionStore,
    search: Option<String>,
    kind_arg: &str,
    category_arg: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<()> {
    let criteria = FilterCriteria {
        search,
        kind: TransactionKind::parse(kind_arg),
        category: match category_arg.trim() {
            "" | "all" => None,
            id => Some(CategoryId::from_id(id)),
        },
        from,
        to,
    };
    let matches = filter_transactions(store.list(), &criteria);
    if matches.is_empty() {
        output::info("No transactions found");
        return Ok(());
    }
    for transaction in &matches {
        output::info(render_row(transaction));
    }
    output::info(format!("{} transactions", matches.len()));
    Ok(())
}

fn render_row(transaction: &Transaction) -> String {
    let sign = match transaction.kind {
        TransactionKind::Income => "+",
        TransactionKind::Expense => "-",
    };
    format!(
        "{}  {}{}  {} {}  {}  ({})",
        transaction.date,
        sign,
        format_amount(transaction.currency, transaction.amount),
        transaction.category.icon(),
        transaction.category.display_name(),
        transaction.description,
        transaction.id
    )
}

fn handle_edit(
    store: &mut TransactionStore,
    session_currency: Currency,
    id: String,
    amount: Option<f64>,
    date: Option<NaiveDate>,
    description: Option<String>,
    category: Option<String>,
) -> Result<()> {
    if let Some(raw) = category.as_deref() {
        if let Some(kind) = store.find(&id).map(|t| t.kind) {
            ensure_category_matches(kind, raw)?;
        }
    }
    // Edits always restamp the active currency.
    let patch = TransactionPatch {
        amount,
        date,
        description,
        category,
        currency: Some(session_currency),
    };
    match store.update(&id, patch) {
        Ok(_) => {
            output::success("Transaction updated successfully!");
            Ok(())
        }
        Err(err) => report_save_failure(err),
    }
}

fn handle_delete(store: &mut TransactionStore, id: String, yes: bool) -> Result<()> {
    let confirmed = if yes {
        true
    } else {
        Confirm::new()
            .with_prompt("Are you sure you want to delete this transaction?")
            .default(false)
            .interact()
            .unwrap_or(false)
    };
    if !confirmed {
        output::info("Deletion cancelled");
        return Ok(());
    }
    match store.remove(&id) {
        Ok(true) => {
            output::success("Transaction deleted successfully!");
            Ok(())
        }
        Ok(false) => Err(TrackerError::TransactionNotFound(id)),
        Err(err) => report_save_failure(err),
    }
}

fn handle_summary(store: &TransactionStore, session_currency: Currency) -> Result<()> {
    let summary = summarize(store.list());
    output::section("Summary");
    output::info(format!(
        "Total Income:   {}",
        format_amount(session_currency, summary.total_income)
    ));
    output::info(format!(
        "Total Expenses: {}",
        format_amount(session_currency, summary.total_expenses)
    ));
    output::info(format!(
        "Net Income:     {}",
        format_amount(session_currency, summary.net_income)
    ));
    output::info(format!("Transactions:   {}", summary.count));
    Ok(())
}

fn handle_breakdown(
    store: &TransactionStore,
    session_currency: Currency,
    kind: TransactionKind,
) -> Result<()> {
    let filtered: Vec<Transaction> = store
        .list()
        .iter()
        .filter(|t| t.kind == kind)
        .cloned()
        .collect();
    if filtered.is_empty() {
        output::info(format!("No {kind} transactions recorded"));
        return Ok(());
    }
    let totals = category_totals(&filtered);
    let overall: f64 = totals.iter().map(|entry| entry.amount).sum();
    let title = match kind {
        TransactionKind::Income => "Income by category",
        TransactionKind::Expense => "Expenses by category",
    };
    output::section(title);
    for entry in &totals {
        let share = if overall > 0.0 {
            entry.amount / overall * 100.0
        } else {
            0.0
        };
        output::info(format!(
            "{} {:<16} {:>14}  {:>5.1}%",
            entry.category.icon(),
            entry.category.display_name(),
            format_amount(session_currency, entry.amount),
            share
        ));
    }
    Ok(())
}

fn handle_trends(store: &TransactionStore, session_currency: Currency) -> Result<()> {
    let trends = monthly_trends(store.list());
    if trends.is_empty() {
        output::info("No transactions found");
        return Ok(());
    }
    output::section("Monthly trends");
    output::info(format!(
        "{:<8} {:>14} {:>14} {:>14}",
        "Month", "Income", "Expenses", "Net"
    ));
    for trend in &trends {
        output::info(format!(
            "{:<8} {:>14} {:>14} {:>14}",
            trend.month,
            format_amount(session_currency, trend.income),
            format_amount(session_currency, trend.expenses),
            format_amount(session_currency, trend.net),
        ));
    }
    Ok(())
}

fn handle_categories(kind: Option<TransactionKind>) -> Result<()> {
    let sections = [
        (TransactionKind::Income, "Income categories"),
        (TransactionKind::Expense, "Expense categories"),
    ];
    for (section_kind, title) in sections {
        if let Some(wanted) = kind {
            if wanted != section_kind {
                continue;
            }
        }
        output::section(title);
        for category in CategoryId::for_kind(section_kind) {
            output::info(format!(
                "{:<16} {} {}",
                category.as_str(),
                category.icon(),
                category.display_name()
            ));
        }
    }
    Ok(())
}

fn handle_export(store: &TransactionStore, output_path: Option<PathBuf>) -> Result<()> {
    if store.is_empty() {
        output::warning("No transactions to export");
        return Ok(());
    }
    let path = output_path
        .unwrap_or_else(|| PathBuf::from(csv::export_file_name(Local::now().date_naive())));
    fs::write(&path, csv::encode(store.list()))?;
    output::success("Transactions exported successfully!");
    output::detail(format!("wrote {}", path.display()));
    Ok(())
}

fn handle_import(
    store: &mut TransactionStore,
    session_currency: Currency,
    file: PathBuf,
) -> Result<()> {
    let format = ImportFormat::from_path(&file)?;
    let content = fs::read_to_string(&file)?;
    let records = parse_records(format, &content)?;
    match store.merge_import(records, session_currency) {
        Ok(accepted) => {
            output::success(format!("Successfully imported {accepted} transactions!"));
            Ok(())
        }
        Err(err) => report_save_failure(err),
    }
}

fn handle_currency(
    store: &TransactionStore,
    session_currency: Currency,
    code: Option<String>,
) -> Result<()> {
    match code {
        None => {
            output::info(format!(
                "Current currency: {} ({} {})",
                session_currency.code(),
                session_currency.symbol(),
                session_currency.display_name()
            ));
            let codes: Vec<&str> = ALL_CURRENCIES.iter().map(Currency::code).collect();
            output::info(format!("Available: {}", codes.join(", ")));
            Ok(())
        }
        Some(code) => {
            // clap restricts the value set, so the parse cannot miss.
            let currency = Currency::parse(&code).unwrap_or_default();
            match settings::save_currency(store.storage(), currency) {
                Ok(()) => {
                    output::success(format!("Currency set to {}", currency.code()));
                    Ok(())
                }
                Err(err) => report_save_failure(err),
            }
        }
    }
}

fn handle_theme(store: &TransactionStore, value: Option<String>) -> Result<()> {
    match value {
        None => {
            let theme = settings::load_theme(store.storage());
            output::info(format!("Current theme: {theme}"));
            Ok(())
        }
        Some(value) => {
            let theme = Theme::parse(&value).unwrap_or_default();
            match settings::save_theme(store.storage(), theme) {
                Ok(()) => {
                    output::success(format!("Theme set to {theme}"));
                    Ok(())
                }
                Err(err) => report_save_failure(err),
            }
        }
    }
}
