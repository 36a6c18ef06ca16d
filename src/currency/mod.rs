use serde::{Deserialize, Serialize};

/// Currencies the tracker can record amounts in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "INR")]
    Inr,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
}

pub const ALL_CURRENCIES: [Currency; 4] =
    [Currency::Inr, Currency::Usd, Currency::Eur, Currency::Gbp];

impl Currency {
    /// ISO 4217 code, also the on-disk representation.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Currency::Inr => "Indian Rupee",
            Currency::Usd => "US Dollar",
            Currency::Eur => "Euro",
            Currency::Gbp => "British Pound",
        }
    }

    /// Resolves a currency code, ignoring case. `None` for codes outside
    /// the registry.
    pub fn parse(code: &str) -> Option<Currency> {
        ALL_CURRENCIES
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Formats an amount with the currency symbol, two decimals, and digit
/// grouping. INR uses Indian grouping (`₹1,23,456.78`), the rest Western
/// groups of three.
pub fn format_amount(currency: Currency, amount: f64) -> String {
    let body = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some(parts) => parts,
        None => (body.as_str(), "00"),
    };
    let grouped = match currency {
        Currency::Inr => group_digits_indian(int_part),
        _ => group_digits(int_part),
    };
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}{}.{}", currency.symbol(), sign, grouped, frac_part)
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

// Indian grouping: last three digits, then groups of two.
fn group_digits_indian(digits: &str) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count == 3 || (count > 3 && (count - 3) % 2 == 0) {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}
