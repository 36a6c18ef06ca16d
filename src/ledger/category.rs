use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::transaction::TransactionKind;

/// Categorises transactions for reporting, partitioned by kind.
///
/// The registry is closed; ids that arrive through imports without a
/// registry entry are carried verbatim in `Unknown` and render with
/// fallback metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryId {
    Salary,
    Freelance,
    Investment,
    Business,
    OtherIncome,
    Food,
    Transportation,
    Shopping,
    Entertainment,
    Bills,
    Healthcare,
    Education,
    Travel,
    OtherExpense,
    Unknown(String),
}

/// Every registry entry, income partition first.
pub const KNOWN_CATEGORIES: [CategoryId; 14] = [
    CategoryId::Salary,
    CategoryId::Freelance,
    CategoryId::Investment,
    CategoryId::Business,
    CategoryId::OtherIncome,
    CategoryId::Food,
    CategoryId::Transportation,
    CategoryId::Shopping,
    CategoryId::Entertainment,
    CategoryId::Bills,
    CategoryId::Healthcare,
    CategoryId::Education,
    CategoryId::Travel,
    CategoryId::OtherExpense,
];

impl CategoryId {
    /// Stable string id, also the on-disk representation.
    pub fn as_str(&self) -> &str {
        match self {
            CategoryId::Salary => "salary",
            CategoryId::Freelance => "freelance",
            CategoryId::Investment => "investment",
            CategoryId::Business => "business",
            CategoryId::OtherIncome => "other-income",
            CategoryId::Food => "food",
            CategoryId::Transportation => "transportation",
            CategoryId::Shopping => "shopping",
            CategoryId::Entertainment => "entertainment",
            CategoryId::Bills => "bills",
            CategoryId::Healthcare => "healthcare",
            CategoryId::Education => "education",
            CategoryId::Travel => "travel",
            CategoryId::OtherExpense => "other-expense",
            CategoryId::Unknown(id) => id,
        }
    }

    /// Resolves a raw id. Ids outside the registry become `Unknown`.
    pub fn from_id(id: &str) -> CategoryId {
        KNOWN_CATEGORIES
            .iter()
            .find(|category| category.as_str() == id)
            .cloned()
            .unwrap_or_else(|| CategoryId::Unknown(id.to_string()))
    }

    /// The partition this category belongs to; `None` for unknown ids.
    pub fn kind(&self) -> Option<TransactionKind> {
        match self {
            CategoryId::Salary
            | CategoryId::Freelance
            | CategoryId::Investment
            | CategoryId::Business
            | CategoryId::OtherIncome => Some(TransactionKind::Income),
            CategoryId::Food
            | CategoryId::Transportation
            | CategoryId::Shopping
            | CategoryId::Entertainment
            | CategoryId::Bills
            | CategoryId::Healthcare
            | CategoryId::Education
            | CategoryId::Travel
            | CategoryId::OtherExpense => Some(TransactionKind::Expense),
            CategoryId::Unknown(_) => None,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            CategoryId::Salary => "Salary",
            CategoryId::Freelance => "Freelance",
            CategoryId::Investment => "Investment",
            CategoryId::Business => "Business",
            CategoryId::OtherIncome => "Other Income",
            CategoryId::Food => "Food & Dining",
            CategoryId::Transportation => "Transportation",
            CategoryId::Shopping => "Shopping",
            CategoryId::Entertainment => "Entertainment",
            CategoryId::Bills => "Bills & Utilities",
            CategoryId::Healthcare => "Healthcare",
            CategoryId::Education => "Education",
            CategoryId::Travel => "Travel",
            CategoryId::OtherExpense => "Other Expense",
            CategoryId::Unknown(id) => id,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            CategoryId::Salary => "💼",
            CategoryId::Freelance => "💻",
            CategoryId::Investment => "📈",
            CategoryId::Business => "🏢",
            CategoryId::OtherIncome => "💰",
            CategoryId::Food => "🍽️",
            CategoryId::Transportation => "🚗",
            CategoryId::Shopping => "🛍️",
            CategoryId::Entertainment => "🎬",
            CategoryId::Bills => "⚡",
            CategoryId::Healthcare => "🏥",
            CategoryId::Education => "📚",
            CategoryId::Travel => "✈️",
            CategoryId::OtherExpense | CategoryId::Unknown(_) => "📝",
        }
    }

    /// Hex color used by chart-style presentations.
    pub fn color(&self) -> &'static str {
        match self {
            CategoryId::Salary => "#10B981",
            CategoryId::Freelance => "#059669",
            CategoryId::Investment => "#047857",
            CategoryId::Business => "#065F46",
            CategoryId::OtherIncome => "#064E3B",
            CategoryId::Food => "#EF4444",
            CategoryId::Transportation => "#F97316",
            CategoryId::Shopping => "#8B5CF6",
            CategoryId::Entertainment => "#EC4899",
            CategoryId::Bills => "#06B6D4",
            CategoryId::Healthcare => "#84CC16",
            CategoryId::Education => "#3B82F6",
            CategoryId::Travel => "#F59E0B",
            CategoryId::OtherExpense | CategoryId::Unknown(_) => "#6B7280",
        }
    }

    /// Registry entries in one partition, in registry order.
    pub fn for_kind(kind: TransactionKind) -> impl Iterator<Item = &'static CategoryId> {
        KNOWN_CATEGORIES
            .iter()
            .filter(move |category| category.kind() == Some(kind))
    }

    /// Exact display-name lookup, used when reading CSV rows back.
    pub fn from_display_name(name: &str) -> Option<&'static CategoryId> {
        KNOWN_CATEGORIES
            .iter()
            .find(|category| category.display_name() == name)
    }
}

impl Serialize for CategoryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        Ok(CategoryId::from_id(&id))
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
