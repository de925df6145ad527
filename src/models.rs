use std::collections::BTreeMap;
use std::fmt;

/// The signed-in user every ledger operation is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which transaction types a category may be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryType {
    Income,
    Expense,
    Both,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Both => "both",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            "both" => Some(Self::Both),
            _ => None,
        }
    }

    pub fn applies_to(&self, kind: TransactionType) -> bool {
        matches!(
            (self, kind),
            (Self::Both, _)
                | (Self::Income, TransactionType::Income)
                | (Self::Expense, TransactionType::Expense)
        )
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub emoji: String,
    pub color: String,
    pub category_type: CategoryType,
}

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub kind: TransactionType,
    pub date: String,
}

/// A transaction ready to be written: a classified CSV row or a validated manual entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub user_id: i64,
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub kind: TransactionType,
    pub date: String,
}

/// One statement line keyed by header column name. Empty values are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    fields: BTreeMap<String, String>,
}

impl CsvRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn insert(&mut self, column: &str, value: &str) {
        if !value.is_empty() {
            self.fields.insert(column.to_string(), value.to_string());
        }
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut row = Self::default();
        for (column, value) in pairs {
            row.insert(column, value);
        }
        row
    }
}

/// Outcome counters for one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub duplicates: usize,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IMPORT COMPLETE: {} imported, {} failed, {} duplicates skipped",
            self.succeeded, self.failed, self.duplicates
        )
    }
}
