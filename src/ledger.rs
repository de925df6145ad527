use tracing::info;

use crate::classifier::FALLBACK_CATEGORY;
use crate::error::{LedgerError, Result};
use crate::models::{NewTransaction, Transaction, TransactionType, UserContext};
use crate::store::LedgerStore;

/// A manual entry as typed by the user, before validation.
pub struct ManualEntry<'a> {
    pub amount: &'a str,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub kind: Option<TransactionType>,
    pub date: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Income,
    Expense,
}

impl Filter {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn keeps(&self, txn: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Income => txn.kind == TransactionType::Income,
            Self::Expense => txn.kind == TransactionType::Expense,
        }
    }
}

pub fn filter_transactions(transactions: &[Transaction], filter: Filter) -> Vec<Transaction> {
    transactions.iter().filter(|t| filter.keeps(t)).cloned().collect()
}

fn parse_entry_amount(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite() && *a > 0.0)
        .ok_or_else(|| LedgerError::InvalidAmount(raw.to_string()))
}

fn parse_entry_date(raw: Option<&str>) -> Result<String> {
    match raw {
        None => Ok(chrono::Local::now().format("%Y-%m-%d").to_string()),
        Some(raw) => chrono::NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(|d| d.format("%Y-%m-%d").to_string())
            .map_err(|_| LedgerError::InvalidDate(raw.to_string())),
    }
}

/// Validate a manual entry and write it for `user`. Returns the new transaction id.
pub fn add_transaction(store: &mut dyn LedgerStore, user: &UserContext, entry: &ManualEntry) -> Result<i64> {
    let amount = parse_entry_amount(entry.amount)?;
    let date = parse_entry_date(entry.date)?;
    let kind = entry.kind.unwrap_or(TransactionType::Expense);
    let category_name = entry.category.unwrap_or(FALLBACK_CATEGORY).trim();

    let categories = store.categories()?;
    let category = categories
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(category_name))
        .ok_or_else(|| LedgerError::UnknownCategory(category_name.to_string()))?;
    if !category.category_type.applies_to(kind) {
        return Err(LedgerError::CategoryMismatch {
            category: category.name.clone(),
            kind: kind.to_string(),
        });
    }

    let txn = NewTransaction {
        user_id: user.id,
        amount,
        description: entry.description.unwrap_or("").trim().to_string(),
        category: category.name.clone(),
        kind,
        date,
    };
    let id = store.insert(&txn)?;
    info!(id, amount, kind = %kind, "transaction recorded");
    Ok(id)
}

pub fn delete_transaction(store: &mut dyn LedgerStore, user: &UserContext, id: i64) -> Result<()> {
    if !store.delete(user, id)? {
        return Err(LedgerError::TransactionNotFound(id));
    }
    info!(id, "transaction deleted");
    Ok(())
}
