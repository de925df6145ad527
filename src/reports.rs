use std::collections::HashMap;

use crate::models::{Category, Transaction, TransactionType};

pub const BREAKDOWN_SIZE: usize = 5;
const FALLBACK_EMOJI: &str = "\u{1F4CA}";

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    pub count: usize,
}

pub fn get_totals(transactions: &[Transaction]) -> Totals {
    let sum_of = |kind: TransactionType| -> f64 {
        transactions.iter().filter(|t| t.kind == kind).map(|t| t.amount).sum()
    };
    let income = sum_of(TransactionType::Income);
    let expenses = sum_of(TransactionType::Expense);
    Totals {
        income,
        expenses,
        balance: income - expenses,
        count: transactions.len(),
    }
}

// ---------------------------------------------------------------------------
// Category breakdown
// ---------------------------------------------------------------------------

pub struct BreakdownItem {
    pub name: String,
    pub emoji: String,
    pub total: f64,
    /// Share of the money moved in the shown totals, capped at 100.
    pub percentage: f64,
}

/// Largest categories by summed amount, regardless of direction.
///
/// `moved` is income plus expenses of the totals being displayed. It can be smaller
/// than the sum of `transactions` when the totals are filtered, hence the cap.
pub fn get_breakdown(transactions: &[Transaction], categories: &[Category], moved: f64) -> Vec<BreakdownItem> {
    let mut sums: HashMap<&str, f64> = HashMap::new();
    for t in transactions {
        *sums.entry(t.category.as_str()).or_default() += t.amount;
    }

    let mut items: Vec<(&str, f64)> = sums.into_iter().collect();
    items.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    items
        .into_iter()
        .take(BREAKDOWN_SIZE)
        .map(|(name, total)| {
            let emoji = categories
                .iter()
                .find(|c| c.name == name)
                .map(|c| c.emoji.clone())
                .unwrap_or_else(|| FALLBACK_EMOJI.to_string());
            let percentage = if moved > 0.0 {
                (total / moved * 100.0).min(100.0)
            } else {
                0.0
            };
            BreakdownItem {
                name: name.to_string(),
                emoji,
                total,
                percentage,
            }
        })
        .collect()
}
