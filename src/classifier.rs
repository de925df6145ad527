use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::{CsvRow, NewTransaction, TransactionType, UserContext};
use crate::parser::{COL_AMOUNT, COL_DATE, COL_DESCRIPTION, COL_TYPE};

static NOT_NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9.\-]").unwrap());
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)").unwrap());

#[derive(Error, Debug, PartialEq)]
pub enum ClassifyError {
    #[error("amount {0:?} is not a positive number")]
    InvalidAmount(String),

    #[error("row has no date")]
    MissingDate,

    #[error("date {0:?} is not DD/MM/YYYY")]
    MalformedDate(String),
}

/// Where a matched category rule looks.
#[derive(Debug, Clone, Copy)]
enum Field {
    /// Bank transaction type code, case-sensitive.
    Type,
    /// Merchant text, case-insensitive.
    Description,
}

struct CategoryRule {
    field: Field,
    needles: &'static [&'static str],
    expense: &'static str,
    income: &'static str,
}

const fn rule(field: Field, needles: &'static [&'static str], category: &'static str) -> CategoryRule {
    CategoryRule {
        field,
        needles,
        expense: category,
        income: category,
    }
}

// First match wins. "PAYMENTS" can never fire: every such type also contains "PAYMENT".
const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        field: Field::Type,
        needles: &["PAYMENT"],
        expense: "Shopping",
        income: "Other Income",
    },
    rule(Field::Type, &["INTEREST"], "Investments"),
    rule(Field::Type, &["TRANSFER"], "Transfer"),
    rule(Field::Type, &["PAYMENTS"], "Bills"),
    rule(Field::Description, &["grocery", "food"], "Food"),
    rule(Field::Description, &["uber", "transport"], "Transport"),
];

pub const FALLBACK_CATEGORY: &str = "Other";
const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// Signed amount text to (magnitude, type). A `-` anywhere marks an expense; the
/// magnitude is the leading number left after stripping everything but digits, `.` and `-`.
pub fn parse_amount(raw: &str) -> Result<(f64, TransactionType), ClassifyError> {
    let kind = if raw.contains('-') {
        TransactionType::Expense
    } else {
        TransactionType::Income
    };
    let stripped = NOT_NUMERIC.replace_all(raw, "");
    let amount = LEADING_NUMBER
        .find(&stripped)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(f64::abs)
        .filter(|a| a.is_finite() && *a > 0.0)
        .ok_or_else(|| ClassifyError::InvalidAmount(raw.to_string()))?;
    Ok((amount, kind))
}

/// `DD/MM/YYYY` to `YYYY-MM-DD`. Day and month are zero-padded; nothing is range-checked.
pub fn normalize_date(raw: &str) -> Result<String, ClassifyError> {
    let mut parts = raw.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(day), Some(month), Some(year)) => Ok(format!("{year}-{month:0>2}-{day:0>2}")),
        _ => Err(ClassifyError::MalformedDate(raw.to_string())),
    }
}

pub fn describe(row: &CsvRow) -> String {
    row.get(COL_DESCRIPTION)
        .or_else(|| row.get(COL_TYPE))
        .unwrap_or(UNKNOWN_DESCRIPTION)
        .to_string()
}

pub fn categorize(type_code: Option<&str>, description: &str, kind: TransactionType) -> &'static str {
    let desc_lower = description.to_lowercase();
    for rule in CATEGORY_RULES {
        let hit = match rule.field {
            Field::Type => type_code.is_some_and(|t| rule.needles.iter().any(|n| t.contains(n))),
            Field::Description => rule.needles.iter().any(|n| desc_lower.contains(n)),
        };
        if hit {
            return match kind {
                TransactionType::Expense => rule.expense,
                TransactionType::Income => rule.income,
            };
        }
    }
    FALLBACK_CATEGORY
}

/// Turn one statement row into a transaction for `user`, or say why it cannot be one.
pub fn classify(row: &CsvRow, user: &UserContext) -> Result<NewTransaction, ClassifyError> {
    let (amount, kind) = parse_amount(row.get(COL_AMOUNT).unwrap_or(""))?;
    let date = normalize_date(row.get(COL_DATE).ok_or(ClassifyError::MissingDate)?)?;
    let description = describe(row);
    let category = categorize(row.get(COL_TYPE), &description, kind).to_string();
    Ok(NewTransaction {
        user_id: user.id,
        amount,
        description,
        category,
        kind,
        date,
    })
}
