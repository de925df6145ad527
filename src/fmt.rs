use crate::models::TransactionType;

/// Format a float as a dollar amount with thousands separators: $1,234.56
pub fn money(val: f64) -> String {
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if val < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{dec_part}")
}

/// Amount with the direction of money flow: +$5.00 for income, -$5.00 for expenses.
pub fn signed_money(amount: f64, kind: TransactionType) -> String {
    match kind {
        TransactionType::Income => format!("+{}", money(amount)),
        TransactionType::Expense => format!("-{}", money(amount)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56), "$1,234.56");
        assert_eq!(money(-500.00), "-$500.00");
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(1000000.99), "$1,000,000.99");
        assert_eq!(money(42.10), "$42.10");
        assert_eq!(money(100.0), "$100.00");
    }

    #[test]
    fn test_signed_money() {
        assert_eq!(signed_money(12.5, TransactionType::Income), "+$12.50");
        assert_eq!(signed_money(1500.0, TransactionType::Expense), "-$1,500.00");
    }
}
