use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{open_for_user, parse_filter, parse_kind};
use crate::error::Result;
use crate::fmt::signed_money;
use crate::ledger::{add_transaction, delete_transaction, filter_transactions, ManualEntry};
use crate::models::{Transaction, TransactionType};
use crate::store::{LedgerStore, SqliteLedger, RECENT_LIMIT};

pub fn add(
    amount: &str,
    description: Option<&str>,
    category: Option<&str>,
    kind: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    let (conn, user) = open_for_user()?;
    let mut store = SqliteLedger::new(&conn);
    let entry = ManualEntry {
        amount,
        description,
        category,
        kind: kind.map(parse_kind).transpose()?,
        date,
    };
    let id = add_transaction(&mut store, &user, &entry)?;
    println!("Transaction recorded (ID {id})");
    Ok(())
}

pub fn list(filter: &str) -> Result<()> {
    let filter = parse_filter(filter)?;
    let (conn, user) = open_for_user()?;
    let store = SqliteLedger::new(&conn);
    let rows = filter_transactions(&store.list_recent(&user, RECENT_LIMIT)?, filter);
    print_transactions(&rows);
    Ok(())
}

pub fn delete(id: i64) -> Result<()> {
    let (conn, user) = open_for_user()?;
    let mut store = SqliteLedger::new(&conn);
    delete_transaction(&mut store, &user, id)?;
    println!("Deleted transaction {id}");
    Ok(())
}

pub(crate) fn print_transactions(rows: &[Transaction]) {
    if rows.is_empty() {
        println!("No transactions.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Description", "Category", "Amount"]);
    for t in rows {
        let amount = signed_money(t.amount, t.kind);
        let amount = match t.kind {
            TransactionType::Income => amount.green(),
            TransactionType::Expense => amount.red(),
        };
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.date),
            Cell::new(&t.description),
            Cell::new(&t.category),
            Cell::new(amount),
        ]);
    }
    println!("{table}");
    println!("{} records", rows.len());
}
