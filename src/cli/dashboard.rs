use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{open_for_user, parse_filter};
use crate::error::Result;
use crate::fmt::money;
use crate::ledger::filter_transactions;
use crate::reports::{get_breakdown, get_totals};
use crate::store::{LedgerStore, SqliteLedger, RECENT_LIMIT};

pub fn run(filter: &str) -> Result<()> {
    let filter = parse_filter(filter)?;
    let (conn, user) = open_for_user()?;
    let store = SqliteLedger::new(&conn);
    let recent = store.list_recent(&user, RECENT_LIMIT)?;
    let rows = filter_transactions(&recent, filter);
    let totals = get_totals(&rows);

    println!("Signed in as {}", user.email.bold());
    println!();
    println!("Income:    {}", money(totals.income).green());
    println!("Expenses:  {}", money(totals.expenses).red());
    let balance = money(totals.balance);
    if totals.balance < 0.0 {
        println!("Balance:   {}", balance.red().bold());
    } else {
        println!("Balance:   {}", balance.bold());
    }
    println!("Records:   {}", totals.count);

    let moved = totals.income + totals.expenses;
    let breakdown = get_breakdown(&recent, &store.categories()?, moved);
    if breakdown.is_empty() {
        println!();
        println!("No data available");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["", "Category", "Amount", "Share"]);
    for item in breakdown {
        table.add_row(vec![
            Cell::new(item.emoji),
            Cell::new(item.name),
            Cell::new(money(item.total)),
            Cell::new(format!("{:.1}%", item.percentage)),
        ]);
    }
    println!();
    println!("Category Breakdown\n{table}");
    Ok(())
}
