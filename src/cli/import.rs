use std::path::PathBuf;

use comfy_table::{Cell, Table};

use crate::cli::open_for_user;
use crate::error::Result;
use crate::importer::{import_statement, preview, read_statement};
use crate::parser::{COL_AMOUNT, COL_BALANCE, COL_DATE, COL_DESCRIPTION, COL_TYPE};
use crate::store::SqliteLedger;

pub fn run(file: &str, preview_only: bool) -> Result<()> {
    let (conn, user) = open_for_user()?;
    let text = read_statement(&PathBuf::from(file))?;

    if preview_only {
        return show_preview(&text);
    }

    let mut store = SqliteLedger::new(&conn);
    let report = import_statement(&mut store, &user, &text);
    println!("{}", report.summary);
    println!("{} transactions on record", report.recent.len());
    Ok(())
}

fn show_preview(text: &str) -> Result<()> {
    let preview = preview(text);
    let columns = [COL_DATE, COL_TYPE, COL_DESCRIPTION, COL_AMOUNT, COL_BALANCE];

    let mut table = Table::new();
    table.set_header(columns.to_vec());
    for row in &preview.rows {
        table.add_row(columns.iter().map(|c| Cell::new(row.get(c).unwrap_or(""))));
    }
    println!("{table}");
    if preview.rows.len() < preview.total {
        println!("Showing first {} of {} transactions", preview.rows.len(), preview.total);
    } else {
        println!("{} transactions found", preview.total);
    }
    Ok(())
}
