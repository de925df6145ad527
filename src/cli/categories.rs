use comfy_table::{Cell, Table};

use crate::cli::open_db;
use crate::error::Result;
use crate::store::{LedgerStore, SqliteLedger};

pub fn list() -> Result<()> {
    let conn = open_db()?;
    let categories = SqliteLedger::new(&conn).categories()?;

    let mut table = Table::new();
    table.set_header(vec!["", "Name", "Applies To", "Color"]);
    for cat in categories {
        table.add_row(vec![
            Cell::new(cat.emoji),
            Cell::new(cat.name),
            Cell::new(cat.category_type.as_str()),
            Cell::new(cat.color),
        ]);
    }
    println!("Categories\n{table}");
    Ok(())
}
