use std::path::Path;

use tracing::{debug, info, warn};

use crate::classifier::classify;
use crate::error::Result;
use crate::models::{CsvRow, ImportSummary, NewTransaction, Transaction, UserContext};
use crate::parser::parse_statement;
use crate::store::{LedgerStore, RECENT_LIMIT};

pub const PREVIEW_ROWS: usize = 5;

/// First few parsed rows of a statement and how many rows it holds in total.
pub struct Preview {
    pub rows: Vec<CsvRow>,
    pub total: usize,
}

pub fn preview(text: &str) -> Preview {
    let rows = parse_statement(text);
    let total = rows.len();
    Preview {
        rows: rows.into_iter().take(PREVIEW_ROWS).collect(),
        total,
    }
}

/// Read a statement file. Bytes that are not UTF-8 (a Latin-1 `£` in many bank
/// exports) are replaced rather than failing the import.
pub fn read_statement(file_path: &Path) -> Result<String> {
    let bytes = std::fs::read(file_path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn is_duplicate(store: &dyn LedgerStore, user: &UserContext, txn: &NewTransaction) -> Result<bool> {
    store.exists(user, &txn.date, txn.amount, &txn.description)
}

enum RowOutcome {
    Inserted,
    Duplicate,
}

fn process_row(store: &mut dyn LedgerStore, user: &UserContext, row: &CsvRow) -> Result<RowOutcome> {
    let txn = classify(row, user)?;
    if is_duplicate(store, user, &txn)? {
        return Ok(RowOutcome::Duplicate);
    }
    store.insert(&txn)?;
    Ok(RowOutcome::Inserted)
}

/// Write every row in order, one at a time. A row that fails is counted and skipped;
/// rows already written stay written.
pub fn import_rows(store: &mut dyn LedgerStore, user: &UserContext, rows: &[CsvRow]) -> ImportSummary {
    let mut summary = ImportSummary {
        total: rows.len(),
        ..ImportSummary::default()
    };

    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;
        match process_row(store, user, row) {
            Ok(RowOutcome::Inserted) => {
                debug!(row = row_number, "row imported");
                summary.succeeded += 1;
            }
            Ok(RowOutcome::Duplicate) => {
                debug!(row = row_number, "row already present, skipped");
                summary.duplicates += 1;
            }
            Err(e) => {
                warn!(row = row_number, error = %e, "row failed");
                summary.failed += 1;
            }
        }
    }

    info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        duplicates = summary.duplicates,
        "import finished"
    );
    summary
}

pub struct ImportReport {
    pub summary: ImportSummary,
    /// The user's recent transactions as they stand after the import.
    pub recent: Vec<Transaction>,
}

/// Parse a statement, import its rows for `user`, then reload the user's recent list.
pub fn import_statement(store: &mut dyn LedgerStore, user: &UserContext, text: &str) -> ImportReport {
    let rows = parse_statement(text);
    let summary = import_rows(store, user, &rows);
    let recent = store.list_recent(user, RECENT_LIMIT).unwrap_or_else(|e| {
        warn!(error = %e, "could not reload transactions after import");
        Vec::new()
    });
    ImportReport { summary, recent }
}
