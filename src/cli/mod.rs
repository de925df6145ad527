pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod import;
pub mod init;
pub mod transactions;

use clap::{Parser, Subcommand};
use rusqlite::Connection;

use crate::db;
use crate::error::{LedgerError, Result};
use crate::ledger::Filter;
use crate::models::{TransactionType, UserContext};
use crate::session::current_user;
use crate::settings::{get_data_dir, load_settings};

pub(crate) fn open_db() -> Result<Connection> {
    db::open(&get_data_dir())
}

/// Open the database and resolve the signed-in user, or fail before doing anything else.
pub(crate) fn open_for_user() -> Result<(Connection, UserContext)> {
    let conn = open_db()?;
    let user = current_user(&conn, load_settings().session.as_deref())?;
    Ok((conn, user))
}

pub(crate) fn parse_filter(raw: &str) -> Result<Filter> {
    Filter::parse(raw).ok_or_else(|| LedgerError::Other(format!("Unknown filter: {raw} (use all, income or expense)")))
}

pub(crate) fn parse_kind(raw: &str) -> Result<TransactionType> {
    TransactionType::parse(raw)
        .ok_or_else(|| LedgerError::Other(format!("Unknown type: {raw} (use income or expense)")))
}

#[derive(Parser)]
#[command(name = "ledgerly", about = "Personal finance ledger with bank-statement import.")]
pub struct Cli {
    /// Log verbosity: error, warn, info, debug, trace (default from settings, else warn)
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and initialize the database.
    Init {
        /// Path for ledger data (default: ~/Documents/ledgerly)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Sign in; the user is created on first sign-in.
    Login {
        #[arg(long)]
        email: String,
    },
    /// Sign out of the current session.
    Logout,
    /// Show income, expenses, balance and the top categories.
    Dashboard {
        /// all, income or expense
        #[arg(long, default_value = "all")]
        filter: String,
    },
    /// Record a transaction by hand.
    Add {
        /// Amount, greater than zero
        #[arg(long)]
        amount: String,
        #[arg(long)]
        description: Option<String>,
        /// Category name (default: Other)
        #[arg(long)]
        category: Option<String>,
        /// income or expense (default: expense)
        #[arg(long = "type")]
        kind: Option<String>,
        /// YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List recent transactions, newest first.
    List {
        /// all, income or expense
        #[arg(long, default_value = "all")]
        filter: String,
    },
    /// Delete a transaction by ID.
    Delete {
        /// Transaction ID (shown in `ledgerly list`)
        id: i64,
    },
    /// Import a semicolon-delimited bank statement export.
    Import {
        /// Path to the statement file
        file: String,
        /// Show the first rows and the row count without importing
        #[arg(long)]
        preview: bool,
    },
    /// List the available categories.
    Categories,
}
