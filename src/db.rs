use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;

pub const DB_FILE: &str = "ledgerly.db";

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    emoji TEXT NOT NULL,
    color TEXT NOT NULL,
    category_type TEXT NOT NULL CHECK (category_type IN ('income', 'expense', 'both'))
);

CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    amount REAL NOT NULL CHECK (amount > 0),
    description TEXT NOT NULL,
    category TEXT NOT NULL,
    type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
    date TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (user_id) REFERENCES users(id)
);

CREATE INDEX IF NOT EXISTS idx_transactions_user_date ON transactions (user_id, date);
";

// (name, emoji, color, category_type)
const DEFAULT_CATEGORIES: &[(&str, &str, &str, &str)] = &[
    // Income
    ("Salary", "\u{1F4BC}", "#00ff8f", "income"),
    ("Freelance", "\u{1F4BB}", "#00d4ff", "income"),
    ("Investments", "\u{1F4C8}", "#7c3aed", "income"),
    ("Other Income", "\u{1F4B0}", "#22c55e", "income"),
    // Expenses
    ("Food", "\u{1F354}", "#f97316", "expense"),
    ("Transport", "\u{1F697}", "#3b82f6", "expense"),
    ("Shopping", "\u{1F6CD}", "#ec4899", "expense"),
    ("Bills", "\u{1F4C4}", "#ef4444", "expense"),
    ("Housing", "\u{1F3E0}", "#a855f7", "expense"),
    ("Utilities", "\u{1F4A1}", "#eab308", "expense"),
    ("Entertainment", "\u{1F3AC}", "#f43f5e", "expense"),
    ("Health", "\u{1F48A}", "#14b8a6", "expense"),
    ("Education", "\u{1F4DA}", "#6366f1", "expense"),
    // Either direction
    ("Transfer", "\u{1F501}", "#94a3b8", "both"),
    ("Other", "\u{1F4CA}", "#6b7280", "both"),
];

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;

    let count: i64 = conn.query_row("SELECT count(*) FROM categories", [], |row| row.get(0))?;
    if count == 0 {
        for cat in DEFAULT_CATEGORIES {
            conn.execute(
                "INSERT INTO categories (name, emoji, color, category_type) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![cat.0, cat.1, cat.2, cat.3],
            )?;
        }
        debug!(count = DEFAULT_CATEGORIES.len(), "seeded categories");
    }
    Ok(())
}

/// Open the database under `data_dir`, creating the schema if needed.
pub fn open(data_dir: &Path) -> Result<Connection> {
    std::fs::create_dir_all(data_dir)?;
    let conn = get_connection(&data_dir.join(DB_FILE))?;
    init_db(&conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_init_db_creates_tables() {
        let (_dir, conn) = test_db();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        for expected in &["users", "categories", "transactions"] {
            assert!(tables.contains(&expected.to_string()), "missing table: {expected}");
        }
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        init_db(&conn).unwrap();
        let count: i64 = conn.query_row("SELECT count(*) FROM categories", [], |r| r.get(0)).unwrap();
        assert_eq!(count, DEFAULT_CATEGORIES.len() as i64);
    }

    #[test]
    fn test_seeds_every_classifier_label() {
        let (_dir, conn) = test_db();
        for name in &[
            "Shopping", "Other Income", "Investments", "Transfer", "Bills", "Food", "Transport", "Other",
        ] {
            let found: i64 = conn
                .query_row("SELECT count(*) FROM categories WHERE name = ?1", [name], |r| r.get(0))
                .unwrap();
            assert_eq!(found, 1, "missing category: {name}");
        }
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let (_dir, conn) = test_db();
        conn.execute("INSERT INTO users (email) VALUES ('a@example.com')", []).unwrap();
        let err = conn.execute(
            "INSERT INTO transactions (user_id, amount, description, category, type, date) \
             VALUES (1, 0, 'x', 'Other', 'expense', '2024-01-01')",
            [],
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_open_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("data");
        open(&nested).unwrap();
        assert!(nested.join(DB_FILE).exists());
    }
}
