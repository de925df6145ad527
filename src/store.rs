use rusqlite::types::Type;
use rusqlite::Connection;

use crate::error::Result;
use crate::models::{Category, CategoryType, NewTransaction, Transaction, TransactionType, UserContext};

/// Most transactions a listing reloads.
pub const RECENT_LIMIT: usize = 100;

/// Persistence for transactions and the read-only category table.
///
/// Every transaction operation is scoped to the given user; nothing here reads or
/// deletes another user's rows.
pub trait LedgerStore {
    /// True when the user already has a transaction with this date, amount and description.
    fn exists(&self, user: &UserContext, date: &str, amount: f64, description: &str) -> Result<bool>;

    fn insert(&mut self, txn: &NewTransaction) -> Result<i64>;

    /// Newest first by date, then by insertion order.
    fn list_recent(&self, user: &UserContext, limit: usize) -> Result<Vec<Transaction>>;

    /// Returns false when the user owns no transaction with that id.
    fn delete(&mut self, user: &UserContext, id: i64) -> Result<bool>;

    fn categories(&self) -> Result<Vec<Category>>;
}

pub struct SqliteLedger<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteLedger<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

fn conversion_error(col: usize, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, format!("unexpected value: {value}").into())
}

impl LedgerStore for SqliteLedger<'_> {
    fn exists(&self, user: &UserContext, date: &str, amount: f64, description: &str) -> Result<bool> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT 1 FROM transactions WHERE user_id = ?1 AND date = ?2 AND amount = ?3 AND description = ?4",
        )?;
        Ok(stmt.exists(rusqlite::params![user.id, date, amount, description])?)
    }

    fn insert(&mut self, txn: &NewTransaction) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO transactions (user_id, amount, description, category, type, date) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                txn.user_id,
                txn.amount,
                txn.description,
                txn.category,
                txn.kind.as_str(),
                txn.date,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_recent(&self, user: &UserContext, limit: usize) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, amount, description, category, type, date FROM transactions \
             WHERE user_id = ?1 ORDER BY date DESC, id DESC LIMIT ?2",
        )?;
        let rows = stmt.query_map(rusqlite::params![user.id, limit as i64], |row| {
            let kind: String = row.get(5)?;
            Ok(Transaction {
                id: row.get(0)?,
                user_id: row.get(1)?,
                amount: row.get(2)?,
                description: row.get(3)?,
                category: row.get(4)?,
                kind: TransactionType::parse(&kind).ok_or_else(|| conversion_error(5, &kind))?,
                date: row.get(6)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn delete(&mut self, user: &UserContext, id: i64) -> Result<bool> {
        let removed = self.conn.execute(
            "DELETE FROM transactions WHERE id = ?1 AND user_id = ?2",
            rusqlite::params![id, user.id],
        )?;
        Ok(removed > 0)
    }

    fn categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, emoji, color, category_type FROM categories ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            let category_type: String = row.get(4)?;
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
                emoji: row.get(2)?,
                color: row.get(3)?,
                category_type: CategoryType::parse(&category_type)
                    .ok_or_else(|| conversion_error(4, &category_type))?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}
