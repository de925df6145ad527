use rusqlite::{Connection, OptionalExtension};
use tracing::info;

use crate::error::{LedgerError, Result};
use crate::models::UserContext;

fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(LedgerError::Other(format!("Not an email address: {email}"))),
    }
}

/// Find the user with this email, creating the row on first sign-in.
pub fn sign_in(conn: &Connection, email: &str) -> Result<UserContext> {
    let email = normalize_email(email)?;
    conn.execute("INSERT OR IGNORE INTO users (email) VALUES (?1)", [&email])?;
    let id: i64 = conn.query_row("SELECT id FROM users WHERE email = ?1", [&email], |r| r.get(0))?;
    info!(user_id = id, "signed in");
    Ok(UserContext { id, email })
}

/// Resolve the session email to a user. Fails when nobody is signed in or the
/// session names a user this database does not know.
pub fn current_user(conn: &Connection, session: Option<&str>) -> Result<UserContext> {
    let email = session.ok_or(LedgerError::NotSignedIn)?;
    let id: Option<i64> = conn
        .query_row("SELECT id FROM users WHERE email = ?1", [email], |r| r.get(0))
        .optional()?;
    let id = id.ok_or(LedgerError::NotSignedIn)?;
    Ok(UserContext {
        id,
        email: email.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_sign_in_is_get_or_create() {
        let (_dir, conn) = test_db();
        let first = sign_in(&conn, "Me@Example.com ").unwrap();
        let again = sign_in(&conn, "me@example.com").unwrap();
        assert_eq!(first, again);
        assert_eq!(first.email, "me@example.com");
        let count: i64 = conn.query_row("SELECT count(*) FROM users", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_sign_in_rejects_non_email() {
        let (_dir, conn) = test_db();
        assert!(sign_in(&conn, "nobody").is_err());
        assert!(sign_in(&conn, "@example.com").is_err());
    }

    #[test]
    fn test_current_user_requires_session() {
        let (_dir, conn) = test_db();
        assert!(matches!(current_user(&conn, None), Err(LedgerError::NotSignedIn)));
        assert!(matches!(
            current_user(&conn, Some("ghost@example.com")),
            Err(LedgerError::NotSignedIn)
        ));
        let user = sign_in(&conn, "me@example.com").unwrap();
        assert_eq!(current_user(&conn, Some("me@example.com")).unwrap(), user);
    }
}
