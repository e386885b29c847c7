use std::path::Path;

use rusqlite::Connection;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{LedgerError, Result};
use crate::models::ParsedTransaction;

pub const DB_FILENAME: &str = "ledgerline.db";

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS imports (
    id INTEGER PRIMARY KEY,
    filename TEXT NOT NULL,
    import_date TEXT DEFAULT (datetime('now')),
    record_count INTEGER,
    skipped_count INTEGER,
    checksum TEXT
);

CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY,
    year_month TEXT NOT NULL,
    cost REAL NOT NULL,
    price_category TEXT NOT NULL,
    transaction_type TEXT NOT NULL,
    vendor TEXT NOT NULL,
    import_id INTEGER,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (import_id) REFERENCES imports(id)
);

CREATE INDEX IF NOT EXISTS idx_expenses_year_month ON expenses(year_month);
CREATE INDEX IF NOT EXISTS idx_expenses_vendor ON expenses(vendor);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

/// Open the database in `data_dir` without creating it.
pub fn open_existing(data_dir: &Path) -> Result<Connection> {
    let db_path = data_dir.join(DB_FILENAME);
    if !db_path.exists() {
        return Err(LedgerError::NoDatabase(db_path));
    }
    get_connection(&db_path)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Store one classified transaction and return its row id.
pub fn add_expense(
    conn: &Connection,
    txn: &ParsedTransaction,
    import_id: Option<i64>,
) -> Result<i64> {
    let cost = txn
        .amount
        .to_f64()
        .ok_or_else(|| LedgerError::Other(format!("Amount out of range: {}", txn.amount)))?;
    let mut stmt = conn.prepare_cached(
        "INSERT INTO expenses (year_month, cost, price_category, transaction_type, vendor, import_id) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    stmt.execute(rusqlite::params![
        txn.period,
        cost,
        txn.magnitude_class.as_str(),
        txn.direction.as_str(),
        txn.vendor,
        import_id,
    ])?;
    Ok(conn.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, MagnitudeClass};
    use rust_decimal::Decimal;

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
        for expected in &["expenses", "imports"] {
            assert!(tables.contains(&expected.to_string()), "missing table: {expected}");
        }
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        init_db(&conn).unwrap();
    }

    #[test]
    fn test_add_expense_assigns_ids() {
        let (_dir, conn) = test_db();
        let txn = ParsedTransaction {
            period: "2024-03".to_string(),
            amount: Decimal::new(1250, 2),
            direction: Direction::Debit,
            magnitude_class: MagnitudeClass::Medium,
            vendor: "SUBWAY".to_string(),
        };
        let first = add_expense(&conn, &txn, None).unwrap();
        let second = add_expense(&conn, &txn, None).unwrap();
        assert!(second > first);

        let (cost, class, kind): (f64, String, String) = conn
            .query_row(
                "SELECT cost, price_category, transaction_type FROM expenses WHERE id = ?1",
                [first],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(cost, 12.5);
        assert_eq!(class, "Medium");
        assert_eq!(kind, "Debit");
    }

    #[test]
    fn test_open_existing_does_not_create_database() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_existing(dir.path()).unwrap_err();
        assert!(matches!(err, LedgerError::NoDatabase(_)));
        assert!(err.to_string().contains("ledgerline init"));
        assert!(!dir.path().join(DB_FILENAME).exists());
    }

    #[test]
    fn test_open_existing_opens_initialized_database() {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join(DB_FILENAME)).unwrap();
        init_db(&conn).unwrap();
        drop(conn);
        assert!(open_existing(dir.path()).is_ok());
    }
}
