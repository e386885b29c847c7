use std::path::Path;

use rusqlite::Connection;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::classifier::{parse_row, RowOutcome};
use crate::db::add_expense;
use crate::error::{LedgerError, Result};

/// What to do with a line whose populated amount (or date) cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidRowPolicy {
    /// Stop and roll back the whole import.
    #[default]
    Abort,
    /// Log the line and keep going.
    Skip,
}

#[derive(Debug, Default)]
pub struct ImportResult {
    pub imported: usize,
    /// Lines without an amount in either column.
    pub skipped: usize,
    pub invalid: usize,
    pub duplicate_file: bool,
}

fn checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

pub fn import_file(conn: &Connection, file_path: &Path, policy: InvalidRowPolicy) -> Result<ImportResult> {
    let data = std::fs::read(file_path)?;
    let digest = checksum(&data);
    {
        let mut stmt = conn.prepare("SELECT 1 FROM imports WHERE checksum = ?1")?;
        if stmt.exists([&digest])? {
            info!(file = %file_path.display(), "file already imported");
            return Ok(ImportResult {
                duplicate_file: true,
                ..Default::default()
            });
        }
    }

    let content = String::from_utf8(data)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO imports (filename, checksum) VALUES (?1, ?2)",
        rusqlite::params![
            file_path.file_name().and_then(|n| n.to_str()).unwrap_or(""),
            digest,
        ],
    )?;
    let import_id = tx.last_insert_rowid();

    let mut result = ImportResult::default();
    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        match parse_row(line) {
            Ok(RowOutcome::Parsed(txn)) => {
                add_expense(&tx, &txn, Some(import_id))?;
                result.imported += 1;
            }
            Ok(RowOutcome::Skip) => {
                debug!(line = line_no, "no amount, skipping");
                result.skipped += 1;
            }
            Err(e) => match policy {
                InvalidRowPolicy::Abort => {
                    return Err(LedgerError::AtLine {
                        line: line_no,
                        source: Box::new(e),
                    });
                }
                InvalidRowPolicy::Skip => {
                    warn!(line = line_no, error = %e, "skipping invalid row");
                    result.invalid += 1;
                }
            },
        }
    }

    tx.execute(
        "UPDATE imports SET record_count = ?1, skipped_count = ?2 WHERE id = ?3",
        rusqlite::params![result.imported as i64, (result.skipped + result.invalid) as i64, import_id],
    )?;
    tx.commit()?;

    info!(
        file = %file_path.display(),
        imported = result.imported,
        skipped = result.skipped,
        invalid = result.invalid,
        "import finished"
    );
    Ok(result)
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

    fn write_statement(dir: &Path, name: &str, lines: &[&str]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut content = String::new();
        for line in lines {
            content.push_str(line);
            content.push('\n');
        }
        std::fs::write(&path, &content).unwrap();
        path
    }

    fn expense_count(conn: &Connection) -> i64 {
        conn.query_row("SELECT count(*) FROM expenses", [], |r| r.get(0)).unwrap()
    }

    #[test]
    fn test_import_file_inserts_and_skips() {
        let (dir, conn) = test_db();
        let path = write_statement(dir.path(), "stmt.csv", &[
            "2024-03-15,SUBWAY DOWNTOWN,12.50,,",
            "2024-03-16,Opening balance,,",
            "2024-03-17,PAYROLL Acme,,2000.00",
            "",
        ]);
        let result = import_file(&conn, &path, InvalidRowPolicy::Abort).unwrap();
        assert_eq!(result.imported, 2);
        assert_eq!(result.skipped, 2);
        assert_eq!(result.invalid, 0);
        assert!(!result.duplicate_file);
        assert_eq!(expense_count(&conn), 2);

        let (records, skipped): (i64, i64) = conn
            .query_row("SELECT record_count, skipped_count FROM imports", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(records, 2);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn test_import_file_detects_file_duplicate() {
        let (dir, conn) = test_db();
        let path = write_statement(dir.path(), "stmt.csv", &["2024-03-15,SUBWAY,12.50,,"]);
        let r1 = import_file(&conn, &path, InvalidRowPolicy::Abort).unwrap();
        assert_eq!(r1.imported, 1);
        let r2 = import_file(&conn, &path, InvalidRowPolicy::Abort).unwrap();
        assert!(r2.duplicate_file);
        assert_eq!(r2.imported, 0);
        assert_eq!(expense_count(&conn), 1);
    }

    #[test]
    fn test_invalid_row_aborts_and_rolls_back() {
        let (dir, conn) = test_db();
        let path = write_statement(dir.path(), "stmt.csv", &[
            "2024-03-15,SUBWAY,12.50,,",
            "2024-03-16,Sobeys,abc,,",
        ]);
        let err = import_file(&conn, &path, InvalidRowPolicy::Abort).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Line 2:"), "got: {msg}");
        assert!(msg.contains("abc"), "got: {msg}");
        assert_eq!(expense_count(&conn), 0);
        let imports: i64 = conn.query_row("SELECT count(*) FROM imports", [], |r| r.get(0)).unwrap();
        assert_eq!(imports, 0);
    }

    #[test]
    fn test_invalid_row_skip_policy() {
        let (dir, conn) = test_db();
        let path = write_statement(dir.path(), "stmt.csv", &[
            "Date,Description,Debit,Credit",
            "2024-03-15,SUBWAY,12.50,,",
        ]);
        let result = import_file(&conn, &path, InvalidRowPolicy::Skip).unwrap();
        assert_eq!(result.imported, 1);
        assert_eq!(result.invalid, 1);
        assert_eq!(expense_count(&conn), 1);
    }

    #[test]
    fn test_import_strips_byte_order_mark() {
        let (dir, conn) = test_db();
        let path = dir.path().join("bom.csv");
        std::fs::write(&path, "\u{feff}2024-01-05,Esso C123,40.00,\n").unwrap();
        let result = import_file(&conn, &path, InvalidRowPolicy::Abort).unwrap();
        assert_eq!(result.imported, 1);
        let (period, vendor): (String, String) = conn
            .query_row("SELECT year_month, vendor FROM expenses", [], |r| Ok((r.get(0)?, r.get(1)?)))
            .unwrap();
        assert_eq!(period, "2024-01");
        assert_eq!(vendor, "Esso");
    }
}
