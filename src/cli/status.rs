use crate::db::{get_connection, DB_FILENAME};
use crate::error::Result;
use crate::fmt::{format_bytes, money};
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join(DB_FILENAME);

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if !db_path.exists() {
        println!();
        println!("Database not found. Run `ledgerline init` to set up.");
        return Ok(());
    }

    let size = std::fs::metadata(&db_path)?.len();
    println!("DB size:    {}", format_bytes(size));

    let conn = get_connection(&db_path)?;
    let imports: i64 = conn.query_row("SELECT count(*) FROM imports", [], |r| r.get(0))?;
    let (count, debits, credits): (i64, f64, f64) = conn.query_row(
        "SELECT count(*), \
         COALESCE(SUM(CASE WHEN transaction_type = 'Debit' THEN cost END), 0.0), \
         COALESCE(SUM(CASE WHEN transaction_type = 'Credit' THEN cost END), 0.0) \
         FROM expenses",
        [],
        |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
    )?;
    let range: (Option<String>, Option<String>) = conn.query_row(
        "SELECT MIN(year_month), MAX(year_month) FROM expenses",
        [],
        |r| Ok((r.get(0)?, r.get(1)?)),
    )?;

    println!();
    println!("Imports:       {imports}");
    println!("Transactions:  {count}");
    println!("Debits:        {}", money(debits));
    println!("Credits:       {}", money(credits));
    if let (Some(first), Some(last)) = range {
        println!("Months:        {first} to {last}");
    }
    Ok(())
}
