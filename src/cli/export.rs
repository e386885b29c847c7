use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::db::open_existing;
use crate::error::Result;
use crate::reports::get_all_expenses;
use crate::settings::get_data_dir;

/// Write every stored expense to `dest` as CSV with a header row. Returns the row count.
pub fn write_expenses_csv(conn: &Connection, dest: &Path) -> Result<usize> {
    let expenses = get_all_expenses(conn)?;
    let mut wtr = csv::Writer::from_path(dest)?;
    for expense in &expenses {
        wtr.serialize(expense)?;
    }
    wtr.flush()?;
    Ok(expenses.len())
}

pub fn run(output: Option<String>) -> Result<()> {
    let data_dir = get_data_dir();
    let conn = open_existing(&data_dir)?;

    let dest = match output {
        Some(p) => PathBuf::from(p),
        None => {
            let exports_dir = data_dir.join("exports");
            std::fs::create_dir_all(&exports_dir)?;
            let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
            exports_dir.join(format!("expenses-{stamp}.csv"))
        }
    };

    let count = write_expenses_csv(&conn, &dest)?;
    println!("Exported {count} expenses to {}", dest.display());
    Ok(())
}
