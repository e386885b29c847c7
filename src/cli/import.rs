use std::path::PathBuf;

use crate::db::{get_connection, init_db, DB_FILENAME};
use crate::error::Result;
use crate::importer::{import_file, InvalidRowPolicy};
use crate::settings::get_data_dir;

pub fn run(file: &str, skip_invalid: bool) -> Result<()> {
    let file_path = PathBuf::from(file);
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let conn = get_connection(&data_dir.join(DB_FILENAME))?;
    init_db(&conn)?;

    let policy = if skip_invalid {
        InvalidRowPolicy::Skip
    } else {
        InvalidRowPolicy::Abort
    };
    let result = import_file(&conn, &file_path, policy)?;

    if result.duplicate_file {
        println!("This file has already been imported (duplicate checksum).");
        return Ok(());
    }

    println!(
        "Added {} records to database ({} without amount skipped)",
        result.imported, result.skipped
    );
    if result.invalid > 0 {
        println!("{} invalid rows skipped", result.invalid);
    }
    Ok(())
}
