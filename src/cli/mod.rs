pub mod export;
pub mod import;
pub mod init;
pub mod report;
pub mod status;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ledgerline", about = "Import bank-statement CSVs and report on your spending.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and initialize the database.
    Init {
        /// Path for ledgerline data (default: ~/Documents/ledgerline)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Import a statement CSV (date,description,debit,credit).
    Import {
        /// Path to the statement file
        file: String,
        /// Skip rows with an unparseable amount instead of aborting
        #[arg(long = "skip-invalid")]
        skip_invalid: bool,
    },
    /// Spending reports.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Export all stored expenses to CSV.
    Export {
        /// Output path (default: <data_dir>/exports/expenses-YYYYMMDD-HHMMSS.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// Show the current database and summary statistics.
    Status,
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Largest purchases.
    Top {
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Purchases per month.
    Monthly {
        /// Year filter: YYYY
        #[arg(long)]
        year: Option<i32>,
    },
    /// Purchases per year.
    Yearly,
    /// Purchases per vendor, most frequent first.
    Vendors {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Debit and credit totals.
    Types,
    /// Purchases per size class (Small..Massive).
    Sizes,
    /// Every stored transaction.
    All,
    /// Years with data.
    Years,
    /// Monthly purchases for a keyword group from settings (e.g. food).
    Group {
        name: String,
    },
}
