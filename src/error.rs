use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid amount '{value}' in: {line}")]
    InvalidAmount { value: String, line: String },

    #[error("Database not found at {0}. Run `ledgerline init` to set up.")]
    NoDatabase(std::path::PathBuf),

    #[error("Line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<LedgerError>,
    },

    #[error("Unknown keyword group: {0}")]
    UnknownGroup(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
