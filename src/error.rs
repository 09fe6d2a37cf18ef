use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No CSV input files found")]
    NoInput,

    /// The merged dataset lacks one or more required columns.
    #[error("Make sure the files contain the columns 'text' and 'diggCount' (missing: {})", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Top comment count {0} is out of range ({min}..={max})", min = crate::TOP_MIN, max = crate::TOP_MAX)]
    TopOutOfRange(usize),

    #[error("{}: line {line}: invalid diggCount {value:?}", .path.display())]
    InvalidDiggCount {
        path: PathBuf,
        line: u64,
        value: String,
    },

    #[error("{}: {message}", .path.display())]
    Encoding { path: PathBuf, message: String },

    #[error("{}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export failed: {0}")]
    Export(#[from] csv::Error),

    #[error("Chart rendering failed: {0}")]
    Chart(String),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}
