use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while reading the transactions table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("invalid column range '{0}', expected letters like B:R")]
    InvalidColumnRange(String),

    #[error("sheet '{sheet}' not found (available: {})", .available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error("missing column '{0}' in header row")]
    MissingColumn(&'static str),

    #[error("cell {cell} ({column}): expected {expected}, found '{found}'")]
    MalformedCell {
        cell: String,
        column: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("reading workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LoadResult<T> = Result<T, LoadError>;
