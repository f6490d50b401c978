use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while loading an analysis domain or the state map.
///
/// None of these reach an HTTP caller: the loader logs them and degrades the
/// affected domain to its empty shape.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error in {table}: {source}")]
    Csv {
        table: String,
        #[source]
        source: csv::Error,
    },

    #[error("Row at line {line} of {table} has {found} fields, header has {expected}")]
    TooManyFields {
        table: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Missing column '{column}' in table {table}")]
    MissingColumn { table: String, column: String },

    #[error("Table {table} has no rows")]
    EmptyTable { table: String },

    #[error("No row in {table} where {column} = {value}")]
    RowNotFound {
        table: String,
        column: String,
        value: String,
    },

    #[error("Column '{column}' in table {table} is not numeric")]
    NotNumeric { table: String, column: String },

    #[error("Geometry error: {0}")]
    Geometry(String),
}

impl DataError {
    pub fn missing_column(table: &str, column: &str) -> Self {
        DataError::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    pub fn not_numeric(table: &str, column: &str) -> Self {
        DataError::NotNumeric {
            table: table.to_string(),
            column: column.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
