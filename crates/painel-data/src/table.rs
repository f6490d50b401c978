//! In-memory CSV tables.
//!
//! A [`Table`] keeps its rows as insertion-ordered JSON objects so they can be
//! served verbatim. Column types are inferred once at load time:
//!
//! | Non-missing cells | Missing cells | Column type |
//! |-------------------|---------------|-------------|
//! | all integers      | none          | integer     |
//! | all numbers       | any           | float, missing → `null` |
//! | anything else     | any           | string, missing → `null` |

use std::cmp::Ordering;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use painel_common::{DataError, Result};
use serde_json::{Map, Number, Value};
use tracing::debug;

/// One table row: column name → cell.
pub type Row = Map<String, Value>;

/// Cell spellings read as missing values.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Text,
}

fn infer_kind(cells: &[&str]) -> ColumnKind {
    let mut has_missing = false;
    let mut all_int = true;
    let mut all_num = true;
    for raw in cells {
        if is_missing(raw) {
            has_missing = true;
            continue;
        }
        if raw.parse::<i64>().is_err() {
            all_int = false;
            if raw.parse::<f64>().is_err() {
                all_num = false;
                break;
            }
        }
    }
    match (all_num, all_int && !has_missing) {
        (true, true) => ColumnKind::Integer,
        (true, false) => ColumnKind::Float,
        _ => ColumnKind::Text,
    }
}

fn to_cell(raw: &str, kind: ColumnKind) -> Value {
    if is_missing(raw) {
        return Value::Null;
    }
    match kind {
        ColumnKind::Integer => raw.parse::<i64>().map(Value::from).unwrap_or(Value::Null),
        ColumnKind::Float => raw
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ColumnKind::Text => Value::String(raw.to_string()),
    }
}

/// A named, ordered sequence of rows read from one CSV file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Read a CSV file; the table is named after the file stem.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        debug!("Loading table {} from {:?}", name, path);

        let file = File::open(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(&name, file)
    }

    /// Read CSV content with a header row. Short rows are padded with
    /// missing cells; a row longer than the header is an error.
    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Self> {
        let csv_err = |source| DataError::Csv {
            table: name.to_string(),
            source,
        };
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let columns: Vec<String> = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let records = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(csv_err)?;
        if let Some(long) = records.iter().find(|r| r.len() > columns.len()) {
            return Err(DataError::TooManyFields {
                table: name.to_string(),
                line: long.position().map_or(0, |p| p.line()),
                expected: columns.len(),
                found: long.len(),
            });
        }

        let kinds: Vec<ColumnKind> = (0..columns.len())
            .map(|col| {
                let cells: Vec<&str> = records.iter().map(|r| r.get(col).unwrap_or("")).collect();
                infer_kind(&cells)
            })
            .collect();

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .zip(&kinds)
                    .enumerate()
                    .map(|(col, (name, kind))| (name.clone(), to_cell(record.get(col).unwrap_or(""), *kind)))
                    .collect::<Row>()
            })
            .collect();

        Ok(Self {
            name: name.to_string(),
            columns,
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fail with `MissingColumn` unless every listed column is present.
    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        match columns.iter().find(|c| !self.columns.iter().any(|own| own == *c)) {
            Some(missing) => Err(DataError::missing_column(&self.name, missing)),
            None => Ok(()),
        }
    }

    /// Numeric view of a column; `None` for missing cells.
    pub fn column_f64(&self, column: &str) -> Result<Vec<Option<f64>>> {
        self.require_columns(&[column])?;
        self.rows
            .iter()
            .map(|row| self.row_ref(row).f64(column))
            .collect()
    }

    /// Sum of a numeric column, skipping missing cells. An empty column sums to 0.
    pub fn sum(&self, column: &str) -> Result<f64> {
        Ok(self.column_f64(column)?.into_iter().flatten().sum())
    }

    pub fn row(&self, idx: usize) -> Option<RowRef<'_>> {
        self.rows.get(idx).map(|row| self.row_ref(row))
    }

    pub fn first_row(&self) -> Result<RowRef<'_>> {
        self.row(0).ok_or_else(|| self.empty_error())
    }

    pub fn last_row(&self) -> Result<RowRef<'_>> {
        self.rows
            .last()
            .map(|row| self.row_ref(row))
            .ok_or_else(|| self.empty_error())
    }

    /// First row whose `column` equals `value`. Numbers compare by value, so
    /// `5` matches both `5` and `5.0`.
    pub fn find_row(&self, column: &str, value: impl Into<Value>) -> Result<RowRef<'_>> {
        self.require_columns(&[column])?;
        let needle = value.into();
        self.rows
            .iter()
            .find(|row| row.get(column).is_some_and(|cell| cells_equal(cell, &needle)))
            .map(|row| self.row_ref(row))
            .ok_or_else(|| DataError::RowNotFound {
                table: self.name.clone(),
                column: column.to_string(),
                value: match &needle {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                },
            })
    }

    /// Copy of the table ordered by a numeric column, largest first. The sort
    /// is stable and missing cells go last.
    pub fn sorted_desc_by(&self, column: &str) -> Result<Table> {
        let keys = self.column_f64(column)?;
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        order.sort_by(|&a, &b| match (keys[a], keys[b]) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        Ok(Table {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows: order.into_iter().map(|i| self.rows[i].clone()).collect(),
        })
    }

    fn row_ref<'a>(&'a self, row: &'a Row) -> RowRef<'a> {
        RowRef { table: &self.name, row }
    }

    fn empty_error(&self) -> DataError {
        DataError::EmptyTable {
            table: self.name.clone(),
        }
    }
}

fn cells_equal(cell: &Value, needle: &Value) -> bool {
    match (cell.as_f64(), needle.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => cell == needle,
    }
}

/// A borrowed row that knows its table, for error reporting.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    table: &'a str,
    row: &'a Row,
}

impl<'a> RowRef<'a> {
    pub fn get(&self, column: &str) -> Result<&'a Value> {
        self.row
            .get(column)
            .ok_or_else(|| DataError::missing_column(self.table, column))
    }

    /// Numeric cell; `None` when missing, error when the cell holds text.
    pub fn f64(&self, column: &str) -> Result<Option<f64>> {
        match self.get(column)? {
            Value::Null => Ok(None),
            Value::Number(n) => Ok(n.as_f64()),
            _ => Err(DataError::not_numeric(self.table, column)),
        }
    }

    /// Cell rendered for display; missing cells render as `N/A`.
    pub fn text(&self, column: &str) -> Result<String> {
        Ok(match self.get(column)? {
            Value::Null => painel_common::NA.to_string(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Raw string cell, `None` when missing or numeric.
    pub fn str(&self, column: &str) -> Result<Option<&'a str>> {
        Ok(self.get(column)?.as_str())
    }
}
