// Query Result Implementation
//
// Cell values and the immutable in-memory snapshot returned by the query path.

use std::borrow::Cow;
use std::fmt;

use rusqlite::types::ValueRef;
use serde::Serialize;

/// A single result cell as reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl DataValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DataValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Real values, and integers widened to f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Real(f) => Some(*f),
            DataValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Real values narrowed back to single precision
    pub fn as_f32(&self) -> Option<f32> {
        self.as_f64().map(|f| f as f32)
    }

    /// Booleans are stored as integers: zero is false, anything else true
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DataValue::Integer(i) => Some(*i != 0),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            DataValue::Blob(b) => Some(b),
            _ => None,
        }
    }

    /// Text used for delimited export: NULL becomes an empty string, blobs become hex
    pub fn to_cell_text(&self) -> Cow<'_, str> {
        match self {
            DataValue::Null => Cow::Borrowed(""),
            DataValue::Integer(i) => Cow::Owned(i.to_string()),
            DataValue::Real(f) => Cow::Owned(format!("{:?}", f)),
            DataValue::Text(s) => Cow::Borrowed(s),
            DataValue::Blob(b) => Cow::Owned(hex::encode(b)),
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Null => write!(f, "NULL"),
            other => write!(f, "{}", other.to_cell_text()),
        }
    }
}

impl From<ValueRef<'_>> for DataValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => DataValue::Null,
            ValueRef::Integer(i) => DataValue::Integer(i),
            ValueRef::Real(f) => DataValue::Real(f),
            ValueRef::Text(t) => DataValue::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => DataValue::Blob(b.to_vec()),
        }
    }
}

/// Snapshot of a query: column names, backend type names and rows.
///
/// `names`, `types` and every row always have the same length. Nothing in the
/// snapshot refers back to the statement that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    names: Vec<String>,
    types: Vec<String>,
    rows: Vec<Vec<DataValue>>,
}

impl QueryResult {
    pub(crate) fn new(names: Vec<String>, types: Vec<String>) -> Self {
        debug_assert_eq!(names.len(), types.len());
        QueryResult {
            names,
            types,
            rows: Vec::new(),
        }
    }

    pub(crate) fn push_row(&mut self, row: Vec<DataValue>) {
        debug_assert_eq!(row.len(), self.names.len());
        self.rows.push(row);
    }

    /// Column names in select order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Backend type names, parallel to `names`
    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn rows(&self) -> &[Vec<DataValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.names.len()
    }

    /// Position of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Cell at `row` in the column called `column`
    pub fn get(&self, row: usize, column: &str) -> Option<&DataValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    pub fn into_rows(self) -> Vec<Vec<DataValue>> {
        self.rows
    }

    /// Format as an aligned text table
    pub fn to_string_table(&self) -> String {
        if self.names.is_empty() {
            return "Empty result".to_string();
        }

        let mut widths: Vec<usize> = self.names.iter().map(|n| n.len().max(3)).collect();
        for row in &self.rows {
            for (i, value) in row.iter().enumerate() {
                widths[i] = widths[i].max(value.to_string().len());
            }
        }

        let mut out = String::new();
        out.push('|');
        for (name, width) in self.names.iter().zip(&widths) {
            out.push_str(&format!(" {:<width$} |", name, width = width));
        }
        out.push('\n');

        out.push('+');
        for width in &widths {
            out.push_str(&format!("{:-<width$}+", "", width = width + 2));
        }
        out.push('\n');

        for row in &self.rows {
            out.push('|');
            for (value, width) in row.iter().zip(&widths) {
                out.push_str(&format!(" {:<width$} |", value.to_string(), width = width));
            }
            out.push('\n');
        }

        out.push_str(&format!("({} rows)", self.rows.len()));
        out
    }
}
