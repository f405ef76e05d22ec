//! Error types for the compatibility layer.
//!
//! Every fallible operation returns [`DbError`]. Duplicate-index conditions are
//! not errors: they are reported as an [`IntegrityWarning`] value and logged.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Errors raised by connection, statement, catalog and export operations
#[derive(Error, Debug)]
pub enum DbError {
    /// The backing store could not be opened, configured or released
    #[error("Connection error on {target}: {message}")]
    Connection { target: String, message: String },

    /// The backend rejected a statement, or it failed while being stepped
    #[error("SQL error in `{sql}`: {message}")]
    Sql { sql: String, message: String },

    /// A data operation was attempted on a closed handle
    #[error("Database connection is not open")]
    NotOpen,

    /// The export destination could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DbError {
    pub(crate) fn sql(sql: &str, err: rusqlite::Error) -> Self {
        DbError::Sql {
            sql: sql.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn connection(path: Option<&Path>, message: impl Into<String>) -> Self {
        DbError::Connection {
            target: describe_target(path),
            message: message.into(),
        }
    }

    /// The backend's message for a rejected statement, if this is one
    pub fn sql_message(&self) -> Option<&str> {
        match self {
            DbError::Sql { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Result type for all layer operations
pub type DbResult<T> = Result<T, DbError>;

/// A backend integrity complaint that is logged instead of raised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityWarning {
    pub message: String,
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

pub(crate) fn describe_target(path: Option<&Path>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => ":memory:".to_string(),
    }
}
