// Index Management Module
//
// Builds single-column index statements with deterministic names and applies
// them idempotently.

use crate::common::error::{DbError, DbResult, IntegrityWarning};
use crate::query::executor::StatementExecutor;
use crate::query::params::SqlParam;

/// Result of an index creation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOutcome {
    /// The index was created
    Created,
    /// The backend already had an index by that name; nothing changed
    AlreadyExists(IntegrityWarning),
}

/// Creates and lists indexes over an open connection
#[derive(Clone, Copy)]
pub struct IndexManager<'conn> {
    exec: StatementExecutor<'conn>,
}

impl<'conn> IndexManager<'conn> {
    pub fn new(exec: StatementExecutor<'conn>) -> Self {
        IndexManager { exec }
    }

    /// Deterministic index name: `table__column_idx`
    pub fn index_name(table: &str, column: &str) -> String {
        format!("{}__{}_idx", table, column)
    }

    /// `CREATE [UNIQUE] INDEX table__column_idx ON table(column)`
    pub fn index_sql(table: &str, column: &str, unique: bool) -> String {
        let unique = if unique { "UNIQUE " } else { "" };
        format!(
            "CREATE {}INDEX {} ON {}({})",
            unique,
            Self::index_name(table, column),
            table,
            column
        )
    }

    /// Create a single-column index.
    ///
    /// An index that already exists is logged and reported as
    /// [`IndexOutcome::AlreadyExists`]; every other backend failure is returned.
    pub fn create_index(&self, table: &str, column: &str, unique: bool) -> DbResult<IndexOutcome> {
        let sql = Self::index_sql(table, column, unique);
        match self.exec.execute_raw(&sql) {
            Ok(_) => Ok(IndexOutcome::Created),
            Err(DbError::Sql { message, .. }) if self.exec.dialect().is_duplicate_index(&message) => {
                self.exec.logger().warn(&message);
                Ok(IndexOutcome::AlreadyExists(IntegrityWarning { message }))
            }
            Err(e) => Err(e),
        }
    }

    /// Names of all indexes on `table`, sorted
    pub fn list_indexes(&self, table: &str) -> DbResult<Vec<String>> {
        let sql = self.exec.dialect().index_names_sql();
        let result = self.exec.query_prepared(&sql, &[SqlParam::from(table)], 0)?;
        Ok(result
            .rows()
            .iter()
            .filter_map(|row| row.first().and_then(|v| v.as_str()).map(str::to_string))
            .collect())
    }
}
