// Statement Executor
//
// Every statement the layer issues goes through here. Prepared statements live
// in a StatementScope and result iteration happens through a Cursor borrowed
// from that scope, so the cursor is always gone before the statement, and
// both are released on every way out of an operation.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use rusqlite::{Connection, Rows, Statement};

use crate::catalog::ddl;
use crate::common::error::{DbError, DbResult};
use crate::common::logger::DbLogger;
use crate::connection::dialect::Dialect;
use crate::query::materializer;
use crate::query::params::{self, SqlParam};
use crate::query::result::{DataValue, QueryResult};

/// What a statement produced when run through [`StatementExecutor::execute`]
#[derive(Debug, Clone, PartialEq)]
pub enum StatementOutcome {
    /// The statement returned rows
    Rows(QueryResult),
    /// The statement changed this many rows
    Updated(usize),
}

fn total_changes(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT total_changes()", [], |row| row.get(0))
}

/// A prepared statement that is released when the scope ends
pub struct StatementScope<'conn> {
    conn: &'conn Connection,
    stmt: Statement<'conn>,
    sql: String,
    logger: &'conn dyn DbLogger,
}

impl<'conn> StatementScope<'conn> {
    fn prepare(conn: &'conn Connection, sql: &str, logger: &'conn dyn DbLogger) -> DbResult<Self> {
        logger.debug(&format!("Preparing: {}", sql));
        let stmt = conn.prepare(sql).map_err(|e| DbError::sql(sql, e))?;
        Ok(StatementScope {
            conn,
            stmt,
            sql: sql.to_string(),
            logger,
        })
    }

    /// The statement text
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Number of result columns; zero for statements that return no rows
    pub fn column_count(&self) -> usize {
        self.stmt.column_count()
    }

    fn bind(&mut self, values: &[SqlParam]) -> DbResult<()> {
        params::bind(&mut self.stmt, values).map_err(|e| DbError::sql(&self.sql, e))
    }

    // sqlite3_changes() keeps the count of the last DML statement, so a step
    // that left the running total untouched changed nothing.
    fn execute(&mut self) -> DbResult<usize> {
        let before = total_changes(self.conn).map_err(|e| DbError::sql(&self.sql, e))?;
        let changed = self.stmt.raw_execute().map_err(|e| DbError::sql(&self.sql, e))?;
        let after = total_changes(self.conn).map_err(|e| DbError::sql(&self.sql, e))?;
        Ok(if after == before { 0 } else { changed })
    }

    /// Start stepping the statement. Column metadata is captured once, up front.
    pub fn cursor(&mut self) -> Cursor<'_> {
        let (names, types) = {
            let columns = self.stmt.columns();
            let names = columns.iter().map(|c| c.name().to_string()).collect();
            let types = columns
                .iter()
                .map(|c| c.decl_type().unwrap_or_default().to_string())
                .collect();
            (names, types)
        };

        Cursor {
            rows: self.stmt.raw_query(),
            names,
            types,
            sql: &self.sql,
        }
    }
}

impl Drop for StatementScope<'_> {
    fn drop(&mut self) {
        self.logger.debug(&format!("Released statement: {}", self.sql));
    }
}

/// Forward-only iterator over the pending rows of a statement
pub struct Cursor<'stmt> {
    rows: Rows<'stmt>,
    names: Vec<String>,
    types: Vec<String>,
    sql: &'stmt str,
}

impl Cursor<'_> {
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn column_types(&self) -> &[String] {
        &self.types
    }

    pub fn column_count(&self) -> usize {
        self.names.len()
    }

    /// Advance to the next row, returning its cells
    pub fn next_row(&mut self) -> DbResult<Option<Vec<DataValue>>> {
        let sql = self.sql;
        let count = self.names.len();
        let row = match self.rows.next().map_err(|e| DbError::sql(sql, e))? {
            Some(row) => row,
            None => return Ok(None),
        };

        let mut values = Vec::with_capacity(count);
        for idx in 0..count {
            let value = row.get_ref(idx).map_err(|e| DbError::sql(sql, e))?;
            values.push(DataValue::from(value));
        }
        Ok(Some(values))
    }
}

/// Issues SQL against an open connection
#[derive(Clone, Copy)]
pub struct StatementExecutor<'conn> {
    conn: &'conn Connection,
    dialect: &'conn dyn Dialect,
    logger: &'conn dyn DbLogger,
}

impl<'conn> StatementExecutor<'conn> {
    pub(crate) fn new(
        conn: &'conn Connection,
        dialect: &'conn dyn Dialect,
        logger: &'conn dyn DbLogger,
    ) -> Self {
        StatementExecutor { conn, dialect, logger }
    }

    pub(crate) fn dialect(&self) -> &'conn dyn Dialect {
        self.dialect
    }

    pub(crate) fn logger(&self) -> &'conn dyn DbLogger {
        self.logger
    }

    /// Whether an explicit transaction is currently open on the connection
    pub fn in_transaction(&self) -> bool {
        !self.conn.is_autocommit()
    }

    /// Prepare `sql` inside a release scope
    pub fn prepare(&self, sql: &str) -> DbResult<StatementScope<'conn>> {
        StatementScope::prepare(self.conn, sql, self.logger)
    }

    /// Run a single statement and return the number of rows it changed
    pub fn execute_raw(&self, sql: &str) -> DbResult<usize> {
        self.execute_prepared(sql, &[])
    }

    /// Run a single statement with bound parameters
    pub fn execute_prepared(&self, sql: &str, values: &[SqlParam]) -> DbResult<usize> {
        let mut scope = self.prepare(sql)?;
        scope.bind(values)?;
        scope.execute()
    }

    /// Run a batch of semicolon-separated statements
    pub fn execute_script(&self, sql: &str) -> DbResult<()> {
        self.logger.debug(&format!("Executing script: {}", sql));
        self.conn.execute_batch(sql).map_err(|e| DbError::sql(sql, e))
    }

    /// Run a query and materialise at most `limit` rows (`limit < 1` means all)
    pub fn execute_query(&self, sql: &str, limit: i64) -> DbResult<QueryResult> {
        self.query_prepared(sql, &[], limit)
    }

    /// Run a query with bound parameters and materialise at most `limit` rows
    pub fn query_prepared(&self, sql: &str, values: &[SqlParam], limit: i64) -> DbResult<QueryResult> {
        self.with_cursor(sql, values, |cursor| materializer::to_query_result(cursor, limit))
    }

    /// Run `f` over a cursor for `sql`. Statement and cursor are released when
    /// this returns, whether `f` finished, stopped early or failed.
    pub fn with_cursor<T, F>(&self, sql: &str, values: &[SqlParam], f: F) -> DbResult<T>
    where
        F: FnOnce(&mut Cursor<'_>) -> DbResult<T>,
    {
        let mut scope = self.prepare(sql)?;
        scope.bind(values)?;
        let mut cursor = scope.cursor();
        f(&mut cursor)
    }

    /// Run any statement, returning rows if it produces a result set
    pub fn execute(&self, sql: &str, limit: i64) -> DbResult<StatementOutcome> {
        let mut scope = self.prepare(sql)?;
        if scope.column_count() == 0 {
            return scope.execute().map(StatementOutcome::Updated);
        }
        let mut cursor = scope.cursor();
        materializer::to_query_result(&mut cursor, limit).map(StatementOutcome::Rows)
    }

    /// Stream the result of `sql` into a delimited text file; returns the data rows written
    pub fn export_csv(
        &self,
        sql: &str,
        destination: &Path,
        header: bool,
        separator: Option<&str>,
    ) -> DbResult<u64> {
        let file = File::create(destination)?;
        let written = self.with_cursor(sql, &[], |cursor| {
            materializer::to_csv(cursor, BufWriter::new(file), header, separator)
        })?;
        self.logger.info(&format!("Exported {} rows to {}", written, destination.display()));
        Ok(written)
    }

    /// Create a table from column definitions such as `id INTEGER PRIMARY KEY`
    pub fn create_table(&self, table: &str, fields: &[&str]) -> DbResult<()> {
        self.execute_raw(&ddl::create_table_sql(table, fields)).map(|_| ())
    }
}
