//! Catalog Introspection Module
//!
//! Reads the backend catalog: tables and views, columns, primary keys, foreign
//! keys and, for spatially-extended backends, geometry columns. All catalog SQL
//! comes from the connection's dialect and runs through the statement executor.

pub mod column;
pub mod ddl;
pub mod foreign_key;
pub mod geometry;
pub mod table;

pub use self::column::ColumnDescriptor;
pub use self::foreign_key::ForeignKeyDescriptor;
pub use self::geometry::GeometryColumnDescriptor;
pub use self::table::TableDescriptor;

use crate::common::error::{DbError, DbResult};
use crate::query::executor::StatementExecutor;
use crate::query::params::SqlParam;
use crate::query::result::{DataValue, QueryResult};

/// Split `schema.table` into its parts; unqualified names use the default schema.
///
/// Only the first two dot-separated segments count: `a.b.c` is table `b` in schema `a`.
pub fn split_qualified(table: &str) -> (Option<&str>, &str) {
    let mut parts = table.split('.');
    match (parts.next(), parts.next()) {
        (Some(schema), Some(name)) => (Some(schema), name),
        _ => (None, table),
    }
}

fn cell_text(value: &DataValue) -> Option<String> {
    if value.is_null() {
        None
    } else {
        Some(value.to_cell_text().into_owned())
    }
}

fn cell_i64(value: &DataValue) -> Option<i64> {
    match value {
        DataValue::Integer(i) => Some(*i),
        DataValue::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn reply_column(result: &QueryResult, sql: &str, name: &str) -> DbResult<usize> {
    result.column_index(name).ok_or_else(|| DbError::Sql {
        sql: sql.to_string(),
        message: format!("catalog reply has no '{}' column", name),
    })
}

/// Catalog queries over an open connection
#[derive(Clone, Copy)]
pub struct SchemaIntrospector<'conn> {
    exec: StatementExecutor<'conn>,
}

impl<'conn> SchemaIntrospector<'conn> {
    pub fn new(exec: StatementExecutor<'conn>) -> Self {
        SchemaIntrospector { exec }
    }

    fn first_column(&self, sql: &str) -> DbResult<Vec<String>> {
        let result = self.exec.execute_query(sql, 0)?;
        Ok(result
            .rows()
            .iter()
            .filter_map(|row| row.first().and_then(cell_text))
            .collect())
    }

    /// Names of tables and views, sorted by name when `ordered` is set
    pub fn list_tables(&self, ordered: bool) -> DbResult<Vec<String>> {
        self.first_column(&self.exec.dialect().list_tables_sql(ordered))
    }

    /// Whether a table with exactly this name exists (case-sensitive, views excluded)
    pub fn table_exists(&self, table: &str) -> DbResult<bool> {
        let names = self.first_column(&self.exec.dialect().table_names_sql())?;
        Ok(names.iter().any(|name| name == table))
    }

    /// Columns of `table` (or `schema.table`) in declaration order
    pub fn describe_columns(&self, table: &str) -> DbResult<Vec<ColumnDescriptor>> {
        let (schema, name) = split_qualified(table);
        let sql = self.exec.dialect().table_info_sql(schema, name);
        let result = self.exec.execute_query(&sql, 0)?;
        if result.row_count() == 0 {
            return Ok(Vec::new());
        }

        let name_idx = reply_column(&result, &sql, "name")?;
        let type_idx = reply_column(&result, &sql, "type")?;
        let pk_idx = result.column_index("pk");

        let columns = result
            .rows()
            .iter()
            .map(|row| {
                let rank = pk_idx
                    .and_then(|idx| cell_i64(&row[idx]))
                    .and_then(|rank| u32::try_from(rank).ok())
                    .unwrap_or(0);
                ColumnDescriptor::new(
                    cell_text(&row[name_idx]).unwrap_or_default(),
                    cell_text(&row[type_idx]).unwrap_or_default(),
                    rank,
                )
            })
            .collect();
        Ok(columns)
    }

    /// Foreign keys leaving `table` (or `schema.table`).
    ///
    /// Catalog rows missing the source column, target column or target table
    /// are skipped.
    pub fn describe_foreign_keys(&self, table: &str) -> DbResult<Vec<ForeignKeyDescriptor>> {
        let (schema, name) = split_qualified(table);
        let sql = self.exec.dialect().foreign_key_list_sql(schema, name);
        let result = self.exec.execute_query(&sql, 0)?;
        if result.row_count() == 0 {
            return Ok(Vec::new());
        }

        let from_idx = reply_column(&result, &sql, "from")?;
        let to_idx = reply_column(&result, &sql, "to")?;
        let table_idx = reply_column(&result, &sql, "table")?;

        let mut keys = Vec::new();
        for row in result.rows() {
            let (Some(from), Some(to), Some(table)) = (
                cell_text(&row[from_idx]),
                cell_text(&row[to_idx]),
                cell_text(&row[table_idx]),
            ) else {
                self.exec
                    .logger()
                    .debug(&format!("Skipping incomplete foreign key row on {}", name));
                continue;
            };
            keys.push(ForeignKeyDescriptor { from, to, table });
        }
        Ok(keys)
    }

    /// Geometry columns registered for `table`; empty on backends without spatial metadata
    pub fn describe_geometry_columns(&self, table: &str) -> DbResult<Vec<GeometryColumnDescriptor>> {
        let Some(sql) = self.exec.dialect().geometry_columns_sql() else {
            return Ok(Vec::new());
        };
        let result = self
            .exec
            .query_prepared(&sql, &[SqlParam::from(table)], 0)?;

        let geometries = result
            .rows()
            .iter()
            .filter_map(|row| {
                Some(GeometryColumnDescriptor {
                    table: cell_text(row.first()?)?,
                    column: cell_text(row.get(1)?)?,
                    geometry_type: row.get(2).and_then(cell_text).unwrap_or_default(),
                    srid: row.get(3).and_then(cell_i64).unwrap_or(-1),
                    spatial_index_enabled: row.get(4).and_then(cell_i64).is_some_and(|v| v != 0),
                })
            })
            .collect();
        Ok(geometries)
    }

    /// Assemble a full descriptor for `table`
    pub fn describe_table(&self, table: &str) -> DbResult<TableDescriptor> {
        Ok(TableDescriptor {
            name: table.to_string(),
            columns: self.describe_columns(table)?,
            foreign_keys: self.describe_foreign_keys(table)?,
            geometry_columns: self.describe_geometry_columns(table)?,
        })
    }

    /// Number of records in `table`, or -1 if the backend returned no count
    pub fn count(&self, table: &str) -> DbResult<i64> {
        let result = self
            .exec
            .execute_query(&format!("select count(*) from {}", table), 1)?;
        Ok(result
            .rows()
            .first()
            .and_then(|row| row.first())
            .and_then(DataValue::as_i64)
            .unwrap_or(-1))
    }

    /// Backend version information, e.g. `[sqlite_version]`
    pub fn backend_info(&self) -> DbResult<Vec<String>> {
        let result = self.exec.execute_query(self.exec.dialect().version_sql(), 1)?;
        Ok(result
            .rows()
            .first()
            .map(|row| row.iter().map(|v| v.to_cell_text().into_owned()).collect())
            .unwrap_or_default())
    }
}
