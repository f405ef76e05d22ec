//! Backend dialects.
//!
//! A dialect supplies the catalog-introspection statements for one flavour of
//! SQL backend. The rest of the layer only ever issues what a dialect hands it,
//! so adding a backend means adding a dialect with the same reply semantics:
//! `name`/`type`/`pk` columns for table info and `from`/`to`/`table` columns for
//! foreign keys.

use std::fmt;

/// Catalog statements and error classification for a SQL backend
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Short backend name used in logs and tool output
    fn name(&self) -> &'static str;

    /// Tables and views in the default schema
    fn list_tables_sql(&self, ordered: bool) -> String {
        let mut sql = "SELECT name FROM sqlite_master WHERE type='table' or type='view'".to_string();
        if ordered {
            sql.push_str(" ORDER BY name");
        }
        sql
    }

    /// Plain tables only, used for existence checks
    fn table_names_sql(&self) -> String {
        "SELECT name FROM sqlite_master WHERE type='table'".to_string()
    }

    /// Column catalog for a table, optionally in an attached schema
    fn table_info_sql(&self, schema: Option<&str>, table: &str) -> String {
        match schema {
            Some(schema) => format!("PRAGMA {}.table_info({})", schema, table),
            None => format!("PRAGMA table_info({})", table),
        }
    }

    /// Foreign key catalog for a table, optionally in an attached schema
    fn foreign_key_list_sql(&self, schema: Option<&str>, table: &str) -> String {
        match schema {
            Some(schema) => format!("PRAGMA {}.foreign_key_list({})", schema, table),
            None => format!("PRAGMA foreign_key_list({})", table),
        }
    }

    /// Index names on a table; takes the table name as its only parameter
    fn index_names_sql(&self) -> String {
        "SELECT name FROM sqlite_master WHERE type='index' AND tbl_name=? ORDER BY name".to_string()
    }

    /// One-row query reporting backend version information
    fn version_sql(&self) -> &'static str {
        "SELECT sqlite_version()"
    }

    /// Geometry column catalog query, parameterised on table name.
    ///
    /// Reply columns, in order: table, column, geometry type, srid, spatial index flag.
    /// `None` when the backend has no spatial metadata.
    fn geometry_columns_sql(&self) -> Option<String> {
        None
    }

    /// Whether a backend error message reports an index that already exists
    fn is_duplicate_index(&self, message: &str) -> bool {
        message.contains("index") && message.contains("already exists")
    }
}

/// Plain SQLite catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }
}

/// SQLite with the SpatiaLite metadata tables
#[derive(Debug, Clone, Copy, Default)]
pub struct SpatialiteDialect;

impl Dialect for SpatialiteDialect {
    fn name(&self) -> &'static str {
        "spatialite"
    }

    fn version_sql(&self) -> &'static str {
        "SELECT sqlite_version(), spatialite_version(), spatialite_target_cpu()"
    }

    fn geometry_columns_sql(&self) -> Option<String> {
        Some(
            "SELECT f_table_name, f_geometry_column, geometry_type, srid, spatial_index_enabled \
             FROM geometry_columns WHERE Lower(f_table_name) = Lower(?)"
                .to_string(),
        )
    }
}
