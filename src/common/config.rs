// Connection Configuration
//
// Settings applied when a ConnectionHandle opens its backing store.

use std::time::Duration;

use crate::connection::dialect::{Dialect, SpatialiteDialect, SqliteDialect};

/// Which flavour of SQL backend sits behind the handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialectKind {
    /// Plain SQLite catalog
    #[default]
    Sqlite,
    /// SQLite with the SpatiaLite geometry catalog
    Spatialite,
}

impl DialectKind {
    /// Build the dialect implementation for this kind
    pub fn dialect(&self) -> Box<dyn Dialect> {
        match self {
            DialectKind::Sqlite => Box::new(SqliteDialect),
            DialectKind::Spatialite => Box::new(SpatialiteDialect),
        }
    }
}

/// Configuration for a connection handle
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Backend dialect used for catalog introspection
    pub dialect: DialectKind,
    /// Autocommit state right after open
    pub autocommit: bool,
    /// Turn on foreign key enforcement after open
    pub enforce_foreign_keys: bool,
    /// How long to wait on a locked database before failing
    pub busy_timeout: Option<Duration>,
    /// Open an existing file without write access (ignored for in-memory)
    pub read_only: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionConfig {
            dialect: DialectKind::Sqlite,
            autocommit: true,
            enforce_foreign_keys: false,
            busy_timeout: None,
            read_only: false,
        }
    }
}

impl ConnectionConfig {
    /// Default configuration for the given dialect
    pub fn for_dialect(dialect: DialectKind) -> Self {
        ConnectionConfig {
            dialect,
            ..Default::default()
        }
    }
}
