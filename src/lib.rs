// SQL Compatibility Layer
//
// Open a database, introspect its catalog, run SQL with typed parameters,
// materialize or stream results and manage indexes, independently of which
// SQLite-family backend is behind the connection.

pub mod catalog;
pub mod common;
pub mod connection;
pub mod index;
pub mod query;

// Re-export key items for convenient access
pub use catalog::{ColumnDescriptor, ForeignKeyDescriptor, SchemaIntrospector, TableDescriptor};
pub use common::{ConnectionConfig, DbError, DbLogger, DbResult, DialectKind, IntegrityWarning};
pub use connection::ConnectionHandle;
pub use index::{IndexManager, IndexOutcome};
pub use query::{DataValue, QueryResult, SqlParam, StatementExecutor, StatementOutcome};
