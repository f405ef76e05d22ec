// Connection Module
//
// The connection handle and the backend dialects it can speak.

pub mod dialect;
pub mod handle;

pub use dialect::{Dialect, SpatialiteDialect, SqliteDialect};
pub use handle::ConnectionHandle;
