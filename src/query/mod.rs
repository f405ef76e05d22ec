// Query Processing Module
//
// Statement execution, parameter binding and result materialization.

pub mod executor;
pub mod materializer;
pub mod params;
pub mod result;
pub mod sql_text;
pub mod templates;

pub use executor::{Cursor, StatementExecutor, StatementOutcome, StatementScope};
pub use params::SqlParam;
pub use result::{DataValue, QueryResult};
