// Shared error, logging and configuration types

pub mod config;
pub mod error;
pub mod logger;

pub use self::config::{ConnectionConfig, DialectKind};
pub use self::error::{DbError, DbResult, IntegrityWarning};
pub use self::logger::{DbLogger, LogFacade, SilentLogger};
