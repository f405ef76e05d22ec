// Connection Handle
//
// Owns one live backend connection together with its autocommit state.
// Closed -> Open via `open`, Open -> Closed via `close`; nothing else.
// Components borrow the handle, so it cannot be closed while one is in use.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::{Connection, OpenFlags};

use crate::catalog::SchemaIntrospector;
use crate::common::config::ConnectionConfig;
use crate::common::error::{DbError, DbResult, describe_target};
use crate::common::logger::{DbLogger, LogFacade};
use crate::connection::dialect::Dialect;
use crate::index::IndexManager;
use crate::query::executor::StatementExecutor;

/// A single database connection and its transaction mode
pub struct ConnectionHandle {
    config: ConnectionConfig,
    dialect: Box<dyn Dialect>,
    logger: Arc<dyn DbLogger>,
    path: Option<PathBuf>,
    conn: Option<Connection>,
    autocommit: bool,
}

impl ConnectionHandle {
    /// Create a closed handle
    pub fn new(config: ConnectionConfig) -> Self {
        let dialect = config.dialect.dialect();
        ConnectionHandle {
            config,
            dialect,
            logger: Arc::new(LogFacade),
            path: None,
            conn: None,
            autocommit: true,
        }
    }

    /// Replace the logging capability
    pub fn with_logger(mut self, logger: Arc<dyn DbLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Replace the backend dialect chosen by the configuration
    pub fn with_dialect(mut self, dialect: Box<dyn Dialect>) -> Self {
        self.dialect = dialect;
        self
    }

    /// Open the backing store, or a transient in-memory database when `path` is `None`.
    ///
    /// Returns `true` if the database file already existed. Genuine failures are
    /// reported through the error channel, never through the flag.
    pub fn open(&mut self, path: Option<&Path>) -> DbResult<bool> {
        if self.conn.is_some() {
            return Err(DbError::connection(
                self.path.as_deref(),
                "handle is already open",
            ));
        }

        let existed = path.is_some_and(|p| p.exists());
        let conn = match path {
            Some(p) => Connection::open_with_flags(p, self.open_flags()),
            None => Connection::open_in_memory(),
        }
        .map_err(|e| DbError::connection(path, e.to_string()))?;

        if let Err(e) = self.configure(&conn) {
            // Release before reporting; the connection never became ours.
            drop(conn);
            return Err(DbError::connection(path, e.to_string()));
        }

        self.conn = Some(conn);
        self.path = path.map(Path::to_path_buf);
        self.autocommit = true;
        self.logger.info(&format!(
            "Opened {} database {} (existed: {})",
            self.dialect.name(),
            describe_target(path),
            existed
        ));

        if !self.config.autocommit {
            if let Err(e) = self.set_autocommit(false) {
                let _ = self.close();
                return Err(e);
            }
        }

        Ok(existed)
    }

    fn open_flags(&self) -> OpenFlags {
        if self.config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX | OpenFlags::SQLITE_OPEN_URI
        } else {
            OpenFlags::default()
        }
    }

    fn configure(&self, conn: &Connection) -> rusqlite::Result<()> {
        if let Some(timeout) = self.config.busy_timeout {
            conn.busy_timeout(timeout)?;
        }
        if self.config.enforce_foreign_keys {
            conn.execute_batch("PRAGMA foreign_keys = ON")?;
        }
        Ok(())
    }

    /// Whether the handle currently holds a live connection
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Path the handle was last opened with; `None` for in-memory databases
    pub fn database_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current autocommit mode
    pub fn autocommit(&self) -> bool {
        self.autocommit
    }

    /// Name of the backend dialect
    pub fn dialect_name(&self) -> &'static str {
        self.dialect.name()
    }

    /// Toggle autocommit. Asking for the current state does nothing.
    pub fn set_autocommit(&mut self, enable: bool) -> DbResult<()> {
        if enable == self.autocommit {
            return Ok(());
        }
        let exec = self.executor()?;
        if enable {
            if exec.in_transaction() {
                exec.execute_script("COMMIT")?;
            }
        } else if !exec.in_transaction() {
            exec.execute_script("BEGIN")?;
        }
        self.autocommit = enable;
        Ok(())
    }

    /// Commit the open transaction and start the next one.
    ///
    /// In autocommit mode every statement has already been committed, so this
    /// only logs.
    pub fn commit(&mut self) -> DbResult<()> {
        self.commit_inner(true)
    }

    fn commit_inner(&mut self, begin_next: bool) -> DbResult<()> {
        let exec = self.executor()?;
        if self.autocommit {
            self.logger.debug("Commit requested in autocommit mode; nothing to do");
            return Ok(());
        }
        if exec.in_transaction() {
            exec.execute_script("COMMIT")?;
        }
        if begin_next {
            exec.execute_script("BEGIN")?;
        }
        Ok(())
    }

    /// Disable autocommit, commit, and release the connection.
    ///
    /// Each step runs even if an earlier one failed; the first failure is
    /// returned once the connection has been released. Closing a closed
    /// handle is a no-op.
    pub fn close(&mut self) -> DbResult<()> {
        if self.conn.is_none() {
            return Ok(());
        }

        let mut first_error = None;
        if let Err(e) = self.set_autocommit(false) {
            self.logger.warn(&format!("Could not disable autocommit on close: {}", e));
            first_error.get_or_insert(e);
        }
        if let Err(e) = self.commit_inner(false) {
            self.logger.warn(&format!("Could not commit on close: {}", e));
            first_error.get_or_insert(e);
        }

        if let Some(conn) = self.conn.take() {
            if let Err((conn, e)) = conn.close() {
                self.logger.warn(&format!("Backend refused to close cleanly: {}", e));
                // Dropping finalizes whatever is left.
                drop(conn);
                first_error.get_or_insert(DbError::connection(self.path.as_deref(), e.to_string()));
            }
        }
        self.autocommit = true;
        self.logger.info(&format!(
            "Closed database {}",
            describe_target(self.path.as_deref())
        ));

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Raw statement execution against this connection
    pub fn executor(&self) -> DbResult<StatementExecutor<'_>> {
        let conn = self.conn.as_ref().ok_or(DbError::NotOpen)?;
        Ok(StatementExecutor::new(conn, self.dialect.as_ref(), self.logger.as_ref()))
    }

    /// Catalog queries against this connection
    pub fn introspector(&self) -> DbResult<SchemaIntrospector<'_>> {
        Ok(SchemaIntrospector::new(self.executor()?))
    }

    /// Index creation against this connection
    pub fn index_manager(&self) -> DbResult<IndexManager<'_>> {
        Ok(IndexManager::new(self.executor()?))
    }
}

impl Drop for ConnectionHandle {
    fn drop(&mut self) {
        if self.conn.is_some() {
            if let Err(e) = self.close() {
                self.logger.warn(&format!("Error while closing dropped handle: {}", e));
            }
        }
    }
}
