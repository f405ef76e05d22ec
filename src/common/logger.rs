// Logging Capability
//
// Components never log through a global directly; they receive a DbLogger when
// the connection handle is built. The default implementation forwards to the
// `log` facade so applications pick their own backend.

use log::Level;

/// Target used by the default logger
pub const LOG_TARGET: &str = "sqlcompat";

/// Logging capability injected into a connection handle
pub trait DbLogger: Send + Sync {
    /// Record a message at the given level
    fn log(&self, level: Level, message: &str);

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }
}

/// Forwards every message to the `log` crate
#[derive(Debug, Clone, Default)]
pub struct LogFacade;

impl DbLogger for LogFacade {
    fn log(&self, level: Level, message: &str) {
        log::log!(target: LOG_TARGET, level, "{}", message);
    }
}

/// Discards everything (useful for tools that print their own diagnostics)
#[derive(Debug, Clone, Default)]
pub struct SilentLogger;

impl DbLogger for SilentLogger {
    fn log(&self, _level: Level, _message: &str) {}
}
