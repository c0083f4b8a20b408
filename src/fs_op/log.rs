//! Logging capability injected into `FileOps`.
//!
//! The operations never reach for a global logger; they report through the
//! `OpLog` handed to them at construction. `TracingLog` is the default and
//! forwards everything to `tracing` with `op` and `path` fields so a
//! subscriber (see `crate::logging`) can filter and format it.

use std::error::Error;
use std::path::Path;

use tracing::Level;

/// Sink for the leveled per-operation events emitted by `FileOps`.
pub trait OpLog: Send + Sync {
    /// A plain event: operation start/finish, bulk start, self-move notices.
    fn event(&self, level: Level, op: &'static str, path: &Path, message: &str);

    /// A failure that was caught and will not reach the caller as an error.
    fn failure(&self, op: &'static str, path: &Path, error: &(dyn Error + 'static));
}

/// Forwards events to the `tracing` macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl OpLog for TracingLog {
    fn event(&self, level: Level, op: &'static str, path: &Path, message: &str) {
        let path = path.display();
        match level {
            Level::ERROR => tracing::error!(op, path = %path, "{message}"),
            Level::WARN => tracing::warn!(op, path = %path, "{message}"),
            Level::INFO => tracing::info!(op, path = %path, "{message}"),
            Level::DEBUG => tracing::debug!(op, path = %path, "{message}"),
            _ => tracing::trace!(op, path = %path, "{message}"),
        }
    }

    fn failure(&self, op: &'static str, path: &Path, error: &(dyn Error + 'static)) {
        tracing::error!(op, path = %path.display(), error = %error, "operation failed");
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLog;

impl OpLog for NoopLog {
    fn event(&self, _level: Level, _op: &'static str, _path: &Path, _message: &str) {}

    fn failure(&self, _op: &'static str, _path: &Path, _error: &(dyn Error + 'static)) {}
}
