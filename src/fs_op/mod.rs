//! Synchronous file-system operations behind a single `FileOps` facade.
//!
//! Each operation is one direct call into `std::fs` (or `fs_extra` /
//! `walkdir` for copies and traversals) wrapped with optional logging.
//! Operations come in two flavours:
//!
//! - strict ones return `Result<_, FsOpError>` and propagate every failure;
//! - `try_*` and `*_safe` ones swallow failures, log them, and return a
//!   `bool` or whatever was collected.
//!
//! Every operation takes a trailing `log: bool`; pass `false` on hot paths to
//! skip logging entirely.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::Level;

use crate::settings::Settings;

pub mod attributes;
pub mod copy;
pub mod descriptor;
pub mod dirs;
pub mod error;
pub mod log;
pub(crate) mod metadata;
pub mod mv;
pub mod read;
pub mod remove;
pub mod stat;
pub mod walk;
pub mod write;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use descriptor::{FileAttributes, FileDescriptor};
pub use dirs::{DirectoryHelper, StdDirectoryHelper};
pub use error::FsOpError;
pub use log::{NoopLog, OpLog, TracingLog};
pub use stat::PathType;

/// Stateless file-system facade.
///
/// The collaborators are fixed at construction; nothing is mutated between
/// calls, so one instance can be shared freely across threads.
pub struct FileOps {
    log: Arc<dyn OpLog>,
    dirs: Arc<dyn DirectoryHelper>,
    settings: Settings,
}

impl FileOps {
    pub fn new(log: Arc<dyn OpLog>, dirs: Arc<dyn DirectoryHelper>) -> Self {
        Self {
            log,
            dirs,
            settings: Settings::default(),
        }
    }

    /// Replace the default settings (delete parallelism, etc.).
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn emit(
        &self,
        log: bool,
        level: Level,
        op: &'static str,
        path: &Path,
        message: impl fmt::Display,
    ) {
        if log {
            self.log.event(level, op, path, &message.to_string());
        }
    }

    fn debug(&self, log: bool, op: &'static str, path: &Path, message: impl fmt::Display) {
        self.emit(log, Level::DEBUG, op, path, message);
    }

    fn info(&self, log: bool, op: &'static str, path: &Path, message: impl fmt::Display) {
        self.emit(log, Level::INFO, op, path, message);
    }

    fn warn(&self, log: bool, op: &'static str, path: &Path, message: impl fmt::Display) {
        self.emit(log, Level::WARN, op, path, message);
    }

    fn failed(&self, log: bool, op: &'static str, path: &Path, error: &FsOpError) {
        if log {
            self.log.failure(op, path, error);
        }
    }

    /// Turn a strict result into the best-effort `bool` the `try_*`
    /// operations return. The error only ever reaches the log.
    fn best_effort<T>(
        &self,
        log: bool,
        op: &'static str,
        path: &Path,
        result: Result<T, FsOpError>,
    ) -> bool {
        match result {
            Ok(_) => true,
            Err(e) => {
                self.failed(log, op, path, &e);
                false
            }
        }
    }
}

impl Default for FileOps {
    /// `tracing`-backed logging and `create_dir_all` for directory creation.
    fn default() -> Self {
        Self::new(Arc::new(TracingLog), Arc::new(StdDirectoryHelper))
    }
}

impl fmt::Debug for FileOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileOps")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
