//! Test-only scaffolding: a log sink that records what it receives and a
//! per-thread hook that makes `move_file` take its cross-device path.
//!
//! Compiled for unit tests and behind the non-default `test-helpers` feature
//! so production builds carry none of it.

use std::cell::Cell;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::Level;

use super::{FileOps, OpLog, StdDirectoryHelper};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub level: Level,
    pub op: &'static str,
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Default)]
struct Recorded {
    events: Vec<RecordedEvent>,
    failures: Vec<(&'static str, PathBuf, String)>,
}

/// `OpLog` that keeps everything in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct RecordingLog {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingLog {
    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.lock().events.clone()
    }

    /// `(op, path, rendered error)` for every caught failure.
    pub fn failures(&self) -> Vec<(&'static str, PathBuf, String)> {
        self.lock().failures.clone()
    }

    pub fn events_at(&self, level: Level) -> Vec<RecordedEvent> {
        self.lock()
            .events
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }
}

impl OpLog for RecordingLog {
    fn event(&self, level: Level, op: &'static str, path: &Path, message: &str) {
        self.lock().events.push(RecordedEvent {
            level,
            op,
            path: path.to_path_buf(),
            message: message.to_string(),
        });
    }

    fn failure(&self, op: &'static str, path: &Path, error: &(dyn Error + 'static)) {
        self.lock()
            .failures
            .push((op, path.to_path_buf(), error.to_string()));
    }
}

/// A `FileOps` that reports into `log`.
pub fn recording_ops(log: &RecordingLog) -> FileOps {
    FileOps::new(Arc::new(log.clone()), Arc::new(StdDirectoryHelper))
}

thread_local! {
    static FORCE_CROSS_DEVICE: Cell<bool> = const { Cell::new(false) };
}

/// Make every `move_file` on the current thread behave as if the rename
/// crossed a device boundary.
pub fn set_force_cross_device(v: bool) {
    FORCE_CROSS_DEVICE.with(|f| f.set(v));
}

pub fn should_force_cross_device() -> bool {
    FORCE_CROSS_DEVICE.with(|f| f.get())
}
