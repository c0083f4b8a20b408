//! Recursive enumeration.
//!
//! `list_files_recursively` is the strict walk: the first error ends it.
//! `list_file_descriptors_recursively_safe` is the tolerant one that every
//! bulk cleanup builds on; it skips what it cannot read and never raises.
//! Both only enumerate what sits under a directory: a root that is a file
//! counts as a root-level failure.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileDescriptor, FileOps, FsOpError};

/// Walker shared by both traversals. Links are not followed so a link cycle
/// can never be reported, and siblings come back in name order.
pub(crate) fn walker(dir: &Path) -> WalkDir {
    WalkDir::new(dir).follow_links(false).sort_by_file_name()
}

/// `Ok` when `dir` exists and is a directory (following links).
pub(crate) fn ensure_traversal_root(dir: &Path) -> Result<(), FsOpError> {
    let md = fs::metadata(dir).map_err(|e| FsOpError::from_io(dir, e))?;
    if md.is_dir() {
        Ok(())
    } else {
        Err(FsOpError::NotADirectory(dir.to_path_buf()))
    }
}

impl FileOps {
    /// Every regular file below `dir`, at any depth, collected eagerly.
    pub fn list_files_recursively(
        &self,
        dir: impl AsRef<Path>,
        log: bool,
    ) -> Result<Vec<PathBuf>, FsOpError> {
        let dir = dir.as_ref();
        self.debug(log, "list_files_recursively", dir, "start");
        ensure_traversal_root(dir)?;

        let mut files = Vec::new();
        for entry in walker(dir) {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        self.debug(
            log,
            "list_files_recursively",
            dir,
            format_args!("found {} files", files.len()),
        );
        Ok(files)
    }

    /// Like `list_files_recursively`, but returns a `FileDescriptor` per file
    /// and tolerates failures.
    ///
    /// An unreadable subdirectory or file is logged as a warning and skipped.
    /// A failure on `dir` itself (missing, unreadable, not a directory) is
    /// logged as an error and the (empty) result collected so far is
    /// returned.
    pub fn list_file_descriptors_recursively_safe(
        &self,
        dir: impl AsRef<Path>,
        log: bool,
    ) -> Vec<FileDescriptor> {
        const OP: &str = "list_file_descriptors_recursively_safe";
        let dir = dir.as_ref();
        self.debug(log, OP, dir, "start");
        if let Err(e) = ensure_traversal_root(dir) {
            self.failed(log, OP, dir, &e);
            return Vec::new();
        }

        let mut found = Vec::new();
        for entry in walker(dir) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    self.failed(log, OP, dir, &FsOpError::from(e));
                    break;
                }
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    self.warn(log, OP, &path, format_args!("skipping unreadable entry: {e}"));
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match entry.metadata() {
                Ok(md) => found.push(FileDescriptor::from_metadata(entry.into_path(), &md)),
                Err(e) => {
                    self.warn(
                        log,
                        OP,
                        entry.path(),
                        format_args!("skipping file without metadata: {e}"),
                    );
                }
            }
        }

        self.debug(log, OP, dir, format_args!("found {} files", found.len()));
        found
    }
}
