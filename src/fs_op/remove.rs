//! File deletion: strict, conditional, best-effort, and bulk.

use std::fs;
use std::path::Path;

use rayon::prelude::*;

use super::{stat, FileOps, FsOpError};

impl FileOps {
    /// `true` when a regular file exists at `path`. Never fails; a probe
    /// that errors reads as "not there". Directories report `false`.
    pub fn exists(&self, path: impl AsRef<Path>, log: bool) -> bool {
        let path = path.as_ref();
        let found = stat::is_file(path);
        self.debug(log, "exists", path, format_args!("exists = {found}"));
        found
    }

    /// `true` when a directory exists at `path`.
    pub fn directory_exists(&self, path: impl AsRef<Path>, log: bool) -> bool {
        let path = path.as_ref();
        let found = stat::is_dir(path);
        self.debug(log, "directory_exists", path, format_args!("exists = {found}"));
        found
    }

    /// Remove the file at `path`. A missing file is an error.
    pub fn delete(&self, path: impl AsRef<Path>, log: bool) -> Result<(), FsOpError> {
        let path = path.as_ref();
        self.debug(log, "delete", path, "start");
        fs::remove_file(path).map_err(|e| FsOpError::from_io(path, e))?;
        self.debug(log, "delete", path, "done");
        Ok(())
    }

    /// Delete `path` if it is there. `Ok(false)` means nothing was touched.
    pub fn delete_if_exists(&self, path: impl AsRef<Path>, log: bool) -> Result<bool, FsOpError> {
        let path = path.as_ref();
        if !self.exists(path, log) {
            return Ok(false);
        }
        self.delete(path, log)?;
        Ok(true)
    }

    /// Best-effort delete: failures are logged and reported as `false`.
    pub fn try_delete(&self, path: impl AsRef<Path>, log: bool) -> bool {
        let path = path.as_ref();
        let result = self.delete(path, log);
        self.best_effort(log, "try_delete", path, result)
    }

    /// `false` without any attempt when `path` is absent, else `try_delete`.
    pub fn try_delete_if_exists(&self, path: impl AsRef<Path>, log: bool) -> bool {
        let path = path.as_ref();
        self.exists(path, log) && self.try_delete(path, log)
    }

    /// Strict-delete every path in `paths`.
    ///
    /// Sequentially the deletions run in list order and the first failure
    /// stops the run. In parallel every deletion runs as its own task on a
    /// pool bounded by `Settings::delete_parallelism`; each failure is logged
    /// and all of them come back together as `FsOpError::Batch`.
    pub fn delete_many<P>(&self, paths: &[P], parallel: bool, log: bool) -> Result<(), FsOpError>
    where
        P: AsRef<Path> + Sync,
    {
        if !parallel {
            for p in paths {
                self.delete(p, log)?;
            }
            return Ok(());
        }

        let run = || -> Vec<FsOpError> {
            paths
                .par_iter()
                .filter_map(|p| {
                    let p = p.as_ref();
                    self.delete(p, log)
                        .inspect_err(|e| self.failed(log, "delete_many", p, e))
                        .err()
                })
                .collect()
        };

        let failures = match self.delete_pool(log) {
            Some(pool) => pool.install(run),
            None => run(),
        };

        if failures.is_empty() {
            Ok(())
        } else {
            Err(FsOpError::Batch { failures })
        }
    }

    /// Dedicated pool when a parallelism bound is configured. `None` means use
    /// rayon's global pool.
    fn delete_pool(&self, log: bool) -> Option<rayon::ThreadPool> {
        let threads = self.settings.delete_parallelism;
        if threads == 0 {
            return None;
        }
        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => Some(pool),
            Err(e) => {
                self.warn(
                    log,
                    "delete_many",
                    Path::new(""),
                    format_args!("falling back to the global pool: {e}"),
                );
                None
            }
        }
    }

    /// Delete every file found by the safe traversal of `dir`, in order.
    ///
    /// Unreadable parts of the tree are skipped, but a failing deletion stops
    /// the run and may leave some files deleted and others not.
    pub fn delete_all_safe(&self, dir: impl AsRef<Path>, log: bool) -> Result<(), FsOpError> {
        let dir = dir.as_ref();
        self.info(log, "delete_all_safe", dir, "deleting all files");
        let found = self.list_file_descriptors_recursively_safe(dir, log);
        self.delete_many(&found, false, log)
    }

    /// Like `delete_all_safe`, but always visits every file. `true` when every
    /// deletion succeeded.
    pub fn try_delete_all_safe(&self, dir: impl AsRef<Path>, log: bool) -> bool {
        let dir = dir.as_ref();
        self.info(log, "try_delete_all_safe", dir, "deleting all files");
        self.list_file_descriptors_recursively_safe(dir, log)
            .iter()
            .fold(true, |all_ok, d| self.try_delete(&d.path, log) && all_ok)
    }
}
