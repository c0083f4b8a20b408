use std::fs;
use std::path::{Path, PathBuf};

use fs_extra::file::{copy as fs_extra_copy, CopyOptions};

use super::error::from_fs_extra;
use super::walk::{ensure_traversal_root, walker};
use super::{metadata, stat, FileOps, FsOpError};

impl FileOps {
    /// Single-file copy shared by every copy path. Fails with
    /// `AlreadyExists` when `target` exists and `overwrite` is off, and with
    /// `SameFile` when both paths resolve to one file, since copying a file
    /// onto itself truncates it.
    pub(crate) fn copy_file(
        &self,
        source: &Path,
        target: &Path,
        overwrite: bool,
        log: bool,
    ) -> Result<u64, FsOpError> {
        if stat::same_file(source, target) {
            return Err(FsOpError::SameFile(target.to_path_buf()));
        }

        let mut options = CopyOptions::new();
        options.overwrite = overwrite;
        // 64 KiB buffer, same as directory copies.
        options.buffer_size = 64 * 1024;

        let copied = fs_extra_copy(source, target, &options).map_err(|e| {
            let blamed = match e.kind {
                fs_extra::error::ErrorKind::AlreadyExists => target,
                _ => source,
            };
            from_fs_extra(blamed, e)
        })?;

        if let Err(e) = metadata::preserve_file_metadata(source, target) {
            self.warn(log, "copy", target, format_args!("copied without source metadata: {e}"));
        }
        Ok(copied)
    }

    /// Copy `source` to `target`. An existing `target` is never replaced.
    pub fn copy(
        &self,
        source: impl AsRef<Path>,
        target: impl AsRef<Path>,
        log: bool,
    ) -> Result<(), FsOpError> {
        let (source, target) = (source.as_ref(), target.as_ref());
        self.debug(log, "copy", source, format_args!("copying to {}", target.display()));
        let n = self.copy_file(source, target, false, log)?;
        self.debug(log, "copy", target, format_args!("copied {n} bytes"));
        Ok(())
    }

    /// Best-effort `copy`: failures are logged and reported as `false`.
    pub fn try_copy(&self, source: impl AsRef<Path>, target: impl AsRef<Path>, log: bool) -> bool {
        let source = source.as_ref();
        let result = self.copy(source, target, log);
        self.best_effort(log, "try_copy", source, result)
    }

    /// Mirror the tree under `source` into `target`.
    ///
    /// Every directory (empty ones included) is created first by swapping
    /// the `source` prefix for `target`; then every file is copied the same
    /// way. `overwrite` only governs the file copies.
    pub fn copy_directory_recursively(
        &self,
        source: impl AsRef<Path>,
        target: impl AsRef<Path>,
        overwrite: bool,
        log: bool,
    ) -> Result<(), FsOpError> {
        let (source, target) = (source.as_ref(), target.as_ref());
        self.info(
            log,
            "copy_directory_recursively",
            source,
            format_args!("copying tree to {}", target.display()),
        );
        ensure_traversal_root(source)?;

        for entry in walker(source) {
            let entry = entry?;
            if entry.file_type().is_dir() {
                let dir = rebase(entry.path(), source, target);
                fs::create_dir_all(&dir).map_err(|e| FsOpError::from_io(&dir, e))?;
            }
        }

        for file in self.list_files_recursively(source, log)? {
            let dest = rebase(&file, source, target);
            self.copy_file(&file, &dest, overwrite, log)?;
        }

        self.debug(log, "copy_directory_recursively", target, "done");
        Ok(())
    }

    /// Copy the files sitting directly in `source` (no subdirectories) into
    /// `target`, keeping their names. `target` is created through the
    /// directory helper if needed.
    pub fn copy_top_level_files(
        &self,
        source: impl AsRef<Path>,
        target: impl AsRef<Path>,
        overwrite: bool,
        log: bool,
    ) -> Result<(), FsOpError> {
        let (source, target) = (source.as_ref(), target.as_ref());
        if !self.directory_exists(source, log) {
            return Err(FsOpError::not_found(source));
        }
        self.info(
            log,
            "copy_top_level_files",
            source,
            format_args!("copying files to {}", target.display()),
        );

        self.dirs
            .ensure_directory_exists(target)
            .map_err(|e| FsOpError::from_io(target, e))?;

        let mut files = Vec::new();
        for entry in fs::read_dir(source).map_err(|e| FsOpError::from_io(source, e))? {
            let entry = entry.map_err(|e| FsOpError::from_io(source, e))?;
            if entry.path().is_file() {
                files.push(entry);
            }
        }
        files.sort_by_key(|e| e.file_name());

        for entry in files {
            let dest = target.join(entry.file_name());
            self.copy_file(&entry.path(), &dest, overwrite, log)?;
        }
        Ok(())
    }
}

/// Swap the `from` prefix of `path` for `to`.
fn rebase(path: &Path, from: &Path, to: &Path) -> PathBuf {
    match path.strip_prefix(from) {
        Ok(rel) if rel.as_os_str().is_empty() => to.to_path_buf(),
        Ok(rel) => to.join(rel),
        // walkdir only yields paths under its root.
        Err(_) => to.to_path_buf(),
    }
}
