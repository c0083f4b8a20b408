use std::fs;
use std::io;
use std::path::Path;

use super::{FileOps, FsOpError};

impl FileOps {
    /// Make `path` writable again. Never fails; `false` means the change
    /// could not be made. The Windows archive bit is reported through
    /// `FileAttributes` but std offers no way to clear it.
    pub fn remove_read_only_and_archive_attributes(
        &self,
        path: impl AsRef<Path>,
        log: bool,
    ) -> bool {
        const OP: &str = "remove_read_only_and_archive_attributes";
        let path = path.as_ref();
        self.debug(log, OP, path, "start");
        let result = clear_read_only(path).map_err(|e| FsOpError::from_io(path, e));
        self.best_effort(log, OP, path, result)
    }

    /// Clear attributes on every file the safe traversal finds under `dir`.
    /// Individual failures are logged and skipped.
    pub fn remove_read_only_and_archive_attributes_from_all(
        &self,
        dir: impl AsRef<Path>,
        log: bool,
    ) {
        const OP: &str = "remove_read_only_and_archive_attributes_from_all";
        let dir = dir.as_ref();
        self.info(log, OP, dir, "clearing attributes");
        for d in self.list_file_descriptors_recursively_safe(dir, log) {
            self.remove_read_only_and_archive_attributes(&d.path, log);
        }
    }
}

#[cfg(unix)]
fn clear_read_only(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    if perms.readonly() {
        // Owner write only; the group/other bits stay as the user left them.
        perms.set_mode(perms.mode() | 0o200);
        fs::set_permissions(path, perms)?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn clear_read_only(path: &Path) -> io::Result<()> {
    let mut perms = fs::metadata(path)?.permissions();
    if perms.readonly() {
        perms.set_readonly(false);
        fs::set_permissions(path, perms)?;
    }
    Ok(())
}
