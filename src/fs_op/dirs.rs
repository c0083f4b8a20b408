use std::io;
use std::path::Path;

/// Collaborator that makes sure a destination directory is present before
/// files are copied into it.
pub trait DirectoryHelper: Send + Sync {
    /// Create `path` (and its ancestors) if missing. Must be a no-op when the
    /// directory already exists.
    fn ensure_directory_exists(&self, path: &Path) -> io::Result<()>;
}

/// Default helper backed by `std::fs::create_dir_all`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDirectoryHelper;

impl DirectoryHelper for StdDirectoryHelper {
    fn ensure_directory_exists(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_nested_dirs_and_is_idempotent() {
        let td = tempdir().unwrap();
        let dir = td.path().join("a/b/c");
        StdDirectoryHelper.ensure_directory_exists(&dir).unwrap();
        assert!(dir.is_dir());
        StdDirectoryHelper.ensure_directory_exists(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn fails_when_a_file_is_in_the_way() {
        let td = tempdir().unwrap();
        let file = td.path().join("f.txt");
        std::fs::write(&file, b"x").unwrap();
        assert!(StdDirectoryHelper.ensure_directory_exists(&file.join("sub")).is_err());
    }
}
