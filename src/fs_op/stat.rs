use std::fs;
use std::path::Path;

/// What a path currently points at, following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathType {
    /// Nothing there, or the probe itself was refused.
    Missing,
    Directory,
    File,
    /// Sockets, FIFOs, devices.
    Other,
}

impl PathType {
    /// Classify `path` with a single `metadata` call.
    ///
    /// Probe errors (including permission errors on a parent directory) read
    /// as `Missing`, the same answer `Path::exists` gives.
    pub fn of<P: AsRef<Path>>(path: P) -> Self {
        match fs::metadata(path.as_ref()) {
            Err(_) => PathType::Missing,
            Ok(md) if md.is_dir() => PathType::Directory,
            Ok(md) if md.is_file() => PathType::File,
            Ok(_) => PathType::Other,
        }
    }
}

/// `true` when a regular file exists at `path`.
pub fn is_file<P: AsRef<Path>>(path: P) -> bool {
    PathType::of(path) == PathType::File
}

/// `true` when a directory exists at `path`.
pub fn is_dir<P: AsRef<Path>>(path: P) -> bool {
    PathType::of(path) == PathType::Directory
}

/// `true` when `a` and `b` resolve to the same existing file, hard links
/// included. A path whose metadata cannot be read matches nothing.
#[cfg(unix)]
pub fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(x), Ok(y)) => x.dev() == y.dev() && x.ino() == y.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}
