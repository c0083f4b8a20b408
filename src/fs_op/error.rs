use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced by the strict `FileOps` operations.
///
/// Every path-bearing variant keeps the underlying `io::Error` as its source
/// so callers can still inspect the raw OS error when they need to.
#[derive(Error, Debug)]
pub enum FsOpError {
    /// The path (or a required source directory) does not exist.
    #[error("not found: `{}`", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The OS refused access to the path.
    #[error("access denied: `{}`", path.display())]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The path exceeds the platform path-length limit.
    #[error("path too long: `{}`", path.display())]
    PathTooLong {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A non-overwriting move or copy hit an existing destination.
    #[error("destination already exists: `{}`", path.display())]
    AlreadyExists {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other device or transport failure.
    #[error("I/O error on `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A copy whose source and target resolve to the same file.
    #[error("source and target are the same file: `{}`", .0.display())]
    SameFile(PathBuf),

    /// A traversal root that exists but is not a directory.
    #[error("not a directory: `{}`", .0.display())]
    NotADirectory(PathBuf),

    /// Substring renames only work on paths that are valid UTF-8.
    #[error("path is not valid UTF-8: `{}`", .0.display())]
    NonUtf8Path(PathBuf),

    /// One or more tasks of a parallel bulk operation failed.
    #[error("{} of the parallel operations failed", failures.len())]
    Batch { failures: Vec<FsOpError> },
}

impl FsOpError {
    /// Classify an `io::Error` raised while operating on `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => FsOpError::NotFound { path, source },
            io::ErrorKind::PermissionDenied => FsOpError::AccessDenied { path, source },
            io::ErrorKind::AlreadyExists => FsOpError::AlreadyExists { path, source },
            _ if is_name_too_long(&source) => FsOpError::PathTooLong { path, source },
            _ => FsOpError::Io { path, source },
        }
    }

    /// Build an `AlreadyExists` error for a destination that was found
    /// occupied before the OS call was attempted.
    pub(crate) fn already_exists(path: &Path) -> Self {
        FsOpError::AlreadyExists {
            path: path.to_path_buf(),
            source: io::Error::from(io::ErrorKind::AlreadyExists),
        }
    }

    pub(crate) fn not_found(path: &Path) -> Self {
        FsOpError::NotFound {
            path: path.to_path_buf(),
            source: io::Error::from(io::ErrorKind::NotFound),
        }
    }

    /// The path the error refers to, if it carries one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            FsOpError::NotFound { path, .. }
            | FsOpError::AccessDenied { path, .. }
            | FsOpError::PathTooLong { path, .. }
            | FsOpError::AlreadyExists { path, .. }
            | FsOpError::Io { path, .. } => Some(path),
            FsOpError::SameFile(path)
            | FsOpError::NotADirectory(path)
            | FsOpError::NonUtf8Path(path) => Some(path),
            FsOpError::Batch { .. } => None,
        }
    }
}

impl From<walkdir::Error> for FsOpError {
    fn from(e: walkdir::Error) -> Self {
        let path = e.path().map(Path::to_path_buf).unwrap_or_default();
        match e.into_io_error() {
            Some(io) => FsOpError::from_io(path, io),
            // Only filesystem loops come back without an io error, and we never
            // follow links.
            None => FsOpError::Io {
                path,
                source: io::Error::other("filesystem loop detected"),
            },
        }
    }
}

/// Map an `fs_extra` copy error onto the taxonomy. `fs_extra` reports its own
/// pre-checks (missing source, existing target) through its `ErrorKind`.
pub(crate) fn from_fs_extra(path: &Path, e: fs_extra::error::Error) -> FsOpError {
    use fs_extra::error::ErrorKind;

    let message = e.to_string();
    let kind = match e.kind {
        ErrorKind::Io(io) => return FsOpError::from_io(path, io),
        ErrorKind::NotFound => io::ErrorKind::NotFound,
        ErrorKind::PermissionDenied => io::ErrorKind::PermissionDenied,
        ErrorKind::AlreadyExists => io::ErrorKind::AlreadyExists,
        _ => io::ErrorKind::Other,
    };
    FsOpError::from_io(path, io::Error::new(kind, message))
}

#[cfg(unix)]
fn is_name_too_long(e: &io::Error) -> bool {
    e.raw_os_error() == Some(libc::ENAMETOOLONG)
}

#[cfg(windows)]
fn is_name_too_long(e: &io::Error) -> bool {
    // ERROR_FILENAME_EXCED_RANGE
    e.raw_os_error() == Some(206)
}

#[cfg(not(any(unix, windows)))]
fn is_name_too_long(_e: &io::Error) -> bool {
    false
}
