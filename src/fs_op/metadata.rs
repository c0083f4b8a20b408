//! Carries file metadata (permission bits and timestamps) from a copy source
//! onto its destination, the way platform file-copy calls do.

use std::fs;
use std::io;
use std::path::Path;

use filetime::{set_file_times, FileTime};

/// Copy permission bits from `src` to `dst`.
pub(crate) fn copy_permissions(src: &Path, dst: &Path) -> io::Result<()> {
    let perms = fs::metadata(src)?.permissions();
    fs::set_permissions(dst, perms)
}

/// Apply `src`'s access and modification times to `dst`.
pub(crate) fn copy_timestamps(src: &Path, dst: &Path) -> io::Result<()> {
    let meta = fs::metadata(src)?;
    let atime = FileTime::from_last_access_time(&meta);
    let mtime = FileTime::from_last_modification_time(&meta);
    set_file_times(dst, atime, mtime)
}

/// Preserve timestamps first and permissions second.
///
/// Order matters: a read-only source would otherwise leave `dst` without
/// write access before its times are set, which fails on Windows.
pub(crate) fn preserve_file_metadata(src: &Path, dst: &Path) -> io::Result<()> {
    copy_timestamps(src, dst)?;
    copy_permissions(src, dst)
}
