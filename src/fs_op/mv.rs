use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{FileOps, FsOpError};

impl FileOps {
    /// Move the file at `source` to `target`.
    ///
    /// Moving a path onto itself is a logged no-op. An existing `target` is
    /// never replaced. When the rename crosses a device boundary the file is
    /// copied (with its metadata) and the source removed.
    pub fn move_file(
        &self,
        source: impl AsRef<Path>,
        target: impl AsRef<Path>,
        log: bool,
    ) -> Result<(), FsOpError> {
        let (source, target) = (source.as_ref(), target.as_ref());
        if source == target {
            self.warn(log, "move_file", source, "source and target are the same; nothing to do");
            return Ok(());
        }
        self.debug(log, "move_file", source, format_args!("moving to {}", target.display()));

        if fs::symlink_metadata(target).is_ok() {
            return Err(FsOpError::already_exists(target));
        }

        match rename(source, target) {
            Ok(()) => {}
            Err(e) if is_cross_device(&e) => {
                self.debug(log, "move_file", source, "rename crossed devices; copying instead");
                self.copy_file(source, target, false, log)?;
                fs::remove_file(source).map_err(|e| FsOpError::from_io(source, e))?;
            }
            Err(e) => return Err(FsOpError::from_io(source, e)),
        }

        self.debug(log, "move_file", target, "done");
        Ok(())
    }

    /// Rename every file below `dir` whose full path contains `old`, replacing
    /// each occurrence with `new`.
    ///
    /// The file list is collected strictly first; files whose path does not
    /// change go through `move_file`'s same-path no-op. An empty `old`
    /// matches nothing, so no file is moved.
    pub fn rename_all_recursively(
        &self,
        dir: impl AsRef<Path>,
        old: &str,
        new: &str,
        log: bool,
    ) -> Result<(), FsOpError> {
        let dir = dir.as_ref();
        self.info(
            log,
            "rename_all_recursively",
            dir,
            format_args!("replacing `{old}` with `{new}`"),
        );

        let files = self.list_files_recursively(dir, log)?;
        if old.is_empty() {
            self.warn(log, "rename_all_recursively", dir, "empty search string; nothing to do");
            return Ok(());
        }
        for file in files {
            let renamed = substitute(&file, old, new)?;
            self.move_file(&file, &renamed, log)?;
        }
        Ok(())
    }
}

fn substitute(path: &Path, old: &str, new: &str) -> Result<PathBuf, FsOpError> {
    let s = path
        .to_str()
        .ok_or_else(|| FsOpError::NonUtf8Path(path.to_path_buf()))?;
    Ok(PathBuf::from(s.replace(old, new)))
}

fn rename(source: &Path, target: &Path) -> io::Result<()> {
    if cross_device_forced() {
        return Err(cross_device_error());
    }
    fs::rename(source, target)
}

#[cfg(any(test, feature = "test-helpers"))]
fn cross_device_forced() -> bool {
    super::test_helpers::should_force_cross_device()
}

#[cfg(not(any(test, feature = "test-helpers")))]
fn cross_device_forced() -> bool {
    false
}

#[cfg(unix)]
const EXDEV: i32 = libc::EXDEV;
// ERROR_NOT_SAME_DEVICE
#[cfg(windows)]
const EXDEV: i32 = 17;
#[cfg(not(any(unix, windows)))]
const EXDEV: i32 = -1;

fn cross_device_error() -> io::Error {
    io::Error::from_raw_os_error(EXDEV)
}

fn is_cross_device(e: &io::Error) -> bool {
    e.raw_os_error() == Some(EXDEV)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_op::test_helpers::{recording_ops, set_force_cross_device, RecordingLog};
    use tempfile::tempdir;
    use tracing::Level;

    #[test]
    fn move_onto_itself_is_noop_with_warning() {
        let td = tempdir().unwrap();
        let p = td.path().join("same.txt");
        fs::write(&p, "data").unwrap();
        let log = RecordingLog::default();
        let ops = recording_ops(&log);

        ops.move_file(&p, &p, true).unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), "data");
        assert_eq!(log.events_at(Level::WARN).len(), 1);
    }

    #[test]
    fn move_onto_itself_works_even_when_missing() {
        let td = tempdir().unwrap();
        let p = td.path().join("ghost.txt");
        FileOps::default().move_file(&p, &p, false).unwrap();
        assert!(!p.exists());
    }

    #[test]
    fn move_refuses_to_overwrite() {
        let td = tempdir().unwrap();
        let a = td.path().join("a.txt");
        let b = td.path().join("b.txt");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        let err = FileOps::default().move_file(&a, &b, false).unwrap_err();
        assert!(matches!(err, FsOpError::AlreadyExists { .. }));
        assert_eq!(fs::read_to_string(&a).unwrap(), "a");
        assert_eq!(fs::read_to_string(&b).unwrap(), "b");
    }

    #[test]
    fn move_missing_source_is_not_found() {
        let td = tempdir().unwrap();
        let err = FileOps::default()
            .move_file(td.path().join("none"), td.path().join("dst"), false)
            .unwrap_err();
        assert!(matches!(err, FsOpError::NotFound { .. }));
    }

    #[test]
    fn cross_device_move_falls_back_to_copy_and_delete() {
        let td = tempdir().unwrap();
        let src = td.path().join("src.txt");
        let dst = td.path().join("dst.txt");
        fs::write(&src, "payload").unwrap();

        set_force_cross_device(true);
        let res = FileOps::default().move_file(&src, &dst, false);
        set_force_cross_device(false);

        res.unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "payload");
    }

    #[test]
    fn rename_all_only_touches_matching_files() {
        let td = tempdir().unwrap();
        fs::create_dir(td.path().join("sub")).unwrap();
        fs::write(td.path().join("sub/old_a.txt"), "a").unwrap();
        fs::write(td.path().join("sub/other.txt"), "o").unwrap();

        FileOps::default()
            .rename_all_recursively(td.path().join("sub"), "old_", "new_", false)
            .unwrap();

        assert!(td.path().join("sub/new_a.txt").exists());
        assert!(!td.path().join("sub/old_a.txt").exists());
        assert!(td.path().join("sub/other.txt").exists());
    }

    #[test]
    fn rename_all_on_missing_dir_fails() {
        let td = tempdir().unwrap();
        let err = FileOps::default()
            .rename_all_recursively(td.path().join("missing"), "a", "b", false)
            .unwrap_err();
        assert!(matches!(err, FsOpError::NotFound { .. }));
    }

    #[test]
    fn rename_all_with_empty_search_moves_nothing() {
        let td = tempdir().unwrap();
        fs::create_dir(td.path().join("sub")).unwrap();
        fs::write(td.path().join("sub/a.txt"), "a").unwrap();
        let log = RecordingLog::default();
        let ops = recording_ops(&log);

        ops.rename_all_recursively(td.path().join("sub"), "", "x", true).unwrap();

        let names: Vec<_> = fs::read_dir(td.path().join("sub"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("a.txt")]);
        assert_eq!(log.events_at(Level::WARN).len(), 1);
    }

    #[test]
    fn rename_all_under_a_file_fails_and_keeps_it() {
        let td = tempdir().unwrap();
        let file = td.path().join("old_file.txt");
        fs::write(&file, "x").unwrap();

        let err = FileOps::default()
            .rename_all_recursively(&file, "old_", "new_", false)
            .unwrap_err();
        assert!(matches!(err, FsOpError::NotADirectory(_)), "{err:?}");
        assert!(file.exists());
        assert!(!td.path().join("new_file.txt").exists());
    }
}
