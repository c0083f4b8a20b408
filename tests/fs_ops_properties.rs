use std::error::Error;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use assert_fs::prelude::*;
use predicates::prelude::*;
use tracing::Level;

use file_ops::{FileOps, FsOpError, OpLog, StdDirectoryHelper};

/// Keeps the level and op of every event, plus the op of every failure.
#[derive(Default, Clone)]
struct Recorder {
    events: Arc<Mutex<Vec<(Level, &'static str)>>>,
    failures: Arc<Mutex<Vec<&'static str>>>,
}

impl OpLog for Recorder {
    fn event(&self, level: Level, op: &'static str, _path: &Path, _message: &str) {
        self.events.lock().unwrap().push((level, op));
    }

    fn failure(&self, op: &'static str, _path: &Path, _error: &(dyn Error + 'static)) {
        self.failures.lock().unwrap().push(op);
    }
}

fn ops_with(rec: &Recorder) -> FileOps {
    FileOps::new(Arc::new(rec.clone()), Arc::new(StdDirectoryHelper))
}

#[test]
fn delete_if_exists_on_missing_path_touches_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let missing = temp.child("missing.txt");
    let ops = FileOps::default();

    assert!(!ops.exists(&missing, true));
    assert!(!ops.delete_if_exists(&missing, true).unwrap());
    assert!(!ops.try_delete_if_exists(&missing, true));
    missing.assert(predicate::path::missing());
}

#[test]
fn delete_if_exists_removes_present_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("present.txt");
    file.write_str("x").unwrap();
    let ops = FileOps::default();

    assert!(ops.exists(&file, false));
    assert!(ops.delete_if_exists(&file, false).unwrap());
    assert!(!ops.exists(&file, false));
    file.assert(predicate::path::missing());
}

#[test]
fn self_move_is_a_warning_only() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("same.txt");
    file.write_str("unchanged").unwrap();
    let rec = Recorder::default();
    let ops = ops_with(&rec);

    ops.move_file(&file, &file, true).unwrap();

    file.assert("unchanged");
    let events = rec.events.lock().unwrap();
    assert_eq!(*events, vec![(Level::WARN, "move_file")]);
}

#[test]
fn text_and_lines_round_trip() {
    let temp = assert_fs::TempDir::new().unwrap();
    let ops = FileOps::default();

    let p = temp.child("hello.txt");
    ops.write(&p, "hello", false).unwrap();
    assert_eq!(ops.read(&p, false).unwrap(), "hello");

    let l = temp.child("lines.txt");
    ops.write_lines(&l, ["a", "b"], false).unwrap();
    assert_eq!(ops.read_lines(&l, false).unwrap(), vec!["a", "b"]);

    let b = temp.child("bytes.bin");
    ops.write_bytes(&b, &[0, 159, 146, 150], false).unwrap();
    assert_eq!(ops.read_bytes(&b, false).unwrap(), vec![0, 159, 146, 150]);
}

#[test]
fn stream_write_rewinds_advanced_stream() {
    let temp = assert_fs::TempDir::new().unwrap();
    let p = temp.child("from_stream.txt");
    let ops = FileOps::default();

    let mut stream = Cursor::new(b"entire stream".to_vec());
    stream.seek(SeekFrom::End(0)).unwrap();

    ops.write_from_stream(&p, &mut stream, false).unwrap();
    p.assert("entire stream");

    // Still ours to use.
    let mut rest = String::new();
    stream.seek(SeekFrom::Start(7)).unwrap();
    stream.read_to_string(&mut rest).unwrap();
    assert_eq!(rest, "stream");
}

#[test]
fn directory_copy_mirrors_files_and_empty_dirs() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src");
    src.child("a.txt").write_str("alpha").unwrap();
    src.child("sub/b.txt").write_str("beta").unwrap();
    src.child("hollow/deeper").create_dir_all().unwrap();
    let dst = temp.child("dst");

    FileOps::default()
        .copy_directory_recursively(&src, &dst, true, false)
        .unwrap();

    dst.child("a.txt").assert("alpha");
    dst.child("sub/b.txt").assert("beta");
    dst.child("hollow").assert(predicate::path::is_dir());
    dst.child("hollow/deeper").assert(predicate::path::is_dir());
}

#[test]
fn rename_all_renames_only_matching_files() {
    let temp = assert_fs::TempDir::new().unwrap();
    let dir = temp.child("dir");
    dir.child("stale1.txt").write_str("1").unwrap();
    dir.child("keep.txt").write_str("k").unwrap();

    FileOps::default()
        .rename_all_recursively(&dir, "stale", "fresh", false)
        .unwrap();

    dir.child("fresh1.txt").assert("1");
    dir.child("stale1.txt").assert(predicate::path::missing());
    dir.child("keep.txt").assert("k");
}

#[test]
fn try_copy_of_missing_source_is_false() {
    let temp = assert_fs::TempDir::new().unwrap();
    let rec = Recorder::default();
    let ops = ops_with(&rec);

    assert!(!ops.try_copy(temp.child("nope.txt"), temp.child("out.txt"), true));
    temp.child("out.txt").assert(predicate::path::missing());
    assert_eq!(*rec.failures.lock().unwrap(), vec!["try_copy"]);
}

#[test]
fn parallel_delete_of_descriptors() {
    let temp = assert_fs::TempDir::new().unwrap();
    for i in 0..20 {
        temp.child(format!("d{}/f{i}.txt", i % 3)).write_str("x").unwrap();
    }
    let ops = FileOps::default();

    let found = ops.list_file_descriptors_recursively_safe(&temp, false);
    assert_eq!(found.len(), 20);
    ops.delete_many(&found, true, false).unwrap();

    let left: Vec<PathBuf> = ops.list_files_recursively(&temp, false).unwrap();
    assert!(left.is_empty());
}

#[test]
fn top_level_copy_keeps_names() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src");
    src.child("x.cfg").write_str("x").unwrap();
    src.child("y.cfg").write_str("y").unwrap();
    src.child("inner/z.cfg").write_str("z").unwrap();
    let dst = temp.child("made/by/helper");

    FileOps::default()
        .copy_top_level_files(&src, &dst, false, false)
        .unwrap();

    dst.child("x.cfg").assert("x");
    dst.child("y.cfg").assert("y");
    dst.child("z.cfg").assert(predicate::path::missing());
    dst.child("inner").assert(predicate::path::missing());
}

#[test]
fn suppressed_logging_is_silent() {
    let temp = assert_fs::TempDir::new().unwrap();
    let rec = Recorder::default();
    let ops = ops_with(&rec);

    let p = temp.child("quiet.txt");
    ops.write(&p, "shh", false).unwrap();
    ops.read(&p, false).unwrap();
    assert!(!ops.try_delete(temp.child("absent"), false));
    ops.move_file(&p, &p, false).unwrap();

    assert!(rec.events.lock().unwrap().is_empty());
    assert!(rec.failures.lock().unwrap().is_empty());
}

#[test]
fn tree_copied_onto_itself_keeps_its_contents() {
    let temp = assert_fs::TempDir::new().unwrap();
    let dir = temp.child("tree");
    dir.child("a.txt").write_str("precious").unwrap();

    let res = FileOps::default().copy_directory_recursively(&dir, &dir, true, false);

    assert!(matches!(res, Err(FsOpError::SameFile(_))), "{res:?}");
    dir.child("a.txt").assert("precious");
}

#[test]
fn bulk_delete_given_a_file_deletes_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("not_a_dir.txt");
    file.write_str("still here").unwrap();
    let rec = Recorder::default();
    let ops = ops_with(&rec);

    assert!(ops.list_files_recursively(&file, false).is_err());
    ops.delete_all_safe(&file, true).unwrap();

    file.assert("still here");
    assert_eq!(
        *rec.failures.lock().unwrap(),
        vec!["list_file_descriptors_recursively_safe"]
    );
}
