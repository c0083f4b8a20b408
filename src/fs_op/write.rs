//! Writers. None of these are atomic: a crash part-way through can leave a
//! partially written file behind.

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use super::{FileOps, FsOpError};

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

impl FileOps {
    /// Create or truncate `path` and write `text` as UTF-8 (no BOM).
    pub fn write(&self, path: impl AsRef<Path>, text: &str, log: bool) -> Result<(), FsOpError> {
        let path = path.as_ref();
        self.debug(log, "write", path, "start");
        fs::write(path, text).map_err(|e| FsOpError::from_io(path, e))?;
        self.debug(log, "write", path, format_args!("wrote {} bytes", text.len()));
        Ok(())
    }

    /// Write each line followed by the platform line terminator.
    pub fn write_lines<I, S>(
        &self,
        path: impl AsRef<Path>,
        lines: I,
        log: bool,
    ) -> Result<(), FsOpError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let path = path.as_ref();
        let mut text = String::new();
        let mut count = 0usize;
        for line in lines {
            text.push_str(line.as_ref());
            text.push_str(LINE_ENDING);
            count += 1;
        }
        self.debug(log, "write_lines", path, format_args!("writing {count} lines"));
        fs::write(path, text).map_err(|e| FsOpError::from_io(path, e))
    }

    pub fn write_bytes(
        &self,
        path: impl AsRef<Path>,
        bytes: &[u8],
        log: bool,
    ) -> Result<(), FsOpError> {
        let path = path.as_ref();
        self.debug(log, "write_bytes", path, "start");
        fs::write(path, bytes).map_err(|e| FsOpError::from_io(path, e))?;
        self.debug(log, "write_bytes", path, format_args!("wrote {} bytes", bytes.len()));
        Ok(())
    }

    /// Copy the whole of `stream` into `path`, returning the byte count.
    ///
    /// The stream is rewound to its start first, whatever its position. The
    /// destination is opened without truncation, so a shorter stream leaves
    /// the tail of a longer existing file in place. The stream stays with the
    /// caller; only the destination handle is closed here.
    pub fn write_from_stream<R>(
        &self,
        path: impl AsRef<Path>,
        stream: &mut R,
        log: bool,
    ) -> Result<u64, FsOpError>
    where
        R: Read + Seek + ?Sized,
    {
        let path = path.as_ref();
        self.debug(log, "write_from_stream", path, "start");
        stream
            .seek(SeekFrom::Start(0))
            .map_err(|e| FsOpError::from_io(path, e))?;

        let mut dest = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| FsOpError::from_io(path, e))?;
        let copied = io::copy(stream, &mut dest).map_err(|e| FsOpError::from_io(path, e))?;

        self.debug(log, "write_from_stream", path, format_args!("wrote {copied} bytes"));
        Ok(copied)
    }

    /// Create a uniquely named, empty file in the OS temp directory and
    /// return its path. The file is left on disk for the caller to manage.
    pub fn create_temp_file(&self, log: bool) -> Result<PathBuf, FsOpError> {
        let dir = std::env::temp_dir();
        let path = tempfile::Builder::new()
            .prefix("file_ops.")
            .suffix(".tmp")
            .tempfile_in(&dir)
            .map_err(|e| FsOpError::from_io(&dir, e))?
            .into_temp_path()
            .keep()
            .map_err(|e| FsOpError::from_io(&dir, e.error))?;
        self.debug(log, "create_temp_file", &path, "created");
        Ok(path)
    }
}
