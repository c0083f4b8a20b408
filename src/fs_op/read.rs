use std::fs;
use std::path::Path;

use super::{FileOps, FsOpError};

const UTF8_BOM: &str = "\u{feff}";

impl FileOps {
    /// Whole file as text. Invalid UTF-8 is replaced rather than rejected and
    /// a leading byte-order mark is dropped.
    pub fn read(&self, path: impl AsRef<Path>, log: bool) -> Result<String, FsOpError> {
        let path = path.as_ref();
        self.debug(log, "read", path, "start");
        let bytes = fs::read(path).map_err(|e| FsOpError::from_io(path, e))?;
        let text = String::from_utf8_lossy(&bytes);
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(&text).to_string();
        self.debug(log, "read", path, format_args!("read {} bytes", bytes.len()));
        Ok(text)
    }

    pub fn read_bytes(&self, path: impl AsRef<Path>, log: bool) -> Result<Vec<u8>, FsOpError> {
        let path = path.as_ref();
        self.debug(log, "read_bytes", path, "start");
        let bytes = fs::read(path).map_err(|e| FsOpError::from_io(path, e))?;
        self.debug(log, "read_bytes", path, format_args!("read {} bytes", bytes.len()));
        Ok(bytes)
    }

    /// Lines of the file without their terminators. A trailing terminator
    /// does not add an empty last line; an empty file gives an empty vector.
    pub fn read_lines(
        &self,
        path: impl AsRef<Path>,
        log: bool,
    ) -> Result<Vec<String>, FsOpError> {
        let path = path.as_ref();
        self.debug(log, "read_lines", path, "start");
        let text = self.read(path, false)?;
        let lines: Vec<String> = text.lines().map(str::to_owned).collect();
        self.debug(log, "read_lines", path, format_args!("read {} lines", lines.len()));
        Ok(lines)
    }
}
