use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// The platform attribute bits `FileOps` knows how to clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileAttributes {
    pub read_only: bool,
    /// Windows "archive" bit. Always `false` elsewhere.
    pub archive: bool,
}

#[cfg(windows)]
const FILE_ATTRIBUTE_ARCHIVE: u32 = 0x20;

impl FileAttributes {
    pub fn from_metadata(md: &Metadata) -> Self {
        #[cfg(windows)]
        {
            use std::os::windows::fs::MetadataExt;
            Self {
                read_only: md.permissions().readonly(),
                archive: md.file_attributes() & FILE_ATTRIBUTE_ARCHIVE != 0,
            }
        }
        #[cfg(not(windows))]
        {
            Self {
                read_only: md.permissions().readonly(),
                archive: false,
            }
        }
    }
}

/// Snapshot of one file seen during a safe traversal. It may be stale as
/// soon as it is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub path: PathBuf,
    pub size: u64,
    pub attributes: FileAttributes,
}

impl FileDescriptor {
    pub fn from_metadata(path: PathBuf, md: &Metadata) -> Self {
        Self {
            path,
            size: md.len(),
            attributes: FileAttributes::from_metadata(md),
        }
    }
}

impl AsRef<Path> for FileDescriptor {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}
