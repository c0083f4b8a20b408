pub mod fs_op;
pub mod logging;
pub mod settings;

pub use crate::fs_op::{
    DirectoryHelper, FileAttributes, FileDescriptor, FileOps, FsOpError, NoopLog, OpLog,
    StdDirectoryHelper, TracingLog,
};
pub use crate::settings::{LogSettings, Settings};
