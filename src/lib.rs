//! memsh - an in-memory Unix-like file system with an interactive shell
//!
//! The core is the file-tree engine in [`fs`]: entries, path resolution,
//! hard and symbolic links, and the open-file-descriptor table. The
//! [`commands`] layer maps shell commands onto it, and [`shell`] drives the
//! dispatch loop.

pub mod commands;
pub mod fs;
pub mod shell;

pub use fs::{FsError, FsSession, OpenMode};
pub use shell::Shell;
