//! File System Types
//!
//! Errors, open modes, link health, and the record types returned to the
//! command layer.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Permission bits of the 3-bit rwx mask.
pub const PERM_READ: u8 = 4;
pub const PERM_WRITE: u8 = 2;
pub const PERM_EXEC: u8 = 1;

/// Default mask for regular files (rw-).
pub const DEFAULT_FILE_MODE: u8 = 6;
/// Default mask for directories (rwx).
pub const DEFAULT_DIR_MODE: u8 = 7;

/// File system errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("ENOENT: no such file or directory, {operation} '{path}'")]
    NotFound { path: String, operation: String },

    #[error("EEXIST: file already exists, {operation} '{path}'")]
    NameConflict { path: String, operation: String },

    #[error("ENOTDIR: not a directory, {operation} '{path}'")]
    NotADirectory { path: String, operation: String },

    #[error("EISDIR: illegal operation on a directory, {operation} '{path}'")]
    IsADirectory { path: String, operation: String },

    #[error("ENOTEMPTY: directory not empty, {operation} '{path}'")]
    DirectoryNotEmpty { path: String, operation: String },

    #[error("EACCES: permission denied, {operation} '{path}'")]
    PermissionDenied { path: String, operation: String },

    #[error("EBADF: bad file descriptor, {operation} {fd}")]
    InvalidDescriptor { fd: i32, operation: String },

    #[error("EINVAL: invalid offset, {operation} {offset}")]
    InvalidOffset { offset: i64, operation: String },

    #[error("EINVAL: invalid argument, {operation} '{path}'")]
    InvalidArgument { path: String, operation: String },

    #[error("ENOENT: dangling symbolic link, {operation} '{path}' -> '{target}'")]
    DanglingLink {
        path: String,
        target: String,
        operation: String,
    },

    #[error("EBUSY: root directory may not be removed, {operation}")]
    RootRemovalRejected { operation: String },
}

impl FsError {
    pub fn not_found(path: &str, operation: &str) -> Self {
        FsError::NotFound {
            path: path.to_string(),
            operation: operation.to_string(),
        }
    }

    pub fn name_conflict(path: &str, operation: &str) -> Self {
        FsError::NameConflict {
            path: path.to_string(),
            operation: operation.to_string(),
        }
    }

    pub fn not_a_directory(path: &str, operation: &str) -> Self {
        FsError::NotADirectory {
            path: path.to_string(),
            operation: operation.to_string(),
        }
    }

    pub fn is_a_directory(path: &str, operation: &str) -> Self {
        FsError::IsADirectory {
            path: path.to_string(),
            operation: operation.to_string(),
        }
    }

    pub fn permission_denied(path: &str, operation: &str) -> Self {
        FsError::PermissionDenied {
            path: path.to_string(),
            operation: operation.to_string(),
        }
    }

    pub fn invalid_argument(path: &str, operation: &str) -> Self {
        FsError::InvalidArgument {
            path: path.to_string(),
            operation: operation.to_string(),
        }
    }
}

/// Access mode requested at `open` time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Read,
    Write,
    ReadWrite,
}

impl OpenMode {
    /// Parse the command-line spelling ("r", "w", "rw").
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "r" | "read" => Some(Self::Read),
            "w" | "write" => Some(Self::Write),
            "rw" | "readwrite" => Some(Self::ReadWrite),
            _ => None,
        }
    }

    pub fn readable(&self) -> bool {
        matches!(self, Self::Read | Self::ReadWrite)
    }

    pub fn writable(&self) -> bool {
        matches!(self, Self::Write | Self::ReadWrite)
    }

    /// Permission bits this mode requires from the entry's mask.
    pub fn required_bits(&self) -> u8 {
        match self {
            Self::Read => PERM_READ,
            Self::Write => PERM_WRITE,
            Self::ReadWrite => PERM_READ | PERM_WRITE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "r",
            Self::Write => "w",
            Self::ReadWrite => "rw",
        }
    }
}

/// Lazily-updated state of a symbolic link's target.
///
/// A link starts `Unknown` and flips to `Alive` or `Dead` each time the
/// target path is re-resolved. A dead link stays in the tree until removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkHealth {
    #[default]
    Unknown,
    Alive,
    Dead,
}

/// One row of a directory listing.
#[derive(Debug, Clone)]
pub struct ListEntry {
    pub name: String,
    pub inode: u64,
    pub is_directory: bool,
    pub is_symlink: bool,
    pub mode: u8,
    pub link_count: u32,
    pub size: u64,
    pub mtime: DateTime<Utc>,
    /// Target path, symbolic links only.
    pub symlink_target: Option<String>,
}

/// One row of a recursive `tree` walk.
#[derive(Debug, Clone)]
pub struct TreeEntry {
    pub name: String,
    pub inode: u64,
    pub depth: usize,
    pub is_directory: bool,
    pub is_symlink: bool,
    pub symlink_target: Option<String>,
}

/// Consistency-walk summary reported by `fsck`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FsckReport {
    pub directories: usize,
    pub files: usize,
    pub symlinks: usize,
    /// Paths of symbolic links whose target no longer resolves.
    pub dangling: Vec<String>,
}

/// Render a 3-bit mask as "rwx" flags.
pub fn mode_string(mode: u8, is_dir: bool, is_link: bool) -> String {
    let file_type = if is_link {
        'l'
    } else if is_dir {
        'd'
    } else {
        '-'
    };
    let perms = [
        if mode & PERM_READ != 0 { 'r' } else { '-' },
        if mode & PERM_WRITE != 0 { 'w' } else { '-' },
        if mode & PERM_EXEC != 0 { 'x' } else { '-' },
    ];
    format!("{}{}", file_type, perms.iter().collect::<String>())
}

// ============================================================================
// Tests
// ============================================================================
