//! Open File Table
//!
//! Descriptor allocation, per-descriptor offsets, and positional read/write
//! against the shared content blobs. Descriptors hold entry and inode ids,
//! never owning references; closing one never affects entry lifetime.

use indexmap::IndexMap;

use super::engine::FsState;
use super::store::{EntryId, Inode};
use super::types::*;

/// Descriptors start here; 0-2 stay reserved for the conventional streams.
const FIRST_FD: i32 = 3;

#[derive(Debug, Clone)]
pub struct Descriptor {
    pub entry: EntryId,
    pub inode: Inode,
    pub mode: OpenMode,
    pub offset: usize,
}

/// Allocation-ordered table of open descriptors.
#[derive(Debug, Default)]
pub struct OpenFileTable {
    table: IndexMap<i32, Descriptor>,
    next_fd: i32,
}

impl OpenFileTable {
    pub fn new() -> Self {
        Self {
            table: IndexMap::new(),
            next_fd: FIRST_FD,
        }
    }

    pub fn alloc(&mut self, entry: EntryId, inode: Inode, mode: OpenMode) -> i32 {
        let fd = self.next_fd;
        self.next_fd += 1;
        self.table.insert(
            fd,
            Descriptor {
                entry,
                inode,
                mode,
                offset: 0,
            },
        );
        fd
    }

    pub fn get(&self, fd: i32, operation: &str) -> Result<&Descriptor, FsError> {
        self.table.get(&fd).ok_or(FsError::InvalidDescriptor {
            fd,
            operation: operation.to_string(),
        })
    }

    pub fn get_mut(&mut self, fd: i32, operation: &str) -> Result<&mut Descriptor, FsError> {
        self.table.get_mut(&fd).ok_or(FsError::InvalidDescriptor {
            fd,
            operation: operation.to_string(),
        })
    }

    pub fn release(&mut self, fd: i32) -> Result<(), FsError> {
        self.table.shift_remove(&fd).map(|_| ()).ok_or(
            FsError::InvalidDescriptor {
                fd,
                operation: "close".to_string(),
            },
        )
    }

    /// Descriptors in allocation order, for `lsof`.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &Descriptor)> {
        self.table.iter().map(|(&fd, d)| (fd, d))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl FsState {
    /// Open a file and allocate a descriptor with offset 0. Follows a final
    /// symbolic link; directories are rejected, and the entry's mask must
    /// grant every bit the mode requires.
    pub fn open(&mut self, path: &str, mode: OpenMode) -> Result<i32, FsError> {
        let id = self.resolve_entry(path, "open")?;
        let id = self.follow_symlink(id, "open")?;
        let entry = self.store.entry(id);
        if entry.is_directory() {
            return Err(FsError::is_a_directory(path, "open"));
        }
        if entry.mode & mode.required_bits() != mode.required_bits() {
            return Err(FsError::permission_denied(path, "open"));
        }
        let inode = entry.inode;
        Ok(self.open_files.alloc(id, inode, mode))
    }

    /// Read up to `n` bytes at the descriptor's offset. An empty read at
    /// end-of-content is success, not an error.
    pub fn read(&mut self, fd: i32, n: usize) -> Result<Vec<u8>, FsError> {
        let desc = self.open_files.get(fd, "read")?;
        if !desc.mode.readable() {
            return Err(FsError::PermissionDenied {
                path: format!("fd {}", fd),
                operation: "read".to_string(),
            });
        }
        let inode = desc.inode;
        let offset = desc.offset;
        // The blob is gone once the last hard link was removed; the stale
        // descriptor is unusable from then on.
        let blob = self.store.blob(inode).ok_or(FsError::InvalidDescriptor {
            fd,
            operation: "read".to_string(),
        })?;
        let end = (offset + n).min(blob.data.len());
        let bytes = if offset < blob.data.len() {
            blob.data[offset..end].to_vec()
        } else {
            Vec::new()
        };
        self.open_files.get_mut(fd, "read")?.offset = offset + bytes.len();
        Ok(bytes)
    }

    /// Overwrite-at-offset write, growing the content when it runs past the
    /// current end. The entry's write bit is re-checked here, so a chmod
    /// after open is honored.
    pub fn write(&mut self, fd: i32, bytes: &[u8]) -> Result<usize, FsError> {
        let desc = self.open_files.get(fd, "write")?;
        if !desc.mode.writable() {
            return Err(FsError::PermissionDenied {
                path: format!("fd {}", fd),
                operation: "write".to_string(),
            });
        }
        let entry_id = desc.entry;
        let inode = desc.inode;
        let offset = desc.offset;
        if self.store.contains(entry_id) {
            let entry = self.store.entry(entry_id);
            if entry.mode & PERM_WRITE == 0 {
                return Err(FsError::PermissionDenied {
                    path: self.build_path(entry_id),
                    operation: "write".to_string(),
                });
            }
        }
        let blob = self
            .store
            .blob_mut(inode)
            .ok_or(FsError::InvalidDescriptor {
                fd,
                operation: "write".to_string(),
            })?;
        let end = offset + bytes.len();
        if end > blob.data.len() {
            blob.data.resize(end, 0);
        }
        blob.data[offset..end].copy_from_slice(bytes);
        if self.store.contains(entry_id) {
            self.store.entry_mut(entry_id).mtime = chrono::Utc::now();
        }
        self.open_files.get_mut(fd, "write")?.offset = end;
        Ok(bytes.len())
    }

    /// Set the descriptor's offset; must land inside `[0, size]`. A
    /// descriptor whose content is gone reports EBADF like read and write.
    pub fn seek(&mut self, fd: i32, offset: i64) -> Result<(), FsError> {
        let desc = self.open_files.get(fd, "seek")?;
        let inode = desc.inode;
        let size = self
            .store
            .blob(inode)
            .map(|b| b.data.len() as i64)
            .ok_or(FsError::InvalidDescriptor {
                fd,
                operation: "seek".to_string(),
            })?;
        if offset < 0 || offset > size {
            return Err(FsError::InvalidOffset {
                offset,
                operation: "seek".to_string(),
            });
        }
        self.open_files.get_mut(fd, "seek")?.offset = offset as usize;
        Ok(())
    }

    /// Drop a descriptor. Content is mutated in place, so there is nothing
    /// to flush.
    pub fn close(&mut self, fd: i32) -> Result<(), FsError> {
        self.open_files.release(fd)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_file(content: &[u8]) -> FsState {
        let mut fs = FsState::new();
        fs.touch("/f").unwrap();
        fs.write_file("/f", content).unwrap();
        fs
    }

    #[test]
    fn test_descriptors_start_at_three_and_grow() {
        let mut fs = state_with_file(b"");
        let a = fs.open("/f", OpenMode::Read).unwrap();
        let b = fs.open("/f", OpenMode::Read).unwrap();
        assert_eq!(a, 3);
        assert_eq!(b, 4);
        fs.close(a).unwrap();
        // fds are monotonic, never recycled
        let c = fs.open("/f", OpenMode::Read).unwrap();
        assert_eq!(c, 5);
    }

    #[test]
    fn test_open_rejects_directory_and_missing() {
        let mut fs = FsState::new();
        fs.mkdir("/d").unwrap();
        assert!(matches!(
            fs.open("/d", OpenMode::Read).unwrap_err(),
            FsError::IsADirectory { .. }
        ));
        assert!(matches!(
            fs.open("/nope", OpenMode::Read).unwrap_err(),
            FsError::NotFound { .. }
        ));
    }

    #[test]
    fn test_open_checks_permission_mask() {
        let mut fs = state_with_file(b"x");
        fs.chmod(4, "/f").unwrap();
        assert!(fs.open("/f", OpenMode::Read).is_ok());
        assert!(matches!(
            fs.open("/f", OpenMode::Write).unwrap_err(),
            FsError::PermissionDenied { .. }
        ));
        assert!(matches!(
            fs.open("/f", OpenMode::ReadWrite).unwrap_err(),
            FsError::PermissionDenied { .. }
        ));
    }

    #[test]
    fn test_read_advances_offset_and_hits_eof() {
        let mut fs = state_with_file(b"hello world");
        let fd = fs.open("/f", OpenMode::Read).unwrap();
        assert_eq!(fs.read(fd, 5).unwrap(), b"hello");
        assert_eq!(fs.read(fd, 100).unwrap(), b" world");
        // end-of-content reads are empty, not errors
        assert_eq!(fs.read(fd, 10).unwrap(), b"");
    }

    #[test]
    fn test_read_requires_read_mode() {
        let mut fs = state_with_file(b"x");
        let fd = fs.open("/f", OpenMode::Write).unwrap();
        assert!(matches!(
            fs.read(fd, 1).unwrap_err(),
            FsError::PermissionDenied { .. }
        ));
    }

    #[test]
    fn test_write_overwrites_at_offset() {
        let mut fs = state_with_file(b"hello world");
        let fd = fs.open("/f", OpenMode::ReadWrite).unwrap();
        fs.seek(fd, 6).unwrap();
        fs.write(fd, b"there").unwrap();
        assert_eq!(fs.read_file("/f").unwrap(), b"hello there");
    }

    #[test]
    fn test_write_grows_content_past_end() {
        let mut fs = state_with_file(b"ab");
        let fd = fs.open("/f", OpenMode::Write).unwrap();
        fs.seek(fd, 2).unwrap();
        fs.write(fd, b"cd").unwrap();
        fs.write(fd, b"ef").unwrap();
        assert_eq!(fs.read_file("/f").unwrap(), b"abcdef");
    }

    #[test]
    fn test_write_permission_rechecked_after_chmod() {
        let mut fs = state_with_file(b"x");
        let fd = fs.open("/f", OpenMode::Write).unwrap();
        fs.chmod(4, "/f").unwrap();
        assert!(matches!(
            fs.write(fd, b"y").unwrap_err(),
            FsError::PermissionDenied { .. }
        ));
    }

    #[test]
    fn test_seek_bounds() {
        let mut fs = state_with_file(b"abc");
        let fd = fs.open("/f", OpenMode::Read).unwrap();
        fs.seek(fd, 0).unwrap();
        fs.seek(fd, 3).unwrap();
        assert!(matches!(
            fs.seek(fd, 4).unwrap_err(),
            FsError::InvalidOffset { .. }
        ));
        assert!(matches!(
            fs.seek(fd, -1).unwrap_err(),
            FsError::InvalidOffset { .. }
        ));
    }

    #[test]
    fn test_close_unknown_fd() {
        let mut fs = FsState::new();
        assert!(matches!(
            fs.close(42).unwrap_err(),
            FsError::InvalidDescriptor { .. }
        ));
    }

    #[test]
    fn test_write_through_hard_link_alias() {
        let mut fs = state_with_file(b"");
        fs.link("/f", "/g").unwrap();
        let out = fs.open("/g", OpenMode::Write).unwrap();
        fs.write(out, b"shared bytes").unwrap();
        let inp = fs.open("/f", OpenMode::Read).unwrap();
        assert_eq!(fs.read(inp, 64).unwrap(), b"shared bytes");
    }

    #[test]
    fn test_seek_stale_descriptor() {
        let mut fs = state_with_file(b"data");
        let fd = fs.open("/f", OpenMode::Read).unwrap();
        fs.rm("/f").unwrap();
        assert!(matches!(
            fs.seek(fd, 0).unwrap_err(),
            FsError::InvalidDescriptor { .. }
        ));
    }

    #[test]
    fn test_stale_descriptor_after_last_unlink() {
        let mut fs = state_with_file(b"data");
        let fd = fs.open("/f", OpenMode::Read).unwrap();
        fs.rm("/f").unwrap();
        assert!(matches!(
            fs.read(fd, 4).unwrap_err(),
            FsError::InvalidDescriptor { .. }
        ));
        // the descriptor itself can still be closed
        fs.close(fd).unwrap();
    }

    #[test]
    fn test_open_through_symlink() {
        let mut fs = state_with_file(b"via link");
        fs.symlink("/f", "/l").unwrap();
        let fd = fs.open("/l", OpenMode::Read).unwrap();
        assert_eq!(fs.read(fd, 64).unwrap(), b"via link");

        fs.rm("/f").unwrap();
        assert!(matches!(
            fs.open("/l", OpenMode::Read).unwrap_err(),
            FsError::DanglingLink { .. }
        ));
    }
}
