//! File-System Session
//!
//! `FsSession` is the one object the command layer talks to. It wraps the
//! whole mutable state (tree, current directory, descriptor table) behind a
//! single lock; commands never see the engine directly. Operations are
//! processed one at a time, matching the single-writer design.

use tokio::sync::RwLock;

use super::engine::FsState;
use super::types::*;

pub struct FsSession {
    state: RwLock<FsState>,
}

impl FsSession {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(FsState::new()),
        }
    }

    /// Reset to a single empty root; every open descriptor is dropped.
    pub async fn format(&self) {
        self.state.write().await.format();
    }

    pub async fn touch(&self, path: &str) -> Result<(), FsError> {
        self.state.write().await.touch(path).map(|_| ())
    }

    pub async fn mkdir(&self, path: &str) -> Result<(), FsError> {
        self.state.write().await.mkdir(path).map(|_| ())
    }

    pub async fn rmdir(&self, path: &str) -> Result<(), FsError> {
        self.state.write().await.rmdir(path)
    }

    pub async fn rm(&self, path: &str) -> Result<(), FsError> {
        self.state.write().await.rm(path)
    }

    pub async fn mv(&self, src: &str, dest: &str) -> Result<(), FsError> {
        self.state.write().await.mv(src, dest)
    }

    pub async fn cd(&self, path: &str) -> Result<(), FsError> {
        self.state.write().await.cd(path)
    }

    pub async fn pwd(&self) -> String {
        self.state.read().await.pwd()
    }

    pub async fn chmod(&self, mode: u8, path: &str) -> Result<(), FsError> {
        self.state.write().await.chmod(mode, path)
    }

    pub async fn link(&self, src: &str, dest: &str) -> Result<(), FsError> {
        self.state.write().await.link(src, dest).map(|_| ())
    }

    pub async fn symlink(&self, src: &str, dest: &str) -> Result<(), FsError> {
        self.state.write().await.symlink(src, dest).map(|_| ())
    }

    /// Listing re-resolves symbolic links, so it takes the write lock like
    /// every other access that can flip link health.
    pub async fn list(&self, path: &str) -> Result<Vec<ListEntry>, FsError> {
        self.state.write().await.list(path)
    }

    pub async fn read_file(&self, path: &str) -> Result<Vec<u8>, FsError> {
        self.state.write().await.read_file(path)
    }

    pub async fn write_file(&self, path: &str, bytes: &[u8]) -> Result<(), FsError> {
        self.state.write().await.write_file(path, bytes)
    }

    pub async fn tree(&self, path: &str) -> Result<Vec<TreeEntry>, FsError> {
        self.state.write().await.tree(path)
    }

    pub async fn fsck(&self) -> FsckReport {
        self.state.write().await.fsck()
    }

    pub async fn open(&self, path: &str, mode: OpenMode) -> Result<i32, FsError> {
        self.state.write().await.open(path, mode)
    }

    pub async fn read(&self, fd: i32, n: usize) -> Result<Vec<u8>, FsError> {
        self.state.write().await.read(fd, n)
    }

    pub async fn write(&self, fd: i32, bytes: &[u8]) -> Result<usize, FsError> {
        self.state.write().await.write(fd, bytes)
    }

    pub async fn seek(&self, fd: i32, offset: i64) -> Result<(), FsError> {
        self.state.write().await.seek(fd, offset)
    }

    pub async fn close(&self, fd: i32) -> Result<(), FsError> {
        self.state.write().await.close(fd)
    }

    pub async fn is_open_fd(&self, fd: i32) -> bool {
        self.state.read().await.open_files.get(fd, "stat").is_ok()
    }

    /// Open descriptors in allocation order: (fd, path, mode, offset).
    pub async fn open_descriptors(&self) -> Vec<(i32, String, OpenMode, usize)> {
        let state = self.state.read().await;
        state
            .open_files
            .iter()
            .map(|(fd, d)| {
                let path = if state.store.contains(d.entry) {
                    state.build_path(d.entry)
                } else {
                    "(deleted)".to_string()
                };
                (fd, path, d.mode, d.offset)
            })
            .collect()
    }
}

impl Default for FsSession {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
