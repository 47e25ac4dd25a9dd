//! Entry Store
//!
//! The id-keyed entry arena, inode allocation, and the refcounted content
//! table shared by hard links. `parent` and `children` hold ids rather than
//! references, so the parent back-pointer never participates in ownership.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::types::*;

/// Identity of one directory entry. Hard-link aliases are distinct entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub u64);

/// Inode number, shared by every hard-link alias of one content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Inode(pub u64);

#[derive(Debug, Clone)]
pub enum EntryKind {
    File,
    Directory { children: Vec<EntryId> },
    Symlink { target: String, health: LinkHealth },
}

/// A tree node: file, directory, or symbolic link.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: EntryId,
    pub inode: Inode,
    pub name: String,
    pub mode: u8,
    /// None only for the root.
    pub parent: Option<EntryId>,
    pub mtime: DateTime<Utc>,
    pub kind: EntryKind,
}

impl Entry {
    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File)
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory { .. })
    }

    pub fn is_symlink(&self) -> bool {
        matches!(self.kind, EntryKind::Symlink { .. })
    }

    pub fn children(&self) -> &[EntryId] {
        match &self.kind {
            EntryKind::Directory { children } => children,
            _ => &[],
        }
    }

    pub fn symlink_target(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Symlink { target, .. } => Some(target),
            _ => None,
        }
    }
}

/// Shared content of one inode. `links` counts the hard-link aliases; the
/// blob is dropped when the count reaches zero.
#[derive(Debug, Clone)]
pub struct Blob {
    pub data: Vec<u8>,
    pub links: u32,
}

/// Owns every entry and every content blob of one file-system instance.
#[derive(Debug)]
pub struct EntryStore {
    entries: HashMap<EntryId, Entry>,
    blobs: HashMap<Inode, Blob>,
    next_entry: u64,
    next_inode: u64,
    root: EntryId,
}

impl EntryStore {
    /// A fresh store holding only the root directory.
    pub fn new() -> Self {
        let root = EntryId(1);
        let mut entries = HashMap::new();
        entries.insert(
            root,
            Entry {
                id: root,
                inode: Inode(1),
                name: String::new(),
                mode: DEFAULT_DIR_MODE,
                parent: None,
                mtime: Utc::now(),
                kind: EntryKind::Directory { children: Vec::new() },
            },
        );
        Self {
            entries,
            blobs: HashMap::new(),
            next_entry: 2,
            next_inode: 2,
            root,
        }
    }

    pub fn root(&self) -> EntryId {
        self.root
    }

    pub fn entry(&self, id: EntryId) -> &Entry {
        &self.entries[&id]
    }

    pub fn entry_mut(&mut self, id: EntryId) -> &mut Entry {
        self.entries.get_mut(&id).expect("entry id points into the arena")
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn blob(&self, inode: Inode) -> Option<&Blob> {
        self.blobs.get(&inode)
    }

    pub fn blob_mut(&mut self, inode: Inode) -> Option<&mut Blob> {
        self.blobs.get_mut(&inode)
    }

    /// Hard-link count of an inode; entries without a blob (directories,
    /// symbolic links) always report 1.
    pub fn link_count(&self, inode: Inode) -> u32 {
        self.blobs.get(&inode).map(|b| b.links).unwrap_or(1)
    }

    /// Content length for listing purposes.
    pub fn size_of(&self, id: EntryId) -> u64 {
        let entry = self.entry(id);
        match &entry.kind {
            EntryKind::File => self
                .blobs
                .get(&entry.inode)
                .map(|b| b.data.len() as u64)
                .unwrap_or(0),
            EntryKind::Symlink { target, .. } => target.len() as u64,
            EntryKind::Directory { .. } => 0,
        }
    }

    fn alloc_entry_id(&mut self) -> EntryId {
        let id = EntryId(self.next_entry);
        self.next_entry += 1;
        id
    }

    fn alloc_inode(&mut self) -> Inode {
        let inode = Inode(self.next_inode);
        self.next_inode += 1;
        inode
    }

    /// Linear scan of a directory's children by name.
    pub fn lookup(&self, dir: EntryId, name: &str) -> Option<EntryId> {
        self.entry(dir)
            .children()
            .iter()
            .copied()
            .find(|&c| self.entry(c).name == name)
    }

    /// Attach an existing entry under a directory.
    pub fn insert(&mut self, dir: EntryId, child: EntryId) {
        self.entry_mut(child).parent = Some(dir);
        if let EntryKind::Directory { children } = &mut self.entry_mut(dir).kind {
            children.push(child);
        }
    }

    /// Detach an entry from a directory by identity, not name. Hard-linked
    /// entries may share a name elsewhere in the tree.
    pub fn remove(&mut self, dir: EntryId, child: EntryId) {
        if let EntryKind::Directory { children } = &mut self.entry_mut(dir).kind {
            children.retain(|&c| c != child);
        }
        self.entry_mut(child).parent = None;
    }

    fn check_name(&self, parent: EntryId, name: &str, operation: &str) -> Result<(), FsError> {
        if self.lookup(parent, name).is_some() {
            return Err(FsError::name_conflict(name, operation));
        }
        Ok(())
    }

    /// Create an empty regular file with its own inode and content blob.
    pub fn create_file(&mut self, parent: EntryId, name: &str) -> Result<EntryId, FsError> {
        self.check_name(parent, name, "touch")?;
        let id = self.alloc_entry_id();
        let inode = self.alloc_inode();
        self.blobs.insert(inode, Blob { data: Vec::new(), links: 1 });
        self.entries.insert(
            id,
            Entry {
                id,
                inode,
                name: name.to_string(),
                mode: DEFAULT_FILE_MODE,
                parent: Some(parent),
                mtime: Utc::now(),
                kind: EntryKind::File,
            },
        );
        self.insert(parent, id);
        Ok(id)
    }

    pub fn create_dir(&mut self, parent: EntryId, name: &str) -> Result<EntryId, FsError> {
        self.check_name(parent, name, "mkdir")?;
        let id = self.alloc_entry_id();
        let inode = self.alloc_inode();
        self.entries.insert(
            id,
            Entry {
                id,
                inode,
                name: name.to_string(),
                mode: DEFAULT_DIR_MODE,
                parent: Some(parent),
                mtime: Utc::now(),
                kind: EntryKind::Directory { children: Vec::new() },
            },
        );
        self.insert(parent, id);
        Ok(id)
    }

    /// Create a symbolic link. The target path is stored as a string and
    /// re-resolved on every access, never cached as a live reference.
    pub fn create_symlink(
        &mut self,
        parent: EntryId,
        name: &str,
        target: &str,
    ) -> Result<EntryId, FsError> {
        self.check_name(parent, name, "ln")?;
        let id = self.alloc_entry_id();
        let inode = self.alloc_inode();
        self.entries.insert(
            id,
            Entry {
                id,
                inode,
                name: name.to_string(),
                mode: DEFAULT_DIR_MODE,
                parent: Some(parent),
                mtime: Utc::now(),
                kind: EntryKind::Symlink {
                    target: target.to_string(),
                    health: LinkHealth::Unknown,
                },
            },
        );
        self.insert(parent, id);
        Ok(id)
    }

    /// Create a hard-link alias of `src`: same inode, same blob, same mask.
    pub fn add_hard_link(
        &mut self,
        src: EntryId,
        parent: EntryId,
        name: &str,
    ) -> Result<EntryId, FsError> {
        self.check_name(parent, name, "ln")?;
        let (inode, mode) = {
            let entry = self.entry(src);
            (entry.inode, entry.mode)
        };
        if let Some(blob) = self.blobs.get_mut(&inode) {
            blob.links += 1;
        }
        let id = self.alloc_entry_id();
        self.entries.insert(
            id,
            Entry {
                id,
                inode,
                name: name.to_string(),
                mode,
                parent: Some(parent),
                mtime: Utc::now(),
                kind: EntryKind::File,
            },
        );
        self.insert(parent, id);
        Ok(id)
    }

    /// Destroy an entry and, post-order, everything below it. Content is
    /// released only when the last hard-link alias of its inode goes away.
    /// The caller detaches the entry from its parent first.
    pub fn destroy(&mut self, id: EntryId) {
        let children: Vec<EntryId> = self.entry(id).children().to_vec();
        for child in children {
            self.destroy(child);
        }
        if let Some(entry) = self.entries.remove(&id) {
            if let Some(blob) = self.blobs.get_mut(&entry.inode) {
                blob.links -= 1;
                if blob.links == 0 {
                    self.blobs.remove(&entry.inode);
                }
            }
        }
    }
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
