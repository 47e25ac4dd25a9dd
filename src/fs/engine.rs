//! File-Tree Engine
//!
//! Path resolution, current-directory tracking, directory mutation, and the
//! hard-link / symbolic-link semantics. Everything here is synchronous and
//! single-writer; the session layer serializes access.

use super::open_files::OpenFileTable;
use super::store::*;
use super::types::*;

/// Longest symbolic-link chain followed before giving up. A chain that deep
/// never reaches real content, so exhaustion reports the link as dangling.
const MAX_LINK_FOLLOWS: usize = 40;

/// Outcome of a path walk. When the path does not fully resolve, `entry` is
/// `None` and `deepest_dir` is the last directory that did resolve, which is
/// what callers needing the containing directory work from.
#[derive(Debug, Clone, Copy)]
pub struct Resolved {
    pub entry: Option<EntryId>,
    pub deepest_dir: EntryId,
}

/// All mutable state of one file-system instance: the tree, the current
/// directory, and the open-file table. Constructed by `format`.
#[derive(Debug)]
pub struct FsState {
    pub store: EntryStore,
    pub cwd: EntryId,
    pub open_files: OpenFileTable,
}

impl FsState {
    pub fn new() -> Self {
        let store = EntryStore::new();
        let cwd = store.root();
        Self {
            store,
            cwd,
            open_files: OpenFileTable::new(),
        }
    }

    /// Reset to a single empty root and drop every open descriptor.
    pub fn format(&mut self) {
        *self = Self::new();
    }

    // ------------------------------------------------------------------
    // Tree Navigator
    // ------------------------------------------------------------------

    /// Walk a slash-delimited path from the root (absolute) or the current
    /// directory (relative). `.` and `..` are honored; `..` at the root
    /// stays at the root. Intermediate symbolic links are followed, with
    /// their health updated. The final component is never followed here;
    /// callers that access through a link call `follow_symlink` themselves.
    /// A trailing slash requires the final entry to be a directory, possibly
    /// through a link.
    ///
    /// An empty path resolves to the starting entry.
    pub fn resolve(&mut self, path: &str, operation: &str) -> Result<Resolved, FsError> {
        let start = if path.starts_with('/') {
            self.store.root()
        } else {
            self.cwd
        };
        let trailing_slash = path.len() > 1 && path.ends_with('/');
        let components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();

        let mut current = start;
        for (i, component) in components.iter().enumerate() {
            let last = i + 1 == components.len();
            match *component {
                "." => continue,
                ".." => {
                    current = self.store.entry(current).parent.unwrap_or(current);
                    continue;
                }
                name => {
                    let child = match self.store.lookup(current, name) {
                        Some(c) => c,
                        None => {
                            return Ok(Resolved {
                                entry: None,
                                deepest_dir: current,
                            })
                        }
                    };
                    if last {
                        if trailing_slash {
                            let target = self.follow_symlink(child, operation)?;
                            if !self.store.entry(target).is_directory() {
                                return Err(FsError::not_a_directory(path, operation));
                            }
                        }
                        return Ok(Resolved {
                            entry: Some(child),
                            deepest_dir: current,
                        });
                    }
                    let next = self.follow_symlink(child, operation)?;
                    if !self.store.entry(next).is_directory() {
                        return Err(FsError::not_a_directory(path, operation));
                    }
                    current = next;
                }
            }
        }
        Ok(Resolved {
            entry: Some(current),
            deepest_dir: current,
        })
    }

    /// Like `resolve`, but an unresolved path is an error.
    pub fn resolve_entry(&mut self, path: &str, operation: &str) -> Result<EntryId, FsError> {
        self.resolve(path, operation)?
            .entry
            .ok_or_else(|| FsError::not_found(path, operation))
    }

    /// Split a path into its containing directory (resolved) and final
    /// name. A bare name stays in the current directory.
    pub fn split_parent(
        &mut self,
        path: &str,
        operation: &str,
    ) -> Result<(EntryId, String), FsError> {
        let trimmed = path.trim_end_matches('/');
        let trimmed = if trimmed.is_empty() && path.starts_with('/') {
            "/"
        } else {
            trimmed
        };
        match trimmed.rfind('/') {
            None => Ok((self.cwd, trimmed.to_string())),
            Some(pos) => {
                let (dir_part, name) = trimmed.split_at(pos);
                let name = &name[1..];
                if name.is_empty() || name == "." || name == ".." {
                    return Err(FsError::name_conflict(path, operation));
                }
                let dir_path = if dir_part.is_empty() { "/" } else { dir_part };
                let dir = self.resolve_entry(dir_path, operation)?;
                let dir = self.follow_symlink(dir, operation)?;
                if !self.store.entry(dir).is_directory() {
                    return Err(FsError::not_a_directory(dir_path, operation));
                }
                Ok((dir, name.to_string()))
            }
        }
    }

    /// Re-resolve through a symbolic link, updating its health. Non-links
    /// pass through unchanged. Chains are followed to a bounded depth; a
    /// cycle or exhausted chain never reaches content and reports the link
    /// as dangling.
    pub fn follow_symlink(&mut self, id: EntryId, operation: &str) -> Result<EntryId, FsError> {
        let mut current = id;
        let mut follows = 0;
        while self.store.entry(current).is_symlink() {
            let target = self
                .store
                .entry(current)
                .symlink_target()
                .unwrap_or_default()
                .to_string();
            if follows >= MAX_LINK_FOLLOWS {
                self.set_health(current, LinkHealth::Dead);
                return Err(self.dangling(current, &target, operation));
            }
            follows += 1;
            match self.resolve(&target, operation)? {
                Resolved { entry: Some(next), .. } => {
                    self.set_health(current, LinkHealth::Alive);
                    current = next;
                }
                Resolved { entry: None, .. } => {
                    self.set_health(current, LinkHealth::Dead);
                    return Err(self.dangling(current, &target, operation));
                }
            }
        }
        Ok(current)
    }

    fn set_health(&mut self, id: EntryId, health: LinkHealth) {
        if let EntryKind::Symlink { health: h, .. } = &mut self.store.entry_mut(id).kind {
            *h = health;
        }
    }

    fn dangling(&self, id: EntryId, target: &str, operation: &str) -> FsError {
        FsError::DanglingLink {
            path: self.build_path(id),
            target: target.to_string(),
            operation: operation.to_string(),
        }
    }

    /// Absolute path of a live entry, built by walking parent references.
    pub fn build_path(&self, id: EntryId) -> String {
        let mut names = Vec::new();
        let mut current = id;
        while let Some(parent) = self.store.entry(current).parent {
            names.push(self.store.entry(current).name.clone());
            current = parent;
        }
        if names.is_empty() {
            return "/".to_string();
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    /// Change the current directory. Navigating into a symbolic link
    /// resolves through its target first; on failure the current directory
    /// is unchanged.
    pub fn cd(&mut self, path: &str) -> Result<(), FsError> {
        let id = self.resolve_entry(path, "cd")?;
        let id = self.follow_symlink(id, "cd")?;
        if !self.store.entry(id).is_directory() {
            return Err(FsError::not_a_directory(path, "cd"));
        }
        self.cwd = id;
        Ok(())
    }

    pub fn pwd(&self) -> String {
        self.build_path(self.cwd)
    }

    // ------------------------------------------------------------------
    // Directory Operations
    // ------------------------------------------------------------------

    pub fn mkdir(&mut self, path: &str) -> Result<EntryId, FsError> {
        let (dir, name) = self.split_parent(path, "mkdir")?;
        self.store.create_dir(dir, &name)
    }

    /// Create an empty file, or refresh the timestamp of an existing one.
    pub fn touch(&mut self, path: &str) -> Result<EntryId, FsError> {
        let (dir, name) = self.split_parent(path, "touch")?;
        if let Some(existing) = self.store.lookup(dir, &name) {
            self.store.entry_mut(existing).mtime = chrono::Utc::now();
            return Ok(existing);
        }
        self.store.create_file(dir, &name)
    }

    pub fn rmdir(&mut self, path: &str) -> Result<(), FsError> {
        let id = self.resolve_entry(path, "rmdir")?;
        let entry = self.store.entry(id);
        if !entry.is_directory() {
            return Err(FsError::not_a_directory(path, "rmdir"));
        }
        if !entry.children().is_empty() {
            return Err(FsError::DirectoryNotEmpty {
                path: path.to_string(),
                operation: "rmdir".to_string(),
            });
        }
        let parent = match entry.parent {
            Some(p) => p,
            None => {
                return Err(FsError::RootRemovalRejected {
                    operation: "rmdir".to_string(),
                })
            }
        };
        self.store.remove(parent, id);
        self.store.destroy(id);
        Ok(())
    }

    /// Remove a file, link, or empty directory. The final component is not
    /// followed, so `rm` on a symbolic link removes the link itself.
    pub fn rm(&mut self, path: &str) -> Result<(), FsError> {
        let id = self.resolve_entry(path, "rm")?;
        let entry = self.store.entry(id);
        if entry.is_directory() && !entry.children().is_empty() {
            return Err(FsError::DirectoryNotEmpty {
                path: path.to_string(),
                operation: "rm".to_string(),
            });
        }
        let parent = match entry.parent {
            Some(p) => p,
            None => {
                return Err(FsError::RootRemovalRejected {
                    operation: "rm".to_string(),
                })
            }
        };
        if self.cwd == id {
            self.cwd = parent;
        }
        self.store.remove(parent, id);
        self.store.destroy(id);
        Ok(())
    }

    /// Move or rename. The destination splits into a target directory and a
    /// new name; a destination without a slash keeps the source's parent. A
    /// name collision at the destination is rejected, as is moving a
    /// directory into its own subtree.
    pub fn mv(&mut self, src: &str, dest: &str) -> Result<(), FsError> {
        let id = self.resolve_entry(src, "mv")?;
        let old_parent = match self.store.entry(id).parent {
            Some(p) => p,
            None => {
                return Err(FsError::RootRemovalRejected {
                    operation: "mv".to_string(),
                })
            }
        };
        let (new_parent, new_name) = if dest.contains('/') {
            self.split_parent(dest, "mv")?
        } else {
            (old_parent, dest.to_string())
        };
        // the destination directory must not be the source or below it,
        // or the entry would become its own ancestor
        let mut probe = new_parent;
        loop {
            if probe == id {
                return Err(FsError::invalid_argument(dest, "mv"));
            }
            match self.store.entry(probe).parent {
                Some(p) => probe = p,
                None => break,
            }
        }
        if let Some(existing) = self.store.lookup(new_parent, &new_name) {
            if existing != id {
                return Err(FsError::name_conflict(dest, "mv"));
            }
        }
        self.store.remove(old_parent, id);
        self.store.entry_mut(id).name = new_name;
        self.store.insert(new_parent, id);
        Ok(())
    }

    /// Per-entry permission mask, 0..=7. Does not follow links: a symbolic
    /// link operand is rejected, never silently redirected to its target.
    pub fn chmod(&mut self, mode: u8, path: &str) -> Result<(), FsError> {
        let id = self.resolve_entry(path, "chmod")?;
        if self.store.entry(id).is_symlink() {
            return Err(FsError::permission_denied(path, "chmod"));
        }
        self.store.entry_mut(id).mode = mode & 0o7;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Link Manager
    // ------------------------------------------------------------------

    /// Hard link: a second directory entry sharing the source's inode and
    /// content. Directories may not be hard-linked. A symbolic-link source
    /// is followed to the underlying file first.
    pub fn link(&mut self, src: &str, dest: &str) -> Result<EntryId, FsError> {
        let id = self.resolve_entry(src, "ln")?;
        let id = self.follow_symlink(id, "ln")?;
        if self.store.entry(id).is_directory() {
            return Err(FsError::is_a_directory(src, "ln"));
        }
        let (dir, name) = self.split_parent(dest, "ln")?;
        self.store.add_hard_link(id, dir, &name)
    }

    /// Symbolic link: a fresh entry holding the source's absolute path as
    /// captured now. The source must resolve at creation time; afterwards
    /// the stored path is re-resolved on every access, so the target may be
    /// deleted and recreated.
    pub fn symlink(&mut self, src: &str, dest: &str) -> Result<EntryId, FsError> {
        let target_id = self.resolve_entry(src, "ln")?;
        let target_path = self.build_path(target_id);
        let (dir, name) = self.split_parent(dest, "ln")?;
        self.store.create_symlink(dir, &name, &target_path)
    }

    // ------------------------------------------------------------------
    // Content access (path-level)
    // ------------------------------------------------------------------

    /// Read a file's content, following symbolic links and enforcing the
    /// read bit.
    pub fn read_file(&mut self, path: &str) -> Result<Vec<u8>, FsError> {
        let id = self.resolve_entry(path, "cat")?;
        let id = self.follow_symlink(id, "cat")?;
        let entry = self.store.entry(id);
        if entry.is_directory() {
            return Err(FsError::is_a_directory(path, "cat"));
        }
        if entry.mode & PERM_READ == 0 {
            return Err(FsError::permission_denied(path, "cat"));
        }
        let inode = entry.inode;
        Ok(self
            .store
            .blob(inode)
            .map(|b| b.data.clone())
            .unwrap_or_default())
    }

    /// Replace a file's content wholesale, following symbolic links and
    /// enforcing the write bit.
    pub fn write_file(&mut self, path: &str, bytes: &[u8]) -> Result<(), FsError> {
        let id = self.resolve_entry(path, "write")?;
        let id = self.follow_symlink(id, "write")?;
        let entry = self.store.entry(id);
        if entry.is_directory() {
            return Err(FsError::is_a_directory(path, "write"));
        }
        if entry.mode & PERM_WRITE == 0 {
            return Err(FsError::permission_denied(path, "write"));
        }
        let inode = entry.inode;
        if let Some(blob) = self.store.blob_mut(inode) {
            blob.data = bytes.to_vec();
        }
        self.store.entry_mut(id).mtime = chrono::Utc::now();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Listing walks
    // ------------------------------------------------------------------

    fn list_row(&self, id: EntryId) -> ListEntry {
        let entry = self.store.entry(id);
        ListEntry {
            name: entry.name.clone(),
            inode: entry.inode.0,
            is_directory: entry.is_directory(),
            is_symlink: entry.is_symlink(),
            mode: entry.mode,
            link_count: self.store.link_count(entry.inode),
            size: self.store.size_of(id),
            mtime: entry.mtime,
            symlink_target: entry.symlink_target().map(str::to_string),
        }
    }

    /// Directory listing rows, sorted by name for presentation; the child
    /// list itself is unordered. Listing a symbolic link to a directory
    /// lists the target.
    pub fn list(&mut self, path: &str) -> Result<Vec<ListEntry>, FsError> {
        let id = self.resolve_entry(path, "ls")?;
        let id = self.follow_symlink(id, "ls")?;
        let entry = self.store.entry(id);
        if !entry.is_directory() {
            return Ok(vec![self.list_row(id)]);
        }
        let mut rows: Vec<ListEntry> = entry
            .children()
            .to_vec()
            .into_iter()
            .map(|c| self.list_row(c))
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    /// Depth-first recursive listing. Symbolic links are reported but not
    /// descended into, so a link back up the tree cannot loop the walk.
    pub fn tree(&mut self, path: &str) -> Result<Vec<TreeEntry>, FsError> {
        let id = self.resolve_entry(path, "tree")?;
        let id = self.follow_symlink(id, "tree")?;
        if !self.store.entry(id).is_directory() {
            return Err(FsError::not_a_directory(path, "tree"));
        }
        let mut rows = Vec::new();
        self.tree_walk(id, 0, &mut rows);
        Ok(rows)
    }

    fn tree_walk(&self, dir: EntryId, depth: usize, rows: &mut Vec<TreeEntry>) {
        let mut children: Vec<EntryId> = self.store.entry(dir).children().to_vec();
        children.sort_by(|&a, &b| self.store.entry(a).name.cmp(&self.store.entry(b).name));
        for child in children {
            let entry = self.store.entry(child);
            rows.push(TreeEntry {
                name: entry.name.clone(),
                inode: entry.inode.0,
                depth,
                is_directory: entry.is_directory(),
                is_symlink: entry.is_symlink(),
                symlink_target: entry.symlink_target().map(str::to_string),
            });
            if entry.is_directory() {
                self.tree_walk(child, depth + 1, rows);
            }
        }
    }

    /// Full-tree consistency walk: tallies entry kinds and re-resolves every
    /// symbolic link, flipping health and collecting the dangling ones.
    pub fn fsck(&mut self) -> FsckReport {
        let mut report = FsckReport::default();
        let mut stack = vec![self.store.root()];
        let mut links = Vec::new();
        while let Some(id) = stack.pop() {
            let entry = self.store.entry(id);
            match &entry.kind {
                EntryKind::Directory { children } => {
                    report.directories += 1;
                    stack.extend(children.iter().copied());
                }
                EntryKind::File => report.files += 1,
                EntryKind::Symlink { .. } => {
                    report.symlinks += 1;
                    links.push(id);
                }
            }
        }
        for id in links {
            if self.follow_symlink(id, "fsck").is_err() {
                report.dangling.push(self.build_path(id));
            }
        }
        report
    }
}

impl Default for FsState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> FsState {
        FsState::new()
    }

    #[test]
    fn test_resolve_absolute_and_relative() {
        let mut fs = state();
        let docs = fs.mkdir("/docs").unwrap();
        fs.touch("/docs/notes").unwrap();

        assert_eq!(fs.resolve_entry("/docs", "test").unwrap(), docs);
        fs.cd("docs").unwrap();
        let by_rel = fs.resolve_entry("notes", "test").unwrap();
        let by_abs = fs.resolve_entry("/docs/notes", "test").unwrap();
        assert_eq!(by_rel, by_abs);
    }

    #[test]
    fn test_resolve_dot_and_dotdot() {
        let mut fs = state();
        fs.mkdir("/a").unwrap();
        fs.mkdir("/a/b").unwrap();
        fs.cd("/a/b").unwrap();
        let a = fs.resolve_entry("..", "test").unwrap();
        assert_eq!(fs.build_path(a), "/a");
        let root = fs.resolve_entry("../..", "test").unwrap();
        assert_eq!(fs.build_path(root), "/");
        // .. at the root stays at the root
        let still_root = fs.resolve_entry("/..", "test").unwrap();
        assert_eq!(still_root, root);
    }

    #[test]
    fn test_resolve_failure_reports_deepest_dir() {
        let mut fs = state();
        let a = fs.mkdir("/a").unwrap();
        let r = fs.resolve("/a/missing", "test").unwrap();
        assert!(r.entry.is_none());
        assert_eq!(r.deepest_dir, a);
    }

    #[test]
    fn test_build_path_round_trip() {
        let mut fs = state();
        fs.mkdir("/a").unwrap();
        fs.mkdir("/a/b").unwrap();
        let c = fs.touch("/a/b/c").unwrap();
        let path = fs.build_path(c);
        assert_eq!(path, "/a/b/c");
        assert_eq!(fs.resolve_entry(&path, "test").unwrap(), c);
    }

    #[test]
    fn test_cd_and_pwd() {
        let mut fs = state();
        fs.mkdir("/docs").unwrap();
        assert_eq!(fs.pwd(), "/");
        fs.cd("docs").unwrap();
        assert_eq!(fs.pwd(), "/docs");
        let err = fs.cd("/docs/nope").unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
        // failed navigation leaves the current directory alone
        assert_eq!(fs.pwd(), "/docs");
    }

    #[test]
    fn test_cd_into_file_fails() {
        let mut fs = state();
        fs.touch("/f").unwrap();
        let err = fs.cd("/f").unwrap_err();
        assert!(matches!(err, FsError::NotADirectory { .. }));
    }

    #[test]
    fn test_mkdir_name_conflict() {
        let mut fs = state();
        fs.mkdir("/x").unwrap();
        let err = fs.mkdir("/x").unwrap_err();
        assert!(matches!(err, FsError::NameConflict { .. }));
    }

    #[test]
    fn test_touch_existing_refreshes_not_duplicates() {
        let mut fs = state();
        let f = fs.touch("/x").unwrap();
        fs.write_file("/x", b"kept").unwrap();
        let again = fs.touch("/x").unwrap();
        assert_eq!(f, again);
        assert_eq!(fs.read_file("/x").unwrap(), b"kept");
        assert_eq!(fs.list("/").unwrap().len(), 1);
    }

    #[test]
    fn test_rmdir_requires_empty() {
        let mut fs = state();
        fs.mkdir("/d").unwrap();
        fs.touch("/d/f").unwrap();
        let err = fs.rmdir("/d").unwrap_err();
        assert!(matches!(err, FsError::DirectoryNotEmpty { .. }));
        fs.rm("/d/f").unwrap();
        fs.rmdir("/d").unwrap();
        assert!(matches!(
            fs.resolve_entry("/d", "test").unwrap_err(),
            FsError::NotFound { .. }
        ));
    }

    #[test]
    fn test_rm_root_rejected() {
        let mut fs = state();
        assert!(matches!(
            fs.rm("/").unwrap_err(),
            FsError::RootRemovalRejected { .. }
        ));
        assert!(matches!(
            fs.rmdir("/").unwrap_err(),
            FsError::RootRemovalRejected { .. }
        ));
    }

    #[test]
    fn test_rm_cwd_falls_back_to_parent() {
        let mut fs = state();
        fs.mkdir("/d").unwrap();
        fs.cd("/d").unwrap();
        fs.rm("/d").unwrap();
        assert_eq!(fs.pwd(), "/");
    }

    #[test]
    fn test_mv_rename_and_move() {
        let mut fs = state();
        fs.mkdir("/a").unwrap();
        fs.touch("/f").unwrap();

        fs.mv("/f", "g").unwrap();
        assert!(fs.resolve("/f", "t").unwrap().entry.is_none());
        let g = fs.resolve_entry("/g", "t").unwrap();
        assert_eq!(fs.build_path(g), "/g");

        fs.mv("/g", "/a/g").unwrap();
        assert_eq!(fs.build_path(g), "/a/g");
    }

    #[test]
    fn test_mv_rejects_destination_collision() {
        let mut fs = state();
        fs.touch("/a").unwrap();
        fs.touch("/b").unwrap();
        let err = fs.mv("/a", "b").unwrap_err();
        assert!(matches!(err, FsError::NameConflict { .. }));
    }

    #[test]
    fn test_mv_into_own_subtree_rejected() {
        let mut fs = state();
        fs.mkdir("/a").unwrap();
        fs.mkdir("/a/b").unwrap();
        assert!(matches!(
            fs.mv("/a", "/a/x").unwrap_err(),
            FsError::InvalidArgument { .. }
        ));
        assert!(matches!(
            fs.mv("/a", "/a/b/a").unwrap_err(),
            FsError::InvalidArgument { .. }
        ));
        // the tree is untouched
        assert_eq!(fs.list("/").unwrap().len(), 1);
        let b = fs.resolve_entry("/a/b", "test").unwrap();
        assert_eq!(fs.build_path(b), "/a/b");
    }

    #[test]
    fn test_mv_cwd_into_own_subtree_keeps_pwd_working() {
        let mut fs = state();
        fs.mkdir("/a").unwrap();
        fs.cd("/a").unwrap();
        assert!(fs.mv("/a", "/a/x").is_err());
        assert_eq!(fs.pwd(), "/a");
    }

    #[test]
    fn test_trailing_slash_requires_directory() {
        let mut fs = state();
        fs.touch("/f").unwrap();
        fs.mkdir("/d").unwrap();
        assert!(matches!(
            fs.resolve_entry("/f/", "cat").unwrap_err(),
            FsError::NotADirectory { .. }
        ));
        assert!(matches!(
            fs.cd("/f/").unwrap_err(),
            FsError::NotADirectory { .. }
        ));
        fs.cd("/d/").unwrap();
        assert_eq!(fs.pwd(), "/d");

        // a link to a directory still accepts the slash
        fs.cd("/").unwrap();
        fs.symlink("/d", "/l").unwrap();
        fs.cd("/l/").unwrap();
        assert_eq!(fs.pwd(), "/d");
    }

    #[test]
    fn test_mv_missing_target_dir() {
        let mut fs = state();
        fs.touch("/f").unwrap();
        let err = fs.mv("/f", "/nope/f").unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
    }

    #[test]
    fn test_chmod_sets_mask() {
        let mut fs = state();
        fs.touch("/f").unwrap();
        fs.chmod(0, "/f").unwrap();
        assert!(matches!(
            fs.read_file("/f").unwrap_err(),
            FsError::PermissionDenied { .. }
        ));
        fs.chmod(6, "/f").unwrap();
        assert!(fs.read_file("/f").is_ok());
    }

    #[test]
    fn test_chmod_rejects_symlink() {
        let mut fs = state();
        fs.touch("/f").unwrap();
        fs.symlink("/f", "/l").unwrap();
        let err = fs.chmod(0, "/l").unwrap_err();
        assert!(matches!(err, FsError::PermissionDenied { .. }));
    }

    #[test]
    fn test_chmod_per_alias_masks() {
        let mut fs = state();
        fs.touch("/a").unwrap();
        fs.link("/a", "/b").unwrap();
        fs.chmod(0, "/a").unwrap();
        // permissions are per directory entry, not per inode
        let rows = fs.list("/").unwrap();
        let a = rows.iter().find(|r| r.name == "a").unwrap();
        let b = rows.iter().find(|r| r.name == "b").unwrap();
        assert_eq!(a.mode, 0);
        assert_eq!(b.mode, 6);
    }

    #[test]
    fn test_hard_link_shares_content() {
        let mut fs = state();
        fs.touch("/a").unwrap();
        fs.link("/a", "/b").unwrap();
        fs.write_file("/b", b"through b").unwrap();
        assert_eq!(fs.read_file("/a").unwrap(), b"through b");

        let rows = fs.list("/").unwrap();
        assert!(rows.iter().all(|r| r.link_count == 2));

        fs.rm("/a").unwrap();
        assert_eq!(fs.read_file("/b").unwrap(), b"through b");
        let rows = fs.list("/").unwrap();
        assert_eq!(rows[0].link_count, 1);
    }

    #[test]
    fn test_hard_link_to_directory_rejected() {
        let mut fs = state();
        fs.mkdir("/d").unwrap();
        let err = fs.link("/d", "/l").unwrap_err();
        assert!(matches!(err, FsError::IsADirectory { .. }));
    }

    #[test]
    fn test_symlink_requires_live_source() {
        let mut fs = state();
        let err = fs.symlink("/missing", "/l").unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
    }

    #[test]
    fn test_symlink_dead_and_revived() {
        let mut fs = state();
        fs.touch("/a").unwrap();
        fs.write_file("/a", b"v1").unwrap();
        let l = fs.symlink("/a", "/b").unwrap();
        assert_eq!(fs.read_file("/b").unwrap(), b"v1");
        assert!(matches!(
            fs.store.entry(l).kind,
            EntryKind::Symlink { health: LinkHealth::Alive, .. }
        ));

        fs.rm("/a").unwrap();
        let err = fs.read_file("/b").unwrap_err();
        assert!(matches!(err, FsError::DanglingLink { .. }));
        assert!(matches!(
            fs.store.entry(l).kind,
            EntryKind::Symlink { health: LinkHealth::Dead, .. }
        ));

        // recreate at the same path: the stored path re-resolves
        fs.touch("/a").unwrap();
        fs.write_file("/a", b"v2").unwrap();
        assert_eq!(fs.read_file("/b").unwrap(), b"v2");
        assert!(matches!(
            fs.store.entry(l).kind,
            EntryKind::Symlink { health: LinkHealth::Alive, .. }
        ));
    }

    #[test]
    fn test_cd_through_symlink() {
        let mut fs = state();
        fs.mkdir("/real").unwrap();
        fs.symlink("/real", "/door").unwrap();
        fs.cd("/door").unwrap();
        assert_eq!(fs.pwd(), "/real");

        fs.cd("/").unwrap();
        fs.rm("/real").unwrap();
        let err = fs.cd("/door").unwrap_err();
        assert!(matches!(err, FsError::DanglingLink { .. }));
        assert_eq!(fs.pwd(), "/");
    }

    #[test]
    fn test_list_symlink_dir_lists_target() {
        let mut fs = state();
        fs.mkdir("/d").unwrap();
        fs.touch("/d/inner").unwrap();
        fs.symlink("/d", "/l").unwrap();
        let rows = fs.list("/l").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "inner");
    }

    #[test]
    fn test_tree_rows() {
        let mut fs = state();
        fs.mkdir("/a").unwrap();
        fs.mkdir("/a/b").unwrap();
        fs.touch("/a/b/f").unwrap();
        let rows = fs.tree("/").unwrap();
        let shape: Vec<(usize, &str)> =
            rows.iter().map(|r| (r.depth, r.name.as_str())).collect();
        assert_eq!(shape, vec![(0, "a"), (1, "b"), (2, "f")]);
    }

    #[test]
    fn test_fsck_counts_and_dangling() {
        let mut fs = state();
        fs.mkdir("/d").unwrap();
        fs.touch("/d/f").unwrap();
        fs.touch("/g").unwrap();
        fs.symlink("/g", "/ok").unwrap();
        fs.symlink("/g", "/bad").unwrap();
        fs.rm("/g").unwrap();
        let report = fs.fsck();
        assert_eq!(report.directories, 2); // root + /d
        assert_eq!(report.files, 1);
        assert_eq!(report.symlinks, 2);
        assert_eq!(report.dangling.len(), 2);
    }

    #[test]
    fn test_format_resets_everything() {
        let mut fs = state();
        fs.mkdir("/a").unwrap();
        fs.cd("/a").unwrap();
        fs.format();
        assert_eq!(fs.pwd(), "/");
        assert!(fs.list("/").unwrap().is_empty());
    }

    #[test]
    fn test_sibling_names_stay_unique() {
        let mut fs = state();
        for _ in 0..3 {
            fs.touch("/n").ok();
            fs.mkdir("/n").ok();
        }
        let rows = fs.list("/").unwrap();
        assert_eq!(rows.len(), 1);
        fs.rm("/n").unwrap();
        fs.mkdir("/n").unwrap();
        let rows = fs.list("/").unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_directory);
    }
}
