//! In-memory hierarchical file system: entry store, tree navigation,
//! hard/symbolic links, and the open-file-descriptor table.

pub mod engine;
pub mod open_files;
pub mod session;
pub mod store;
pub mod types;

pub use engine::{FsState, Resolved};
pub use open_files::OpenFileTable;
pub use session::FsSession;
pub use store::{Entry, EntryId, EntryKind, EntryStore, Inode};
pub use types::*;
