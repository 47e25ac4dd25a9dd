// src/commands/mod.rs
pub mod cat;
pub mod cd_cmd;
pub mod chmod;
pub mod close_cmd;
pub mod fsck_cmd;
pub mod help_cmd;
pub mod ln;
pub mod ls;
pub mod lsof_cmd;
pub mod mkdir;
pub mod mkfs_cmd;
pub mod mv;
pub mod open_cmd;
pub mod pwd;
pub mod read_cmd;
pub mod registry;
pub mod rm;
pub mod rmdir_cmd;
pub mod seek_cmd;
pub mod touch;
pub mod tree_cmd;
pub mod types;
pub mod write_cmd;

pub use registry::CommandRegistry;
pub use types::{Command, CommandContext, CommandResult};
