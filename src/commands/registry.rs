// src/commands/registry.rs
use std::collections::HashMap;

use super::types::Command;

pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

use super::cat::CatCommand;
use super::cd_cmd::CdCommand;
use super::chmod::ChmodCommand;
use super::close_cmd::CloseCommand;
use super::fsck_cmd::FsckCommand;
use super::help_cmd::HelpCommand;
use super::ln::LnCommand;
use super::ls::LsCommand;
use super::lsof_cmd::LsofCommand;
use super::mkdir::MkdirCommand;
use super::mkfs_cmd::{FormatCommand, MkfsCommand};
use super::mv::MvCommand;
use super::open_cmd::OpenCommand;
use super::pwd::PwdCommand;
use super::read_cmd::ReadCommand;
use super::rm::RmCommand;
use super::rmdir_cmd::RmdirCommand;
use super::seek_cmd::SeekCommand;
use super::touch::TouchCommand;
use super::tree_cmd::TreeCommand;
use super::write_cmd::WriteCommand;

impl CommandRegistry {
    /// Registry holding every shell command.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(CatCommand));
        registry.register(Box::new(CdCommand));
        registry.register(Box::new(ChmodCommand));
        registry.register(Box::new(CloseCommand));
        registry.register(Box::new(FormatCommand));
        registry.register(Box::new(FsckCommand));
        registry.register(Box::new(HelpCommand));
        registry.register(Box::new(LnCommand));
        registry.register(Box::new(LsCommand));
        registry.register(Box::new(LsofCommand));
        registry.register(Box::new(MkdirCommand));
        registry.register(Box::new(MkfsCommand));
        registry.register(Box::new(MvCommand));
        registry.register(Box::new(OpenCommand));
        registry.register(Box::new(PwdCommand));
        registry.register(Box::new(ReadCommand));
        registry.register(Box::new(RmCommand));
        registry.register(Box::new(RmdirCommand));
        registry.register(Box::new(SeekCommand));
        registry.register(Box::new(TouchCommand));
        registry.register(Box::new(TreeCommand));
        registry.register(Box::new(WriteCommand));
        registry
    }
}
