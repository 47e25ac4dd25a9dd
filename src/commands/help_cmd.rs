use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct HelpCommand;

const HELP: &str = "Available commands:
  mkfs | format        - reset the file system to an empty root
  touch NAME...        - create files
  mkdir PATH...        - create directories
  rmdir PATH...        - remove empty directories
  cd [PATH]            - change directory (no argument: root)
  pwd                  - print the current directory
  ls [-l] [-i] [PATH]  - list directory contents
  cat PATH...          - print file contents
  chmod MODE PATH...   - set the permission mask (0-7)
  ln [-s] SRC DEST     - create a hard or symbolic link
  rm PATH...           - remove files, links, empty directories
  mv SRC DEST          - move or rename
  open PATH MODE       - open a file (r, w, rw), prints the descriptor
  read FD N            - read N bytes from a descriptor
  write FD|PATH TEXT   - write through a descriptor or replace a file
  seek FD OFFSET       - set a descriptor's offset
  close FD             - release a descriptor
  tree [-i] [PATH]     - recursive listing
  fsck                 - count entries, report dangling links
  lsof                 - list open descriptors
  help                 - show this help
  exit                 - leave the shell
";

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    async fn execute(&self, _ctx: CommandContext) -> CommandResult {
        CommandResult::success(HELP.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::FsSession;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_help_mentions_every_command() {
        let result = HelpCommand
            .execute(CommandContext {
                args: vec![],
                session: Arc::new(FsSession::new()),
            })
            .await;
        for name in ["mkfs", "ln", "fsck", "seek", "tree", "exit"] {
            assert!(result.stdout.contains(name), "help missing {}", name);
        }
    }
}
