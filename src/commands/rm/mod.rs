// src/commands/rm/mod.rs
use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct RmCommand;

#[async_trait]
impl Command for RmCommand {
    fn name(&self) -> &'static str {
        "rm"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: rm PATH...\n\n\
                 Remove files, links, and empty directories. Removing a\n\
                 symbolic link removes the link, not its target.\n"
                    .to_string(),
            );
        }
        if ctx.args.is_empty() {
            return CommandResult::error("rm: missing operand\n".to_string());
        }

        let mut stderr = String::new();
        let mut exit_code = 0;
        for path in &ctx.args {
            if let Err(e) = ctx.session.rm(path).await {
                stderr.push_str(&format!("rm: {}\n", e));
                exit_code = 1;
            }
        }
        CommandResult::with_exit_code(String::new(), stderr, exit_code)
    }
}
