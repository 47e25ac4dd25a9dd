// src/commands/mv/mod.rs
use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct MvCommand;

#[async_trait]
impl Command for MvCommand {
    fn name(&self) -> &'static str {
        "mv"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: mv SRC DEST\n\n\
                 Move or rename an entry. A DEST without a slash renames in\n\
                 place; an existing name at the destination is rejected.\n"
                    .to_string(),
            );
        }
        if ctx.args.len() != 2 {
            return CommandResult::error("mv: missing file operand\n".to_string());
        }

        match ctx.session.mv(&ctx.args[0], &ctx.args[1]).await {
            Ok(()) => CommandResult::success(String::new()),
            Err(e) => CommandResult::error(format!("mv: {}\n", e)),
        }
    }
}
