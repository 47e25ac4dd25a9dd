// src/commands/touch/mod.rs
use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct TouchCommand;

#[async_trait]
impl Command for TouchCommand {
    fn name(&self) -> &'static str {
        "touch"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: touch NAME...\n\n\
                 Create empty files, or refresh the timestamp of existing ones.\n"
                    .to_string(),
            );
        }
        if ctx.args.is_empty() {
            return CommandResult::error("touch: missing file operand\n".to_string());
        }

        let mut stderr = String::new();
        let mut exit_code = 0;
        for path in &ctx.args {
            if let Err(e) = ctx.session.touch(path).await {
                stderr.push_str(&format!("touch: {}\n", e));
                exit_code = 1;
            }
        }
        CommandResult::with_exit_code(String::new(), stderr, exit_code)
    }
}
