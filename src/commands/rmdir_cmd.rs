use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct RmdirCommand;

#[async_trait]
impl Command for RmdirCommand {
    fn name(&self) -> &'static str {
        "rmdir"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: rmdir PATH...\n\nRemove empty directories.\n".to_string(),
            );
        }
        if ctx.args.is_empty() {
            return CommandResult::error("rmdir: missing operand\n".to_string());
        }

        let mut stderr = String::new();
        let mut exit_code = 0;
        for path in &ctx.args {
            if let Err(e) = ctx.session.rmdir(path).await {
                stderr.push_str(&format!("rmdir: {}\n", e));
                exit_code = 1;
            }
        }
        CommandResult::with_exit_code(String::new(), stderr, exit_code)
    }
}
