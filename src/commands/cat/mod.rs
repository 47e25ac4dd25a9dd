// src/commands/cat/mod.rs
use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct CatCommand;

#[async_trait]
impl Command for CatCommand {
    fn name(&self) -> &'static str {
        "cat"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: cat PATH...\n\nPrint file contents, following symbolic links.\n"
                    .to_string(),
            );
        }
        if ctx.args.is_empty() {
            return CommandResult::error("cat: missing operand\n".to_string());
        }

        let mut stdout = String::new();
        let mut stderr = String::new();
        let mut exit_code = 0;
        for path in &ctx.args {
            match ctx.session.read_file(path).await {
                Ok(bytes) => stdout.push_str(&String::from_utf8_lossy(&bytes)),
                Err(e) => {
                    stderr.push_str(&format!("cat: {}\n", e));
                    exit_code = 1;
                }
            }
        }
        CommandResult::with_exit_code(stdout, stderr, exit_code)
    }
}
