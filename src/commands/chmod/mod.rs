// src/commands/chmod/mod.rs
use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct ChmodCommand;

#[async_trait]
impl Command for ChmodCommand {
    fn name(&self) -> &'static str {
        "chmod"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        let args = &ctx.args;
        if args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: chmod MODE PATH...\n\n\
                 Set the 3-bit permission mask (read=4, write=2, execute=1).\n\
                 MODE is a single octal digit 0-7. Symbolic links are\n\
                 read-only and rejected.\n"
                    .to_string(),
            );
        }
        if args.len() < 2 {
            return CommandResult::error("chmod: missing operand\n".to_string());
        }

        let mode = match args[0].parse::<u8>() {
            Ok(m) if m <= 7 => m,
            _ => {
                return CommandResult::error(format!("chmod: invalid mode: '{}'\n", args[0]));
            }
        };

        let mut stderr = String::new();
        let mut exit_code = 0;
        for path in &args[1..] {
            if let Err(e) = ctx.session.chmod(mode, path).await {
                stderr.push_str(&format!("chmod: {}\n", e));
                exit_code = 1;
            }
        }
        CommandResult::with_exit_code(String::new(), stderr, exit_code)
    }
}
