use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct WriteCommand;

#[async_trait]
impl Command for WriteCommand {
    fn name(&self) -> &'static str {
        "write"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: write FD|PATH TEXT\n\n\
                 With an open descriptor, write TEXT at its offset. With a\n\
                 path, replace the file's content with TEXT.\n"
                    .to_string(),
            );
        }
        if ctx.args.len() != 2 {
            return CommandResult::error("write: usage: write FD|PATH TEXT\n".to_string());
        }
        let target = &ctx.args[0];
        let bytes = ctx.args[1].as_bytes();

        // A numeric first operand names a descriptor when one is open under
        // that number; otherwise it is treated as a file name.
        if let Ok(fd) = target.parse::<i32>() {
            if ctx.session.is_open_fd(fd).await {
                return match ctx.session.write(fd, bytes).await {
                    Ok(n) => CommandResult::success(format!("{} bytes\n", n)),
                    Err(e) => CommandResult::error(format!("write: {}\n", e)),
                };
            }
        }
        match ctx.session.write_file(target, bytes).await {
            Ok(()) => CommandResult::success(String::new()),
            Err(e) => CommandResult::error(format!("write: {}\n", e)),
        }
    }
}
