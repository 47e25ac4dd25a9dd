use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::OpenMode;

pub struct OpenCommand;

#[async_trait]
impl Command for OpenCommand {
    fn name(&self) -> &'static str {
        "open"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: open PATH MODE\n\n\
                 Open a file and print its descriptor. MODE is r, w, or rw.\n"
                    .to_string(),
            );
        }
        if ctx.args.len() != 2 {
            return CommandResult::error("open: usage: open PATH MODE\n".to_string());
        }
        let mode = match OpenMode::from_str(&ctx.args[1]) {
            Some(m) => m,
            None => {
                return CommandResult::error(format!(
                    "open: invalid mode '{}' (use r, w, or rw)\n",
                    ctx.args[1]
                ));
            }
        };
        match ctx.session.open(&ctx.args[0], mode).await {
            Ok(fd) => CommandResult::success(format!("{}\n", fd)),
            Err(e) => CommandResult::error(format!("open: {}\n", e)),
        }
    }
}
