use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct CloseCommand;

#[async_trait]
impl Command for CloseCommand {
    fn name(&self) -> &'static str {
        "close"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        if ctx.args.len() != 1 {
            return CommandResult::error("close: usage: close FD\n".to_string());
        }
        let fd = match ctx.args[0].parse::<i32>() {
            Ok(fd) => fd,
            Err(_) => {
                return CommandResult::error(format!(
                    "close: invalid descriptor '{}'\n",
                    ctx.args[0]
                ));
            }
        };
        match ctx.session.close(fd).await {
            Ok(()) => CommandResult::success(String::new()),
            Err(e) => CommandResult::error(format!("close: {}\n", e)),
        }
    }
}
