use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct SeekCommand;

#[async_trait]
impl Command for SeekCommand {
    fn name(&self) -> &'static str {
        "seek"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        if ctx.args.len() != 2 {
            return CommandResult::error("seek: usage: seek FD OFFSET\n".to_string());
        }
        let fd = match ctx.args[0].parse::<i32>() {
            Ok(fd) => fd,
            Err(_) => {
                return CommandResult::error(format!(
                    "seek: invalid descriptor '{}'\n",
                    ctx.args[0]
                ));
            }
        };
        let offset = match ctx.args[1].parse::<i64>() {
            Ok(o) => o,
            Err(_) => {
                return CommandResult::error(format!("seek: invalid offset '{}'\n", ctx.args[1]));
            }
        };
        match ctx.session.seek(fd, offset).await {
            Ok(()) => CommandResult::success(String::new()),
            Err(e) => CommandResult::error(format!("seek: {}\n", e)),
        }
    }
}
