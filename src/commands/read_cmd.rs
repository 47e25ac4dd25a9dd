use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct ReadCommand;

#[async_trait]
impl Command for ReadCommand {
    fn name(&self) -> &'static str {
        "read"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        if ctx.args.len() != 2 {
            return CommandResult::error("read: usage: read FD N\n".to_string());
        }
        let fd = match ctx.args[0].parse::<i32>() {
            Ok(fd) => fd,
            Err(_) => {
                return CommandResult::error(format!(
                    "read: invalid descriptor '{}'\n",
                    ctx.args[0]
                ));
            }
        };
        let n = match ctx.args[1].parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                return CommandResult::error(format!("read: invalid count '{}'\n", ctx.args[1]));
            }
        };
        match ctx.session.read(fd, n).await {
            Ok(bytes) => {
                let mut stdout = String::from_utf8_lossy(&bytes).to_string();
                if !stdout.is_empty() && !stdout.ends_with('\n') {
                    stdout.push('\n');
                }
                CommandResult::success(stdout)
            }
            Err(e) => CommandResult::error(format!("read: {}\n", e)),
        }
    }
}
