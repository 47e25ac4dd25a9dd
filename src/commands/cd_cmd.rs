use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct CdCommand;

#[async_trait]
impl Command for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        // no argument returns to the root, like cd with no HOME set to /
        let path = ctx.args.first().map(String::as_str).unwrap_or("/");
        match ctx.session.cd(path).await {
            Ok(()) => CommandResult::success(String::new()),
            Err(e) => CommandResult::error(format!("cd: {}\n", e)),
        }
    }
}
