use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct LsofCommand;

#[async_trait]
impl Command for LsofCommand {
    fn name(&self) -> &'static str {
        "lsof"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        let rows = ctx.session.open_descriptors().await;
        if rows.is_empty() {
            return CommandResult::success("no open files\n".to_string());
        }
        let mut stdout = String::new();
        for (fd, path, mode, offset) in rows {
            stdout.push_str(&format!(
                "{:>3}  {:<2}  offset {:<6}  {}\n",
                fd,
                mode.as_str(),
                offset,
                path
            ));
        }
        CommandResult::success(stdout)
    }
}
