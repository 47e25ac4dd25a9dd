use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

/// `mkfs` and `format` share one body, registered under both names.
async fn run_format(ctx: CommandContext) -> CommandResult {
    ctx.session.format().await;
    CommandResult::success(String::new())
}

pub struct MkfsCommand;

#[async_trait]
impl Command for MkfsCommand {
    fn name(&self) -> &'static str {
        "mkfs"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        run_format(ctx).await
    }
}

pub struct FormatCommand;

#[async_trait]
impl Command for FormatCommand {
    fn name(&self) -> &'static str {
        "format"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        run_format(ctx).await
    }
}
