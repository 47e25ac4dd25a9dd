use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct FsckCommand;

#[async_trait]
impl Command for FsckCommand {
    fn name(&self) -> &'static str {
        "fsck"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        let report = ctx.session.fsck().await;
        let mut stdout = format!(
            "{} directories, {} files, {} symbolic links\n",
            report.directories, report.files, report.symlinks
        );
        for path in &report.dangling {
            stdout.push_str(&format!("dangling link: {}\n", path));
        }
        CommandResult::success(stdout)
    }
}
