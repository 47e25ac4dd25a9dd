// src/commands/mkdir/mod.rs
use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct MkdirCommand;

#[async_trait]
impl Command for MkdirCommand {
    fn name(&self) -> &'static str {
        "mkdir"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: mkdir PATH...\n\nCreate directories.\n".to_string(),
            );
        }
        if ctx.args.is_empty() {
            return CommandResult::error("mkdir: missing operand\n".to_string());
        }

        let mut stderr = String::new();
        let mut exit_code = 0;
        for path in &ctx.args {
            if let Err(e) = ctx.session.mkdir(path).await {
                stderr.push_str(&format!("mkdir: {}\n", e));
                exit_code = 1;
            }
        }
        CommandResult::with_exit_code(String::new(), stderr, exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::FsSession;
    use std::sync::Arc;

    async fn make_ctx(args: Vec<&str>, session: Arc<FsSession>) -> CommandContext {
        CommandContext {
            args: args.into_iter().map(String::from).collect(),
            session,
        }
    }

    #[tokio::test]
    async fn test_mkdir_creates() {
        let session = Arc::new(FsSession::new());
        let result = MkdirCommand
            .execute(make_ctx(vec!["docs"], session.clone()).await)
            .await;
        assert_eq!(result.exit_code, 0);
        assert!(session.cd("docs").await.is_ok());
    }

    #[tokio::test]
    async fn test_mkdir_nested_path() {
        let session = Arc::new(FsSession::new());
        session.mkdir("a").await.unwrap();
        let result = MkdirCommand
            .execute(make_ctx(vec!["a/b"], session.clone()).await)
            .await;
        assert_eq!(result.exit_code, 0);
        assert!(session.cd("/a/b").await.is_ok());
    }

    #[tokio::test]
    async fn test_mkdir_conflict() {
        let session = Arc::new(FsSession::new());
        session.mkdir("x").await.unwrap();
        let result = MkdirCommand
            .execute(make_ctx(vec!["x"], session).await)
            .await;
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("EEXIST"));
    }
}
