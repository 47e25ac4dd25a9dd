// src/commands/ln/mod.rs
use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct LnCommand;

#[async_trait]
impl Command for LnCommand {
    fn name(&self) -> &'static str {
        "ln"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        let args = &ctx.args;

        if args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: ln [-s] TARGET LINK_NAME\n\n\
                 Make links between files.\n\n\
                 Options:\n\
                   -s      create a symbolic link instead of a hard link\n\
                       --help  display this help and exit\n"
                    .to_string(),
            );
        }

        let mut symbolic = false;
        let mut operands: Vec<&String> = Vec::new();

        for arg in args {
            match arg.as_str() {
                "-s" | "--symbolic" => symbolic = true,
                "--" => {}
                _ if arg.starts_with('-') => {
                    return CommandResult::error(format!(
                        "ln: invalid option -- '{}'\n",
                        &arg[1..]
                    ));
                }
                _ => operands.push(arg),
            }
        }

        if operands.len() != 2 {
            return CommandResult::error("ln: missing file operand\n".to_string());
        }
        let (target, link_name) = (operands[0], operands[1]);

        let result = if symbolic {
            ctx.session.symlink(target, link_name).await
        } else {
            ctx.session.link(target, link_name).await
        };

        match result {
            Ok(()) => CommandResult::success(String::new()),
            Err(e) => CommandResult::error(format!("ln: {}\n", e)),
        }
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
    async fn test_ln_hard_link_shares_content() {
        let session = Arc::new(FsSession::new());
        session.touch("a").await.unwrap();
        session.write_file("a", b"payload").await.unwrap();

        let result = LnCommand
            .execute(make_ctx(vec!["a", "b"], session.clone()).await)
            .await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(session.read_file("b").await.unwrap(), b"payload");
    }

    #[tokio::test]
    async fn test_ln_symbolic() {
        let session = Arc::new(FsSession::new());
        session.touch("target").await.unwrap();
        let result = LnCommand
            .execute(make_ctx(vec!["-s", "target", "link"], session.clone()).await)
            .await;
        assert_eq!(result.exit_code, 0);
        let rows = session.list("/").await.unwrap();
        let link = rows.iter().find(|r| r.name == "link").unwrap();
        assert_eq!(link.symlink_target.as_deref(), Some("/target"));
    }

    #[tokio::test]
    async fn test_ln_dest_exists() {
        let session = Arc::new(FsSession::new());
        session.touch("a").await.unwrap();
        session.touch("b").await.unwrap();
        let result = LnCommand
            .execute(make_ctx(vec!["a", "b"], session).await)
            .await;
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("EEXIST"));
    }

    #[tokio::test]
    async fn test_ln_directory_rejected() {
        let session = Arc::new(FsSession::new());
        session.mkdir("d").await.unwrap();
        let result = LnCommand
            .execute(make_ctx(vec!["d", "l"], session).await)
            .await;
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("EISDIR"));
    }

    #[tokio::test]
    async fn test_ln_missing_operand() {
        let session = Arc::new(FsSession::new());
        let result = LnCommand
            .execute(make_ctx(vec!["only-one"], session).await)
            .await;
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("missing file operand"));
    }
}
