//! Shell layer: line tokenizing and command dispatch.
//!
//! One command is fully executed before the next line is read; the core
//! never sees interleaved operations.

use std::sync::Arc;

use crate::commands::{CommandContext, CommandRegistry, CommandResult};
use crate::fs::FsSession;

/// Split a command line on whitespace, grouping single- and double-quoted
/// stretches into one token.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                } else {
                    current.push(c);
                }
            }
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens
}

/// What the dispatch loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

pub struct Shell {
    session: Arc<FsSession>,
    registry: CommandRegistry,
}

impl Shell {
    pub fn new() -> Self {
        Self {
            session: Arc::new(FsSession::new()),
            registry: CommandRegistry::with_builtins(),
        }
    }

    pub fn session(&self) -> Arc<FsSession> {
        Arc::clone(&self.session)
    }

    /// Execute one line, which may hold several `;`-separated commands.
    pub async fn exec_line(&self, line: &str) -> (CommandResult, Control) {
        let mut stdout = String::new();
        let mut stderr = String::new();
        let mut exit_code = 0;

        for piece in line.split(';') {
            let tokens = tokenize(piece);
            let Some((name, args)) = tokens.split_first() else {
                continue;
            };
            if name == "exit" {
                return (
                    CommandResult::with_exit_code(stdout, stderr, exit_code),
                    Control::Exit,
                );
            }
            let result = match self.registry.get(name) {
                Some(cmd) => {
                    cmd.execute(CommandContext {
                        args: args.to_vec(),
                        session: self.session(),
                    })
                    .await
                }
                None => CommandResult::error(format!(
                    "{}: command not found (try 'help')\n",
                    name
                )),
            };
            stdout.push_str(&result.stdout);
            stderr.push_str(&result.stderr);
            exit_code = result.exit_code;
        }

        (
            CommandResult::with_exit_code(stdout, stderr, exit_code),
            Control::Continue,
        )
    }

    /// Execute a whole script, line by line, stopping at `exit`.
    pub async fn exec_script(&self, script: &str) -> CommandResult {
        let mut stdout = String::new();
        let mut stderr = String::new();
        let mut exit_code = 0;
        for line in script.lines() {
            let (result, control) = self.exec_line(line).await;
            stdout.push_str(&result.stdout);
            stderr.push_str(&result.stderr);
            exit_code = result.exit_code;
            if control == Control::Exit {
                break;
            }
        }
        CommandResult::with_exit_code(stdout, stderr, exit_code)
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_plain_and_quoted() {
        assert_eq!(tokenize("ls -l /docs"), vec!["ls", "-l", "/docs"]);
        assert_eq!(
            tokenize("write notes \"hello world\""),
            vec!["write", "notes", "hello world"]
        );
        assert_eq!(tokenize("write f 'a  b'"), vec!["write", "f", "a  b"]);
        assert_eq!(tokenize("   "), Vec::<String>::new());
        assert_eq!(tokenize("cat \"\""), vec!["cat", ""]);
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let shell = Shell::new();
        let (result, control) = shell.exec_line("frobnicate").await;
        assert_eq!(control, Control::Continue);
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("command not found"));
    }

    #[tokio::test]
    async fn test_exit_stops_dispatch() {
        let shell = Shell::new();
        let (_, control) = shell.exec_line("exit").await;
        assert_eq!(control, Control::Exit);
        let result = shell.exec_script("mkdir a\nexit\nmkdir b").await;
        assert_eq!(result.exit_code, 0);
        assert!(shell.session().cd("/a").await.is_ok());
        assert!(shell.session().cd("/b").await.is_err());
    }

    #[tokio::test]
    async fn test_errors_are_reported_and_session_continues() {
        let shell = Shell::new();
        let result = shell
            .exec_script("rm missing\nmkdir ok")
            .await;
        assert!(result.stderr.contains("ENOENT"));
        assert!(shell.session().cd("/ok").await.is_ok());
    }

    #[tokio::test]
    async fn test_scenario_docs_notes() {
        let shell = Shell::new();
        let result = shell
            .exec_script(
                "mkdir docs\ncd docs\ntouch notes\nwrite notes \"hello\"\ncat notes",
            )
            .await;
        assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);
        assert_eq!(result.stdout, "hello");

        let (pwd, _) = shell.exec_line("pwd").await;
        assert_eq!(pwd.stdout, "/docs\n");
    }

    #[tokio::test]
    async fn test_scenario_mkfs_tree() {
        let shell = Shell::new();
        let result = shell
            .exec_script("mkfs\nmkdir a\nmkdir a/b\ntree")
            .await;
        assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);
        let lines: Vec<&str> = result.stdout.lines().collect();
        assert_eq!(lines[1], "    a");
        assert_eq!(lines[2], "        b");
    }

    #[tokio::test]
    async fn test_scenario_hard_link_through_descriptors() {
        let shell = Shell::new();
        let result = shell
            .exec_script(
                "touch a\nln a b\nopen b w\nwrite 3 \"payload\"\nclose 3\nopen a r\nread 4 16",
            )
            .await;
        assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);
        assert!(result.stdout.contains("payload"));
    }

    #[tokio::test]
    async fn test_scenario_symlink_dead_alive() {
        let shell = Shell::new();
        shell
            .exec_script("touch a\nwrite a \"v1\"\nln -s a b\nrm a")
            .await;
        let (result, _) = shell.exec_line("cat b").await;
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("dangling"));

        shell.exec_script("touch a\nwrite a \"v2\"").await;
        let (result, _) = shell.exec_line("cat b").await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, "v2");
    }

    #[tokio::test]
    async fn test_semicolon_separated_commands() {
        let shell = Shell::new();
        let (result, _) = shell.exec_line("mkdir x; cd x; pwd").await;
        assert_eq!(result.stdout, "/x\n");
    }
}
