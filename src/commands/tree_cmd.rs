use async_trait::async_trait;

use crate::commands::{Command, CommandContext, CommandResult};

pub struct TreeCommand;

const HELP: &str = "tree - list contents of directories recursively

Usage: tree [-i] [PATH]

Options:
  -i          print inode numbers
  --help      display this help and exit";

#[async_trait]
impl Command for TreeCommand {
    fn name(&self) -> &'static str {
        "tree"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        let mut with_inode = false;
        let mut path: Option<String> = None;

        for arg in &ctx.args {
            match arg.as_str() {
                "--help" => return CommandResult::success(format!("{}\n", HELP)),
                "-i" => with_inode = true,
                _ if arg.starts_with('-') => {
                    return CommandResult::error(format!(
                        "tree: invalid option -- '{}'\n",
                        &arg[1..]
                    ));
                }
                _ => path = Some(arg.clone()),
            }
        }
        let path = path.unwrap_or_else(|| ".".to_string());

        let rows = match ctx.session.tree(&path).await {
            Ok(rows) => rows,
            Err(e) => return CommandResult::error(format!("tree: {}\n", e)),
        };

        let mut stdout = format!("{}\n", path);
        let mut dirs = 0usize;
        let mut files = 0usize;
        for row in &rows {
            if row.is_directory {
                dirs += 1;
            } else {
                files += 1;
            }
            let indent = "    ".repeat(row.depth + 1);
            if with_inode {
                stdout.push_str(&format!("{}{} {}", indent, row.inode, row.name));
            } else {
                stdout.push_str(&format!("{}{}", indent, row.name));
            }
            if let Some(target) = &row.symlink_target {
                stdout.push_str(&format!(" -> {}", target));
            }
            stdout.push('\n');
        }
        stdout.push_str(&format!(
            "\n{} director{}, {} file{}\n",
            dirs,
            if dirs == 1 { "y" } else { "ies" },
            files,
            if files == 1 { "" } else { "s" }
        ));
        CommandResult::success(stdout)
    }
}
