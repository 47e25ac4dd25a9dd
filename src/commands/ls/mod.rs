// src/commands/ls/mod.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::{mode_string, ListEntry};

pub struct LsCommand;

fn format_time(mtime: DateTime<Utc>) -> String {
    // classic ls: month day time for recent entries, month day year otherwise
    let age = Utc::now().signed_duration_since(mtime);
    if age.num_days() < 180 {
        mtime.format("%b %e %H:%M").to_string()
    } else {
        mtime.format("%b %e  %Y").to_string()
    }
}

fn long_row(row: &ListEntry, with_inode: bool) -> String {
    let mut line = String::new();
    if with_inode {
        line.push_str(&format!("{:>4} ", row.inode));
    }
    line.push_str(&format!(
        "{} {:>2} {:>6} {} {}",
        mode_string(row.mode, row.is_directory, row.is_symlink),
        row.link_count,
        row.size,
        format_time(row.mtime),
        row.name,
    ));
    if let Some(target) = &row.symlink_target {
        line.push_str(&format!(" -> {}", target));
    }
    line.push('\n');
    line
}

fn short_row(row: &ListEntry, with_inode: bool) -> String {
    let suffix = if row.is_directory { "/" } else { "" };
    if with_inode {
        format!("{:>4} {}{}\n", row.inode, row.name, suffix)
    } else {
        format!("{}{}\n", row.name, suffix)
    }
}

#[async_trait]
impl Command for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: ls [OPTION]... [PATH]...\n\n\
                 List directory contents.\n\n\
                 Options:\n\
                   -l      use a long listing format\n\
                   -i      print the inode number of each entry\n\
                       --help  display this help and exit\n"
                    .to_string(),
            );
        }

        let mut long_format = false;
        let mut with_inode = false;
        let mut paths: Vec<String> = Vec::new();

        for arg in &ctx.args {
            match arg.as_str() {
                "-l" => long_format = true,
                "-i" => with_inode = true,
                "-li" | "-il" => {
                    long_format = true;
                    with_inode = true;
                }
                _ if arg.starts_with('-') => {
                    return CommandResult::error(format!(
                        "ls: invalid option -- '{}'\n",
                        &arg[1..]
                    ));
                }
                _ => paths.push(arg.clone()),
            }
        }

        if paths.is_empty() {
            paths.push(".".to_string());
        }

        let mut stdout = String::new();
        let mut stderr = String::new();
        let mut exit_code = 0;
        let show_headers = paths.len() > 1;

        for (idx, path) in paths.iter().enumerate() {
            let rows = match ctx.session.list(path).await {
                Ok(rows) => rows,
                Err(e) => {
                    stderr.push_str(&format!("ls: {}\n", e));
                    exit_code = 1;
                    continue;
                }
            };
            if show_headers {
                if idx > 0 {
                    stdout.push('\n');
                }
                stdout.push_str(&format!("{}:\n", path));
            }
            for row in &rows {
                if long_format {
                    stdout.push_str(&long_row(row, with_inode));
                } else {
                    stdout.push_str(&short_row(row, with_inode));
                }
            }
        }

        CommandResult::with_exit_code(stdout, stderr, exit_code)
    }
}
