use clap::Parser;
use std::io::{BufRead, Write};

use memsh::shell::{Control, Shell};

#[derive(Parser)]
#[command(name = "memsh")]
#[command(about = "An in-memory Unix-like file system shell")]
#[command(version)]
struct Cli {
    /// Execute commands from a command line argument ';'- or newline-separated
    #[arg(short = 'c')]
    script: Option<String>,

    /// Output results as JSON (stdout, stderr, exitCode)
    #[arg(long = "json")]
    json: bool,

    /// Script file to execute
    #[arg()]
    script_file: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let shell = Shell::new();

    // Determine source: -c, file, piped stdin, or interactive prompt
    let script = if let Some(s) = cli.script {
        Some(s)
    } else if let Some(ref file) = cli.script_file {
        match std::fs::read_to_string(file) {
            Ok(content) => Some(content),
            Err(e) => {
                eprintln!("Error: Cannot read script file: {}: {}", file, e);
                std::process::exit(1);
            }
        }
    } else {
        use std::io::IsTerminal;
        if std::io::stdin().is_terminal() {
            None
        } else {
            let mut buf = String::new();
            let mut stdin = std::io::stdin().lock();
            loop {
                let mut line = String::new();
                match stdin.read_line(&mut line) {
                    Ok(0) | Err(_) => break,
                    Ok(_) => buf.push_str(&line),
                }
            }
            Some(buf)
        }
    };

    if let Some(script) = script {
        let result = shell.exec_script(&script).await;
        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "stdout": result.stdout,
                    "stderr": result.stderr,
                    "exitCode": result.exit_code,
                })
            );
        } else {
            if !result.stdout.is_empty() {
                print!("{}", result.stdout);
            }
            if !result.stderr.is_empty() {
                eprint!("{}", result.stderr);
            }
        }
        std::process::exit(result.exit_code);
    }

    // Interactive loop
    let stdin = std::io::stdin();
    let mut exit_code = 0;
    loop {
        print!("memsh> ");
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let (result, control) = shell.exec_line(&line).await;
        if !result.stdout.is_empty() {
            print!("{}", result.stdout);
        }
        if !result.stderr.is_empty() {
            eprint!("{}", result.stderr);
        }
        exit_code = result.exit_code;
        if control == Control::Exit {
            break;
        }
    }
    std::process::exit(exit_code);
}
