//! Interactive shell: one command per line, state kept between lines.

use clap::Parser;
use mailscribe_app::AppWorkflow;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::commands::{execute, Command};

/// A single shell line, parsed with the same grammar as the command line.
#[derive(Parser, Debug)]
#[command(name = "mailscribe", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

enum Input {
    Blank,
    Quit,
    Command(Command),
}

/// Split a line with shell quoting rules, so `verify --name "Q2 leads" a@x.com`
/// keeps the batch name whole.
fn parse_line(line: &str) -> anyhow::Result<Input> {
    let words = shell_words::split(line)?;
    match words.first().map(String::as_str) {
        None => Ok(Input::Blank),
        Some("quit") | Some("exit") => Ok(Input::Quit),
        Some(_) => Ok(Input::Command(ShellLine::try_parse_from(words)?.command)),
    }
}

pub async fn run(workflow: &mut AppWorkflow) -> anyhow::Result<()> {
    println!("MailScribe shell. Type `help` for commands, `quit` to leave.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"mailscribe> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_line(&line) {
            Ok(Input::Blank) => {}
            Ok(Input::Quit) => break,
            Ok(Input::Command(Command::Shell)) => println!("Already in the shell"),
            Ok(Input::Command(command)) => {
                if let Err(e) = execute(workflow, command).await {
                    println!("error: {e:#}");
                }
            }
            Err(e) => println!("{e}"),
        }
    }
    tracing::debug!("shell closed");
    Ok(())
}
