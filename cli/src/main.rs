//! MailScribe command line.

mod commands;
mod output;
mod shell;

use clap::Parser;
use mailscribe_app::{init_logging, App, AppConfig};
use std::path::PathBuf;

use crate::commands::Command;

#[derive(Parser)]
#[command(name = "mailscribe", about = "Verify email addresses and CSV lists", version)]
struct Cli {
    /// Path to a TOML configuration file. File settings are used as the base;
    /// CLI flags and env vars override them.
    #[arg(long, env = "MAILSCRIBE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the session database.
    #[arg(long, env = "MAILSCRIBE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "MAILSCRIBE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "MAILSCRIBE_LOG_FORMAT")]
    log_format: Option<String>,

    /// Skip the simulated network delays.
    #[arg(long, env = "MAILSCRIBE_FAST")]
    fast: bool,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn into_config(self) -> (AppConfig, Command) {
        let file_config = self.config.as_ref().and_then(|path| {
            match AppConfig::from_toml_file(path) {
                Ok(config) => Some(config),
                Err(e) => {
                    eprintln!("warning: {e}, using defaults");
                    None
                }
            }
        });
        let mut config = file_config.unwrap_or_default();
        if let Some(data_dir) = self.data_dir {
            config.data_dir = data_dir;
        }
        if let Some(log_level) = self.log_level {
            config.log_level = log_level;
        }
        if let Some(log_format) = self.log_format {
            config.log_format = log_format;
        }
        if self.fast {
            config.auth_latency_ms = 0;
            config.classifier_delay_ms = 0;
        }
        (config, self.command)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, command) = Cli::parse().into_config();
    init_logging(config.log_format(), &config.log_level);

    let mut app = App::open(config)?;
    let workflow = app.workflow_mut();
    match command {
        Command::Shell => shell::run(workflow).await,
        command => commands::execute(workflow, command).await,
    }
}
