//! Subcommands shared by one-shot invocations and the interactive shell.

use std::path::{Path, PathBuf};

use anyhow::Context;
use mailscribe_app::AppWorkflow;
use mailscribe_types::{BatchId, Timestamp};
use mailscribe_verification::export::{
    batch_file_name, results_file_name, results_to_csv, SAMPLE_CSV, SAMPLE_CSV_FILE_NAME,
};
use mailscribe_verification::extract::preview_emails;
use mailscribe_verification::{Notice, NoticeLevel};

use crate::output::{batch_summary, print_notices, result_line, user_line};

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Sign in with email and password.
    Login { email: String, password: String },

    /// Create an account and sign it in.
    Signup {
        name: String,
        email: String,
        password: String,
    },

    /// Sign out and forget the stored session.
    Logout,

    /// Show the signed-in user and credit balance.
    Whoami,

    /// Verify emails given as arguments (commas and newlines also separate).
    Verify {
        #[arg(required = true)]
        emails: Vec<String>,

        /// Batch name (defaults to "Batch <date>").
        #[arg(long)]
        name: Option<String>,

        /// Write the results as CSV to this file or directory.
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Verify every email found in a CSV file.
    Upload {
        path: PathBuf,

        /// Write the results as CSV to this file or directory.
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Show the emails found in the first lines of a CSV file.
    Preview { path: PathBuf },

    /// Check a single address without spending credits.
    Check { email: String },

    /// Write the sample CSV template.
    Sample {
        /// Output file (defaults to stdout).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List past batches, or show one batch.
    History {
        /// Batch id to show in full.
        id: Option<String>,

        /// Write the selected batch as CSV to this file or directory.
        #[arg(long, requires = "id")]
        export: Option<PathBuf>,
    },

    /// Show the results of the last run.
    Results,

    /// Clear the results of the last run.
    Clear,

    /// Start an interactive session.
    Shell,
}

/// Run one command against the workflow. `Shell` is handled by the caller.
///
/// On failure the caller reports the returned error, so error notices are
/// not printed a second time.
pub async fn execute(workflow: &mut AppWorkflow, command: Command) -> anyhow::Result<()> {
    let outcome = dispatch(workflow, command).await;
    print_notices(notices_to_print(workflow.drain_notices(), outcome.is_err()));
    outcome
}

fn notices_to_print(notices: Vec<Notice>, failed: bool) -> Vec<Notice> {
    if !failed {
        return notices;
    }
    notices
        .into_iter()
        .filter(|notice| notice.level != NoticeLevel::Error)
        .collect()
}

async fn dispatch(workflow: &mut AppWorkflow, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            let user = workflow.session_mut().login(&email, &password).await?;
            println!("Signed in as {}", user_line(user));
        }
        Command::Signup {
            name,
            email,
            password,
        } => {
            let user = workflow
                .session_mut()
                .signup(&name, &email, &password)
                .await?;
            println!("Welcome, {}", user_line(user));
        }
        Command::Logout => {
            workflow.session_mut().logout();
            println!("Signed out");
        }
        Command::Whoami => match workflow.session().current_user() {
            Some(user) => println!("{}", user_line(user)),
            None => println!("Not signed in"),
        },
        Command::Verify {
            emails,
            name,
            export,
        } => {
            let batch = workflow.verify_emails(&emails, name.as_deref()).await?;
            println!("{}", batch_summary(batch));
            print_results(workflow);
            if let Some(target) = export {
                export_current(workflow, &target).await?;
            }
        }
        Command::Upload { path, export } => {
            let batch = workflow.verify_uploaded_file(&path).await?;
            println!("{}", batch_summary(batch));
            print_results(workflow);
            if let Some(target) = export {
                export_current(workflow, &target).await?;
            }
        }
        Command::Preview { path } => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let found = preview_emails(&String::from_utf8_lossy(&bytes));
            if found.is_empty() {
                println!("No emails in the first lines of {}", path.display());
            }
            for email in found {
                println!("{email}");
            }
        }
        Command::Check { email } => {
            let check = workflow.quick_check(&email).await?;
            println!("{}", result_line(&check.result));
            if check.upgrade_suggested {
                println!("Enjoying quick checks? Upgrade your plan for bulk verification.");
            }
        }
        Command::Sample { out } => match out {
            Some(path) => {
                let path = resolve_target(&path, SAMPLE_CSV_FILE_NAME);
                write_file(&path, SAMPLE_CSV).await?;
                println!("Wrote {}", path.display());
            }
            None => println!("{SAMPLE_CSV}"),
        },
        Command::History { id, export } => match id {
            Some(id) => {
                let batch = workflow
                    .find_batch(&BatchId::new(id.as_str()))
                    .with_context(|| format!("no batch with id {id}"))?;
                println!("{}", batch_summary(batch));
                for result in batch.results() {
                    println!("  {}", result_line(result));
                }
                if let Some(target) = export {
                    let path = resolve_target(&target, &batch_file_name(batch));
                    let csv = results_to_csv(batch.results());
                    write_file(&path, &csv).await?;
                    println!("Exported to {}", path.display());
                }
            }
            None => {
                if workflow.history().is_empty() {
                    println!("No batches yet");
                }
                for batch in workflow.history() {
                    println!("{}", batch_summary(batch));
                }
            }
        },
        Command::Results => {
            if workflow.current_results().is_empty() {
                println!("No current results");
            }
            print_results(workflow);
        }
        Command::Clear => {
            workflow.clear_current_results();
            println!("Cleared current results");
        }
        Command::Shell => anyhow::bail!("already in a shell"),
    }
    Ok(())
}

fn print_results(workflow: &AppWorkflow) {
    for result in workflow.current_results() {
        println!("  {}", result_line(result));
    }
}

async fn export_current(workflow: &AppWorkflow, target: &Path) -> anyhow::Result<()> {
    let path = resolve_target(target, &results_file_name(Timestamp::now()));
    write_file(&path, &results_to_csv(workflow.current_results())).await?;
    println!("Exported to {}", path.display());
    Ok(())
}

/// A directory target gets the default file name appended.
pub fn resolve_target(target: &Path, default_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(default_name)
    } else {
        target.to_path_buf()
    }
}

async fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}
