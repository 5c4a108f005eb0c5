//! Opens storage and assembles the verification workflow.

use mailscribe_classifier::PatternClassifier;
use mailscribe_session::SessionStore;
use mailscribe_store_lmdb::integrity::{check_data_dir, check_integrity};
use mailscribe_store_lmdb::{LmdbEnvironment, LmdbKeyValueStore};
use mailscribe_verification::{seed, VerificationWorkflow};

use crate::{AppConfig, AppError};

/// The workflow as wired by [`App::open`].
pub type AppWorkflow = VerificationWorkflow<LmdbKeyValueStore, PatternClassifier>;

/// A running MailScribe instance.
pub struct App {
    config: AppConfig,
    env: LmdbEnvironment,
    workflow: AppWorkflow,
}

impl App {
    /// Open the LMDB environment at `config.data_dir`, restore any persisted
    /// session and build the workflow.
    pub fn open(config: AppConfig) -> Result<Self, AppError> {
        if let Err(e) = check_data_dir(&config.data_dir) {
            tracing::warn!("{e}");
        }

        let env = LmdbEnvironment::open(&config.data_dir, config.lmdb_map_size)?;
        let report = check_integrity(env.env())?;
        if report.is_healthy() {
            tracing::debug!(
                databases = report.databases_checked,
                entries = report.total_entries,
                "storage integrity check passed"
            );
        } else {
            for error in &report.errors {
                tracing::warn!("integrity: {error}");
            }
        }

        let mut session = SessionStore::new(env.session_store(), config.session_config());
        match session.restore_session() {
            Some(user) => tracing::info!(user_id = %user.id, "session restored"),
            None => tracing::debug!("no persisted session"),
        }

        let classifier = PatternClassifier::new().with_delay(config.classifier_delay());
        let mut workflow =
            VerificationWorkflow::new(session, classifier, config.workflow_config());
        if config.seed_demo_history {
            workflow = workflow.with_history(seed::demo_batches());
        }

        tracing::info!(data_dir = %config.data_dir.display(), "mailscribe ready");
        Ok(Self {
            config,
            env,
            workflow,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn environment(&self) -> &LmdbEnvironment {
        &self.env
    }

    pub fn workflow(&self) -> &AppWorkflow {
        &self.workflow
    }

    pub fn workflow_mut(&mut self) -> &mut AppWorkflow {
        &mut self.workflow
    }
}
