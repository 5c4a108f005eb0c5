//! The verification workflow: one run per call, state kept between runs.

use std::path::Path;

use mailscribe_classifier::{Classifier, ClassifierError};
use mailscribe_session::SessionStore;
use mailscribe_store::KeyValueStore;
use mailscribe_types::{BatchId, EmailVerificationResult, Timestamp, VerificationBatch};

use crate::extract::{batch_name_from_file, extract_csv_emails, is_csv_name, parse_email_input};
use crate::{Notice, RunPhase, VerificationError};

/// Tunables for the workflow.
#[derive(Clone, Debug)]
pub struct WorkflowConfig {
    /// Runs larger than this get an advisory notice before classification.
    pub large_batch_threshold: usize,
    /// Quick checks allowed before an upgrade is suggested.
    pub quick_check_upgrade_after: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            large_batch_threshold: 1000,
            quick_check_upgrade_after: 3,
        }
    }
}

/// Outcome of a free single-address check.
#[derive(Clone, Debug)]
pub struct QuickCheck {
    pub result: EmailVerificationResult,
    /// Set once the free allowance has been used up.
    pub upgrade_suggested: bool,
}

/// Drives verification runs against a session and a classifier.
///
/// Holds the current results and the most-recent-first batch history. Only
/// one run is in flight at a time: every run takes `&mut self`.
pub struct VerificationWorkflow<S, C> {
    session: SessionStore<S>,
    classifier: C,
    config: WorkflowConfig,
    phase: RunPhase,
    current_results: Vec<EmailVerificationResult>,
    history: Vec<VerificationBatch>,
    notices: Vec<Notice>,
    quick_checks: u32,
}

impl<S, C> VerificationWorkflow<S, C>
where
    S: KeyValueStore,
    C: Classifier,
{
    pub fn new(session: SessionStore<S>, classifier: C, config: WorkflowConfig) -> Self {
        Self {
            session,
            classifier,
            config,
            phase: RunPhase::Idle,
            current_results: Vec::new(),
            history: Vec::new(),
            notices: Vec::new(),
            quick_checks: 0,
        }
    }

    /// Start with existing history, most recent first.
    pub fn with_history(mut self, history: Vec<VerificationBatch>) -> Self {
        self.history = history;
        self
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_verifying(&self) -> bool {
        self.phase.is_busy()
    }

    pub fn current_results(&self) -> &[EmailVerificationResult] {
        &self.current_results
    }

    /// Completed batches, most recent first.
    pub fn history(&self) -> &[VerificationBatch] {
        &self.history
    }

    pub fn find_batch(&self, id: &BatchId) -> Option<&VerificationBatch> {
        self.history.iter().find(|batch| batch.id() == id)
    }

    pub fn latest_batch(&self) -> Option<&VerificationBatch> {
        self.history.first()
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore<S> {
        &mut self.session
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Whether the current user could verify `count` emails right now.
    pub fn can_afford(&self, count: u64) -> bool {
        self.session
            .current_user()
            .is_some_and(|user| user.can_afford(count))
    }

    /// Take the notices emitted since the last drain.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Empty the current results. History is kept.
    pub fn clear_current_results(&mut self) {
        self.current_results.clear();
    }

    /// Verify manually entered emails.
    ///
    /// Entries are split on commas and newlines. Without a name the batch is
    /// called `Batch <date>`.
    pub async fn verify_emails(
        &mut self,
        emails: &[String],
        batch_name: Option<&str>,
    ) -> Result<&VerificationBatch, VerificationError> {
        let outcome = self.run(parse_email_input(emails), batch_name).await;
        self.finish(outcome)
    }

    /// Verify the emails found in a CSV file on disk.
    pub async fn verify_uploaded_file(
        &mut self,
        path: &Path,
    ) -> Result<&VerificationBatch, VerificationError> {
        self.phase = RunPhase::Validating;
        let outcome = match self.read_upload(path).await {
            Ok((file_name, content)) => self.run_csv(&file_name, &content).await,
            Err(e) => Err(e),
        };
        self.finish(outcome)
    }

    /// Verify CSV text that has already been read, named after `file_name`.
    pub async fn verify_csv_content(
        &mut self,
        file_name: &str,
        content: &str,
    ) -> Result<&VerificationBatch, VerificationError> {
        self.phase = RunPhase::Validating;
        let outcome = match self.require_csv_name(file_name) {
            Ok(()) => self.run_csv(file_name, content).await,
            Err(e) => Err(e),
        };
        self.finish(outcome)
    }

    /// Classify one address without charging credits or touching history.
    pub async fn quick_check(&mut self, email: &str) -> Result<QuickCheck, VerificationError> {
        let email = email.trim();
        if !email.contains('@') {
            return Err(VerificationError::MalformedAddress(email.to_string()));
        }

        let mut results = self.classifier.classify_batch(&[email.to_string()]).await?;
        let result = results
            .pop()
            .ok_or(ClassifierError::ResultCountMismatch {
                requested: 1,
                returned: 0,
            })?;

        self.quick_checks += 1;
        let upgrade_suggested = self.quick_checks >= self.config.quick_check_upgrade_after;
        tracing::debug!(email, status = %result.status, checks = self.quick_checks, "quick check");
        Ok(QuickCheck {
            result,
            upgrade_suggested,
        })
    }

    async fn read_upload(&self, path: &Path) -> Result<(String, String), VerificationError> {
        if !self.session.is_authenticated() {
            return Err(VerificationError::NotAuthenticated);
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.require_csv_name(&file_name)?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| VerificationError::FileRead {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        // Undecodable bytes become U+FFFD; the ASCII addresses around them survive.
        let content = String::from_utf8_lossy(&bytes).into_owned();
        Ok((file_name, content))
    }

    fn require_csv_name(&self, file_name: &str) -> Result<(), VerificationError> {
        if is_csv_name(file_name) {
            Ok(())
        } else {
            Err(VerificationError::InvalidFileType(file_name.to_string()))
        }
    }

    async fn run_csv(&mut self, file_name: &str, content: &str) -> Result<(), VerificationError> {
        let emails = extract_csv_emails(content);
        if emails.is_empty() {
            return Err(VerificationError::NoEmailsFound(file_name.to_string()));
        }
        tracing::debug!(file_name, found = emails.len(), "extracted emails from upload");
        let name = batch_name_from_file(file_name);
        self.run(emails, Some(&name)).await
    }

    async fn run(
        &mut self,
        emails: Vec<String>,
        batch_name: Option<&str>,
    ) -> Result<(), VerificationError> {
        self.phase = RunPhase::Validating;
        if emails.is_empty() {
            return Err(VerificationError::EmptyInput);
        }
        let user = self
            .session
            .current_user()
            .ok_or(VerificationError::NotAuthenticated)?;
        let required = emails.len() as u64;
        if !user.can_afford(required) {
            return Err(VerificationError::InsufficientCredits {
                required,
                available: user.credits.available,
            });
        }
        if emails.len() > self.config.large_batch_threshold {
            self.notices.push(Notice::info(format!(
                "Large batch: verifying {} emails may take a while",
                emails.len()
            )));
        }

        self.phase = RunPhase::Classifying;
        tracing::debug!(count = emails.len(), classifier = self.classifier.name(), "classifying");
        let results = self.classifier.classify_batch(&emails).await?;
        if results.len() != emails.len() {
            return Err(ClassifierError::ResultCountMismatch {
                requested: emails.len(),
                returned: results.len(),
            }
            .into());
        }

        self.phase = RunPhase::Aggregating;
        let now = Timestamp::now();
        let name = match batch_name {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => format!("Batch {}", now.date_label()),
        };
        self.session.debit_credits(required)?;

        let batch = VerificationBatch::assemble(BatchId::generate(), name, now, results.clone());
        tracing::info!(
            batch_id = %batch.id(),
            total = batch.total(),
            valid = batch.counts().valid,
            invalid = batch.counts().invalid,
            "batch verified"
        );
        self.notices.push(Notice::success(format!(
            "Successfully verified {} emails!",
            batch.total()
        )));
        self.current_results = results;
        self.history.insert(0, batch);
        Ok(())
    }

    fn finish(
        &mut self,
        outcome: Result<(), VerificationError>,
    ) -> Result<&VerificationBatch, VerificationError> {
        self.phase = RunPhase::Idle;
        match outcome {
            Ok(()) => Ok(&self.history[0]),
            Err(e) => {
                tracing::warn!("verification rejected: {e}");
                self.notices.push(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoticeLevel;
    use mailscribe_classifier::PatternClassifier;
    use mailscribe_nullables::{NullClassifier, NullRandom, NullStore};
    use mailscribe_session::SessionConfig;
    use mailscribe_types::EmailStatus;
    use std::sync::Arc;
    use std::time::Duration;

    type Workflow<C> = VerificationWorkflow<Arc<NullStore>, C>;

    fn instant_session(storage: Arc<NullStore>) -> SessionStore<Arc<NullStore>> {
        SessionStore::new(
            storage,
            SessionConfig {
                auth_latency: Duration::ZERO,
                ..SessionConfig::default()
            },
        )
    }

    async fn signed_in<C: Classifier>(classifier: C, email: &str, password: &str) -> Workflow<C> {
        let mut session = instant_session(Arc::new(NullStore::new()));
        session.login(email, password).await.unwrap();
        VerificationWorkflow::new(session, classifier, WorkflowConfig::default())
    }

    async fn demo<C: Classifier>(classifier: C) -> Workflow<C> {
        signed_in(classifier, "demo@example.com", "password").await
    }

    fn emails(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn available<C: Classifier>(workflow: &Workflow<C>) -> u64 {
        workflow.session().current_user().unwrap().credits.available
    }

    #[tokio::test]
    async fn demo_run_end_to_end() {
        let classifier = PatternClassifier::with_random(NullRandom::constant(0.0))
            .with_delay(Duration::ZERO);
        let mut workflow = demo(classifier).await;

        let batch = workflow
            .verify_emails(&emails(&["valid@x.com", "disposable@x.com"]), None)
            .await
            .unwrap()
            .clone();

        assert_eq!(batch.total(), 2);
        assert_eq!(batch.counts().valid, 1);
        assert_eq!(batch.counts().disposable, 1);
        assert!(batch.name().starts_with("Batch "));
        assert_eq!(available(&workflow), 83);
        assert_eq!(workflow.session().current_user().unwrap().credits.used, 17);
        assert_eq!(workflow.current_results().len(), 2);
        assert_eq!(workflow.history().len(), 1);
        assert_eq!(workflow.phase(), RunPhase::Idle);

        let notices = workflow.drain_notices();
        assert_eq!(notices, [Notice::success("Successfully verified 2 emails!")]);
    }

    #[tokio::test]
    async fn results_follow_input_order() {
        let classifier = NullClassifier::default()
            .with_status("b@x.com", EmailStatus::Risky)
            .with_status("c@x.com", EmailStatus::Invalid);
        let mut workflow = demo(classifier).await;
        workflow
            .verify_emails(&emails(&["a@x.com, b@x.com", "c@x.com"]), Some("Leads"))
            .await
            .unwrap();

        let statuses: Vec<_> = workflow.current_results().iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            [EmailStatus::Valid, EmailStatus::Risky, EmailStatus::Invalid]
        );
        assert_eq!(workflow.latest_batch().unwrap().name(), "Leads");
    }

    #[tokio::test]
    async fn blank_input_is_a_noop() {
        let mut workflow = demo(NullClassifier::default()).await;

        for input in [emails(&[]), emails(&[" ", ","])] {
            let err = workflow.verify_emails(&input, None).await.unwrap_err();
            assert!(matches!(err, VerificationError::EmptyInput));
        }
        assert_eq!(workflow.classifier().calls(), 0);
        assert!(workflow.history().is_empty());
        assert_eq!(available(&workflow), 85);
    }

    #[tokio::test]
    async fn unauthenticated_run_is_rejected() {
        let session = instant_session(Arc::new(NullStore::new()));
        let mut workflow = VerificationWorkflow::new(
            session,
            NullClassifier::default(),
            WorkflowConfig::default(),
        );

        let err = workflow
            .verify_emails(&emails(&["a@x.com"]), None)
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::NotAuthenticated));
        assert_eq!(workflow.classifier().calls(), 0);
        assert!(!workflow.can_afford(1));

        let notices = workflow.drain_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn over_credit_request_leaves_history_alone() {
        let mut workflow = demo(NullClassifier::default()).await;
        let many: Vec<String> = (0..86).map(|i| format!("u{i}@x.com")).collect();

        let err = workflow.verify_emails(&many, None).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "insufficient credits: you need 86 credits but only have 85"
        );
        assert!(workflow.history().is_empty());
        assert_eq!(available(&workflow), 85);
        assert_eq!(workflow.phase(), RunPhase::Idle);
    }

    #[tokio::test]
    async fn exact_balance_is_enough() {
        let mut workflow = demo(NullClassifier::default()).await;
        let all: Vec<String> = (0..85).map(|i| format!("u{i}@x.com")).collect();
        assert!(workflow.can_afford(85));
        workflow.verify_emails(&all, None).await.unwrap();
        assert_eq!(available(&workflow), 0);
        assert!(!workflow.can_afford(1));
    }

    #[tokio::test]
    async fn threshold_sized_run_gets_no_advisory() {
        let mut workflow =
            signed_in(NullClassifier::default(), "admin@mailscribe.com", "admin").await;
        let exactly: Vec<String> = (0..1000).map(|i| format!("u{i}@x.com")).collect();

        workflow.verify_emails(&exactly, None).await.unwrap();
        let notices = workflow.drain_notices();
        assert!(notices.iter().all(|n| n.level != NoticeLevel::Info));
        assert_eq!(notices, [Notice::success("Successfully verified 1000 emails!")]);
    }

    #[tokio::test]
    async fn admin_runs_are_free() {
        let mut workflow =
            signed_in(NullClassifier::default(), "admin@mailscribe.com", "admin").await;
        let before = workflow.session().current_user().unwrap().credits;
        let many: Vec<String> = (0..1001).map(|i| format!("u{i}@x.com")).collect();

        workflow.verify_emails(&many, None).await.unwrap();
        assert_eq!(workflow.session().current_user().unwrap().credits, before);

        let notices = workflow.drain_notices();
        assert_eq!(notices[0].level, NoticeLevel::Info);
        assert_eq!(notices[1].level, NoticeLevel::Success);
    }

    #[tokio::test]
    async fn classifier_failure_changes_nothing() {
        let mut workflow = demo(NullClassifier::default()).await;
        workflow.classifier().set_failing(true);

        let err = workflow
            .verify_emails(&emails(&["a@x.com"]), None)
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::Classifier(_)));
        assert!(workflow.history().is_empty());
        assert!(workflow.current_results().is_empty());
        assert_eq!(available(&workflow), 85);
        assert!(!workflow.is_verifying());
    }

    #[tokio::test]
    async fn short_classifier_answer_is_rejected() {
        let mut workflow = demo(NullClassifier::default()).await;
        workflow.classifier().set_truncating(true);

        let err = workflow
            .verify_emails(&emails(&["a@x.com", "b@x.com"]), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            VerificationError::Classifier(ClassifierError::ResultCountMismatch {
                requested: 2,
                returned: 1
            })
        ));
        assert_eq!(available(&workflow), 85);
    }

    #[tokio::test]
    async fn failed_debit_keeps_previous_results() {
        let storage = Arc::new(NullStore::new());
        let mut session = instant_session(Arc::clone(&storage));
        session.login("demo@example.com", "password").await.unwrap();
        let mut workflow = VerificationWorkflow::new(
            session,
            NullClassifier::default(),
            WorkflowConfig::default(),
        );
        workflow.verify_emails(&emails(&["a@x.com"]), None).await.unwrap();

        storage.set_failing(true);
        let err = workflow
            .verify_emails(&emails(&["b@x.com", "c@x.com"]), None)
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::Session(_)));
        assert_eq!(workflow.history().len(), 1);
        assert_eq!(workflow.current_results()[0].email, "a@x.com");
        assert_eq!(available(&workflow), 84);
    }

    #[tokio::test]
    async fn history_is_most_recent_first() {
        let mut workflow = demo(NullClassifier::default())
            .await
            .with_history(crate::seed::demo_batches());
        let id = workflow
            .verify_emails(&emails(&["a@x.com"]), Some("Fresh"))
            .await
            .unwrap()
            .id()
            .clone();

        let names: Vec<_> = workflow.history().iter().map(|b| b.name()).collect();
        assert_eq!(
            names,
            ["Fresh", "Marketing Campaign Q2", "Newsletter Subscribers"]
        );
        assert_eq!(workflow.find_batch(&id).unwrap().name(), "Fresh");
        assert!(workflow.find_batch(&BatchId::new("missing")).is_none());
    }

    #[tokio::test]
    async fn clear_keeps_history() {
        let mut workflow = demo(NullClassifier::default()).await;
        workflow.verify_emails(&emails(&["a@x.com"]), None).await.unwrap();
        workflow.clear_current_results();
        assert!(workflow.current_results().is_empty());
        assert_eq!(workflow.history().len(), 1);
    }

    #[tokio::test]
    async fn csv_content_is_named_after_file() {
        let mut workflow = demo(NullClassifier::default()).await;
        let batch = workflow
            .verify_csv_content("Q2 leads.csv", "name,email\nJo,jo@x.com\nAl,al@y.org")
            .await
            .unwrap();
        assert_eq!(batch.name(), "Q2 leads");
        assert_eq!(batch.total(), 2);
    }

    #[tokio::test]
    async fn csv_without_emails_is_rejected() {
        let mut workflow = demo(NullClassifier::default()).await;
        let err = workflow
            .verify_csv_content("empty.csv", "name\nnobody")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "no valid emails found in empty.csv");
        assert_eq!(workflow.classifier().calls(), 0);
    }

    #[tokio::test]
    async fn upload_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.csv");
        std::fs::write(&path, crate::export::SAMPLE_CSV).unwrap();

        let mut workflow = demo(NullClassifier::default()).await;
        let batch = workflow.verify_uploaded_file(&path).await.unwrap();
        assert_eq!(batch.name(), "contacts");
        assert_eq!(batch.total(), 3);
        assert_eq!(available(&workflow), 82);
    }

    #[tokio::test]
    async fn upload_rejects_wrong_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.txt");
        std::fs::write(&path, "a@x.com").unwrap();

        let mut workflow = demo(NullClassifier::default()).await;
        let err = workflow.verify_uploaded_file(&path).await.unwrap_err();
        assert!(matches!(err, VerificationError::InvalidFileType(_)));
        assert!(err.to_string().contains("wrong file type"));
    }

    #[tokio::test]
    async fn upload_tolerates_non_utf8_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.csv");
        std::fs::write(
            &path,
            b"name,email\nJos\xe9,jose@example.com\nAl,al@example.org\n",
        )
        .unwrap();

        let mut workflow = demo(NullClassifier::default()).await;
        let batch = workflow.verify_uploaded_file(&path).await.unwrap();
        assert_eq!(batch.total(), 2);
        let verified: Vec<_> = workflow
            .current_results()
            .iter()
            .map(|r| r.email.as_str())
            .collect();
        assert_eq!(verified, ["jose@example.com", "al@example.org"]);
    }

    #[tokio::test]
    async fn upload_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.csv");

        let mut workflow = demo(NullClassifier::default()).await;
        let err = workflow.verify_uploaded_file(&path).await.unwrap_err();
        assert!(matches!(err, VerificationError::FileRead { .. }));
        assert_eq!(workflow.phase(), RunPhase::Idle);
    }

    #[tokio::test]
    async fn upload_requires_login() {
        let session = instant_session(Arc::new(NullStore::new()));
        let mut workflow = VerificationWorkflow::new(
            session,
            NullClassifier::default(),
            WorkflowConfig::default(),
        );
        let err = workflow
            .verify_uploaded_file(Path::new("leads.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::NotAuthenticated));
    }

    #[tokio::test]
    async fn quick_check_is_free_and_suggests_upgrade() {
        let mut workflow =
            demo(NullClassifier::default().with_status("x@y.com", EmailStatus::Risky)).await;

        let first = workflow.quick_check(" x@y.com ").await.unwrap();
        assert_eq!(first.result.status, EmailStatus::Risky);
        assert!(!first.upgrade_suggested);
        workflow.quick_check("a@b.com").await.unwrap();
        let third = workflow.quick_check("a@b.com").await.unwrap();
        assert!(third.upgrade_suggested);

        assert_eq!(available(&workflow), 85);
        assert!(workflow.history().is_empty());
    }

    #[tokio::test]
    async fn quick_check_rejects_malformed_address() {
        let mut workflow = demo(NullClassifier::default()).await;
        let err = workflow.quick_check("nobody").await.unwrap_err();
        assert!(matches!(err, VerificationError::MalformedAddress(_)));
        assert_eq!(workflow.classifier().calls(), 0);
    }
}
