//! Long-running generation job poller
//!
//! Submits a prompt, waits a fixed interval between operation queries until
//! the backend reports completion, and downloads the resulting media. Each
//! step publishes a status line on a `watch` channel; a
//! [`CancellationToken`] aborts the job between or during remote calls.

use crate::error::{NovastreamError, Result};
use crate::providers::{GenerationParams, Operation, VideoGenerator};

use rand::seq::IndexedRandom;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Status published before the job is submitted
pub const STATUS_INITIALIZING: &str = "Initializing Veo Creative Engine...";

/// Status published once the backend accepted the job
pub const STATUS_SUBMITTED: &str = "Crafting your cinematic masterpiece...";

/// Status lines rotated after every poll
pub const PROGRESS_MESSAGES: [&str; 4] = [
    "Analyzing scene composition...",
    "Applying neural lighting...",
    "Rendering temporal consistency...",
    "Finalizing cinematic grade...",
];

/// Result of a finished job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    /// Download reference reported by the backend
    pub video_uri: String,
    /// Downloaded media bytes
    pub bytes: Vec<u8>,
    /// Number of interval waits performed
    pub waits: usize,
}

/// Drives one generation job from submit to download
pub struct GenerationPoller {
    generator: Arc<dyn VideoGenerator>,
    params: GenerationParams,
    poll_interval: Duration,
    status: watch::Sender<String>,
}

impl GenerationPoller {
    /// Create a poller over `generator`
    pub fn new(
        generator: Arc<dyn VideoGenerator>,
        params: GenerationParams,
        poll_interval: Duration,
    ) -> Self {
        let (status, _) = watch::channel(String::new());
        Self {
            generator,
            params,
            poll_interval,
            status,
        }
    }

    /// Receive status updates for every subsequent run
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.status.subscribe()
    }

    /// Most recently published status
    pub fn current_status(&self) -> String {
        self.status.borrow().clone()
    }

    fn publish(&self, status: &str) {
        self.status.send_replace(status.to_string());
    }

    /// Run a job to completion
    ///
    /// # Errors
    ///
    /// - `Cancelled` when `cancel` fires
    /// - `Generation` when the finished operation carries an error
    /// - `NoResult` when the finished operation has no media reference
    /// - any backend error from submit, poll, or download
    pub async fn run(&self, prompt: &str, cancel: &CancellationToken) -> Result<PollOutcome> {
        self.publish(STATUS_INITIALIZING);

        let mut operation =
            or_cancel(cancel, self.generator.submit(prompt, &self.params)).await?;
        tracing::info!(operation = %operation.name, "Generation job accepted");
        self.publish(STATUS_SUBMITTED);

        let mut waits = 0;
        while !operation.done {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!(operation = %operation.name, "Generation cancelled");
                    return Err(NovastreamError::Cancelled.into());
                }
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
            waits += 1;

            operation = or_cancel(cancel, self.generator.poll(&operation)).await?;
            tracing::debug!(operation = %operation.name, done = operation.done, waits, "Polled operation");

            let status = PROGRESS_MESSAGES
                .choose(&mut rand::rng())
                .copied()
                .unwrap_or(STATUS_SUBMITTED);
            self.publish(status);
        }

        let video_uri = finished_uri(operation)?;
        let bytes = or_cancel(cancel, self.generator.download(&video_uri)).await?;
        tracing::info!(waits, bytes = bytes.len(), "Generation job finished");

        Ok(PollOutcome {
            video_uri,
            bytes,
            waits,
        })
    }
}

/// Extract the media reference from a finished operation
fn finished_uri(operation: Operation) -> Result<String> {
    if let Some(error) = operation.error {
        return Err(NovastreamError::Generation(error.message).into());
    }
    operation.video_uri.ok_or_else(|| {
        NovastreamError::NoResult(format!(
            "operation {} finished without a video",
            operation.name
        ))
        .into()
    })
}

async fn or_cancel<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(NovastreamError::Cancelled.into()),
        result = fut => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{FakeOutcome, FakeVideoGenerator};

    fn poller(fake: Arc<FakeVideoGenerator>) -> GenerationPoller {
        GenerationPoller::new(fake, GenerationParams::default(), Duration::from_millis(1))
    }

    fn error_kind(err: &anyhow::Error) -> Option<&NovastreamError> {
        err.downcast_ref::<NovastreamError>()
    }

    #[tokio::test]
    async fn test_waits_once_per_pending_poll() {
        for k in [0, 1, 3] {
            let fake = Arc::new(FakeVideoGenerator::new(k));
            let outcome = poller(fake.clone())
                .run("a fox", &CancellationToken::new())
                .await
                .unwrap();

            assert_eq!(outcome.waits, k);
            assert_eq!(fake.poll_count(), k);
            assert_eq!(fake.download_count(), 1);
            assert_eq!(outcome.bytes, b"fake-mp4-bytes".to_vec());
        }
    }

    #[tokio::test]
    async fn test_missing_uri_is_no_result_without_further_polls() {
        let fake = Arc::new(FakeVideoGenerator::new(2).with_outcome(FakeOutcome::Empty));
        let err = poller(fake.clone())
            .run("a fox", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(error_kind(&err), Some(NovastreamError::NoResult(_))));
        assert_eq!(fake.poll_count(), 2);
        assert_eq!(fake.download_count(), 0);
    }

    #[tokio::test]
    async fn test_operation_error_is_generation_failure() {
        let fake = Arc::new(
            FakeVideoGenerator::new(1).with_outcome(FakeOutcome::Failed("unsafe prompt".into())),
        );
        let err = poller(fake)
            .run("a fox", &CancellationToken::new())
            .await
            .unwrap_err();

        match error_kind(&err) {
            Some(NovastreamError::Generation(message)) => assert_eq!(message, "unsafe prompt"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_error_propagates() {
        let fake = Arc::new(FakeVideoGenerator::new(1).failing_submit("boom"));
        let err = poller(fake.clone())
            .run("a fox", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(error_kind(&err), Some(NovastreamError::Provider(_))));
        assert_eq!(fake.poll_count(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_before_start_never_submits() {
        let fake = Arc::new(FakeVideoGenerator::new(3));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = poller(fake.clone()).run("a fox", &cancel).await.unwrap_err();
        assert!(matches!(error_kind(&err), Some(NovastreamError::Cancelled)));
        assert_eq!(fake.submit_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_during_wait_stops_polling() {
        let fake = Arc::new(FakeVideoGenerator::new(5));
        let poller = GenerationPoller::new(
            fake.clone(),
            GenerationParams::default(),
            Duration::from_secs(3600),
        );
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let err = poller.run("a fox", &cancel).await.unwrap_err();
        assert!(matches!(error_kind(&err), Some(NovastreamError::Cancelled)));
        assert_eq!(fake.submit_count(), 1);
        assert_eq!(fake.poll_count(), 0);
    }

    #[tokio::test]
    async fn test_status_updates_published() {
        let fake = Arc::new(FakeVideoGenerator::new(0));
        let poller = poller(fake);
        let rx = poller.subscribe();

        poller.run("a fox", &CancellationToken::new()).await.unwrap();
        assert_eq!(*rx.borrow(), STATUS_SUBMITTED);

        let fake = Arc::new(FakeVideoGenerator::new(2));
        let poller = GenerationPoller::new(
            fake,
            GenerationParams::default(),
            Duration::from_millis(1),
        );
        poller.run("a fox", &CancellationToken::new()).await.unwrap();
        assert!(PROGRESS_MESSAGES.contains(&poller.current_status().as_str()));
    }
}
