//! Scripted in-process backends
//!
//! Used by tests and by offline runs. The video generator finishes after a
//! configurable number of polls and counts every call it receives.

use crate::error::{NovastreamError, Result};
use crate::providers::{
    ChatProvider, ChatReply, ChatRequest, GenerationParams, Operation, OperationError,
    VideoGenerator,
};

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// How a scripted generation ends once its polls run out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeOutcome {
    /// Done with a download reference
    Video(String),
    /// Done without any generated media
    Empty,
    /// Done with an error payload
    Failed(String),
}

/// Video generator that completes after `polls_until_done` polls
#[derive(Debug)]
pub struct FakeVideoGenerator {
    polls_until_done: usize,
    outcome: FakeOutcome,
    submit_error: Option<String>,
    bytes: Vec<u8>,
    submits: AtomicUsize,
    polls: AtomicUsize,
    downloads: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl FakeVideoGenerator {
    /// Generator that yields a video after `polls_until_done` polls
    pub fn new(polls_until_done: usize) -> Self {
        Self {
            polls_until_done,
            outcome: FakeOutcome::Video("https://media.example/fake.mp4".to_string()),
            submit_error: None,
            bytes: b"fake-mp4-bytes".to_vec(),
            submits: AtomicUsize::new(0),
            polls: AtomicUsize::new(0),
            downloads: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Change how the job finishes
    pub fn with_outcome(mut self, outcome: FakeOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Make `submit` fail with a provider error carrying `message`
    pub fn failing_submit(mut self, message: impl Into<String>) -> Self {
        self.submit_error = Some(message.into());
        self
    }

    /// Bytes returned by `download`
    pub fn with_bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.bytes = bytes.into();
        self
    }

    pub fn submit_count(&self) -> usize {
        self.submits.load(Ordering::SeqCst)
    }

    pub fn poll_count(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn download_count(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }

    /// Prompt passed to the most recent `submit`
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|p| p.clone())
    }

    fn finished(&self, name: &str) -> Operation {
        match &self.outcome {
            FakeOutcome::Video(uri) => Operation::completed(name, uri.clone()),
            FakeOutcome::Empty => Operation {
                done: true,
                ..Operation::pending(name)
            },
            FakeOutcome::Failed(message) => Operation {
                done: true,
                error: Some(OperationError {
                    code: Some(500),
                    message: message.clone(),
                }),
                ..Operation::pending(name)
            },
        }
    }
}

#[async_trait]
impl VideoGenerator for FakeVideoGenerator {
    async fn submit(&self, prompt: &str, _params: &GenerationParams) -> Result<Operation> {
        self.submits.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }

        if let Some(message) = &self.submit_error {
            return Err(NovastreamError::Provider(message.clone()).into());
        }

        let name = "operations/fake-1";
        if self.polls_until_done == 0 {
            Ok(self.finished(name))
        } else {
            Ok(Operation::pending(name))
        }
    }

    async fn poll(&self, operation: &Operation) -> Result<Operation> {
        let seen = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        if seen >= self.polls_until_done {
            Ok(self.finished(&operation.name))
        } else {
            Ok(Operation::pending(operation.name.clone()))
        }
    }

    async fn download(&self, _uri: &str) -> Result<Vec<u8>> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        Ok(self.bytes.clone())
    }
}

/// Chat backend that answers with a fixed reply or error
#[derive(Debug)]
pub struct FakeChatProvider {
    reply: std::result::Result<ChatReply, String>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl FakeChatProvider {
    /// Always answer with `reply`
    pub fn replying(reply: ChatReply) -> Self {
        Self {
            reply: Ok(reply),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with plain `text` and no citations
    pub fn text(text: impl Into<String>) -> Self {
        Self::replying(ChatReply {
            text: text.into(),
            citations: Vec::new(),
        })
    }

    /// Always fail with a provider error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatProvider for FakeChatProvider {
    async fn generate(&self, request: &ChatRequest) -> Result<ChatReply> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(NovastreamError::Provider(message.clone()).into()),
        }
    }
}
