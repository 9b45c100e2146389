//! Grounded chat assistant
//!
//! An [`AssistantSession`] keeps the append-only transcript of one
//! conversation. Every question is sent on its own with the web search tool
//! and the configured system instruction; earlier turns are not replayed.

pub mod insights;

pub use insights::{summarize, SUMMARY_FAILED, SUMMARY_UNAVAILABLE};

use crate::config::AssistantConfig;
use crate::providers::{ChatProvider, ChatRequest, SourceLink};

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Reply used when the backend answers with no text
pub const EMPTY_REPLY: &str = "I couldn't process that request.";

/// Reply used when the backend call fails
pub const CONNECTION_ERROR_REPLY: &str =
    "Sorry, I'm having trouble connecting to my brain right now.";

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Model => write!(f, "model"),
        }
    }
}

impl Role {
    /// Colored label for terminal transcripts
    pub fn colored_tag(&self) -> String {
        match self {
            Role::User => "You".cyan().bold().to_string(),
            Role::Model => "NovaStream AI".magenta().bold().to_string(),
        }
    }
}

/// One entry of the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceLink>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            sources: Vec::new(),
        }
    }

    pub fn model(text: impl Into<String>, sources: Vec<SourceLink>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
            sources,
        }
    }

    /// Sources to render, capped at `max`
    pub fn displayed_sources(&self, max: usize) -> &[SourceLink] {
        &self.sources[..self.sources.len().min(max)]
    }
}

/// A single assistant conversation
pub struct AssistantSession {
    chat: Arc<dyn ChatProvider>,
    config: AssistantConfig,
    messages: Vec<ChatMessage>,
    typing: watch::Sender<bool>,
}

impl AssistantSession {
    /// Start a session whose transcript holds only the greeting
    pub fn new(chat: Arc<dyn ChatProvider>, config: AssistantConfig) -> Self {
        let messages = vec![ChatMessage::model(config.greeting.clone(), Vec::new())];
        let (typing, _) = watch::channel(false);
        Self {
            chat,
            config,
            messages,
            typing,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_typing(&self) -> bool {
        *self.typing.borrow()
    }

    /// Observe the typing indicator
    pub fn subscribe_typing(&self) -> watch::Receiver<bool> {
        self.typing.subscribe()
    }

    /// Maximum sources rendered per reply
    pub fn max_displayed_sources(&self) -> usize {
        self.config.max_displayed_sources
    }

    /// Send a question and append the reply
    ///
    /// Blank input is ignored and returns `None`. Backend failures never
    /// surface as errors; they become a fixed apology message.
    pub async fn send(&mut self, text: &str) -> Option<&ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(text));
        self.typing.send_replace(true);

        let request = ChatRequest::new(text)
            .with_system_instruction(self.config.system_instruction.clone())
            .with_web_search(self.config.web_search);

        let reply = match self.chat.generate(&request).await {
            Ok(reply) => {
                let text = if reply.text.is_empty() {
                    EMPTY_REPLY.to_string()
                } else {
                    reply.text
                };
                tracing::debug!(sources = reply.citations.len(), "Assistant replied");
                ChatMessage::model(text, reply.citations)
            }
            Err(e) => {
                tracing::error!("Assistant request failed: {:#}", e);
                ChatMessage::model(CONNECTION_ERROR_REPLY, Vec::new())
            }
        };

        self.typing.send_replace(false);
        self.messages.push(reply);
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{ChatReply, FakeChatProvider};

    fn link(n: usize) -> SourceLink {
        SourceLink {
            title: format!("Source {}", n),
            uri: format!("https://example.com/{}", n),
        }
    }

    #[test]
    fn test_new_session_starts_with_greeting() {
        let session = AssistantSession::new(
            Arc::new(FakeChatProvider::text("hi")),
            AssistantConfig::default(),
        );
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::Model);
        assert!(session.messages()[0].text.starts_with("Hello! I am your NovaStream AI Assistant."));
        assert!(!session.is_typing());
    }

    #[tokio::test]
    async fn test_send_appends_user_and_reply_with_sources() {
        let fake = Arc::new(FakeChatProvider::replying(ChatReply {
            text: "Try the nature documentaries.".to_string(),
            citations: vec![link(1), link(2), link(3)],
        }));
        let mut session = AssistantSession::new(fake.clone(), AssistantConfig::default());

        let reply = session.send("What should I watch?").await.unwrap().clone();
        assert_eq!(reply.text, "Try the nature documentaries.");
        assert_eq!(reply.sources.len(), 3);
        assert_eq!(reply.displayed_sources(session.max_displayed_sources()).len(), 2);

        let roles: Vec<_> = session.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Model, Role::User, Role::Model]);

        let requests = fake.requests();
        let request = &requests[0];
        assert!(request.web_search);
        assert_eq!(
            request.system_instruction.as_deref(),
            Some(AssistantConfig::default().system_instruction.as_str())
        );
        assert!(!session.is_typing());
    }

    #[tokio::test]
    async fn test_blank_input_ignored() {
        let fake = Arc::new(FakeChatProvider::text("hi"));
        let mut session = AssistantSession::new(fake.clone(), AssistantConfig::default());
        assert!(session.send("   ").await.is_none());
        assert_eq!(session.messages().len(), 1);
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn test_empty_reply_uses_fallback() {
        let mut session = AssistantSession::new(
            Arc::new(FakeChatProvider::text("")),
            AssistantConfig::default(),
        );
        let reply = session.send("hello").await.unwrap();
        assert_eq!(reply.text, EMPTY_REPLY);
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_apology() {
        let mut session = AssistantSession::new(
            Arc::new(FakeChatProvider::failing("connection reset")),
            AssistantConfig::default(),
        );
        let reply = session.send("hello").await.unwrap();
        assert_eq!(reply.text, CONNECTION_ERROR_REPLY);
        assert!(reply.sources.is_empty());
        assert!(!session.is_typing());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Model).unwrap(), "\"model\"");
        assert_eq!(Role::User.to_string(), "user");
    }
}
