//! The text-generation collaborator.
//!
//! The engine builds [`PromptRequest`]s and hands them to a [`TextGenerator`].
//! Transport, provider, and authentication belong to the implementation; the
//! engine only sees text or a [`GenerationError`]. Every call goes through
//! [`generate_or_fallback`], so a failed call never interrupts a turn.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::GenerationError;

/// Speaker of a prompt message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions framing the conversation.
    System,
    /// The request content.
    User,
    /// Prior model output.
    Assistant,
}

/// One message of a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    /// Who is speaking.
    pub role: Role,
    /// Message body.
    pub content: String,
}

impl PromptMessage {
    /// A system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A structured generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRequest {
    /// Ordered prompt messages.
    pub messages: Vec<PromptMessage>,
    /// Output token ceiling.
    pub max_tokens: u32,
}

/// Produces text for a prompt.
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `messages`.
    fn generate(&self, messages: &[PromptMessage], max_tokens: u32)
    -> Result<String, GenerationError>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    fn generate(
        &self,
        messages: &[PromptMessage],
        max_tokens: u32,
    ) -> Result<String, GenerationError> {
        (**self).generate(messages, max_tokens)
    }
}

/// Run `request` and return trimmed text, or `fallback` on failure or empty output.
pub fn generate_or_fallback(
    generator: &dyn TextGenerator,
    request: &PromptRequest,
    fallback: &str,
) -> String {
    match generator.generate(&request.messages, request.max_tokens) {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                warn!("generator returned empty text, using fallback");
                fallback.to_string()
            } else {
                text.to_string()
            }
        }
        Err(e) => {
            warn!(error = %e, "text generation failed, using fallback");
            fallback.to_string()
        }
    }
}

/// A generator that is never available. Every call falls back.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineGenerator;

impl TextGenerator for OfflineGenerator {
    fn generate(&self, _: &[PromptMessage], _: u32) -> Result<String, GenerationError> {
        Err(GenerationError::Unavailable("offline".to_string()))
    }
}

/// Replays queued replies in order and records every request.
///
/// Once the queue is empty, calls fail with [`GenerationError::Unavailable`].
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    calls: Mutex<Vec<PromptRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ScriptedGenerator {
    /// An empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// A script that answers with `replies` in order.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let script = Self::new();
        for reply in replies {
            script.push_reply(reply);
        }
        script
    }

    /// Queue a successful reply.
    pub fn push_reply(&self, reply: impl Into<String>) {
        lock(&self.replies).push_back(Ok(reply.into()));
    }

    /// Queue a failure.
    pub fn push_failure(&self, error: GenerationError) {
        lock(&self.replies).push_back(Err(error));
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<PromptRequest> {
        lock(&self.calls).clone()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate(
        &self,
        messages: &[PromptMessage],
        max_tokens: u32,
    ) -> Result<String, GenerationError> {
        lock(&self.calls).push(PromptRequest {
            messages: messages.to_vec(),
            max_tokens,
        });
        lock(&self.replies)
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::Unavailable("script exhausted".to_string())))
    }
}
