//! Error types for the narrative engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by adapter-facing engine calls.
///
/// Turn processing itself never fails; these only surface from settings the
/// adapter passes in.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Persona name not in the persona table.
    #[error("unknown persona: {0}")]
    UnknownPersona(String),

    /// Emotion name not in the emotion list.
    #[error("unknown emotion: {0}")]
    UnknownEmotion(String),

    /// Tone outside 0-100.
    #[error("invalid tone: {0} (expected 0-100)")]
    InvalidTone(u32),
}

/// Failures of the text-generation collaborator.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request did not finish in time.
    #[error("generation timed out")]
    Timeout,

    /// Network or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("service returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The service answered but produced no text.
    #[error("empty response")]
    EmptyResponse,

    /// No generator is configured.
    #[error("generator unavailable: {0}")]
    Unavailable(String),
}
