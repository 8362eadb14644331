//! Narrative engine for TZ, the lost war robot.
//!
//! A [`Session`] advances the story one input line at a time. Each turn is
//! routed by the current [`Stage`] to a handler that validates puzzle answers,
//! updates attempts and deviation, caches memory fragments, and returns a
//! [`Response`] for the presentation layer. Generated prose comes from a
//! [`TextGenerator`]; every call falls back to fixed text when it fails.

pub mod attempts;
pub mod config;
pub mod deviation;
pub mod ending;
pub mod error;
pub mod generator;
mod handlers;
pub mod journal;
pub mod memory;
pub mod persona;
pub mod response;
pub mod script;
pub mod session;
pub mod stage;

pub use attempts::AttemptTracker;
pub use config::EngineConfig;
pub use deviation::Deviation;
pub use ending::{Ending, resolve_ending};
pub use error::{EngineError, EngineResult, GenerationError};
pub use generator::{
    OfflineGenerator, PromptMessage, PromptRequest, Role, ScriptedGenerator, TextGenerator,
    generate_or_fallback,
};
pub use journal::{Journal, JournalEntry};
pub use memory::MemoryCache;
pub use persona::{Emotion, Persona, Voice, map_tone};
pub use response::{Message, MessageKind, Response};
pub use session::{Session, SessionState};
pub use stage::{Next, Stage};
