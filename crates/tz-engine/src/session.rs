//! Session management.
//!
//! `Session` owns all narrative state for one playthrough and routes each
//! input line to the handler for the current stage. Handlers live in the
//! `handlers` module as further `impl Session` blocks.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};
use tz_puzzles::{Choice, PuzzleId, is_exit_word};

use crate::attempts::AttemptTracker;
use crate::config::EngineConfig;
use crate::deviation::Deviation;
use crate::error::{EngineError, EngineResult};
use crate::generator::{TextGenerator, generate_or_fallback};
use crate::journal::{Journal, JournalEntry};
use crate::memory::MemoryCache;
use crate::persona::{Emotion, Persona, Voice, map_tone, npc_fallback, npc_prompt};
use crate::response::{Message, Response};
use crate::script;
use crate::stage::Stage;

/// Everything that changes during a playthrough.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    /// Name given at identification, if any.
    pub player_name: Option<String>,
    /// Where the dialogue is.
    pub stage: Stage,
    /// Puzzles exhausted without credit.
    pub tasks_failed: u32,
    /// Modules credited so far, in order. Each appears at most once.
    pub modules_repaired: Vec<PuzzleId>,
    /// Attempts used per puzzle.
    #[serde(flatten)]
    pub attempts: AttemptTracker,
    /// Accumulated moral deviation.
    pub deviation: Deviation,
    /// Letter picked at the final choice.
    pub final_choice: Option<Choice>,
    /// Fragments already generated, by experience count.
    pub memory_fragments: MemoryCache,
    /// TZ's current voice.
    #[serde(flatten)]
    pub voice: Voice,
}

impl SessionState {
    fn new(config: &EngineConfig) -> Self {
        Self {
            player_name: None,
            stage: Stage::Init,
            tasks_failed: 0,
            modules_repaired: Vec::new(),
            attempts: AttemptTracker::new(config),
            deviation: Deviation::default(),
            final_choice: None,
            memory_fragments: MemoryCache::new(),
            voice: Voice::default(),
        }
    }

    /// Number of modules credited.
    pub fn modules_count(&self) -> usize {
        self.modules_repaired.len()
    }

    /// Pretty JSON snapshot.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One playthrough of the TZ story.
pub struct Session {
    pub(crate) config: EngineConfig,
    pub(crate) generator: Box<dyn TextGenerator>,
    pub(crate) state: SessionState,
    pub(crate) journal: Journal,
}

impl Session {
    /// Create a session in the `init` stage.
    pub fn new(config: EngineConfig, generator: Box<dyn TextGenerator>) -> Self {
        let state = SessionState::new(&config);
        Self {
            config,
            generator,
            state,
            journal: Journal::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    /// The session journal.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Discard all state, the voice, and the journal.
    pub fn reset(&mut self) {
        self.state = SessionState::new(&self.config);
        self.journal = Journal::new();
        debug!("session reset");
    }

    /// Reset and open the connection. Moves to `first_contact`.
    pub fn start(&mut self) -> Response {
        self.reset();
        self.transition(Stage::FirstContact);

        let mut response = Response::new();
        response.extend_system(script::CONNECTION_SEQUENCE);
        response.push(Message::npc(script::FIRST_CONTACT).with_delay(1500));
        response
    }

    /// Derive the voice from a 0-100 tone value.
    pub fn apply_tone(&mut self, tone: u32) -> EngineResult<Voice> {
        let tone = u8::try_from(tone)
            .ok()
            .filter(|t| *t <= 100)
            .ok_or(EngineError::InvalidTone(tone))?;
        self.state.voice = map_tone(tone);
        debug!(tone, voice = ?self.state.voice, "tone applied");
        Ok(self.state.voice)
    }

    /// Set the voice directly. Intensity is clamped to 0.1-1.0.
    pub fn set_voice(&mut self, persona: Persona, emotion: Emotion, intensity: f64) -> Voice {
        self.state.voice = Voice::new(persona, emotion, intensity);
        self.state.voice
    }

    /// Process one line of player input.
    ///
    /// Never fails: unrecognized input produces a clarification and leaves
    /// the stage unchanged.
    pub fn process(&mut self, input: &str) -> Response {
        let text = input.trim();
        let before = self.state.stage;

        if before.is_active() && is_exit_word(text) {
            info!(stage = %before, "session terminated by player");
            self.transition(Stage::Ended);
            return Response::system(script::TERMINATED);
        }

        match before {
            Stage::Init => Response::system(script::AWAITING_START),
            Stage::FirstContact => self.do_first_contact(text),
            Stage::AskIdent => self.do_ask_ident(text),
            Stage::IdentifyName => self.do_identify_name(text),
            Stage::Consent => self.do_consent(text),
            Stage::Chapter2Intro => self.do_chapter2_intro(text),
            Stage::TaskOffer(puzzle) => self.do_task_offer(puzzle, text),
            Stage::TaskConfirmReject(puzzle) => self.do_confirm_reject(puzzle, text),
            Stage::Task(puzzle) => self.do_task(puzzle, text),
            Stage::MemoryChoice(next) => self.do_memory_choice(next, text),
            Stage::Memory(next) => self.do_memory(next, text),
            Stage::FinalChoice => self.do_final_choice(text),
            Stage::Ending => self.do_ending(text),
            Stage::Ended => Response::system(script::UNKNOWN_STAGE),
        }
    }

    /// Move to `stage`, logging and journaling the change.
    pub(crate) fn transition(&mut self, stage: Stage) {
        let from = self.state.stage;
        if from == stage {
            return;
        }
        debug!(%from, to = %stage, "stage transition");
        self.state.stage = stage;
        self.journal.append(JournalEntry::StageChange {
            from: from.to_string(),
            to: stage.to_string(),
            timestamp: Utc::now(),
        });
    }

    /// Add `delta` to deviation, logging and journaling the change.
    pub(crate) fn shift_deviation(&mut self, delta: f64, reason: &str) -> f64 {
        let value = self.state.deviation.apply(delta);
        debug!(delta, value, reason, "deviation updated");
        self.journal.append(JournalEntry::DeviationChange {
            reason: reason.to_string(),
            delta,
            value,
            timestamp: Utc::now(),
        });
        value
    }

    /// Credit a module once.
    pub(crate) fn credit_module(&mut self, puzzle: PuzzleId) {
        if !self.state.modules_repaired.contains(&puzzle) {
            self.state.modules_repaired.push(puzzle);
        }
    }

    /// Generate one line of TZ dialogue in the current voice.
    pub(crate) fn npc_line(&self, intent: &str, context: &str, max_words: u32) -> String {
        let request = npc_prompt(
            &self.state.voice,
            intent,
            context,
            max_words,
            self.config.npc_max_tokens,
        );
        generate_or_fallback(self.generator.as_ref(), &request, &npc_fallback(intent))
    }

    /// An NPC message generated from `intent` and `context`.
    pub(crate) fn npc(&self, intent: &str, context: &str, max_words: u32) -> Message {
        Message::npc(self.npc_line(intent, context, max_words))
    }
}
