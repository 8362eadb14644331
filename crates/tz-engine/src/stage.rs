//! Dialogue stages.
//!
//! Stages form a closed set. Task-scoped stages carry the puzzle they belong
//! to, and memory stages carry where the story goes next, so every dispatch
//! is an exhaustive match.

use serde::{Serialize, Serializer};
use tz_puzzles::PuzzleId;

/// Where the story resumes after a memory interlude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    /// Offer this task.
    Task(PuzzleId),
    /// Present the final choice.
    Final,
}

impl Next {
    /// What follows `puzzle`.
    pub fn after(puzzle: PuzzleId) -> Self {
        puzzle.next().map_or(Self::Final, Self::Task)
    }
}

impl std::fmt::Display for Next {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Task(p) => write!(f, "{p}"),
            Self::Final => write!(f, "final"),
        }
    }
}

/// The current position in the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Created but not started.
    Init,
    /// Connection shown, waiting for any reply.
    FirstContact,
    /// Asking whether to run identity verification.
    AskIdent,
    /// Waiting for the commander's name.
    IdentifyName,
    /// Asking for cooperation.
    Consent,
    /// Diagnostics shown, waiting to list the tasks.
    Chapter2Intro,
    /// Task offered, waiting for yes/no.
    TaskOffer(PuzzleId),
    /// Player declined; waiting for skip confirmation.
    TaskConfirmReject(PuzzleId),
    /// Puzzle in progress.
    Task(PuzzleId),
    /// Asking whether to play back a memory.
    MemoryChoice(Next),
    /// Memory shown, waiting for an interpretation.
    Memory(Next),
    /// Waiting for TZ's fate, A to D.
    FinalChoice,
    /// Ending shown, waiting for a last message.
    Ending,
    /// Nothing more to process.
    Ended,
}

impl Stage {
    /// Whether the stage accepts story input.
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Init | Self::Ended)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::FirstContact => write!(f, "first_contact"),
            Self::AskIdent => write!(f, "ask_ident"),
            Self::IdentifyName => write!(f, "identify_name"),
            Self::Consent => write!(f, "consent"),
            Self::Chapter2Intro => write!(f, "chapter2_intro"),
            Self::TaskOffer(p) => write!(f, "{p}_task_offer"),
            Self::TaskConfirmReject(p) => write!(f, "{p}_task_confirm_reject"),
            Self::Task(p) => write!(f, "{p}"),
            Self::MemoryChoice(next) => write!(f, "memory_choice_{next}"),
            Self::Memory(next) => write!(f, "memory_{next}"),
            Self::FinalChoice => write!(f, "final_choice"),
            Self::Ending => write!(f, "ending"),
            Self::Ended => write!(f, "ended"),
        }
    }
}

impl Serialize for Stage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
