//! Journal entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tz_puzzles::PuzzleId;

use crate::ending::Ending;

/// A single entry in the session journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JournalEntry {
    /// The dialogue moved to another stage.
    StageChange {
        /// Stage before the turn.
        from: String,
        /// Stage after the turn.
        to: String,
        /// When the transition happened.
        timestamp: DateTime<Utc>,
    },
    /// The player gave their name.
    PlayerNamed {
        /// Name as recorded.
        name: String,
        /// When it was given.
        timestamp: DateTime<Utc>,
    },
    /// One answer to a puzzle.
    PuzzleAttempt {
        /// The puzzle answered.
        puzzle: PuzzleId,
        /// Raw answer text.
        answer: String,
        /// Whether the answer solved the puzzle.
        solved: bool,
        /// Validator feedback.
        feedback: String,
        /// Attempt number, starting at 1.
        attempt: u32,
        /// When answered.
        timestamp: DateTime<Utc>,
    },
    /// A puzzle ran out of attempts.
    PuzzleExhausted {
        /// The puzzle given up on.
        puzzle: PuzzleId,
        /// Whether the module was credited anyway.
        credited: bool,
        /// When the last attempt failed.
        timestamp: DateTime<Utc>,
    },
    /// A task was declined and skipped.
    TaskSkipped {
        /// The puzzle skipped.
        puzzle: PuzzleId,
        /// When the skip was confirmed.
        timestamp: DateTime<Utc>,
    },
    /// Deviation moved.
    DeviationChange {
        /// What caused the change.
        reason: String,
        /// Requested change before clamping.
        delta: f64,
        /// Value after clamping.
        value: f64,
        /// When the change applied.
        timestamp: DateTime<Utc>,
    },
    /// A memory fragment was played back.
    MemoryFragment {
        /// Experience count used as the cache key.
        experience_count: u8,
        /// Whether the text came from the cache.
        cache_hit: bool,
        /// When the fragment was shown.
        timestamp: DateTime<Utc>,
    },
    /// The ending was decided.
    EndingResolved {
        /// The ending reached.
        ending: Ending,
        /// Modules repaired at the end.
        modules: usize,
        /// Final deviation.
        deviation: f64,
        /// Final choice letter.
        final_choice: char,
        /// When the ending was decided.
        timestamp: DateTime<Utc>,
    },
}
