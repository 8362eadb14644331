//! The judgment returned by a puzzle validator.

/// Whether an answer solved its puzzle, with feedback for the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// The answer solved the puzzle.
    pub solved: bool,
    /// Feedback text shown to the player.
    pub message: String,
}

impl Verdict {
    /// A solving verdict.
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            solved: true,
            message: message.into(),
        }
    }

    /// A failing verdict.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            solved: false,
            message: message.into(),
        }
    }
}
