//! Input parsing and answer validation for TZ's five repair puzzles.
//!
//! The validators are pure functions: they take the player's raw line and
//! return a [`Verdict`] with feedback text. Attempt counting, deviation, and
//! stage flow live in `tz-engine`.

pub mod alien;
pub mod amplifier;
pub mod combat;
pub mod decoder;
pub mod input;
pub mod power;
pub mod puzzle;
pub mod verdict;

pub use alien::{AlienReading, interpret};
pub use amplifier::check_frequency;
pub use combat::{CombatVerdict, check_sequence};
pub use decoder::check_decryption;
pub use input::{Answer, Choice, is_exit_word, normalize_text, parse_answer, parse_choice};
pub use power::check_path;
pub use puzzle::PuzzleId;
pub use verdict::Verdict;
