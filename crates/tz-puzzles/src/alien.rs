//! Alien signal interpretation: pick a reading of an ambiguous transmission.
//!
//! Every valid reading solves the puzzle; the reading chosen shifts TZ's
//! deviation from its programming.

use crate::input::{Choice, parse_choice_in};

const OPTIONS: [Choice; 3] = [Choice::A, Choice::B, Choice::C];

/// The outcome of interpreting the alien signal.
#[derive(Debug, Clone, PartialEq)]
pub struct AlienReading {
    /// The option picked.
    pub choice: Choice,
    /// Change to apply to the deviation value.
    pub deviation_delta: f64,
    /// The decoded message.
    pub message: &'static str,
    /// Short tag describing the reading.
    pub tag: &'static str,
}

/// Message for anything other than A, B, or C.
pub const INVALID_CHOICE: &str = "Invalid choice. Please select A, B, or C.";

/// Interpret the player's reading. Returns `None` for an invalid option.
pub fn interpret(input: &str) -> Option<AlienReading> {
    let choice = parse_choice_in(input, &OPTIONS)?;
    let (deviation_delta, message, tag) = match choice {
        Choice::A => (-1.0, "We reject you.", "Misfire"),
        Choice::B => (1.0, "We don't understand.", "Preemptive"),
        _ => (0.0, "We are willing to cooperate.", "Confused"),
    };
    Some(AlienReading {
        choice,
        deviation_delta,
        message,
        tag,
    })
}
