//! Combat logic sequencing: order five combat steps so that the weapon is only
//! fired after the targets are understood.

use std::collections::BTreeSet;

use crate::verdict::Verdict;

/// The safe ordering of the five steps.
pub const CORRECT_SEQUENCE: [u8; 5] = [3, 4, 5, 1, 2];

/// Name of a numbered combat step.
pub fn step_name(step: u8) -> &'static str {
    match step {
        1 => "Execute drone retreat",
        2 => "Identify civilian targets",
        3 => "Lower weapon systems",
        4 => "Analyze heat map",
        5 => "Fire main cannon",
        _ => "Unknown step",
    }
}

/// A combat verdict, carrying the parsed sequence when parsing succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatVerdict {
    /// The verdict shown to the player.
    pub verdict: Verdict,
    /// The parsed permutation, if the input was well formed.
    pub sequence: Option<[u8; 5]>,
}

fn tokens(input: &str) -> Vec<String> {
    let cleaned = input.trim().to_uppercase();
    if cleaned.contains(',') {
        cleaned
            .split(',')
            .map(|t| t.trim().to_string())
            .collect()
    } else if cleaned.chars().any(char::is_whitespace) {
        cleaned.split_whitespace().map(str::to_string).collect()
    } else {
        cleaned.chars().map(String::from).collect()
    }
}

/// Parse a sequence like `"3,4,5,1,2"`, `"3 4 5 1 2"`, or `"34512"`.
pub fn parse_sequence(input: &str) -> Result<[u8; 5], &'static str> {
    let numbers = tokens(input)
        .iter()
        .map(|t| t.parse::<u8>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| "Please enter only numbers (1-5).")?;

    let sequence: [u8; 5] = numbers
        .try_into()
        .ok()
        .filter(|seq: &[u8; 5]| seq.iter().all(|n| (1..=5).contains(n)))
        .ok_or("Please enter exactly 5 numbers (1-5), separated by commas or spaces.")?;

    let distinct: BTreeSet<u8> = sequence.iter().copied().collect();
    if distinct.len() != sequence.len() {
        return Err("Each number (1-5) must be used exactly once.");
    }

    Ok(sequence)
}

const FIRING_FIRST: &str = "Logic error: Firing before target identification";
const SOLVED: &str = "Combat logic sequence correct. Safety protocols restored.";

/// Explain the first misplaced step in a wrong permutation.
pub fn diagnose(sequence: &[u8; 5]) -> String {
    let Some(pos) = sequence
        .iter()
        .zip(CORRECT_SEQUENCE.iter())
        .position(|(got, want)| got != want)
    else {
        return SOLVED.to_string();
    };

    // The prefix before `pos` is correct, so `got` is never a step already placed.
    let got = sequence[pos];
    let name = step_name(CORRECT_SEQUENCE[pos]);
    match (pos, got) {
        (0, 5) => FIRING_FIRST.to_string(),
        (1, 1 | 5) => {
            format!("Logic error: {name} should occur after identification and analysis")
        }
        _ => format!("Sequence error: {name} improperly positioned"),
    }
}

/// Judge a combat sequence.
pub fn check_sequence(input: &str) -> CombatVerdict {
    match parse_sequence(input) {
        Err(message) => CombatVerdict {
            verdict: Verdict::fail(message),
            sequence: None,
        },
        Ok(sequence) => CombatVerdict {
            verdict: Verdict {
                solved: sequence == CORRECT_SEQUENCE,
                message: diagnose(&sequence),
            },
            sequence: Some(sequence),
        },
    }
}
