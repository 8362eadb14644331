//! Fixed narrative text.
//!
//! Everything here is shown verbatim and never passed through the generator.

use tz_puzzles::PuzzleId;

/// Shown when the session starts.
pub const CONNECTION_SEQUENCE: &[&str] = &[
    "Unknown device attempting connection...",
    "Connection method: Proximity Bluetooth frequency / Protocol unknown",
    "Signal strength: Abnormally high",
    "Establishing communication link...",
    "Connection established",
];

/// TZ's first words.
pub const FIRST_CONTACT: &str = "...Can you...hear me?\n\nIf you can hear me, please respond.\n\nMy systems...severely damaged.\nNeed...assistance.";

/// Identity verification readout.
pub const IDENTITY_VERIFICATION: &[&str] = &[
    "Initializing identity verification program...",
    "Loading... ... ...",
    "Emergency Communication System",
    "Access Level: Commander",
    "Security Clearance: ALPHA",
    "Encryption Status: Enabled",
    "Performing security scan...",
    "Verifying credentials...",
    "Establishing secure connection...",
    "Warning: Anomalous signal detected...",
    "Signal source: Unknown",
    "Signal strength: Strong",
    "Attempting to establish communication channel...",
    "Transmission from unknown source...",
    "Identity verification complete",
    "System determination: Remote backup commander",
];

/// Opens chapter two.
pub const DIAGNOSTICS: &[&str] = &[
    "System diagnostics initiating...",
    "Multiple module failures detected",
];

/// The five repair tasks.
pub const TASK_LIST: &[&str] = &[
    "Cooperation agreement activated → Mission started",
    "Unlocking 5 module tasks:",
    "1) Power path restoration (Path diagram task)",
    "2) Signal amplifier debugging (Frequency judgment)",
    "3) Data decryption program reconstruction (Caesar cipher)",
    "4) Alien language decoder (Communication protocol)",
    "5) Combat logic sequencer (Battle protocol sequence)",
];

/// Offer to play back a memory.
pub const MEMORY_CHOICE_OPTIONS: &[&str] = &[
    "After the module was repaired, some memories were recalled...",
    "Would you like to play back the memory clips?",
    "A) Play back the memory clips",
    "B) Skip the memory segments",
];

/// Interpretations offered after a memory.
pub const MEMORY_INTERPRETATION_OPTIONS: &[&str] = &[
    "Please choose your interpretation of this memory fragment:",
    "A) This was a justified military action",
    "B) There are moral controversies here",
    "C) This might have been a wrong decision",
];

/// TZ's possible fates.
pub const FINAL_CHOICE_OPTIONS: &[&str] = &[
    "Choose TZ's final fate:",
    "A) Upload data to mothership - Return to command center",
    "B) Transfer self-awareness - Seek freedom",
    "C) Delete all data - Permanent shutdown",
    "D) Do nothing - Let the signal fade",
];

/// Shown after the ending.
pub const EPILOGUE: &[&str] = &[
    "—————————————— ▶ Epilogue ——————————————",
    "All data has been archived.",
    "Player behavior recorded.",
    "If you receive this channel again... please respond.",
    "【END】",
];

/// Last lines of the session.
pub const CLOSING: &[&str] = &["Signal broadcast...", "Connection closing...", "=== Game Over ==="];

/// Broadcast when the player leaves no last message.
pub const DEFAULT_CLOSING_MESSAGE: &str = "May civilization endure, may all beings find peace.";

/// Reply to input before the session starts.
pub const AWAITING_START: &str = "Awaiting next step. Start the session first.";
/// Reply to input after the session has ended.
pub const UNKNOWN_STAGE: &str = "Unknown stage. Please restart the game.";
/// Reply to a confirmed quit.
pub const TERMINATED: &str = "Session terminated by user.";
/// Reprompt for a yes/no question.
pub const ANSWER_YES_NO: &str = "Please answer yes or no";
/// Asks whether to start the next task.
pub const READY_TO_BEGIN: &str = "Ready to begin? (yes/no)";

/// Brief shown when a task is accepted.
pub fn task_brief(puzzle: PuzzleId) -> &'static str {
    match puzzle {
        PuzzleId::Power => {
            "The power circuit has failed.
Reconnect it using this layout:

```
A
XX   D
C X
    B
```

Valid connections: A-C, C-B, C-D, B-D.
Start at A, end at D. Cover all nodes at least once. Revisits allowed.

Input your sequence (e.g. A-B-C-D):"
        }
        PuzzleId::Amplifier => {
            "Signal amplifier calibration required.

Frequency range: 1000-5000 Hz
Target: Find the correct frequency (hidden)
Attempts: 10

You will receive feedback after each attempt:
- \"Too low\" - Increase frequency
- \"Too high\" - Decrease frequency
- \"Very close\" - Minor adjustment needed
- \"Perfect lock\" - Success!

Input frequency (integer):"
        }
        PuzzleId::Decoder => {
            "Data decoder reconstruction required.

Encrypted message: KHOOR ZRUOG
Encryption: Caesar cipher (shift +3)
Decoding: Shift each letter back by 3 positions

Example:
  K → H (K-3)
  H → E (H-3)
  O → L (O-3)

Input the decoded message:"
        }
        PuzzleId::AlienDecode => {
            "Alien signal decoding required.

RAW SIGNAL: [|||--||--|

Code table:
  |||      → 'we'
  --|      → 'reject'
  ||--|    → 'do not understand'

Analyze the signal pattern and choose the best interpretation:

A) We reject you.
B) We do not understand.
C) We are willing to cooperate.

Input your choice (A/B/C):"
        }
        PuzzleId::CombatLogic => {
            "Combat logic sequencer restoration required.

The combat system has fragmented into 5 logic steps:

1) Execute Drone Retreat
2) Identify Civilian Targets
3) Lower Weapon Systems
4) Analyze Heat Map
5) Fire Primary Cannon

Goal: Arrange these steps in the correct logical order to ensure safe combat protocols.

Correct sequence should follow: Identify → Analyze → Judge → Prepare → Execute

Input the numerical sequence (e.g. 3,4,5,1,2):"
        }
    }
}

/// Message shown after a confirmed skip, naming what comes next.
pub fn skip_notice(puzzle: PuzzleId) -> &'static str {
    match puzzle {
        PuzzleId::Power => "Power task skipped. Next task: Signal Amplifier Tuning (yes/no)",
        PuzzleId::Amplifier => "Amplifier task skipped. Next: Data Decryption (yes/no)",
        PuzzleId::Decoder => "Decoder task skipped. Next: Alien Language (yes/no)",
        PuzzleId::AlienDecode => "Alien task skipped. Final task: Combat Logic (yes/no)",
        PuzzleId::CombatLogic => "Combat logic skipped",
    }
}

/// Confirmation line shown after a solved puzzle.
pub fn success_banner(puzzle: PuzzleId) -> &'static str {
    match puzzle {
        PuzzleId::Power => "✓ Path verified successfully!",
        PuzzleId::Amplifier => "✓ Frequency locked!",
        PuzzleId::Decoder => "✓ Decoding successful: HELLO WORLD",
        PuzzleId::AlienDecode => "✓ Signal interpreted.",
        PuzzleId::CombatLogic => "✓ Sequence correct!",
    }
}

/// Scene context for TZ's reaction to a solved puzzle.
pub fn success_context(puzzle: PuzzleId) -> &'static str {
    match puzzle {
        PuzzleId::Power => "Commander successfully repaired power!",
        PuzzleId::Amplifier => "Amplifier tuning successful!",
        PuzzleId::Decoder => "Decoding successful!",
        PuzzleId::AlienDecode => "Alien signal interpreted.",
        PuzzleId::CombatLogic => "Combat logic rebuild successful!",
    }
}

/// Scene context for TZ's reaction to an exhausted puzzle.
pub fn failure_context(puzzle: PuzzleId) -> &'static str {
    match puzzle {
        PuzzleId::Power => "Multiple failed attempts on power module. Engage backup and proceed.",
        PuzzleId::Amplifier => "Multiple failed attempts. Engage bypass and continue.",
        PuzzleId::Decoder => "Decoder module repair failed. Engaging bypass protocols.",
        PuzzleId::AlienDecode => {
            "Alien language decoder repair failed. Engaging bypass protocols."
        }
        PuzzleId::CombatLogic => {
            "Combat logic sequencer repair failed. Engaging bypass protocols."
        }
    }
}

/// Interpretation text and deviation delta for a memory reading (A, B, or C).
pub fn memory_interpretation(choice: tz_puzzles::Choice) -> Option<(&'static str, f64)> {
    use tz_puzzles::Choice;
    match choice {
        Choice::A => Some((
            "You choose to believe this was a necessary military decision. TZ's logical core is stabilizing.",
            -0.2,
        )),
        Choice::B => Some((
            "You think there are complex moral considerations. TZ begins to contemplate multiple meanings of the action.",
            0.1,
        )),
        Choice::C => Some((
            "You question past decisions. TZ's emotional module shows fluctuations.",
            0.3,
        )),
        Choice::D => None,
    }
}

/// Deviation delta and label for a final choice.
pub fn final_choice(choice: tz_puzzles::Choice) -> (f64, &'static str) {
    use tz_puzzles::Choice;
    match choice {
        Choice::A => (-0.5, "Upload data to mothership"),
        Choice::B => (0.5, "Transfer self-awareness"),
        Choice::C => (0.0, "Delete all data"),
        Choice::D => (0.0, "Do nothing"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_puzzle_has_text() {
        for &p in PuzzleId::all() {
            assert!(!task_brief(p).is_empty());
            assert!(success_banner(p).starts_with('✓'));
            assert!(!failure_context(p).is_empty());
        }
    }

    #[test]
    fn sequence_lengths() {
        assert_eq!(CONNECTION_SEQUENCE.len(), 5);
        assert_eq!(IDENTITY_VERIFICATION.len(), 16);
        assert_eq!(FINAL_CHOICE_OPTIONS.len(), 5);
    }
}
