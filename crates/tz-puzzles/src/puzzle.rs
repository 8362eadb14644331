//! The five repair puzzles and the modules they restore.

use serde::{Deserialize, Serialize};

/// One of the five repair puzzles, in the order they are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleId {
    /// Power path restoration.
    Power,
    /// Signal amplifier calibration.
    Amplifier,
    /// Caesar-cipher data decoder.
    Decoder,
    /// Alien signal interpretation.
    AlienDecode,
    /// Combat logic sequencing.
    CombatLogic,
}

impl PuzzleId {
    /// All puzzles in play order.
    pub fn all() -> &'static [Self] {
        &[
            Self::Power,
            Self::Amplifier,
            Self::Decoder,
            Self::AlienDecode,
            Self::CombatLogic,
        ]
    }

    /// The puzzle offered after this one, or `None` after the last.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Power => Some(Self::Amplifier),
            Self::Amplifier => Some(Self::Decoder),
            Self::Decoder => Some(Self::AlienDecode),
            Self::AlienDecode => Some(Self::CombatLogic),
            Self::CombatLogic => None,
        }
    }

    /// Default number of attempts before the puzzle is exhausted.
    pub fn default_max_attempts(self) -> u32 {
        match self {
            Self::Amplifier => 10,
            _ => 3,
        }
    }

    /// Whether the module is still credited when every attempt fails.
    ///
    /// The last two puzzles credit their module on exhaustion so the story
    /// cannot stall right before the finale.
    pub fn credits_on_exhaustion(self) -> bool {
        matches!(self, Self::AlienDecode | Self::CombatLogic)
    }

    /// Name of the module this puzzle repairs.
    pub fn module_name(self) -> &'static str {
        match self {
            Self::Power => "Power Module",
            Self::Amplifier => "Signal Amplifier",
            Self::Decoder => "Data Decoder",
            Self::AlienDecode => "Alien Communication",
            Self::CombatLogic => "Combat Logic",
        }
    }

    /// Short task title used in progress messages.
    pub fn title(self) -> &'static str {
        match self {
            Self::Power => "Power Path Restoration",
            Self::Amplifier => "Signal Amplifier",
            Self::Decoder => "Data Decryption",
            Self::AlienDecode => "Alien Language Decoder",
            Self::CombatLogic => "Combat Logic Sequencer",
        }
    }

    /// Stable identifier, matching the serialized form.
    pub fn key(self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Amplifier => "amplifier",
            Self::Decoder => "decoder",
            Self::AlienDecode => "alien_decode",
            Self::CombatLogic => "combat_logic",
        }
    }
}

impl std::fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_order_follows_next() {
        let mut order = vec![PuzzleId::Power];
        while let Some(next) = order.last().and_then(|p| p.next()) {
            order.push(next);
        }
        assert_eq!(order, PuzzleId::all());
    }

    #[test]
    fn attempt_limits() {
        assert_eq!(PuzzleId::Power.default_max_attempts(), 3);
        assert_eq!(PuzzleId::Amplifier.default_max_attempts(), 10);
        assert_eq!(PuzzleId::CombatLogic.default_max_attempts(), 3);
    }

    #[test]
    fn only_late_puzzles_credit_on_exhaustion() {
        let credited: Vec<_> = PuzzleId::all()
            .iter()
            .copied()
            .filter(|p| p.credits_on_exhaustion())
            .collect();
        assert_eq!(credited, [PuzzleId::AlienDecode, PuzzleId::CombatLogic]);
    }

    #[test]
    fn serialized_form_matches_key() {
        for puzzle in PuzzleId::all() {
            let json = serde_json::to_string(puzzle).unwrap();
            assert_eq!(json, format!("\"{}\"", puzzle.key()));
        }
    }
}
