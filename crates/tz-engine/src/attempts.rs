//! Per-puzzle attempt counting.

use std::collections::BTreeMap;

use serde::Serialize;
use tz_puzzles::PuzzleId;

use crate::config::EngineConfig;

/// Attempt counters and their limits.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptTracker {
    attempts: BTreeMap<PuzzleId, u32>,
    max_attempts: BTreeMap<PuzzleId, u32>,
}

impl AttemptTracker {
    /// Create a tracker with every counter at zero.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            attempts: PuzzleId::all().iter().map(|&p| (p, 0)).collect(),
            max_attempts: PuzzleId::all()
                .iter()
                .map(|&p| (p, config.max_attempts(p)))
                .collect(),
        }
    }

    /// Count one attempt and return the new total.
    pub fn record(&mut self, puzzle: PuzzleId) -> u32 {
        let count = self.attempts.entry(puzzle).or_insert(0);
        *count += 1;
        *count
    }

    /// Attempts made so far.
    pub fn count(&self, puzzle: PuzzleId) -> u32 {
        self.attempts.get(&puzzle).copied().unwrap_or(0)
    }

    /// Attempt limit.
    pub fn limit(&self, puzzle: PuzzleId) -> u32 {
        self.max_attempts
            .get(&puzzle)
            .copied()
            .unwrap_or_else(|| puzzle.default_max_attempts())
    }

    /// Attempts left before the puzzle is exhausted.
    pub fn remaining(&self, puzzle: PuzzleId) -> u32 {
        self.limit(puzzle).saturating_sub(self.count(puzzle))
    }

    /// Whether no attempts remain.
    pub fn is_exhausted(&self, puzzle: PuzzleId) -> bool {
        self.remaining(puzzle) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_up_to_limit() {
        let mut t = AttemptTracker::new(&EngineConfig::default());
        assert_eq!(t.remaining(PuzzleId::Power), 3);
        assert_eq!(t.record(PuzzleId::Power), 1);
        assert_eq!(t.record(PuzzleId::Power), 2);
        assert!(!t.is_exhausted(PuzzleId::Power));
        t.record(PuzzleId::Power);
        assert!(t.is_exhausted(PuzzleId::Power));
        assert_eq!(t.remaining(PuzzleId::Power), 0);
    }

    #[test]
    fn puzzles_are_independent() {
        let mut t = AttemptTracker::new(&EngineConfig::default());
        t.record(PuzzleId::Decoder);
        assert_eq!(t.count(PuzzleId::Decoder), 1);
        assert_eq!(t.count(PuzzleId::Amplifier), 0);
        assert_eq!(t.remaining(PuzzleId::Amplifier), 10);
    }

    #[test]
    fn respects_config() {
        let cfg = EngineConfig::default().with_max_attempts(PuzzleId::Power, 1);
        let mut t = AttemptTracker::new(&cfg);
        t.record(PuzzleId::Power);
        assert!(t.is_exhausted(PuzzleId::Power));
    }

    #[test]
    fn serializes_both_maps() {
        let t = AttemptTracker::new(&EngineConfig::default());
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["attempts"]["power"], 0);
        assert_eq!(json["max_attempts"]["amplifier"], 10);
    }
}
