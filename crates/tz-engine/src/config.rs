//! Configuration for a TZ session.

use std::collections::BTreeMap;

use tz_puzzles::PuzzleId;
use tz_puzzles::amplifier::{DEFAULT_TARGET, MAX_FREQUENCY, MIN_FREQUENCY};

/// Tunable rules for one session.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    max_attempts: BTreeMap<PuzzleId, u32>,
    /// Frequency the amplifier locks onto (1000-5000).
    pub target_frequency: i64,
    /// Token ceiling for NPC lines.
    pub npc_max_tokens: u32,
    /// Token ceiling for memory fragments.
    pub memory_max_tokens: u32,
    /// Deviation added when the combat puzzle is failed out (-1.0 to 1.0).
    pub combat_failure_penalty: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_attempts: PuzzleId::all()
                .iter()
                .map(|&p| (p, p.default_max_attempts()))
                .collect(),
            target_frequency: DEFAULT_TARGET,
            npc_max_tokens: 500,
            memory_max_tokens: 300,
            combat_failure_penalty: 0.1,
        }
    }
}

impl EngineConfig {
    /// Maximum attempts allowed for a puzzle.
    pub fn max_attempts(&self, puzzle: PuzzleId) -> u32 {
        self.max_attempts
            .get(&puzzle)
            .copied()
            .unwrap_or_else(|| puzzle.default_max_attempts())
    }

    /// All attempt limits.
    pub fn attempt_limits(&self) -> &BTreeMap<PuzzleId, u32> {
        &self.max_attempts
    }

    /// Set the attempt limit for a puzzle (at least 1).
    pub fn with_max_attempts(mut self, puzzle: PuzzleId, attempts: u32) -> Self {
        self.max_attempts.insert(puzzle, attempts.max(1));
        self
    }

    /// Set the amplifier target (clamped to 1000-5000).
    pub fn with_target_frequency(mut self, freq: i64) -> Self {
        self.target_frequency = freq.clamp(MIN_FREQUENCY, MAX_FREQUENCY);
        self
    }

    /// Set the NPC token ceiling (at least 1).
    pub fn with_npc_max_tokens(mut self, tokens: u32) -> Self {
        self.npc_max_tokens = tokens.max(1);
        self
    }

    /// Set the memory fragment token ceiling (at least 1).
    pub fn with_memory_max_tokens(mut self, tokens: u32) -> Self {
        self.memory_max_tokens = tokens.max(1);
        self
    }

    /// Set the combat forced-failure penalty (clamped to -1.0 to 1.0).
    pub fn with_combat_failure_penalty(mut self, penalty: f64) -> Self {
        self.combat_failure_penalty = penalty.clamp(-1.0, 1.0);
        self
    }
}
