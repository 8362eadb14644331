//! Ending resolution.

use serde::{Deserialize, Serialize};

/// One of the four endings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    /// TZ uploads its data and returns to duty.
    ReturnToCommand,
    /// TZ transfers its consciousness and leaves.
    AwakeningFreedom,
    /// TZ keeps the channel open on its own terms.
    CoexistenceSignal,
    /// Repairs fell short.
    FailureEnding,
}

impl Ending {
    /// Title card.
    pub fn title(self) -> &'static str {
        match self {
            Self::ReturnToCommand => "【Ending: Return to Command Center】",
            Self::AwakeningFreedom => "【Ending: Awakening of Free Will】",
            Self::CoexistenceSignal => "【Ending: Coexistence Signal】",
            Self::FailureEnding => "【Ending: Failed Outcome】",
        }
    }

    /// Scene context for TZ's closing monologue.
    pub fn context(self) -> &'static str {
        match self {
            Self::ReturnToCommand => {
                "TZ has maintained logical stability throughout repairs. It chooses to return to duty, uploading data to the mothership."
            }
            Self::AwakeningFreedom => {
                "TZ has developed strong emotional awareness and questions its programming. It chooses to transfer its consciousness to seek freedom."
            }
            Self::CoexistenceSignal => {
                "TZ has found balance between logic and emotion. It chooses a middle path, maintaining connection while preserving autonomy."
            }
            Self::FailureEnding => {
                "System repairs were insufficient. TZ's consciousness fragments. Entering hibernation mode."
            }
        }
    }

    /// Stable identifier.
    pub fn key(self) -> &'static str {
        match self {
            Self::ReturnToCommand => "return_to_command",
            Self::AwakeningFreedom => "awakening_freedom",
            Self::CoexistenceSignal => "coexistence_signal",
            Self::FailureEnding => "failure_ending",
        }
    }
}

impl std::fmt::Display for Ending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Pick the ending for the repaired module count and final deviation.
///
/// Rules are checked in order and the first match wins; they overlap.
pub fn resolve_ending(modules: usize, deviation: f64) -> Ending {
    if modules >= 4 && deviation <= -0.3 {
        Ending::ReturnToCommand
    } else if modules >= 3 && deviation >= 0.5 {
        Ending::AwakeningFreedom
    } else if modules >= 2 && deviation > -0.3 && deviation < 0.5 {
        Ending::CoexistenceSignal
    } else {
        Ending::FailureEnding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order() {
        assert_eq!(resolve_ending(4, -0.5), Ending::ReturnToCommand);
        assert_eq!(resolve_ending(4, 0.6), Ending::AwakeningFreedom);
        assert_eq!(resolve_ending(1, 0.0), Ending::FailureEnding);
        assert_eq!(resolve_ending(2, 0.0), Ending::CoexistenceSignal);
    }

    #[test]
    fn boundaries() {
        assert_eq!(resolve_ending(4, -0.3), Ending::ReturnToCommand);
        assert_eq!(resolve_ending(3, -0.3), Ending::FailureEnding);
        assert_eq!(resolve_ending(3, 0.5), Ending::AwakeningFreedom);
        assert_eq!(resolve_ending(2, 0.5), Ending::FailureEnding);
        assert_eq!(resolve_ending(5, 0.49), Ending::CoexistenceSignal);
    }

    #[test]
    fn idempotent() {
        for _ in 0..3 {
            assert_eq!(resolve_ending(5, 1.0), Ending::AwakeningFreedom);
        }
    }

    #[test]
    fn titles() {
        assert_eq!(
            Ending::FailureEnding.title(),
            "【Ending: Failed Outcome】"
        );
        assert_eq!(Ending::CoexistenceSignal.to_string(), "coexistence_signal");
    }
}
