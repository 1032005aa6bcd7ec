//! Discrete situational mood classification.
//!
//! The mood scopes learned action biases: the same action can be
//! favored when desperate and ignored while patrolling. Classification
//! itself lives in `warden-core`; this enum is the closed vocabulary.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The guardian's strategic read of the current situation.
///
/// Serialized in `SCREAMING_SNAKE_CASE`, which is also the key format of
/// the persisted bias store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mood {
    /// Low health, enemy close, no potions: survival is in question.
    Desperate,
    /// The same failure has repeated; the current strategy is looping.
    Stuck,
    /// The treasure is under maximum threat and must be defended now.
    AggressiveDefender,
    /// No immediate danger; recover and stock up.
    Preparing,
    /// Situation stable; stay vigilant.
    Patrolling,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Desperate => "DESPERATE",
            Self::Stuck => "STUCK",
            Self::AggressiveDefender => "AGGRESSIVE_DEFENDER",
            Self::Preparing => "PREPARING",
            Self::Patrolling => "PATROLLING",
        };
        f.write_str(label)
    }
}
