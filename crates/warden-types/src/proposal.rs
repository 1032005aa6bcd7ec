//! Goal proposals exchanged between decision components.

use serde::{Deserialize, Serialize};

/// A candidate goal put forward by the local simulator or the external
/// advisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProposal {
    /// Name of the proposed goal, resolved against the goal catalog.
    pub goal: String,
    /// Human-readable reasoning behind the proposal.
    pub justification: String,
    /// Informational confidence in `0.0..=1.0`. Once a winner is chosen
    /// it does not gate escalation.
    pub confidence: f64,
}

impl GoalProposal {
    /// Build a proposal with full confidence.
    pub fn certain(goal: impl Into<String>, justification: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            justification: justification.into(),
            confidence: 1.0,
        }
    }
}
