//! Prioritized goal records.
//!
//! A goal names a target region of the state space via a condition set.
//! Fulfillment uses the same condition algebra as action preconditions,
//! comparators included, so that threshold goals ("potion count at least
//! one") evaluate identically inside and outside the planner.

use serde::{Deserialize, Serialize};

use crate::condition::ConditionSet;
use crate::state::StateSnapshot;

/// A named, prioritized target state region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier within a catalog.
    pub name: String,
    /// Relative importance. Informational only: the planner does not
    /// consult it.
    pub priority: u32,
    /// Conditions describing the target state region.
    pub conditions: ConditionSet,
}

impl Goal {
    /// Whether the goal's conditions all hold in the given state.
    ///
    /// Agrees with the planner's heuristic on every state: fulfilled
    /// exactly when [`unmet_conditions`] is zero.
    pub fn is_fulfilled(&self, state: &StateSnapshot) -> bool {
        unmet_conditions(&self.conditions, state) == 0
    }
}

/// Count the conditions of a set not satisfied by `state`.
///
/// This is the planner's heuristic h: zero means the goal region has
/// been reached. Missing attributes count as unmet (fail closed).
pub fn unmet_conditions(conditions: &ConditionSet, state: &StateSnapshot) -> u32 {
    let mut unmet: u32 = 0;
    for (key, condition) in conditions {
        if !condition.is_met(state.get(key)) {
            unmet = unmet.saturating_add(1);
        }
    }
    unmet
}
