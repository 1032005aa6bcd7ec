//! Declarative action records.
//!
//! An action is pure data: a unique name, a precondition set gating
//! applicability, an effect set describing the transformation, and a
//! positive cost. All actions share the same evaluation logic over this
//! declarative shape -- there is no per-action dispatch.

use serde::{Deserialize, Serialize};

use crate::condition::ConditionSet;
use crate::effect::EffectSet;
use crate::state::StateSnapshot;

/// A named, costed world-state transformation.
///
/// Actions are immutable and stateless; catalogs of them are built once
/// per run and treated as read-only inputs by the planner and simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Unique identifier within a catalog.
    pub name: String,
    /// Conditions that must all hold for the action to be achievable.
    pub preconditions: ConditionSet,
    /// The transformation applied when the action executes.
    pub effects: EffectSet,
    /// Positive cost used as the planner's edge weight.
    pub cost: u32,
}

impl Action {
    /// Whether every precondition holds in the given state.
    ///
    /// Short-circuits on the first unmet condition. Missing attributes
    /// fail closed via the condition algebra.
    pub fn is_achievable(&self, state: &StateSnapshot) -> bool {
        self.preconditions
            .iter()
            .all(|(key, condition)| condition.is_met(state.get(key)))
    }

    /// Apply this action's effects to a snapshot, returning the result.
    ///
    /// Pure: the input snapshot is unchanged. Used by the planner and
    /// simulator to explore hypothetical futures.
    pub fn apply(&self, state: &StateSnapshot) -> StateSnapshot {
        state.apply(&self.effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{Comparator, Condition};
    use crate::effect::Effect;
    use crate::value::StateValue;

    fn attack() -> Action {
        Action {
            name: String::from("AttackEnemy"),
            preconditions: [
                (String::from("enemyNearby"), Condition::equals(true)),
                (String::from("stamina"), Condition::new(Comparator::Ge, 5)),
            ]
            .into_iter()
            .collect(),
            effects: [
                (String::from("enemyNearby"), Effect::Assign(StateValue::Bool(false))),
                (String::from("stamina"), Effect::Subtract(5)),
            ]
            .into_iter()
            .collect(),
            cost: 2,
        }
    }

    #[test]
    fn achievable_when_all_preconditions_hold() {
        let mut state = StateSnapshot::new();
        state.insert("enemyNearby", true);
        state.insert("stamina", 10);
        assert!(attack().is_achievable(&state));
    }

    #[test]
    fn unachievable_on_any_unmet_condition() {
        let mut state = StateSnapshot::new();
        state.insert("enemyNearby", true);
        state.insert("stamina", 3);
        assert!(!attack().is_achievable(&state));
    }

    #[test]
    fn unachievable_on_missing_attribute() {
        let mut state = StateSnapshot::new();
        state.insert("enemyNearby", true);
        // stamina absent entirely
        assert!(!attack().is_achievable(&state));
    }

    #[test]
    fn apply_is_pure_and_transforms() {
        let mut state = StateSnapshot::new();
        state.insert("enemyNearby", true);
        state.insert("stamina", 10);
        let before = state.clone();

        let after = attack().apply(&state);

        assert_eq!(state, before);
        assert_eq!(after.get("enemyNearby"), Some(&StateValue::Bool(false)));
        assert_eq!(after.get("stamina"), Some(&StateValue::Int(5)));
    }
}
