//! World-state containers: hypothetical snapshots and the live state.
//!
//! The distinction between the two types is the ownership discipline the
//! design mandates:
//!
//! - [`StateSnapshot`] is an independent value. Its [`apply`] is pure --
//!   the receiver is untouched and a new snapshot is returned. The
//!   planner and the local simulator only ever touch snapshots, so a
//!   search can never alias the live world.
//! - [`WorldState`] is the single live instance per run. Its
//!   [`apply_effects`] mutates in place and is reserved for the execution
//!   layer, which is the sole mutator.
//!
//! Both apply paths clamp the bounded attributes (health in 0..=100,
//! stamina and potion count at 0) after the whole effect batch, so an
//! effect set touching several keys is validated as a whole.
//!
//! [`apply`]: StateSnapshot::apply
//! [`apply_effects`]: WorldState::apply_effects

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::effect::EffectSet;
use crate::value::StateValue;

/// Attribute bounds enforced after every effect batch.
///
/// Attributes not listed here are unbounded. A bounded attribute that is
/// absent, or that holds a non-integer value, is left alone.
const BOUNDS: &[(&str, i64, i64)] = &[
    ("health", 0, 100),
    ("stamina", 0, i64::MAX),
    ("potionCount", 0, i64::MAX),
];

/// Clamp the bounded attributes of a raw attribute map in place.
fn clamp_bounds(entries: &mut BTreeMap<String, StateValue>) {
    for &(key, low, high) in BOUNDS {
        if let Some(StateValue::Int(value)) = entries.get(key) {
            let clamped = (*value).clamp(low, high);
            if clamped != *value {
                entries.insert(key.to_owned(), StateValue::Int(clamped));
            }
        }
    }
}

/// An independent, hypothetical copy of the world state.
///
/// Snapshots are what the planner expands and the simulator scores. The
/// attribute map is open: unknown keys are tolerated and absence is
/// distinct from zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateSnapshot {
    entries: BTreeMap<String, StateValue>,
}

impl StateSnapshot {
    /// An empty snapshot.
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Read an attribute, `None` when absent.
    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.entries.get(key)
    }

    /// Read an integer attribute with a default for absent or
    /// non-integer values.
    pub fn get_int_or(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(StateValue::as_int).unwrap_or(default)
    }

    /// Insert or replace an attribute.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StateValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Iterate attributes in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &StateValue)> {
        self.entries.iter()
    }

    /// Number of attributes present.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot has no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply an effect set, returning the resulting snapshot.
    ///
    /// Pure: the receiver is unchanged. Bounded attributes are clamped
    /// after the whole batch.
    #[must_use]
    pub fn apply(&self, effects: &EffectSet) -> Self {
        let mut next = self.entries.clone();
        for (key, effect) in effects {
            let resolved = effect.resolve(next.get(key));
            next.insert(key.clone(), resolved);
        }
        clamp_bounds(&mut next);
        Self { entries: next }
    }

    /// A canonical, order-independent encoding of the full snapshot.
    ///
    /// Two snapshots with identical attribute-value sets produce the same
    /// key regardless of insertion history. The planner uses this for
    /// closed-set membership, which deliberately covers the *full* state,
    /// not just the goal-relevant subset.
    pub fn canonical_key(&self) -> String {
        let mut key = String::new();
        for (name, value) in &self.entries {
            key.push_str(name);
            key.push('=');
            key.push_str(&value.to_string());
            key.push(';');
        }
        key
    }
}

impl FromIterator<(String, StateValue)> for StateSnapshot {
    fn from_iter<T: IntoIterator<Item = (String, StateValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for StateSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str("{}"),
        }
    }
}

/// The single live world state for a run.
///
/// Exactly one instance exists per run. It is mutated in place only by
/// the execution layer after a plan step succeeds; every other component
/// works on [`StateSnapshot`] copies obtained via [`snapshot`].
///
/// [`snapshot`]: WorldState::snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldState {
    state: StateSnapshot,
}

impl WorldState {
    /// Build a live state from an initial snapshot.
    pub const fn from_snapshot(state: StateSnapshot) -> Self {
        Self { state }
    }

    /// The default guardian posture: healthy, rested, one potion, calm.
    pub fn guardian_default() -> Self {
        let mut state = StateSnapshot::new();
        state.insert("health", 100);
        state.insert("stamina", 20);
        state.insert("potionCount", 1);
        state.insert("treasureThreatLevel", "low");
        state.insert("enemyNearby", false);
        state.insert("isInSafeZone", true);
        Self { state }
    }

    /// Read an attribute, `None` when absent.
    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.state.get(key)
    }

    /// Insert or replace an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<StateValue>) {
        self.state.insert(key, value);
    }

    /// Apply an effect set in place, clamping after the whole batch.
    ///
    /// Reserved for the execution layer; search code must use
    /// [`StateSnapshot::apply`] on a copy instead.
    pub fn apply_effects(&mut self, effects: &EffectSet) {
        self.state = self.state.apply(effects);
    }

    /// An independent snapshot of the current state.
    pub fn snapshot(&self) -> StateSnapshot {
        self.state.clone()
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self::guardian_default()
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.state.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Effect;

    fn effects(entries: &[(&str, Effect)]) -> EffectSet {
        entries
            .iter()
            .map(|(key, effect)| ((*key).to_owned(), effect.clone()))
            .collect()
    }

    #[test]
    fn pure_apply_leaves_receiver_unchanged() {
        let mut snapshot = StateSnapshot::new();
        snapshot.insert("health", 50);
        let before = snapshot.clone();

        let after = snapshot.apply(&effects(&[("health", Effect::Add(10))]));

        assert_eq!(snapshot, before);
        assert_eq!(after.get("health"), Some(&StateValue::Int(60)));
    }

    #[test]
    fn health_clamped_to_upper_bound() {
        let mut snapshot = StateSnapshot::new();
        snapshot.insert("health", 90);
        let healed = snapshot.apply(&effects(&[("health", Effect::Add(50))]));
        assert_eq!(healed.get("health"), Some(&StateValue::Int(100)));
    }

    #[test]
    fn health_clamped_to_lower_bound() {
        let mut snapshot = StateSnapshot::new();
        snapshot.insert("health", 10);
        let hurt = snapshot.apply(&effects(&[("health", Effect::Subtract(50))]));
        assert_eq!(hurt.get("health"), Some(&StateValue::Int(0)));
    }

    #[test]
    fn stamina_and_potions_floor_at_zero() {
        let mut snapshot = StateSnapshot::new();
        snapshot.insert("stamina", 3);
        snapshot.insert("potionCount", 0);
        let drained = snapshot.apply(&effects(&[
            ("stamina", Effect::Subtract(10)),
            ("potionCount", Effect::Subtract(1)),
        ]));
        assert_eq!(drained.get("stamina"), Some(&StateValue::Int(0)));
        assert_eq!(drained.get("potionCount"), Some(&StateValue::Int(0)));
    }

    #[test]
    fn batch_clamping_validates_whole_effect_set() {
        // One batch touching several bounded keys is clamped as a whole.
        let mut snapshot = StateSnapshot::new();
        snapshot.insert("health", 95);
        snapshot.insert("stamina", 2);
        let after = snapshot.apply(&effects(&[
            ("health", Effect::Add(50)),
            ("stamina", Effect::Subtract(5)),
        ]));
        assert_eq!(after.get("health"), Some(&StateValue::Int(100)));
        assert_eq!(after.get("stamina"), Some(&StateValue::Int(0)));
    }

    #[test]
    fn mutating_apply_changes_live_state() {
        let mut world = WorldState::guardian_default();
        world.apply_effects(&effects(&[("potionCount", Effect::Add(2))]));
        assert_eq!(world.get("potionCount"), Some(&StateValue::Int(3)));
    }

    #[test]
    fn absence_is_distinct_from_zero() {
        let snapshot = StateSnapshot::new();
        assert_eq!(snapshot.get("health"), None);
        assert_eq!(snapshot.get_int_or("health", 0), 0);
    }

    #[test]
    fn canonical_key_is_order_independent() {
        let mut first = StateSnapshot::new();
        first.insert("a", 1);
        first.insert("b", true);

        let mut second = StateSnapshot::new();
        second.insert("b", true);
        second.insert("a", 1);

        assert_eq!(first.canonical_key(), second.canonical_key());
    }

    #[test]
    fn canonical_key_covers_every_attribute() {
        let mut first = StateSnapshot::new();
        first.insert("a", 1);
        let mut second = first.clone();
        second.insert("irrelevant", 9);
        assert_ne!(first.canonical_key(), second.canonical_key());
    }

    #[test]
    fn guardian_default_posture() {
        let world = WorldState::guardian_default();
        assert_eq!(world.get("health"), Some(&StateValue::Int(100)));
        assert_eq!(world.get("isInSafeZone"), Some(&StateValue::Bool(true)));
        assert_eq!(
            world.get("treasureThreatLevel"),
            Some(&StateValue::Tag(String::from("low")))
        );
    }
}
