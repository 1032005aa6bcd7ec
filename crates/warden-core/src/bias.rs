//! Persisted per-mood action preferences and the learning rule.
//!
//! The store is a two-level map from mood to action name to a small
//! floating-point weight. It is write-through: every learning update is
//! saved immediately, so a crash between cycles loses at most nothing.
//! The read path is tolerant; a missing or corrupt file degrades to an
//! empty store rather than failing the run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use warden_types::Mood;

use crate::error::StoreError;

/// Learned action-preference weights, keyed by mood then action name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiasStore {
    weights: BTreeMap<Mood, BTreeMap<String, f64>>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl BiasStore {
    /// A store with no backing file. Learning updates stay in memory.
    pub const fn ephemeral() -> Self {
        Self {
            weights: BTreeMap::new(),
            path: None,
        }
    }

    /// Load the store from a JSON file, binding future saves to the same
    /// path.
    ///
    /// A missing file yields an empty store; a corrupt file is logged
    /// and likewise yields an empty store. Learned biases are an
    /// optimization, never a correctness requirement.
    pub fn load(path: &Path) -> Self {
        let weights = match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(weights) => weights,
                Err(error) => {
                    tracing::warn!(
                        path = %path.display(),
                        %error,
                        "bias store is corrupt, starting empty"
                    );
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self {
            weights,
            path: Some(path.to_path_buf()),
        }
    }

    /// The learned weight for an action under a mood, zero when unknown.
    pub fn weight(&self, mood: Mood, action: &str) -> f64 {
        self.weights
            .get(&mood)
            .and_then(|actions| actions.get(action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Apply the learning rule for an executed plan and persist.
    ///
    /// Every action occurrence in the plan nudges its weight by
    /// `learning_rate * reward`, so an action appearing twice moves
    /// twice. Weights are rounded to four decimals to keep the stored
    /// file stable. An empty plan is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write-through save fails; the
    /// in-memory weights are updated regardless.
    pub fn learn(
        &mut self,
        mood: Mood,
        plan: &[String],
        reward: f64,
        learning_rate: f64,
    ) -> Result<(), StoreError> {
        if plan.is_empty() {
            return Ok(());
        }
        let nudge = learning_rate * reward;
        let actions = self.weights.entry(mood).or_default();
        for name in plan {
            let weight = actions.entry(name.clone()).or_insert(0.0);
            *weight = round4(*weight + nudge);
        }
        self.save()
    }

    /// Persist the weights as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on serialization or I/O failure. A store
    /// without a backing path saves nowhere and always succeeds.
    pub fn save(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.weights)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "warden_{tag}_{}_{:?}.json",
            std::process::id(),
            std::thread::current().id(),
        ))
    }

    #[test]
    fn unknown_weight_is_zero() {
        let store = BiasStore::ephemeral();
        assert!((store.weight(Mood::Patrolling, "Rest")).abs() < f64::EPSILON);
    }

    #[test]
    fn learning_nudges_by_rate_times_reward() {
        let mut store = BiasStore::ephemeral();
        let plan = vec![String::from("Retreat")];
        let result = store.learn(Mood::Desperate, &plan, 5.0, 0.1);
        assert!(result.is_ok());
        assert!((store.weight(Mood::Desperate, "Retreat") - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn repeated_actions_move_twice() {
        let mut store = BiasStore::ephemeral();
        let plan = vec![String::from("Rest"), String::from("Rest")];
        let result = store.learn(Mood::Preparing, &plan, 10.0, 0.1);
        assert!(result.is_ok());
        assert!((store.weight(Mood::Preparing, "Rest") - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn weights_round_to_four_decimals() {
        let mut store = BiasStore::ephemeral();
        let plan = vec![String::from("AttackEnemy")];
        let result = store.learn(Mood::AggressiveDefender, &plan, 0.333_333, 0.1);
        assert!(result.is_ok());
        let weight = store.weight(Mood::AggressiveDefender, "AttackEnemy");
        assert!((weight - 0.0333).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_plan_learns_nothing() {
        let mut store = BiasStore::ephemeral();
        let result = store.learn(Mood::Stuck, &[], 100.0, 0.1);
        assert!(result.is_ok());
        assert_eq!(store, BiasStore::ephemeral());
    }

    #[test]
    fn moods_keep_separate_weight_tables() {
        let mut store = BiasStore::ephemeral();
        let plan = vec![String::from("Retreat")];
        let first = store.learn(Mood::Desperate, &plan, 1.0, 0.1);
        let second = store.learn(Mood::Patrolling, &plan, -1.0, 0.1);
        assert!(first.is_ok());
        assert!(second.is_ok());
        assert!(store.weight(Mood::Desperate, "Retreat") > 0.0);
        assert!(store.weight(Mood::Patrolling, "Retreat") < 0.0);
    }

    #[test]
    fn missing_file_loads_empty() {
        let store = BiasStore::load(Path::new("/nonexistent/warden-biases.json"));
        assert!((store.weight(Mood::Patrolling, "Rest")).abs() < f64::EPSILON);
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let path = scratch_path("bias_corrupt");
        std::fs::write(&path, "{ this is not json").ok();

        let store = BiasStore::load(&path);
        assert!((store.weight(Mood::Patrolling, "Rest")).abs() < f64::EPSILON);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn save_then_load_round_trips_weights() {
        let path = scratch_path("bias_round_trip");
        std::fs::remove_file(&path).ok();

        let mut store = BiasStore::load(&path);
        let plan = vec![String::from("HealSelf"), String::from("Retreat")];
        let learned = store.learn(Mood::Desperate, &plan, 7.3, 0.1);
        assert!(learned.is_ok());

        let reloaded = BiasStore::load(&path);
        assert!((reloaded.weight(Mood::Desperate, "HealSelf") - 0.73).abs() < 1e-4);
        assert!((reloaded.weight(Mood::Desperate, "Retreat") - 0.73).abs() < 1e-4);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn store_round_trips_through_json() {
        let mut store = BiasStore::ephemeral();
        let plan = vec![String::from("HealSelf")];
        let learned = store.learn(Mood::Desperate, &plan, 7.3, 0.1);
        assert!(learned.is_ok());

        let json = serde_json::to_string(&store).unwrap_or_default();
        let back: Result<BiasStore, _> = serde_json::from_str(&json);
        assert_eq!(back.ok(), Some(store));
    }
}
