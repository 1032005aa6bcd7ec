//! Probabilistic execution of plan steps against the live world state.
//!
//! This is the only module allowed to mutate [`WorldState`]. Each known
//! action carries its own failure mode, some of which still spend
//! resources: a spoiled potion is consumed, a missed attack still costs
//! stamina. Odds are expressed in basis points so tests can pin any
//! branch by forcing a probability to 0 or 10000.

use rand::Rng;
use warden_types::{Action, EffectSet, WorldState};

/// The result of executing one plan step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Whether the step took full effect.
    pub success: bool,
    /// Human-readable account of what happened, also used as the
    /// failure reason in memory records.
    pub reason: String,
}

impl StepOutcome {
    fn success(reason: impl Into<String>) -> Self {
        Self {
            success: true,
            reason: reason.into(),
        }
    }

    fn failure(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            reason: reason.into(),
        }
    }
}

/// Failure odds per action, in basis points of 10000.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeOdds {
    /// Chance a consumed potion turns out spoiled.
    pub spoiled_potion: u32,
    /// Chance an attack misses while still costing stamina.
    pub missed_attack: u32,
    /// Chance a retreat is blocked, only rolled while an enemy is near.
    pub blocked_retreat: u32,
    /// Chance a call for backup goes unanswered.
    pub unanswered_backup: u32,
    /// Chance a potion search actually finds one.
    pub search_success: u32,
}

impl OutcomeOdds {
    /// Odds that make every known action succeed. For tests and dry runs.
    pub const fn certain() -> Self {
        Self {
            spoiled_potion: 0,
            missed_attack: 0,
            blocked_retreat: 0,
            unanswered_backup: 0,
            search_success: 10_000,
        }
    }
}

impl Default for OutcomeOdds {
    fn default() -> Self {
        Self {
            spoiled_potion: 500,
            missed_attack: 2_000,
            blocked_retreat: 2_500,
            unanswered_backup: 3_000,
            search_success: 5_000,
        }
    }
}

/// Execute one plan step against the live world state.
///
/// Preconditions are re-verified against the current state first; the
/// world may have drifted since planning, and a step whose preconditions
/// no longer hold fails without touching anything. Actions without a
/// specific outcome model execute deterministically.
pub fn execute<R: Rng + ?Sized>(
    action: &Action,
    world: &mut WorldState,
    rng: &mut R,
    odds: &OutcomeOdds,
) -> StepOutcome {
    if !action.is_achievable(&world.snapshot()) {
        let outcome = StepOutcome::failure(format!(
            "Preconditions for '{}' no longer hold.",
            action.name
        ));
        tracing::warn!(action = %action.name, "plan step failed its precondition recheck");
        return outcome;
    }

    let outcome = match action.name.as_str() {
        "HealSelf" => {
            if roll(rng, odds.spoiled_potion) {
                // The potion is spent even when spoiled.
                world.apply_effects(&partial_effects(action, "potionCount"));
                StepOutcome::failure("The potion was spoiled and had no effect!")
            } else {
                world.apply_effects(&action.effects);
                StepOutcome::success("Successfully healed.")
            }
        }
        "AttackEnemy" => {
            if roll(rng, odds.missed_attack) {
                // A miss still burns the stamina.
                world.apply_effects(&partial_effects(action, "stamina"));
                StepOutcome::failure("The attack missed the enemy.")
            } else {
                world.apply_effects(&action.effects);
                StepOutcome::success("The attack successfully hit the enemy.")
            }
        }
        "Retreat" => {
            let enemy_near = world
                .get("enemyNearby")
                .and_then(warden_types::StateValue::as_bool)
                .unwrap_or(false);
            if enemy_near && roll(rng, odds.blocked_retreat) {
                StepOutcome::failure("Failed to retreat; the enemy blocked the path.")
            } else {
                world.apply_effects(&action.effects);
                StepOutcome::success("Successfully retreated to a safe zone.")
            }
        }
        "DefendTreasure" => {
            world.apply_effects(&action.effects);
            StepOutcome::success("Moved to a defensive position near the treasure.")
        }
        "CallBackup" => {
            if roll(rng, odds.unanswered_backup) {
                StepOutcome::failure("Called for backup, but no one responded.")
            } else {
                world.apply_effects(&action.effects);
                StepOutcome::success("Backup has been called and is on the way.")
            }
        }
        "SearchForPotion" => {
            if roll(rng, odds.search_success) {
                world.apply_effects(&action.effects);
                StepOutcome::success("Found a healing potion!")
            } else {
                StepOutcome::failure("Searched the area but found no potions.")
            }
        }
        _ => {
            world.apply_effects(&action.effects);
            StepOutcome::success(format!("Executed '{}'.", action.name))
        }
    };

    if outcome.success {
        tracing::info!(action = %action.name, reason = %outcome.reason, "step succeeded");
    } else {
        tracing::warn!(action = %action.name, reason = %outcome.reason, "step failed");
    }
    outcome
}

fn roll<R: Rng + ?Sized>(rng: &mut R, basis_points: u32) -> bool {
    rng.random_range(0..10_000) < basis_points
}

/// The subset of an action's effects touching a single attribute.
fn partial_effects(action: &Action, key: &str) -> EffectSet {
    action
        .effects
        .iter()
        .filter(|(name, _)| name.as_str() == key)
        .map(|(name, effect)| (name.clone(), effect.clone()))
        .collect()
}
