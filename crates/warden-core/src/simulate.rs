//! One-step local lookahead.
//!
//! The simulator applies every currently achievable action to a copy of
//! the state, scores each outcome with the reward model plus a small
//! learned bias, and converts the best-scoring action into a goal
//! proposal via the action-to-goal map. It looks exactly one step ahead;
//! multi-step reasoning is the planner's job.

use warden_types::{Action, GoalProposal, Mood, StateSnapshot};

use crate::bias::BiasStore;
use crate::catalog;
use crate::reward;

/// Propose a goal from a one-step simulation of the given catalog.
///
/// Each achievable action is scored as `reward(state, after) +
/// bias_weight * learned_bias(mood, action)`. The first action with the
/// strictly highest score wins, so ties resolve to catalog order.
/// Returns `None` when no action is achievable, which tells the arbiter
/// to consult the advisor directly.
pub fn propose_goal(
    state: &StateSnapshot,
    mood: Mood,
    biases: &BiasStore,
    actions: &[Action],
    bias_weight: f64,
) -> Option<GoalProposal> {
    let mut best: Option<(&Action, f64)> = None;
    for action in actions {
        if !action.is_achievable(state) {
            continue;
        }
        let after = action.apply(state);
        let score = bias_weight.mul_add(
            biases.weight(mood, &action.name),
            reward::score(state, &after),
        );
        tracing::debug!(action = %action.name, score, "simulated one-step outcome");
        let replace = best.is_none_or(|(_, best_score)| score > best_score);
        if replace {
            best = Some((action, score));
        }
    }

    best.map(|(action, score)| {
        let goal = catalog::goal_for_action(&action.name);
        GoalProposal::certain(
            goal,
            format!(
                "Local simulation favors '{}' (score {score:.2}), which serves '{goal}'.",
                action.name
            ),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::guardian_actions;
    use crate::config::GuardianTuning;

    fn catalog_actions() -> Vec<Action> {
        guardian_actions(&GuardianTuning::default())
    }

    fn wounded_with_potion() -> StateSnapshot {
        let mut state = StateSnapshot::new();
        state.insert("health", 20);
        state.insert("enemyNearby", false);
        state.insert("potionCount", 1);
        state.insert("treasureThreatLevel", "low");
        state.insert("stamina", 20);
        state.insert("isInSafeZone", true);
        state
    }

    #[test]
    fn healing_wins_when_wounded_with_a_potion() {
        // HealSelf: +50 health -1 potion = 73.0, clearly the best step.
        let proposal = propose_goal(
            &wounded_with_potion(),
            Mood::Preparing,
            &BiasStore::ephemeral(),
            &catalog_actions(),
            0.1,
        );
        assert_eq!(
            proposal.map(|proposal| proposal.goal),
            Some(String::from("PrepareForBattle"))
        );
    }

    #[test]
    fn no_achievable_action_yields_no_proposal() {
        let proposal = propose_goal(
            &wounded_with_potion(),
            Mood::Preparing,
            &BiasStore::ephemeral(),
            &[],
            0.1,
        );
        assert_eq!(proposal, None);
    }

    #[test]
    fn learned_bias_can_flip_the_winner() {
        let mut biases = BiasStore::ephemeral();
        // A huge learned preference for SearchForPotion under this mood.
        let learned = biases.learn(
            Mood::Preparing,
            &[String::from("SearchForPotion")],
            10_000.0,
            0.1,
        );
        assert!(learned.is_ok());

        let proposal = propose_goal(
            &wounded_with_potion(),
            Mood::Preparing,
            &biases,
            &catalog_actions(),
            0.1,
        );
        let justification = proposal.map(|proposal| proposal.justification);
        assert!(
            justification
                .as_deref()
                .is_some_and(|text| text.contains("SearchForPotion")),
            "bias should have promoted SearchForPotion: {justification:?}"
        );
    }

    #[test]
    fn bias_under_a_different_mood_does_not_leak() {
        let mut biases = BiasStore::ephemeral();
        let learned = biases.learn(
            Mood::Desperate,
            &[String::from("SearchForPotion")],
            10_000.0,
            0.1,
        );
        assert!(learned.is_ok());

        let proposal = propose_goal(
            &wounded_with_potion(),
            Mood::Preparing,
            &biases,
            &catalog_actions(),
            0.1,
        );
        assert_eq!(
            proposal.map(|proposal| proposal.goal),
            Some(String::from("PrepareForBattle"))
        );
    }

    #[test]
    fn tie_resolves_to_catalog_order() {
        // With no reward-bearing attributes changed, Retreat and
        // DefendTreasure both score zero; Retreat comes first.
        let mut state = StateSnapshot::new();
        state.insert("enemyNearby", false);
        state.insert("isInSafeZone", false);
        state.insert("treasureThreatLevel", "medium");
        let proposal = propose_goal(
            &state,
            Mood::Patrolling,
            &BiasStore::ephemeral(),
            &catalog_actions(),
            0.1,
        );
        assert_eq!(
            proposal.map(|proposal| proposal.goal),
            Some(String::from("Survive"))
        );
    }
}
