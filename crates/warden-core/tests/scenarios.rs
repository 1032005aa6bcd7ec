//! End-to-end planning and arbitration scenarios over the guardian
//! catalog.

use warden_core::arbiter::{self, AdvisorContext, LocalEchoAdvisor};
use warden_core::bias::BiasStore;
use warden_core::catalog::{self, FALLBACK_GOAL};
use warden_core::classify;
use warden_core::config::GuardianTuning;
use warden_core::planner::{find_plan, PlanSearch, PlannerConfig};
use warden_core::simulate;
use warden_types::{Action, Comparator, Condition, Goal, Mood, StateSnapshot};

fn actions() -> Vec<Action> {
    catalog::guardian_actions(&GuardianTuning::default())
}

fn goal(name: &str) -> Goal {
    catalog::guardian_goals()
        .into_iter()
        .find(|goal| goal.name == name)
        .unwrap_or_else(|| Goal {
            name: name.to_owned(),
            priority: 0,
            conditions: [].into_iter().collect(),
        })
}

fn plan_names(result: PlanSearch) -> Option<Vec<String>> {
    result.into_plan().map(|plan| plan.names())
}

#[test]
fn cornered_guardian_escapes_with_a_single_retreat() {
    let mut state = StateSnapshot::new();
    state.insert("health", 20);
    state.insert("enemyNearby", true);
    state.insert("potionCount", 0);
    state.insert("stamina", 5);
    state.insert("isInSafeZone", false);

    let result = find_plan(&state, &goal("Survive"), &actions(), &PlannerConfig::default());
    let cost = result.clone().into_plan().map(|plan| plan.total_cost());
    assert_eq!(plan_names(result), Some(vec![String::from("Retreat")]));
    assert_eq!(cost, Some(1));
}

#[test]
fn potionless_guardian_in_safety_plans_one_search() {
    let mut state = StateSnapshot::new();
    state.insert("potionCount", 0);
    state.insert("isInSafeZone", true);

    let result = find_plan(
        &state,
        &goal("PrepareForBattle"),
        &actions(),
        &PlannerConfig::default(),
    );
    assert_eq!(plan_names(result), Some(vec![String::from("SearchForPotion")]));
}

#[test]
fn exhausted_guardian_routes_around_the_stamina_gate() {
    // Attacking needs stamina >= 5; with 3 the planner must clear the
    // enemy another way.
    let mut state = StateSnapshot::new();
    state.insert("enemyNearby", true);
    state.insert("stamina", 3);

    let result = find_plan(
        &state,
        &goal("EliminateThreat"),
        &actions(),
        &PlannerConfig::default(),
    );
    assert_eq!(plan_names(result), Some(vec![String::from("Retreat")]));
}

#[test]
fn simulator_without_options_defers_to_the_advisor() {
    let state = StateSnapshot::new();
    let proposal = simulate::propose_goal(
        &state,
        Mood::Patrolling,
        &BiasStore::ephemeral(),
        &[],
        0.1,
    );
    assert!(proposal.is_none());

    let context = AdvisorContext {
        world_state: state,
        mood: Mood::Patrolling,
        advice: String::new(),
        local_proposal: proposal,
        recent_failures: vec![],
    };
    let decision = arbiter::decide(&LocalEchoAdvisor, &context);
    assert_eq!(decision.goal_name, FALLBACK_GOAL);
}

#[test]
fn found_plans_replay_soundly() {
    // Every goal reachable from every seeded scenario must replay: each
    // step achievable in the state before it, goal fulfilled at the end.
    let catalog_actions = actions();
    for scenario_id in 1..=4 {
        let start = catalog::scenario(scenario_id).world.snapshot();
        for goal in catalog::guardian_goals() {
            let result = find_plan(&start, &goal, &catalog_actions, &PlannerConfig::default());
            let Some(plan) = result.into_plan() else {
                continue;
            };
            let mut state = start.clone();
            for step in &plan.steps {
                assert!(
                    step.is_achievable(&state),
                    "scenario {scenario_id}, goal {}: step {} not achievable",
                    goal.name,
                    step.name
                );
                state = step.apply(&state);
            }
            assert!(
                goal.is_fulfilled(&state),
                "scenario {scenario_id}: plan did not reach {}",
                goal.name
            );
        }
    }
}

#[test]
fn every_catalog_goal_is_reachable_from_every_scenario() {
    // The guardian catalog is rich enough that no seeded scenario ever
    // leaves a goal without a plan.
    let catalog_actions = actions();
    for scenario_id in 1..=4 {
        let start = catalog::scenario(scenario_id).world.snapshot();
        for goal in catalog::guardian_goals() {
            let result = find_plan(&start, &goal, &catalog_actions, &PlannerConfig::default());
            assert!(
                matches!(result, PlanSearch::Found(_)),
                "scenario {scenario_id}: no plan for {}",
                goal.name
            );
        }
    }
}

#[test]
fn bounded_search_is_distinguishable_from_exhaustion() {
    let mut state = StateSnapshot::new();
    state.insert("isInSafeZone", false);

    let bounded = find_plan(
        &state,
        &goal("PrepareForBattle"),
        &actions(),
        &PlannerConfig { max_iterations: 1 },
    );
    assert!(matches!(bounded, PlanSearch::BoundedOut { .. }));

    // With no actions at all the same search proves unreachability.
    let exhausted = find_plan(
        &state,
        &goal("PrepareForBattle"),
        &[],
        &PlannerConfig::default(),
    );
    assert_eq!(exhausted, PlanSearch::Exhausted);
}

#[test]
fn learning_compounds_across_identical_updates() {
    let mut store = BiasStore::ephemeral();
    let plan = vec![String::from("HealSelf")];
    for _ in 0..2 {
        let learned = store.learn(Mood::Desperate, &plan, 73.0, 0.1);
        assert!(learned.is_ok());
    }
    let weight = store.weight(Mood::Desperate, "HealSelf");
    assert!((weight - 14.6).abs() < 1e-9);
}

#[test]
fn mood_classification_tracks_the_seeded_scenarios() {
    let tuning = GuardianTuning::default();
    let expectations = [
        (1, Mood::Desperate),
        (2, Mood::AggressiveDefender),
        (3, Mood::Preparing),
    ];
    for (scenario_id, expected) in expectations {
        let state = catalog::scenario(scenario_id).world.snapshot();
        assert_eq!(
            classify::mood(&state, &[], &tuning),
            expected,
            "scenario {scenario_id}"
        );
    }
}

#[test]
fn threshold_goals_use_the_full_comparator_algebra() {
    // A goal phrased as a strict threshold is planned, not just checked.
    let mut state = StateSnapshot::new();
    state.insert("potionCount", 1);
    state.insert("isInSafeZone", true);

    let stocked = Goal {
        name: String::from("FullyStocked"),
        priority: 10,
        conditions: [(
            String::from("potionCount"),
            Condition::new(Comparator::Ge, 3),
        )]
        .into_iter()
        .collect(),
    };

    let result = find_plan(&state, &stocked, &actions(), &PlannerConfig::default());
    assert_eq!(
        plan_names(result),
        Some(vec![
            String::from("SearchForPotion"),
            String::from("SearchForPotion"),
        ])
    );
}
