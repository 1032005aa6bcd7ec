//! The guardian's decision cycle.
//!
//! One cycle runs the whole pipeline: classify mood, simulate locally,
//! arbitrate with the advisor, plan, execute, then learn from the
//! reward. Failures at any stage are recorded to memory and the next
//! cycle starts from the updated state, so a stuck strategy eventually
//! changes the mood inputs and with them the decision.

use rand::Rng;
use warden_core::arbiter::{self, Advisor, AdvisorContext};
use warden_core::bias::BiasStore;
use warden_core::catalog;
use warden_core::classify;
use warden_core::config::WardenConfig;
use warden_core::executor::{self, OutcomeOdds};
use warden_core::memory::Memory;
use warden_core::planner::{find_plan, Plan, PlanSearch, PlannerConfig};
use warden_core::{reward, simulate};
use warden_types::{Action, EventRecord, Goal, StateSnapshot, WorldState};

/// How many recent failures the mood classifier looks at.
const FAILURE_WINDOW: usize = 2;

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// How many decision cycles ran.
    pub cycles_run: u32,
    /// The goal that ended the run, when one was achieved.
    pub goal_achieved: Option<String>,
    /// The world state at the end of the run.
    pub final_state: StateSnapshot,
}

/// Run decision cycles until a goal is achieved or the cycle cap is hit.
pub fn run_cycles<A: Advisor, R: Rng + ?Sized>(
    config: &WardenConfig,
    world: &mut WorldState,
    advisor: &A,
    memory: &mut Memory,
    biases: &mut BiasStore,
    rng: &mut R,
    odds: &OutcomeOdds,
) -> CycleReport {
    let actions = catalog::guardian_actions(&config.guardian);
    let goals = catalog::guardian_goals();
    let planner_config = PlannerConfig {
        max_iterations: config.planner.max_iterations,
    };

    let mut cycles_run: u32 = 0;
    let mut goal_achieved: Option<String> = None;

    while cycles_run < config.run.max_cycles {
        cycles_run = cycles_run.saturating_add(1);
        let snapshot = world.snapshot();

        let reasons = memory.recent_failure_reasons(FAILURE_WINDOW);
        let mood = classify::mood(&snapshot, &reasons, &config.guardian);
        let advice = classify::dynamic_advice(mood, &snapshot);
        tracing::info!(cycle = cycles_run, %mood, "cycle start");

        let local_proposal = simulate::propose_goal(
            &snapshot,
            mood,
            biases,
            &actions,
            config.learning.bias_weight,
        );

        let context = AdvisorContext {
            world_state: snapshot.clone(),
            mood,
            advice,
            local_proposal,
            recent_failures: reasons,
        };
        let decision = arbiter::decide(advisor, &context);

        let Some(goal) = catalog::goal_by_name(&goals, &decision.goal_name) else {
            record_failure(
                memory,
                format!("Chosen goal '{}' is not in the catalog.", decision.goal_name),
                vec![],
                snapshot,
            );
            continue;
        };
        tracing::info!(goal = %goal.name, justification = %decision.justification, "goal chosen");

        let Some(plan) = resolve_plan(goal, &snapshot, &actions, &planner_config, memory) else {
            continue;
        };
        tracing::info!(steps = ?plan.names(), cost = plan.total_cost(), "plan found");

        let mut plan_failed = false;
        for step in &plan.steps {
            let outcome = executor::execute(step, world, rng, odds);
            if !outcome.success {
                let record =
                    EventRecord::failure(outcome.reason, plan.names(), world.snapshot());
                if let Some(reflection) = advisor.reflect(&record) {
                    tracing::info!(%reflection, "advisor reflection on the failed plan");
                }
                if let Err(error) = memory.record(record) {
                    tracing::warn!(%error, "event memory save failed, record kept in memory");
                }
                plan_failed = true;
                break;
            }
        }

        let after = world.snapshot();
        let cycle_reward = reward::score(&snapshot, &after);
        let post_mood = classify::mood(
            &after,
            &memory.recent_failure_reasons(FAILURE_WINDOW),
            &config.guardian,
        );
        if let Err(error) = biases.learn(
            post_mood,
            &plan.names(),
            cycle_reward,
            config.learning.learning_rate,
        ) {
            tracing::warn!(%error, "bias store save failed, weights kept in memory");
        }
        tracing::info!(reward = cycle_reward, %post_mood, "cycle learned");

        if !plan_failed && goal.is_fulfilled(&after) {
            goal_achieved = Some(goal.name.clone());
            break;
        }
    }

    CycleReport {
        cycles_run,
        goal_achieved,
        final_state: world.snapshot(),
    }
}

/// Plan toward the goal, recording the failure shape when no plan comes
/// back.
fn resolve_plan(
    goal: &Goal,
    snapshot: &StateSnapshot,
    actions: &[Action],
    config: &PlannerConfig,
    memory: &mut Memory,
) -> Option<Plan> {
    match find_plan(snapshot, goal, actions, config) {
        PlanSearch::Found(plan) => Some(plan),
        PlanSearch::Exhausted => {
            record_failure(
                memory,
                format!("No action sequence reaches goal '{}'.", goal.name),
                vec![],
                snapshot.clone(),
            );
            None
        }
        PlanSearch::BoundedOut { iterations } => {
            record_failure(
                memory,
                format!(
                    "Planning for goal '{}' gave up after {iterations} iterations.",
                    goal.name
                ),
                vec![],
                snapshot.clone(),
            );
            None
        }
    }
}

fn record_failure(
    memory: &mut Memory,
    reason: String,
    plan: Vec<String>,
    state: StateSnapshot,
) {
    if let Err(error) = memory.record(EventRecord::failure(reason, plan, state)) {
        tracing::warn!(%error, "event memory save failed, record kept in memory");
    }
}
