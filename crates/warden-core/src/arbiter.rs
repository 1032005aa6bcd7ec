//! Combining the local proposal with the external advisor's answer.
//!
//! The advisor is always consulted; its strategic read wins whenever it
//! disagrees with the local simulation. What the local proposal buys is
//! context: the advisor sees it, and on agreement the advisor's richer
//! justification replaces the simulator's mechanical one.

use serde::Serialize;
use warden_types::{EventRecord, GoalProposal, Mood, StateSnapshot};

use crate::catalog::FALLBACK_GOAL;

/// Everything an advisor gets to see when asked for a goal.
#[derive(Debug, Clone, Serialize)]
pub struct AdvisorContext {
    /// The current world state.
    pub world_state: StateSnapshot,
    /// The guardian's classified mood.
    pub mood: Mood,
    /// The mood-specific advice line.
    pub advice: String,
    /// The local simulator's proposal, when it produced one.
    pub local_proposal: Option<GoalProposal>,
    /// Reasons of the most recent failures, oldest first.
    pub recent_failures: Vec<String>,
}

/// A source of goal proposals.
///
/// Implementations must be total: when the underlying mechanism cannot
/// produce an answer they return a fallback proposal rather than an
/// error, so arbitration never stalls a cycle.
pub trait Advisor {
    /// Propose a goal for the given context.
    fn propose(&self, context: &AdvisorContext) -> GoalProposal;

    /// Reflect on a recorded failure.
    ///
    /// Purely informational; advisors without a reflective capability
    /// return `None`, which is also the default.
    fn reflect(&self, _record: &EventRecord) -> Option<String> {
        None
    }
}

/// The arbiter's final choice for a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// The chosen goal name, to be resolved against the goal catalog.
    pub goal_name: String,
    /// The justification carried forward into logs and memory.
    pub justification: String,
}

/// Arbitrate between the context's local proposal and the advisor.
pub fn decide(advisor: &dyn Advisor, context: &AdvisorContext) -> Decision {
    let advisory = advisor.propose(context);

    let justification = match &context.local_proposal {
        None => {
            tracing::info!(
                goal = %advisory.goal,
                "no local proposal, deferring to the advisor"
            );
            advisory.justification
        }
        Some(local) if local.goal == advisory.goal => {
            tracing::info!(goal = %advisory.goal, "local and advisory proposals agree");
            advisory.justification
        }
        Some(local) => {
            tracing::info!(
                local = %local.goal,
                advisory = %advisory.goal,
                "proposals disagree, advisor overrides"
            );
            format!(
                "{} (overriding the local preference for '{}')",
                advisory.justification, local.goal
            )
        }
    };

    Decision {
        goal_name: advisory.goal,
        justification,
    }
}

/// An advisor that simply endorses the local proposal.
///
/// Used for offline runs and tests; without a local proposal it falls
/// back to the standing preparation goal.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalEchoAdvisor;

impl Advisor for LocalEchoAdvisor {
    fn propose(&self, context: &AdvisorContext) -> GoalProposal {
        context.local_proposal.clone().unwrap_or_else(|| {
            GoalProposal::certain(
                FALLBACK_GOAL,
                "No local proposal available; preparing for battle.",
            )
        })
    }
}
