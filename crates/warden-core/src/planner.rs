//! Heuristic forward search from a state snapshot to a goal region.
//!
//! The search is A*-shaped: g is accumulated action cost, h is the count
//! of goal conditions still unmet, and expansion order follows f = g + h
//! with ties broken by discovery order. The heuristic is the same
//! [`unmet_conditions`] count that defines goal fulfillment, so "h is
//! zero" and "goal fulfilled" can never disagree.
//!
//! Nodes live in a flat arena and refer to their parents by index; a
//! found plan is reconstructed by walking the parent chain. The closed
//! set keys on the canonical encoding of the *full* snapshot, so two
//! states differing only in a goal-irrelevant attribute are still
//! explored separately.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use warden_types::{unmet_conditions, Action, Goal, StateSnapshot};

/// Search limits for [`find_plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Maximum node expansions before the search gives up.
    pub max_iterations: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
        }
    }
}

/// An ordered sequence of actions from the start state into the goal
/// region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// The actions to execute, in order. Empty when the start state
    /// already fulfills the goal.
    pub steps: Vec<Action>,
}

impl Plan {
    /// The step names in execution order.
    pub fn names(&self) -> Vec<String> {
        self.steps.iter().map(|step| step.name.clone()).collect()
    }

    /// Total cost of the plan.
    pub fn total_cost(&self) -> u32 {
        self.steps
            .iter()
            .fold(0_u32, |total, step| total.saturating_add(step.cost))
    }
}

/// Outcome of a planning call.
///
/// The two failure shapes are deliberately distinct: an exhausted search
/// proved the goal unreachable from the start state, while a bounded-out
/// search only ran out of budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanSearch {
    /// A plan into the goal region was found.
    Found(Plan),
    /// The reachable state space was fully explored and the goal region
    /// was never entered.
    Exhausted,
    /// The iteration cap was hit with candidate states still open.
    BoundedOut {
        /// How many expansions were performed before giving up.
        iterations: usize,
    },
}

impl PlanSearch {
    /// The plan, when one was found.
    pub fn into_plan(self) -> Option<Plan> {
        match self {
            Self::Found(plan) => Some(plan),
            Self::Exhausted | Self::BoundedOut { .. } => None,
        }
    }
}

struct Node {
    state: StateSnapshot,
    parent: Option<usize>,
    action_index: Option<usize>,
    g: u32,
}

/// Heap entry ordered so the smallest (f, tie) pops first.
#[derive(PartialEq, Eq)]
struct OpenEntry {
    f: u32,
    tie: u64,
    node: usize,
    h: u32,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.tie.cmp(&self.tie))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Search for a cheapest action sequence from `start` into the goal
/// region of `goal`, choosing only from `actions`.
pub fn find_plan(
    start: &StateSnapshot,
    goal: &Goal,
    actions: &[Action],
    config: &PlannerConfig,
) -> PlanSearch {
    let mut nodes: Vec<Node> = Vec::new();
    let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
    let mut closed: BTreeSet<String> = BTreeSet::new();
    let mut tie: u64 = 0;

    let root_h = unmet_conditions(&goal.conditions, start);
    nodes.push(Node {
        state: start.clone(),
        parent: None,
        action_index: None,
        g: 0,
    });
    open.push(OpenEntry {
        f: root_h,
        tie,
        node: 0,
        h: root_h,
    });

    let mut iterations: usize = 0;
    while let Some(entry) = open.pop() {
        if iterations >= config.max_iterations {
            tracing::warn!(
                goal = %goal.name,
                iterations,
                "planner hit its iteration cap with states still open"
            );
            return PlanSearch::BoundedOut { iterations };
        }
        iterations = iterations.saturating_add(1);

        let Some(current) = nodes.get(entry.node) else {
            continue;
        };

        if entry.h == 0 {
            return PlanSearch::Found(reconstruct(&nodes, entry.node, actions));
        }

        let key = current.state.canonical_key();
        if !closed.insert(key) {
            continue;
        }

        let current_state = current.state.clone();
        let current_g = current.g;
        for (action_index, action) in actions.iter().enumerate() {
            if !action.is_achievable(&current_state) {
                continue;
            }
            let successor = action.apply(&current_state);
            if closed.contains(&successor.canonical_key()) {
                continue;
            }
            let g = current_g.saturating_add(action.cost);
            let h = unmet_conditions(&goal.conditions, &successor);
            tie = tie.saturating_add(1);
            let node = nodes.len();
            nodes.push(Node {
                state: successor,
                parent: Some(entry.node),
                action_index: Some(action_index),
                g,
            });
            open.push(OpenEntry {
                f: g.saturating_add(h),
                tie,
                node,
                h,
            });
        }
    }

    PlanSearch::Exhausted
}

fn reconstruct(nodes: &[Node], end: usize, actions: &[Action]) -> Plan {
    let mut indices: Vec<usize> = Vec::new();
    let mut cursor = Some(end);
    while let Some(index) = cursor {
        let Some(node) = nodes.get(index) else {
            break;
        };
        if let Some(action_index) = node.action_index {
            indices.push(action_index);
        }
        cursor = node.parent;
    }
    indices.reverse();

    let steps = indices
        .into_iter()
        .filter_map(|index| actions.get(index).cloned())
        .collect();
    Plan { steps }
}
