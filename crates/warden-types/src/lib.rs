//! Shared type definitions for the Warden guardian agent.
//!
//! This crate is the single source of truth for the vocabulary the rest of
//! the workspace speaks: world-state values, the condition algebra shared by
//! action preconditions and goal conditions, declarative action and goal
//! records, mood classifications, and the event records written to the
//! guardian's memory.
//!
//! # Modules
//!
//! - [`value`] -- Scalar state values (integers, booleans, enumerated tags)
//! - [`condition`] -- Comparators and the fail-closed condition algebra
//! - [`effect`] -- State transformations (assign, add, subtract)
//! - [`state`] -- Hypothetical snapshots and the single live world state
//! - [`action`] -- Declarative, costed action records
//! - [`goal`] -- Prioritized goal records and fulfillment checks
//! - [`mood`] -- Discrete situational mood classification
//! - [`proposal`] -- Goal proposals exchanged between decision components
//! - [`event`] -- Append-only event records for the guardian's memory

pub mod action;
pub mod condition;
pub mod effect;
pub mod event;
pub mod goal;
pub mod mood;
pub mod proposal;
pub mod state;
pub mod value;

// Re-export all public types at crate root for convenience.
pub use action::Action;
pub use condition::{Comparator, Condition, ConditionSet};
pub use effect::{Effect, EffectSet};
pub use event::{EventKind, EventRecord};
pub use goal::{Goal, unmet_conditions};
pub use mood::Mood;
pub use proposal::GoalProposal;
pub use state::{StateSnapshot, WorldState};
pub use value::StateValue;
