//! Planning and decision-arbitration engine for the Warden guardian agent.
//!
//! This crate is the synchronous core of the agent: it turns a world-state
//! snapshot into a goal decision, a goal into an ordered action plan, and
//! an executed plan into updated action preferences. The only
//! latency-bearing dependency -- the external advisory collaborator -- sits
//! behind the [`Advisor`] trait and is implemented elsewhere.
//!
//! # Modules
//!
//! - [`planner`] -- A*-style heuristic graph search over hypothetical states
//! - [`simulate`] -- one-step lookahead producing a local goal proposal
//! - [`arbiter`] -- combines local and advisory proposals into a decision
//! - [`reward`] -- scalar scoring of a before/after snapshot pair
//! - [`bias`] -- persisted per-mood action preferences and the learning rule
//! - [`classify`] -- situational mood classification
//! - [`memory`] -- append-only event log for failure analysis
//! - [`executor`] -- probabilistic execution of plan steps on the live state
//! - [`catalog`] -- the guardian's action and goal catalogs and scenarios
//! - [`config`] -- typed YAML configuration
//!
//! [`Advisor`]: arbiter::Advisor

pub mod arbiter;
pub mod bias;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod error;
pub mod executor;
pub mod memory;
pub mod planner;
pub mod reward;
pub mod simulate;

pub use arbiter::{Advisor, AdvisorContext, Decision, LocalEchoAdvisor};
pub use bias::BiasStore;
pub use config::WardenConfig;
pub use error::StoreError;
pub use executor::{OutcomeOdds, StepOutcome};
pub use memory::Memory;
pub use planner::{Plan, PlanSearch, PlannerConfig};
