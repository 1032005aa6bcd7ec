//! Event records written to the guardian's memory.
//!
//! The memory is an append-only record store used for post-hoc failure
//! analysis. The core only appends; the one read path is the
//! recent-failure summary consumed by the mood classifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::StateSnapshot;

/// The kind of a memory event.
///
/// Failure is the only kind the guardian records today; the enum exists
/// so the stored format stays stable if further kinds are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A decision cycle failed: no plan, an invalid goal, or a plan step
    /// that did not succeed during execution.
    Failure,
}

/// One append-only memory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// What kind of event this is.
    pub kind: EventKind,
    /// Human-readable explanation of what happened.
    pub reason: String,
    /// The action names of the plan involved, in execution order.
    /// Empty when the failure happened before a plan existed.
    pub plan: Vec<String>,
    /// Full world-state snapshot at the time of the record.
    pub world_state: StateSnapshot,
    /// When the record was written.
    pub recorded_at: DateTime<Utc>,
}

impl EventRecord {
    /// Build a failure record timestamped now.
    pub fn failure(
        reason: impl Into<String>,
        plan: Vec<String>,
        world_state: StateSnapshot,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: EventKind::Failure,
            reason: reason.into(),
            plan,
            world_state,
            recorded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_record_round_trips() {
        let mut state = StateSnapshot::new();
        state.insert("health", 20);
        let record = EventRecord::failure(
            "Could not find a plan for goal 'Survive'.",
            vec![],
            state,
        );

        let json = serde_json::to_string(&record).unwrap_or_default();
        let back: Result<EventRecord, _> = serde_json::from_str(&json);
        assert_eq!(back.ok(), Some(record));
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&EventKind::Failure).unwrap_or_default();
        assert_eq!(json, "\"failure\"");
    }
}
