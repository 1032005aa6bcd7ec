//! State transformations performed by actions.
//!
//! An effect either assigns a literal value (overwriting whatever shape
//! was stored before -- threat-level downgrades assign a tag over a tag,
//! but nothing stops an assign from changing an attribute's shape) or
//! adjusts an integer counter relative to its current value. Relative
//! adjustments read the current value with a default of zero and use
//! saturating arithmetic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::StateValue;

/// A named set of effects, keyed by world-state attribute.
pub type EffectSet = BTreeMap<String, Effect>;

/// A single effect applied to one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Assign the literal value, replacing the current one.
    Assign(StateValue),
    /// Add to the current integer value (missing or non-integer reads as 0).
    Add(i64),
    /// Subtract from the current integer value (missing or non-integer
    /// reads as 0).
    Subtract(i64),
}

impl Effect {
    /// Compute the new value for an attribute given its current value.
    ///
    /// Relative adjustments saturate instead of wrapping; range clamping
    /// (health, stamina, potion count) is the responsibility of the state
    /// container and happens after the whole effect batch.
    pub fn resolve(&self, current: Option<&StateValue>) -> StateValue {
        match self {
            Self::Assign(value) => value.clone(),
            Self::Add(amount) => {
                let base = current.and_then(StateValue::as_int).unwrap_or(0);
                StateValue::Int(base.saturating_add(*amount))
            }
            Self::Subtract(amount) => {
                let base = current.and_then(StateValue::as_int).unwrap_or(0);
                StateValue::Int(base.saturating_sub(*amount))
            }
        }
    }
}
