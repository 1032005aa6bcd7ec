//! Comparators and the condition algebra.
//!
//! The same evaluation logic serves action preconditions and goal
//! conditions: a condition names an attribute, a comparator, and an
//! operand. Evaluation against a state missing the referenced attribute
//! fails closed -- the condition is simply unmet, never an error.
//!
//! Ordering comparators (`<`, `<=`, `>`, `>=`) are defined only for
//! integer operands; applying them to booleans or tags is unmet as well.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::StateValue;

/// A named set of conditions, keyed by world-state attribute.
///
/// Used for both action preconditions and goal conditions. A set is
/// satisfied when every entry is met (conjunction).
pub type ConditionSet = BTreeMap<String, Condition>;

/// Comparison operators usable in conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    /// Equal (`=`). Defined for all value shapes.
    #[serde(rename = "=")]
    Eq,
    /// Not equal (`!=`). Defined for all value shapes.
    #[serde(rename = "!=")]
    Ne,
    /// Strictly less than (`<`). Integers only.
    #[serde(rename = "<")]
    Lt,
    /// Less than or equal (`<=`). Integers only.
    #[serde(rename = "<=")]
    Le,
    /// Strictly greater than (`>`). Integers only.
    #[serde(rename = ">")]
    Gt,
    /// Greater than or equal (`>=`). Integers only.
    #[serde(rename = ">=")]
    Ge,
}

/// A single condition: comparator plus operand.
///
/// The attribute the condition applies to is the key of the owning
/// [`ConditionSet`] entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// The comparison operator.
    pub comparator: Comparator,
    /// The right-hand operand the current value is compared against.
    pub operand: StateValue,
}

impl Condition {
    /// Build a condition from a comparator and operand.
    pub fn new(comparator: Comparator, operand: impl Into<StateValue>) -> Self {
        Self {
            comparator,
            operand: operand.into(),
        }
    }

    /// Shorthand for an equality condition, the most common form.
    pub fn equals(operand: impl Into<StateValue>) -> Self {
        Self::new(Comparator::Eq, operand)
    }

    /// Evaluate this condition against the current value of its attribute.
    ///
    /// `current` is `None` when the state has no entry for the attribute;
    /// that case is always unmet. Ordering comparisons between values
    /// without a numeric ordering are unmet as well.
    pub fn is_met(&self, current: Option<&StateValue>) -> bool {
        let Some(current) = current else {
            return false;
        };
        match self.comparator {
            Comparator::Eq => *current == self.operand,
            Comparator::Ne => *current != self.operand,
            Comparator::Lt => current
                .ordered_cmp(&self.operand)
                .is_some_and(core::cmp::Ordering::is_lt),
            Comparator::Le => current
                .ordered_cmp(&self.operand)
                .is_some_and(core::cmp::Ordering::is_le),
            Comparator::Gt => current
                .ordered_cmp(&self.operand)
                .is_some_and(core::cmp::Ordering::is_gt),
            Comparator::Ge => current
                .ordered_cmp(&self.operand)
                .is_some_and(core::cmp::Ordering::is_ge),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_attribute_fails_closed() {
        let condition = Condition::equals(true);
        assert!(!condition.is_met(None));

        let ordered = Condition::new(Comparator::Ge, 1);
        assert!(!ordered.is_met(None));
    }

    #[test]
    fn equality_covers_all_shapes() {
        let flag = Condition::equals(true);
        assert!(flag.is_met(Some(&StateValue::Bool(true))));
        assert!(!flag.is_met(Some(&StateValue::Bool(false))));

        let tag = Condition::equals("low");
        assert!(tag.is_met(Some(&StateValue::Tag(String::from("low")))));
        assert!(!tag.is_met(Some(&StateValue::Tag(String::from("high")))));

        let count = Condition::equals(3);
        assert!(count.is_met(Some(&StateValue::Int(3))));
    }

    #[test]
    fn inequality() {
        let condition = Condition::new(Comparator::Ne, "high");
        assert!(condition.is_met(Some(&StateValue::Tag(String::from("low")))));
        assert!(!condition.is_met(Some(&StateValue::Tag(String::from("high")))));
    }

    #[test]
    fn ordering_comparators_on_integers() {
        let at_least_one = Condition::new(Comparator::Ge, 1);
        assert!(at_least_one.is_met(Some(&StateValue::Int(1))));
        assert!(at_least_one.is_met(Some(&StateValue::Int(5))));
        assert!(!at_least_one.is_met(Some(&StateValue::Int(0))));

        let below_forty = Condition::new(Comparator::Lt, 40);
        assert!(below_forty.is_met(Some(&StateValue::Int(20))));
        assert!(!below_forty.is_met(Some(&StateValue::Int(40))));

        let above_zero = Condition::new(Comparator::Gt, 0);
        assert!(above_zero.is_met(Some(&StateValue::Int(1))));
        assert!(!above_zero.is_met(Some(&StateValue::Int(0))));

        let at_most_five = Condition::new(Comparator::Le, 5);
        assert!(at_most_five.is_met(Some(&StateValue::Int(5))));
        assert!(!at_most_five.is_met(Some(&StateValue::Int(6))));
    }

    #[test]
    fn ordering_against_non_integers_is_unmet() {
        let condition = Condition::new(Comparator::Gt, 0);
        assert!(!condition.is_met(Some(&StateValue::Bool(true))));
        assert!(!condition.is_met(Some(&StateValue::Tag(String::from("low")))));
    }

    #[test]
    fn comparator_serde_symbols() {
        let json = serde_json::to_string(&Comparator::Ge).unwrap_or_default();
        assert_eq!(json, "\">=\"");
        let back: Result<Comparator, _> = serde_json::from_str("\"!=\"");
        assert_eq!(back.ok(), Some(Comparator::Ne));
    }
}
