//! Scalar state values.
//!
//! Every world-state attribute holds one of three scalar shapes: a signed
//! integer counter (health, stamina, potions), a boolean flag (enemy
//! proximity, safe-zone occupancy), or an enumerated string tag (threat
//! level). The serde representation is untagged so that snapshots round-trip
//! as plain JSON scalars (`42`, `true`, `"low"`).

use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Serialize};

/// A single scalar value stored under a world-state attribute.
///
/// Equality is supported across all shapes; ordering is defined only
/// between integers. Comparing a boolean or tag with an ordering
/// comparator yields no ordering, which the condition algebra treats as
/// an unmet condition (fail closed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    /// A boolean flag, e.g. `enemyNearby`.
    Bool(bool),
    /// A signed integer counter, e.g. `health` or `potionCount`.
    Int(i64),
    /// An enumerated string tag, e.g. `treasureThreatLevel = "low"`.
    Tag(String),
}

impl StateValue {
    /// The integer content, if this value is an integer.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Bool(_) | Self::Tag(_) => None,
        }
    }

    /// The boolean content, if this value is a boolean.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Int(_) | Self::Tag(_) => None,
        }
    }

    /// The tag content, if this value is an enumerated tag.
    pub fn as_tag(&self) -> Option<&str> {
        match self {
            Self::Tag(t) => Some(t.as_str()),
            Self::Bool(_) | Self::Int(_) => None,
        }
    }

    /// Numeric ordering between two values.
    ///
    /// Only integer pairs are ordered. Any other combination returns
    /// `None`, which ordering comparators interpret as unmet.
    pub const fn ordered_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => {
                if *a < *b {
                    Some(Ordering::Less)
                } else if *a > *b {
                    Some(Ordering::Greater)
                } else {
                    Some(Ordering::Equal)
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Tag(t) => write!(f, "{t}"),
        }
    }
}

impl From<i64> for StateValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        Self::Tag(value.to_owned())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        Self::Tag(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_serde_round_trip() {
        let values = [
            StateValue::Int(42),
            StateValue::Bool(true),
            StateValue::Tag(String::from("low")),
        ];
        for value in values {
            let json = serde_json::to_string(&value).unwrap_or_default();
            let back: Result<StateValue, _> = serde_json::from_str(&json);
            assert_eq!(back.ok(), Some(value));
        }
    }

    #[test]
    fn json_scalars_deserialize_to_expected_shapes() {
        let int: Result<StateValue, _> = serde_json::from_str("5");
        assert_eq!(int.ok(), Some(StateValue::Int(5)));

        let flag: Result<StateValue, _> = serde_json::from_str("true");
        assert_eq!(flag.ok(), Some(StateValue::Bool(true)));

        let tag: Result<StateValue, _> = serde_json::from_str("\"high\"");
        assert_eq!(tag.ok(), Some(StateValue::Tag(String::from("high"))));
    }

    #[test]
    fn integers_are_ordered() {
        let three = StateValue::Int(3);
        let five = StateValue::Int(5);
        assert_eq!(three.ordered_cmp(&five), Some(Ordering::Less));
        assert_eq!(five.ordered_cmp(&three), Some(Ordering::Greater));
        assert_eq!(five.ordered_cmp(&StateValue::Int(5)), Some(Ordering::Equal));
    }

    #[test]
    fn non_integers_have_no_ordering() {
        let flag = StateValue::Bool(true);
        let tag = StateValue::Tag(String::from("low"));
        let int = StateValue::Int(1);
        assert_eq!(flag.ordered_cmp(&int), None);
        assert_eq!(int.ordered_cmp(&tag), None);
        let other_tag = StateValue::Tag(String::from("high"));
        assert_eq!(tag.ordered_cmp(&other_tag), None);
    }

    #[test]
    fn cross_shape_equality_is_false() {
        assert_ne!(StateValue::Int(1), StateValue::Bool(true));
        assert_ne!(StateValue::Tag(String::from("1")), StateValue::Int(1));
    }
}
