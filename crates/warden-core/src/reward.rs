//! Scalar reward for a before/after snapshot pair.
//!
//! The reward is a fixed linear combination of attribute deltas. Potion
//! gain is weighted highest, then health, then stamina, so resource
//! acquisition beats raw recovery when both are on the table.

use warden_types::StateSnapshot;

/// Weight applied to the health delta.
pub const HEALTH_WEIGHT: f64 = 1.5;
/// Weight applied to the potion-count delta.
pub const POTION_WEIGHT: f64 = 2.0;
/// Weight applied to the stamina delta.
pub const STAMINA_WEIGHT: f64 = 0.5;

/// Score the transition from `before` to `after`.
///
/// Attributes absent on either side contribute a zero for that side, so
/// an attribute appearing or disappearing reads as a delta from zero.
/// The result can be negative; costly transitions should look costly.
pub fn score(before: &StateSnapshot, after: &StateSnapshot) -> f64 {
    let health = delta(before, after, "health");
    let potions = delta(before, after, "potionCount");
    let stamina = delta(before, after, "stamina");
    HEALTH_WEIGHT.mul_add(health, POTION_WEIGHT.mul_add(potions, STAMINA_WEIGHT * stamina))
}

#[allow(clippy::cast_precision_loss)]
fn delta(before: &StateSnapshot, after: &StateSnapshot, key: &str) -> f64 {
    let prior = before.get_int_or(key, 0);
    let later = after.get_int_or(key, 0);
    later.saturating_sub(prior) as f64
}
