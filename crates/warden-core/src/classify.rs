//! Situational mood classification and the advice line fed to the
//! advisor prompt.
//!
//! Mood is derived fresh from the current snapshot and the recent
//! failure history on every cycle; it is never carried over. The first
//! matching rule wins, checked from most to least urgent.

use warden_types::{Mood, StateSnapshot, StateValue};

use crate::config::GuardianTuning;

/// Classify the guardian's mood.
///
/// `recent_failure_reasons` holds the reasons of the most recent failure
/// records, newest last; two identical reasons in a row read as being
/// stuck in a loop, which outranks everything else.
pub fn mood(
    state: &StateSnapshot,
    recent_failure_reasons: &[String],
    tuning: &GuardianTuning,
) -> Mood {
    if let [first, second] = recent_failure_reasons {
        if first == second {
            return Mood::Stuck;
        }
    }

    let health = state.get("health").and_then(StateValue::as_int);
    let potions = state.get("potionCount").and_then(StateValue::as_int);
    let stamina = state.get("stamina").and_then(StateValue::as_int);
    let enemy_near = state
        .get("enemyNearby")
        .and_then(StateValue::as_bool)
        .unwrap_or(false);
    let threat = state.get("treasureThreatLevel").and_then(StateValue::as_tag);

    if health.is_some_and(|health| health < tuning.low_health_threshold)
        && enemy_near
        && potions == Some(0)
    {
        return Mood::Desperate;
    }

    if threat == Some("high") {
        return Mood::AggressiveDefender;
    }

    let below_full_health = health.is_some_and(|health| health < tuning.full_health);
    let below_full_stamina = stamina.is_some_and(|stamina| stamina < tuning.full_stamina);
    if !enemy_near && (below_full_health || below_full_stamina) {
        return Mood::Preparing;
    }

    Mood::Patrolling
}

/// Render the mood-specific advice line woven into the advisor prompt.
pub fn dynamic_advice(mood: Mood, state: &StateSnapshot) -> String {
    let health = state.get("health").and_then(StateValue::as_int);
    let potions = state.get("potionCount").and_then(StateValue::as_int);
    let stamina = state.get("stamina").and_then(StateValue::as_int);

    let mut parts: Vec<String> = Vec::new();
    match mood {
        Mood::Desperate => {
            parts.push(String::from("My situation is dire."));
            if let Some(health) = health {
                parts.push(format!("My health is critically low at {health}."));
            }
            if potions == Some(0) {
                parts.push(String::from("I have no potions."));
            }
            parts.push(String::from(
                "A direct confrontation is likely fatal. Unconventional tactics are \
                 required. Perhaps protecting the treasure via 'CallBackup' could save me.",
            ));
        }
        Mood::Stuck => {
            parts.push(String::from(
                "My previous strategy has failed repeatedly. I must think differently \
                 and choose a new, achievable goal to break this loop.",
            ));
        }
        Mood::AggressiveDefender => {
            parts.push(String::from(
                "The treasure is under maximum threat! I must act decisively and \
                 aggressively to eliminate the danger immediately.",
            ));
        }
        Mood::Preparing => {
            parts.push(String::from("There is no immediate danger."));
            if let Some(health) = health {
                if health < 100 {
                    parts.push(format!("My health ({health}) is not full."));
                }
            }
            if stamina.is_some_and(|stamina| stamina < 20) {
                parts.push(String::from("I am low on stamina."));
            }
            parts.push(String::from(
                "This is a chance to recover and prepare for the next battle.",
            ));
        }
        Mood::Patrolling => {
            parts.push(String::from(
                "The situation is stable. I will remain vigilant and patrol the area.",
            ));
        }
    }
    parts.join(" ")
}
