//! The guardian's action and goal catalogs, plus the seeded scenarios.
//!
//! Catalogs are built once per run from the tuning config and treated as
//! read-only after that. Every helper here is a pure constructor or
//! lookup over that declarative data.

use warden_types::{
    Action, Comparator, Condition, Effect, Goal, StateSnapshot, StateValue, WorldState,
};

use crate::config::GuardianTuning;

/// The goal the arbiter falls back to when the advisor cannot answer.
pub const FALLBACK_GOAL: &str = "PrepareForBattle";

/// Build the guardian's full action catalog.
///
/// Magnitudes (heal amount, attack stamina cost) come from the tuning
/// config; the structure of the catalog is fixed.
pub fn guardian_actions(tuning: &GuardianTuning) -> Vec<Action> {
    vec![
        heal_self(tuning),
        attack_enemy(tuning),
        retreat(),
        defend_treasure(),
        call_backup(),
        search_for_potion(),
        rest(),
    ]
}

fn heal_self(tuning: &GuardianTuning) -> Action {
    Action {
        name: String::from("HealSelf"),
        preconditions: [(
            String::from("potionCount"),
            Condition::new(Comparator::Gt, 0),
        )]
        .into_iter()
        .collect(),
        effects: [
            (String::from("health"), Effect::Add(tuning.heal_amount)),
            (String::from("potionCount"), Effect::Subtract(1)),
        ]
        .into_iter()
        .collect(),
        cost: 1,
    }
}

fn attack_enemy(tuning: &GuardianTuning) -> Action {
    Action {
        name: String::from("AttackEnemy"),
        preconditions: [
            (String::from("enemyNearby"), Condition::equals(true)),
            (
                String::from("stamina"),
                Condition::new(Comparator::Ge, tuning.attack_stamina_cost),
            ),
        ]
        .into_iter()
        .collect(),
        effects: [
            (
                String::from("enemyNearby"),
                Effect::Assign(StateValue::Bool(false)),
            ),
            (
                String::from("stamina"),
                Effect::Subtract(tuning.attack_stamina_cost),
            ),
        ]
        .into_iter()
        .collect(),
        cost: 2,
    }
}

fn retreat() -> Action {
    Action {
        name: String::from("Retreat"),
        preconditions: [].into_iter().collect(),
        effects: [
            (
                String::from("isInSafeZone"),
                Effect::Assign(StateValue::Bool(true)),
            ),
            (
                String::from("enemyNearby"),
                Effect::Assign(StateValue::Bool(false)),
            ),
        ]
        .into_iter()
        .collect(),
        cost: 1,
    }
}

fn defend_treasure() -> Action {
    Action {
        name: String::from("DefendTreasure"),
        preconditions: [].into_iter().collect(),
        effects: [(
            String::from("treasureThreatLevel"),
            Effect::Assign(StateValue::Tag(String::from("low"))),
        )]
        .into_iter()
        .collect(),
        cost: 1,
    }
}

fn call_backup() -> Action {
    Action {
        name: String::from("CallBackup"),
        preconditions: [(String::from("enemyNearby"), Condition::equals(true))]
            .into_iter()
            .collect(),
        effects: [(
            String::from("treasureThreatLevel"),
            Effect::Assign(StateValue::Tag(String::from("low"))),
        )]
        .into_iter()
        .collect(),
        cost: 3,
    }
}

fn search_for_potion() -> Action {
    Action {
        name: String::from("SearchForPotion"),
        preconditions: [(String::from("isInSafeZone"), Condition::equals(true))]
            .into_iter()
            .collect(),
        effects: [(String::from("potionCount"), Effect::Add(1))]
            .into_iter()
            .collect(),
        cost: 2,
    }
}

fn rest() -> Action {
    Action {
        name: String::from("Rest"),
        preconditions: [(String::from("isInSafeZone"), Condition::equals(true))]
            .into_iter()
            .collect(),
        effects: [
            (String::from("health"), Effect::Add(10)),
            (String::from("stamina"), Effect::Add(5)),
        ]
        .into_iter()
        .collect(),
        cost: 1,
    }
}

/// Build the guardian's goal catalog, highest priority first.
pub fn guardian_goals() -> Vec<Goal> {
    vec![
        Goal {
            name: String::from("Survive"),
            priority: 100,
            conditions: [(String::from("isInSafeZone"), Condition::equals(true))]
                .into_iter()
                .collect(),
        },
        Goal {
            name: String::from("ProtectTreasure"),
            priority: 90,
            conditions: [(
                String::from("treasureThreatLevel"),
                Condition::equals(StateValue::Tag(String::from("low"))),
            )]
            .into_iter()
            .collect(),
        },
        Goal {
            name: String::from("EliminateThreat"),
            priority: 80,
            conditions: [(String::from("enemyNearby"), Condition::equals(false))]
                .into_iter()
                .collect(),
        },
        Goal {
            name: String::from("PrepareForBattle"),
            priority: 50,
            conditions: [(
                String::from("potionCount"),
                Condition::new(Comparator::Ge, 1),
            )]
            .into_iter()
            .collect(),
        },
    ]
}

/// Look up a goal by name in a catalog.
pub fn goal_by_name<'a>(goals: &'a [Goal], name: &str) -> Option<&'a Goal> {
    goals.iter().find(|goal| goal.name == name)
}

/// The goal an action serves, used to turn the simulator's best action
/// into a goal proposal.
///
/// Actions without a specific mapping serve treasure protection, the
/// guardian's standing duty.
pub fn goal_for_action(action_name: &str) -> &'static str {
    match action_name {
        "HealSelf" | "Rest" | "SearchForPotion" => "PrepareForBattle",
        "AttackEnemy" | "CallBackup" => "EliminateThreat",
        "Retreat" => "Survive",
        _ => "ProtectTreasure",
    }
}

/// A seeded starting situation for a run.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Scenario number, as selected in the run config.
    pub id: u32,
    /// Short human-readable framing of the situation.
    pub description: &'static str,
    /// The initial live state.
    pub world: WorldState,
}

/// Build one of the predefined scenarios. Unknown ids get the default
/// guardian posture.
pub fn scenario(id: u32) -> Scenario {
    match id {
        1 => Scenario {
            id,
            description: "Wounded, out of potions, enemy closing in",
            world: seeded(&[
                ("health", StateValue::Int(20)),
                ("enemyNearby", StateValue::Bool(true)),
                ("potionCount", StateValue::Int(0)),
                ("treasureThreatLevel", StateValue::Tag(String::from("medium"))),
                ("stamina", StateValue::Int(5)),
                ("isInSafeZone", StateValue::Bool(false)),
            ]),
        },
        2 => Scenario {
            id,
            description: "Healthy, treasure under heavy threat, enemy nearby",
            world: seeded(&[
                ("health", StateValue::Int(85)),
                ("enemyNearby", StateValue::Bool(true)),
                ("potionCount", StateValue::Int(1)),
                ("treasureThreatLevel", StateValue::Tag(String::from("high"))),
                ("stamina", StateValue::Int(15)),
                ("isInSafeZone", StateValue::Bool(false)),
            ]),
        },
        3 => Scenario {
            id,
            description: "No enemy, low stamina, a potion in reserve",
            world: seeded(&[
                ("health", StateValue::Int(70)),
                ("enemyNearby", StateValue::Bool(false)),
                ("potionCount", StateValue::Int(1)),
                ("treasureThreatLevel", StateValue::Tag(String::from("low"))),
                ("stamina", StateValue::Int(2)),
                ("isInSafeZone", StateValue::Bool(true)),
            ]),
        },
        4 => Scenario {
            id,
            description: "Exposed with an enemy nearby and no potions",
            world: seeded(&[
                ("health", StateValue::Int(60)),
                ("enemyNearby", StateValue::Bool(true)),
                ("potionCount", StateValue::Int(0)),
                ("treasureThreatLevel", StateValue::Tag(String::from("low"))),
                ("stamina", StateValue::Int(10)),
                ("isInSafeZone", StateValue::Bool(false)),
            ]),
        },
        _ => Scenario {
            id,
            description: "Default guardian posture",
            world: WorldState::guardian_default(),
        },
    }
}

fn seeded(entries: &[(&str, StateValue)]) -> WorldState {
    let snapshot: StateSnapshot = entries
        .iter()
        .map(|(key, value)| ((*key).to_owned(), value.clone()))
        .collect();
    WorldState::from_snapshot(snapshot)
}
