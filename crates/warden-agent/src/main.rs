//! Runtime entry point for the Warden guardian agent.
//!
//! Loads configuration, seeds a scenario world, wires the persisted
//! stores and the LLM advisor together, and runs decision cycles until a
//! goal is achieved or the cycle cap is hit.
//!
//! # Architecture
//!
//! ```text
//! mood classifier --> local simulator --> arbiter (advisor) --> planner
//!       ^                                                          |
//!       |                                                          v
//!   memory / biases  <--  reward + learning  <--  executor (world state)
//! ```

mod cycle;

use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use warden_advisor::LlmAdvisor;
use warden_core::bias::BiasStore;
use warden_core::catalog;
use warden_core::config::WardenConfig;
use warden_core::executor::OutcomeOdds;
use warden_core::memory::Memory;

const DEFAULT_CONFIG_PATH: &str = "warden-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error when configuration loading or advisor construction
/// fails. Everything past startup degrades instead of aborting.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("warden-agent starting");

    let config_path =
        std::env::var("WARDEN_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
    let config = WardenConfig::from_file(Path::new(&config_path))?;
    info!(
        scenario = config.run.scenario,
        max_cycles = config.run.max_cycles,
        max_iterations = config.planner.max_iterations,
        "configuration loaded"
    );

    // Fail fast on a missing API key before touching anything else.
    let advisor = LlmAdvisor::new(&config.llm)?;

    let scenario = catalog::scenario(config.run.scenario);
    info!(
        scenario = scenario.id,
        description = scenario.description,
        "scenario loaded"
    );
    let mut world = scenario.world;

    let mut biases = BiasStore::load(Path::new(&config.learning.bias_path));
    let mut memory = Memory::load(Path::new(&config.memory.path));

    let report = cycle::run_cycles(
        &config,
        &mut world,
        &advisor,
        &mut memory,
        &mut biases,
        &mut rand::rng(),
        &OutcomeOdds::default(),
    );

    match &report.goal_achieved {
        Some(goal) => info!(
            cycles = report.cycles_run,
            goal = goal.as_str(),
            "run finished with goal achieved"
        ),
        None => info!(
            cycles = report.cycles_run,
            "run finished without achieving a goal"
        ),
    }
    info!(final_state = %report.final_state, "final world state");

    Ok(())
}
