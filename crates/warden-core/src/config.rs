//! Configuration loading and typed config structures for the guardian.
//!
//! The canonical configuration lives in `warden-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure and provides a loader that reads and validates the
//! file. Every field has a default, so a missing file or a partial file
//! still yields a usable configuration.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level guardian configuration.
///
/// Mirrors the structure of `warden-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WardenConfig {
    /// Guardian stat thresholds and action magnitudes.
    #[serde(default)]
    pub guardian: GuardianTuning,

    /// Reward-learning parameters and the bias store location.
    #[serde(default)]
    pub learning: LearningConfig,

    /// Planner search limits.
    #[serde(default)]
    pub planner: PlannerLimits,

    /// Event memory location.
    #[serde(default)]
    pub memory: MemoryConfig,

    /// LLM advisory backend configuration.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Run boundaries (scenario selection, cycle cap).
    #[serde(default)]
    pub run: RunConfig,
}

impl WardenConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The environment variable `WARDEN_API_KEY` (falling back to
    /// `GEMINI_API_KEY`) overrides `llm.api_key`, so credentials never
    /// need to live in the file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.llm.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.llm.apply_env_overrides();
        Ok(config)
    }
}

/// Stat thresholds and action magnitudes for the guardian.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuardianTuning {
    /// Health below this is considered low.
    #[serde(default = "default_low_health_threshold")]
    pub low_health_threshold: i64,

    /// Stamina below this is considered low.
    #[serde(default = "default_low_stamina_threshold")]
    pub low_stamina_threshold: i64,

    /// Stamina consumed by one attack.
    #[serde(default = "default_attack_stamina_cost")]
    pub attack_stamina_cost: i64,

    /// Health restored by drinking one potion.
    #[serde(default = "default_heal_amount")]
    pub heal_amount: i64,

    /// The health value considered fully healed.
    #[serde(default = "default_full_health")]
    pub full_health: i64,

    /// The stamina value considered fully rested.
    #[serde(default = "default_full_stamina")]
    pub full_stamina: i64,
}

impl Default for GuardianTuning {
    fn default() -> Self {
        Self {
            low_health_threshold: default_low_health_threshold(),
            low_stamina_threshold: default_low_stamina_threshold(),
            attack_stamina_cost: default_attack_stamina_cost(),
            heal_amount: default_heal_amount(),
            full_health: default_full_health(),
            full_stamina: default_full_stamina(),
        }
    }
}

/// Reward-learning parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LearningConfig {
    /// How quickly biases move toward observed reward. Smaller is
    /// slower, more stable learning.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    /// Fraction of the learned bias mixed into simulation scores.
    /// Reward dominates; the bias only perturbs.
    #[serde(default = "default_bias_weight")]
    pub bias_weight: f64,

    /// Path of the persisted bias store.
    #[serde(default = "default_bias_path")]
    pub bias_path: String,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: default_learning_rate(),
            bias_weight: default_bias_weight(),
            bias_path: default_bias_path(),
        }
    }
}

/// Planner search limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlannerLimits {
    /// Maximum node expansions per planning call. Higher trades latency
    /// for completeness.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for PlannerLimits {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

/// Event memory location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Path of the persisted event log.
    #[serde(default = "default_memory_path")]
    pub path: String,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            path: default_memory_path(),
        }
    }
}

/// Which LLM API flavor the advisor speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// Google Gemini `generateContent` API.
    #[default]
    Gemini,
    /// `OpenAI`-compatible chat completions API.
    OpenAi,
}

/// LLM advisory backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LlmConfig {
    /// Which API flavor to speak.
    #[serde(default)]
    pub backend_type: BackendType,

    /// Base URL of the API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API key. Usually supplied via environment override rather than
    /// the file; an empty key makes advisor construction fail fast.
    #[serde(default)]
    pub api_key: String,

    /// Model identifier sent to the backend.
    #[serde(default = "default_model")]
    pub model: String,

    /// Directory holding the prompt templates.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
}

impl LlmConfig {
    /// Apply environment overrides for the API key.
    ///
    /// `WARDEN_API_KEY` wins over `GEMINI_API_KEY`; both win over the
    /// file value.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("WARDEN_API_KEY") {
            self.api_key = key;
        } else if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.api_key = key;
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            backend_type: BackendType::default(),
            api_url: default_api_url(),
            api_key: String::new(),
            model: default_model(),
            templates_dir: default_templates_dir(),
        }
    }
}

/// Run boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Which predefined scenario seeds the world state.
    #[serde(default = "default_scenario")]
    pub scenario: u32,

    /// Maximum decision cycles before the run stops.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            scenario: default_scenario(),
            max_cycles: default_max_cycles(),
        }
    }
}

const fn default_low_health_threshold() -> i64 {
    40
}

const fn default_low_stamina_threshold() -> i64 {
    5
}

const fn default_attack_stamina_cost() -> i64 {
    5
}

const fn default_heal_amount() -> i64 {
    50
}

const fn default_full_health() -> i64 {
    100
}

const fn default_full_stamina() -> i64 {
    20
}

const fn default_learning_rate() -> f64 {
    0.1
}

const fn default_bias_weight() -> f64 {
    0.1
}

fn default_bias_path() -> String {
    String::from("action_biases.json")
}

const fn default_max_iterations() -> usize {
    1000
}

fn default_memory_path() -> String {
    String::from("agent_memory.json")
}

fn default_api_url() -> String {
    String::from("https://generativelanguage.googleapis.com/v1beta")
}

fn default_model() -> String {
    String::from("gemini-2.0-flash")
}

fn default_templates_dir() -> String {
    String::from("templates")
}

const fn default_scenario() -> u32 {
    4
}

const fn default_max_cycles() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = WardenConfig::parse("{}");
        assert!(config.is_ok());
        let config = config.unwrap_or_default();
        assert_eq!(config.guardian.low_health_threshold, 40);
        assert_eq!(config.planner.max_iterations, 1000);
        assert!((config.learning.learning_rate - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.run.max_cycles, 10);
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let yaml = "
planner:
  max_iterations: 50
guardian:
  heal_amount: 25
";
        let config = WardenConfig::parse(yaml).unwrap_or_default();
        assert_eq!(config.planner.max_iterations, 50);
        assert_eq!(config.guardian.heal_amount, 25);
        // Untouched fields keep defaults.
        assert_eq!(config.guardian.attack_stamina_cost, 5);
        assert_eq!(config.memory.path, "agent_memory.json");
    }

    #[test]
    fn backend_type_parses_lowercase() {
        let yaml = "
llm:
  backend_type: openai
  model: gpt-4o-mini
";
        let config = WardenConfig::parse(yaml).unwrap_or_default();
        assert_eq!(config.llm.backend_type, BackendType::OpenAi);
        assert_eq!(config.llm.model, "gpt-4o-mini");
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = WardenConfig::parse(": not yaml [");
        assert!(result.is_err());
    }
}
