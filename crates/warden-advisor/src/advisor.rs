//! The LLM-backed advisor.
//!
//! Bridges the synchronous [`Advisor`] trait to the async HTTP backend
//! by owning a dedicated current-thread tokio runtime and blocking on
//! each request. Decision cycles are sequential, so there is never more
//! than one advisory request in flight.
//!
//! Every advisory failure is recovered here: transport errors, bad
//! status codes, timeouts, and unparseable responses all collapse into a
//! fallback proposal, so the arbiter never sees an error.

use std::time::Duration;

use warden_core::arbiter::{Advisor, AdvisorContext};
use warden_core::catalog::FALLBACK_GOAL;
use warden_core::config::LlmConfig;
use warden_types::{EventRecord, GoalProposal};

use crate::error::AdvisorError;
use crate::llm::{create_backend, LlmBackend};
use crate::prompt::{PromptEngine, RenderedPrompt};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A strategic advisor backed by an external LLM.
pub struct LlmAdvisor {
    backend: LlmBackend,
    prompts: PromptEngine,
    runtime: tokio::runtime::Runtime,
}

impl LlmAdvisor {
    /// Build an advisor from the LLM configuration.
    ///
    /// Fails fast: a missing API key, missing templates, or a runtime
    /// that cannot be built are all construction-time errors. A
    /// half-initialized advisor is never returned.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::Config`] when the API key is empty or the
    /// runtime cannot start, and [`AdvisorError::Template`] when the
    /// prompt templates cannot be loaded.
    pub fn new(config: &LlmConfig) -> Result<Self, AdvisorError> {
        if config.api_key.trim().is_empty() {
            return Err(AdvisorError::Config(
                "no API key configured; set WARDEN_API_KEY or llm.api_key".to_owned(),
            ));
        }

        let prompts = PromptEngine::new(&config.templates_dir)?;
        let backend = create_backend(config);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AdvisorError::Config(format!("failed to build advisor runtime: {e}")))?;

        tracing::info!(backend = backend.name(), model = %config.model, "advisor ready");
        Ok(Self {
            backend,
            prompts,
            runtime,
        })
    }

    fn try_propose(&self, context: &AdvisorContext) -> Result<GoalProposal, AdvisorError> {
        let serialized = serde_json::to_value(context)?;
        let prompt = self.prompts.render_briefing(&serialized)?;
        let response = self.ask(&prompt)?;
        let advice = crate::parse::parse_advice(&response)?;
        Ok(GoalProposal::certain(advice.goal, advice.justification))
    }

    fn ask(&self, prompt: &RenderedPrompt) -> Result<String, AdvisorError> {
        self.runtime.block_on(async {
            tokio::time::timeout(REQUEST_TIMEOUT, self.backend.complete(prompt))
                .await
                .map_err(|_| AdvisorError::Backend("advisory request timed out".to_owned()))?
        })
    }
}

impl Advisor for LlmAdvisor {
    fn propose(&self, context: &AdvisorContext) -> GoalProposal {
        match self.try_propose(context) {
            Ok(proposal) => {
                tracing::info!(goal = %proposal.goal, "advisor proposed a goal");
                proposal
            }
            Err(error) => {
                tracing::warn!(%error, "advisor unavailable, falling back");
                GoalProposal {
                    goal: FALLBACK_GOAL.to_owned(),
                    justification: format!(
                        "Advisor unavailable ({error}); preparing for battle as a safe default."
                    ),
                    confidence: 0.0,
                }
            }
        }
    }

    /// Failures to reflect are logged and ignored; reflection is purely
    /// informational.
    fn reflect(&self, record: &EventRecord) -> Option<String> {
        let result = serde_json::to_value(record)
            .map_err(AdvisorError::from)
            .and_then(|context| self.prompts.render_reflection(&context))
            .and_then(|prompt| self.ask(&prompt));
        match result {
            Ok(reflection) => Some(reflection),
            Err(error) => {
                tracing::warn!(%error, "failure reflection skipped");
                None
            }
        }
    }
}
