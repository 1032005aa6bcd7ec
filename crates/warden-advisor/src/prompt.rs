//! Prompt template loading and rendering via `minijinja`.
//!
//! Templates are loaded from the filesystem (default: `templates/`
//! directory) so operators can tune the advisor's voice without
//! recompiling. The briefing template receives the full arbiter context:
//! world state, mood, advice line, local proposal, and recent failures.

use minijinja::Environment;

use crate::error::AdvisorError;

/// Manages prompt template loading and rendering.
///
/// Wraps a `minijinja` [`Environment`] with the advisor templates
/// pre-loaded. Templates can be edited on disk and are picked up on the
/// next call to [`PromptEngine::new`].
pub struct PromptEngine {
    env: Environment<'static>,
}

/// The complete rendered prompt ready to send to an LLM backend.
#[derive(Debug, Clone)]
pub struct RenderedPrompt {
    /// System message establishing the guardian persona and the expected
    /// JSON reply shape.
    pub system: String,
    /// User message carrying the situation briefing.
    pub user: String,
}

impl PromptEngine {
    /// Create a new prompt engine loading templates from the given
    /// directory.
    ///
    /// The directory must contain `system.j2`, `briefing.j2`, and
    /// `reflection.j2`.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::Template`] when a template file is missing
    /// or fails to compile.
    pub fn new(templates_dir: &str) -> Result<Self, AdvisorError> {
        let mut env = Environment::new();

        let system_tpl = load_template(templates_dir, "system.j2")?;
        let briefing_tpl = load_template(templates_dir, "briefing.j2")?;
        let reflection_tpl = load_template(templates_dir, "reflection.j2")?;

        env.add_template_owned("system", system_tpl)
            .map_err(|e| AdvisorError::Template(format!("failed to add system template: {e}")))?;
        env.add_template_owned("briefing", briefing_tpl)
            .map_err(|e| AdvisorError::Template(format!("failed to add briefing template: {e}")))?;
        env.add_template_owned("reflection", reflection_tpl).map_err(|e| {
            AdvisorError::Template(format!("failed to add reflection template: {e}"))
        })?;

        Ok(Self { env })
    }

    /// Render the goal-advice prompt from the serialized arbiter context.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::Template`] when rendering fails.
    pub fn render_briefing(
        &self,
        context: &serde_json::Value,
    ) -> Result<RenderedPrompt, AdvisorError> {
        let system = self
            .env
            .get_template("system")
            .map_err(|e| AdvisorError::Template(format!("missing system template: {e}")))?
            .render(context)
            .map_err(|e| AdvisorError::Template(format!("system render failed: {e}")))?;

        let user = self
            .env
            .get_template("briefing")
            .map_err(|e| AdvisorError::Template(format!("missing briefing template: {e}")))?
            .render(context)
            .map_err(|e| AdvisorError::Template(format!("briefing render failed: {e}")))?;

        Ok(RenderedPrompt { system, user })
    }

    /// Render the failure-reflection prompt.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::Template`] when rendering fails.
    pub fn render_reflection(
        &self,
        context: &serde_json::Value,
    ) -> Result<RenderedPrompt, AdvisorError> {
        let system = self
            .env
            .get_template("system")
            .map_err(|e| AdvisorError::Template(format!("missing system template: {e}")))?
            .render(context)
            .map_err(|e| AdvisorError::Template(format!("system render failed: {e}")))?;

        let user = self
            .env
            .get_template("reflection")
            .map_err(|e| AdvisorError::Template(format!("missing reflection template: {e}")))?
            .render(context)
            .map_err(|e| AdvisorError::Template(format!("reflection render failed: {e}")))?;

        Ok(RenderedPrompt { system, user })
    }
}

/// Read a template file from disk.
fn load_template(dir: &str, filename: &str) -> Result<String, AdvisorError> {
    let path = format!("{dir}/{filename}");
    std::fs::read_to_string(&path)
        .map_err(|e| AdvisorError::Template(format!("failed to read {path}: {e}")))
}
