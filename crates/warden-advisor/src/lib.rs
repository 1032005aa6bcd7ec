//! LLM-backed strategic advisor for the Warden guardian agent.
//!
//! The advisor turns the arbiter's context into a prompt, sends it to an
//! external LLM backend, and parses the reply into a goal proposal. All
//! failure modes are absorbed at this boundary: the arbiter always gets
//! a proposal, falling back to the standing preparation goal when the
//! service cannot answer.
//!
//! # Modules
//!
//! - [`advisor`] -- the [`LlmAdvisor`] implementing the core's `Advisor` trait
//! - [`llm`] -- HTTP backends (Gemini, `OpenAI`-compatible)
//! - [`prompt`] -- `minijinja` template loading and rendering
//! - [`parse`] -- response parsing with recovery strategies
//! - [`error`] -- the advisor error taxonomy

pub mod advisor;
pub mod error;
pub mod llm;
pub mod parse;
pub mod prompt;

pub use advisor::LlmAdvisor;
pub use error::AdvisorError;
pub use parse::{parse_advice, ParsedAdvice};
pub use prompt::{PromptEngine, RenderedPrompt};
