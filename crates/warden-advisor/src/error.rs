//! Error types for the advisor pipeline.
//!
//! Uses `thiserror` for typed errors spanning template rendering, HTTP
//! backend calls, and response parsing. Everything except the
//! construction-time [`Config`] variant is recovered inside the advisor
//! and surfaced to the arbiter as a fallback proposal.
//!
//! [`Config`]: AdvisorError::Config

/// Errors that can occur inside the advisor.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    /// Failed to load or render a prompt template.
    #[error("template error: {0}")]
    Template(String),

    /// The LLM backend returned an error or was unreachable.
    #[error("LLM backend error: {0}")]
    Backend(String),

    /// The LLM response could not be parsed into advice.
    #[error("response parse error: {0}")]
    Parse(String),

    /// Configuration is invalid or missing. Fatal at construction time.
    #[error("config error: {0}")]
    Config(String),

    /// Serialization or deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
