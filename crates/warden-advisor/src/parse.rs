//! LLM response parsing into typed advice.
//!
//! The LLM returns raw text (ideally JSON). This module extracts a goal
//! name and justification from it, with recovery strategies for the
//! usual model formatting slips. Unrecoverable responses surface as a
//! parse error; the advisor converts that into a fallback proposal.

use crate::error::AdvisorError;

/// The parsed advice from an LLM response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ParsedAdvice {
    /// The goal name the advisor recommends.
    pub goal: String,
    /// The advisor's reasoning.
    #[serde(default)]
    pub justification: String,
}

/// Parse an LLM response string into [`ParsedAdvice`].
///
/// Attempts multiple recovery strategies if the raw text is not clean
/// JSON:
/// 1. Direct `serde_json` deserialization
/// 2. Extract JSON from markdown code blocks
/// 3. Strip trailing commas and retry
/// 4. Code-block extraction combined with comma stripping
///
/// # Errors
///
/// Returns [`AdvisorError::Parse`] when every strategy fails or the
/// parsed goal name is empty.
pub fn parse_advice(raw: &str) -> Result<ParsedAdvice, AdvisorError> {
    let trimmed = raw.trim();

    let parsed = try_strategies(trimmed)
        .ok_or_else(|| AdvisorError::Parse(format!("all parse strategies failed for: {trimmed}")))?;

    if parsed.goal.trim().is_empty() {
        return Err(AdvisorError::Parse("advice names no goal".to_owned()));
    }
    Ok(parsed)
}

fn try_strategies(trimmed: &str) -> Option<ParsedAdvice> {
    if let Ok(parsed) = serde_json::from_str::<ParsedAdvice>(trimmed) {
        return Some(parsed);
    }

    if let Some(json_str) = extract_json_from_codeblock(trimmed)
        && let Ok(parsed) = serde_json::from_str::<ParsedAdvice>(json_str)
    {
        return Some(parsed);
    }

    let cleaned = strip_trailing_commas(trimmed);
    if let Ok(parsed) = serde_json::from_str::<ParsedAdvice>(&cleaned) {
        return Some(parsed);
    }

    if let Some(json_str) = extract_json_from_codeblock(trimmed) {
        let cleaned_inner = strip_trailing_commas(json_str);
        if let Ok(parsed) = serde_json::from_str::<ParsedAdvice>(&cleaned_inner) {
            return Some(parsed);
        }
    }

    None
}

/// Extract JSON from a markdown code block.
fn extract_json_from_codeblock(text: &str) -> Option<&str> {
    let start = text
        .find("```json")
        .map(|i| {
            let after_tag = i.checked_add(7).unwrap_or(i);
            text.get(after_tag..)
                .and_then(|s| s.find('\n'))
                .and_then(|nl| after_tag.checked_add(nl))
                .and_then(|pos| pos.checked_add(1))
                .unwrap_or(after_tag)
        })
        .or_else(|| {
            text.find("```").map(|i| {
                let after_tag = i.checked_add(3).unwrap_or(i);
                text.get(after_tag..)
                    .and_then(|s| s.find('\n'))
                    .and_then(|nl| after_tag.checked_add(nl))
                    .and_then(|pos| pos.checked_add(1))
                    .unwrap_or(after_tag)
            })
        });

    let start = start?;
    let remaining = text.get(start..)?;
    let end = remaining.find("```")?;
    remaining.get(..end).map(str::trim)
}

/// Strip trailing commas before closing braces and brackets (common LLM
/// error).
fn strip_trailing_commas(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    let mut i = 0;
    while i < len {
        let c = chars.get(i).copied().unwrap_or(' ');
        if c == ',' {
            let mut j = i.checked_add(1).unwrap_or(i);
            while j < len && chars.get(j).copied().unwrap_or(' ').is_whitespace() {
                j = j.checked_add(1).unwrap_or(j);
            }
            let next = chars.get(j).copied().unwrap_or(' ');
            if next == '}' || next == ']' {
                i = i.checked_add(1).unwrap_or(i);
                continue;
            }
        }
        result.push(c);
        i = i.checked_add(1).unwrap_or(len);
    }

    result
}
