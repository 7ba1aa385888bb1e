//! Gemini reply parser — unwraps the provider envelope and extracts the
//! coaching sections with an independent fallback for everything optional.
//!
//! The provider wraps its payload twice: the HTTP body is a JSON envelope
//! whose `candidates[0].content.parts[0].text` string is itself a second
//! JSON document, sometimes inside markdown code fences. Both layers are
//! unwrapped explicitly here.

use serde_json::Value;
use thiserror::Error;

/// Analysis keys and their narrative labels, in emission order.
/// Adding an extractable section is a one-line entry here.
const ANALYSIS_SECTIONS: &[(&str, &str)] = &[
    ("overall", "OverAll: "),
    ("pace", "Pace: "),
    ("heartRate", "Heart Rate: "),
    ("caloriesBurned", "Calories: "),
];

pub const NO_IMPROVEMENTS_FALLBACK: &str = "No specific improvements provided";
pub const NO_SUGGESTIONS_FALLBACK: &str = "No specific Suggestions provided";
pub const NO_SAFETY_FALLBACK: &str = "Follow general safety protocols";

/// A failed decode of the provider reply. Carried for logging only — the
/// assembler collapses every variant into the same fallback decision.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed response envelope: {0}")]
    Envelope(serde_json::Error),

    #[error("response envelope has no candidate text")]
    MissingText,

    #[error("malformed coaching payload: {0}")]
    Payload(serde_json::Error),
}

/// Structured result of a successfully decoded coaching reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSections {
    /// Concatenated labeled analysis sections, trimmed. Empty when the
    /// model supplied no analysis at all — still a valid result.
    pub narrative: String,
    pub improvements: Vec<String>,
    pub suggestions: Vec<String>,
    pub safety: Vec<String>,
}

/// Decodes a raw Gemini response body into [`ParsedSections`].
///
/// Only the two JSON parses and the candidate-text lookup can fail; every
/// sub-field of the payload degrades to its fallback independently, so a
/// partial reply still yields usable sections.
pub fn parse_coach_reply(raw: &str) -> Result<ParsedSections, ParseError> {
    let envelope: Value = serde_json::from_str(raw).map_err(ParseError::Envelope)?;

    // Permissive walk: any missing path segment lands on None, only the
    // final string extraction hard-fails.
    let text = envelope
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingText)?;

    let payload: Value =
        serde_json::from_str(strip_code_fences(text)).map_err(ParseError::Payload)?;

    Ok(ParsedSections {
        narrative: build_narrative(payload.get("analysis")),
        improvements: extract_labeled_list(
            payload.get("improvements"),
            "area",
            "recommendation",
            NO_IMPROVEMENTS_FALLBACK,
        ),
        suggestions: extract_labeled_list(
            payload.get("suggestions"),
            "workout",
            "description",
            NO_SUGGESTIONS_FALLBACK,
        ),
        safety: extract_string_list(payload.get("safety"), NO_SAFETY_FALLBACK),
    })
}

/// Strips the ```json ... ``` fences some replies wrap the payload in.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix("```json\n").unwrap_or(text);
    let text = text.strip_suffix("\n```").unwrap_or(text);
    text.trim()
}

/// Appends `"<Label>: <value>\n\n"` for each analysis section present,
/// in fixed order. Missing keys are skipped silently.
fn build_narrative(analysis: Option<&Value>) -> String {
    let mut narrative = String::new();
    if let Some(analysis) = analysis {
        for &(key, label) in ANALYSIS_SECTIONS {
            if let Some(section) = analysis.get(key).and_then(Value::as_str) {
                narrative.push_str(label);
                narrative.push_str(section);
                narrative.push_str("\n\n");
            }
        }
    }
    narrative.trim().to_string()
}

/// Formats each `{left, right}` object as `"<left>: <right>"`. A missing
/// side renders as an empty string; items carrying neither field are
/// dropped. The fallback replaces an absent, non-array or empty list.
fn extract_labeled_list(
    node: Option<&Value>,
    left: &str,
    right: &str,
    fallback: &str,
) -> Vec<String> {
    let mut items = Vec::new();
    if let Some(Value::Array(entries)) = node {
        for entry in entries {
            let l = entry.get(left).and_then(Value::as_str).unwrap_or_default();
            let r = entry.get(right).and_then(Value::as_str).unwrap_or_default();
            if l.is_empty() && r.is_empty() {
                continue;
            }
            items.push(format!("{l}: {r}"));
        }
    }
    if items.is_empty() {
        vec![fallback.to_string()]
    } else {
        items
    }
}

fn extract_string_list(node: Option<&Value>, fallback: &str) -> Vec<String> {
    let items: Vec<String> = match node {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    };
    if items.is_empty() {
        vec![fallback.to_string()]
    } else {
        items
    }
}
