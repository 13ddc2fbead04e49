//! Model output parsing and repair.
//!
//! Models asked for "ONLY valid JSON" still wrap it in Markdown fences or
//! prose often enough that parsing runs in layers: strip fences, try a
//! direct parse, then fall back to pulling a `{…}` span out of the text.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ExtractionError;
use crate::types::LoadRecord;

/// Parse a model response into a field record.
///
/// Returns [`ExtractionError::MalformedModelOutput`] when neither the
/// cleaned text nor the recovered span is a JSON object.
pub fn parse_model_output(response: &str) -> Result<LoadRecord, ExtractionError> {
    let cleaned = strip_code_fences(response);

    let direct_err = match serde_json::from_str::<LoadRecord>(cleaned) {
        Ok(record) => return Ok(record),
        Err(e) => e,
    };

    tracing::debug!(error = %direct_err, "direct JSON parse failed, attempting span recovery");

    if let Some(span) = json_object_span(response) {
        if let Ok(record) = serde_json::from_str::<LoadRecord>(span) {
            return Ok(record);
        }
    }

    Err(ExtractionError::MalformedModelOutput(direct_err.to_string()))
}

/// Strip a Markdown code fence (with or without a `json` tag) wrapping
/// the response.
pub fn strip_code_fences(response: &str) -> &str {
    let mut text = response.trim();
    if let Some(rest) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    {
        text = rest.trim_start();
        if let Some(rest) = text.strip_suffix("```") {
            text = rest.trim_end();
        }
    }
    text
}

/// Best-effort `{…}` span extraction: everything from the first `{` to the
/// last `}`. Known-fragile when the response holds several JSON fragments
/// or stray braces in prose; kept as-is because a failed re-parse just
/// surfaces as malformed output.
fn json_object_span(response: &str) -> Option<&str> {
    static SPAN: OnceLock<Regex> = OnceLock::new();
    let re = SPAN.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("span regex"));
    re.find(response).map(|m| m.as_str())
}
