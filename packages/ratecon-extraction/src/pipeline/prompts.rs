//! LLM prompt for structured rate confirmation extraction.

/// Character budget for document text inside the prompt. Keeps the call
/// inside the lightweight models' input limits.
pub const PROMPT_CHAR_BUDGET: usize = 12_000;

/// Prompt asking the model for the fixed JSON schema, nothing else.
pub const EXTRACT_PROMPT: &str = r#"**INSTRUCTION**: Analyze this Rate Confirmation document and extract structured JSON data.

**REQUIRED JSON STRUCTURE**:
{
  "broker_name": "string",
  "carrier_name": "string",
  "load_number": "string",
  "pickup_number": "string",
  "rate": "number",
  "distance": "number",
  "pickup_address": "string",
  "pickup_time": "string",
  "delivery_address": "string",
  "delivery_time": "string",
  "commodity": "string",
  "weight": "number",
  "equipment": "string",
  "notes": "string"
}

**CALCULATION RULES**:
- total_distance = distance + {deadhead}
- rate_per_mile = rate / total_distance (rounded to 2 decimals)
- Add these calculated fields to the JSON

**IMPORTANT**:
- Return ONLY valid JSON, no other text
- Use "Not found" for missing information
- Keep numeric values as numbers (not strings)

**RATE CONFIRMATION TEXT**:
{text}

**JSON OUTPUT**:"#;

/// Format the extraction prompt, truncating the document to the
/// character budget.
pub fn format_extract_prompt(text: &str, deadhead: f64) -> String {
    EXTRACT_PROMPT
        .replacen("{deadhead}", &format_miles(deadhead), 1)
        .replacen("{text}", truncate_chars(text, PROMPT_CHAR_BUDGET), 1)
}

/// Deadhead renders as an integer when whole, so the prompt reads like
/// dispatch notes rather than "50.0".
fn format_miles(miles: f64) -> String {
    if miles.fract() == 0.0 {
        format!("{}", miles as i64)
    } else {
        format!("{miles}")
    }
}

/// Truncate to at most `max_chars` characters, respecting char boundaries.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
