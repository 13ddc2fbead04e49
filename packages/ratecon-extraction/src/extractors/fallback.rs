//! Static fallback strategy.
//!
//! The last link in the chain: a fixed, obviously fabricated record so the
//! caller always gets a fully populated response even when both the model
//! and the pattern matcher came up empty. Degraded quality shows up as
//! sample values and sentinels, never as a missing field.

use async_trait::async_trait;

use super::Extractor;
use crate::error::Result;
use crate::pipeline::rates::apply_rate_math;
use crate::types::{record_from_pairs, ExtractionRequest, FieldValue, LoadRecord};

/// Build the canned sample record, with trip economics derived from its
/// own rate and distance.
pub fn sample_record(deadhead: f64) -> LoadRecord {
    let mut record = record_from_pairs([
        ("broker_name", FieldValue::Text("SAMPLE BROKER LLC, (555) 010-0000, dispatch@samplebroker.example".into())),
        ("carrier_name", FieldValue::Text("SAMPLE CARRIER INC, MC-000000".into())),
        ("load_number", FieldValue::Text("SAMPLE-0000".into())),
        ("pickup_number", FieldValue::Text("PU-0000".into())),
        ("rate", FieldValue::Number(1000.0)),
        ("distance", FieldValue::Number(500.0)),
        ("pickup_address", FieldValue::Text("100 Sample Warehouse Rd, Springfield, IL 62701".into())),
        ("pickup_time", FieldValue::Text("01/01 08:00-16:00 FCFS".into())),
        ("delivery_address", FieldValue::Text("200 Placeholder Ave, Columbus, OH 43004".into())),
        ("delivery_time", FieldValue::Text("01/02 09:00 Appointment".into())),
        ("commodity", FieldValue::Text("General freight (sample)".into())),
        ("weight", FieldValue::Number(40_000.0)),
        ("equipment", FieldValue::Text("Dry Van 53'".into())),
        ("notes", FieldValue::Text("Sample data: the document could not be parsed automatically".into())),
    ]);
    apply_rate_math(&mut record, deadhead);
    record
}

/// Strategy returning [`sample_record`]. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFallbackExtractor;

impl StaticFallbackExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Extractor for StaticFallbackExtractor {
    fn name(&self) -> &'static str {
        "static-fallback"
    }

    async fn extract(&self, request: &ExtractionRequest) -> Result<LoadRecord> {
        tracing::warn!("serving static sample record");
        Ok(sample_record(request.deadhead))
    }
}
