//! Derived trip economics, shared by every extraction strategy.

use crate::types::{FieldValue, LoadRecord};

/// Compute `total_distance`, `rate_per_mile`, and `deadhead` from the
/// record's `rate` and `distance` fields.
///
/// A missing rate or distance counts as 0 (the document simply didn't
/// state it); a present-but-unparseable value is a failed derivation and
/// both computed fields become "n/a". Division by a zero total distance
/// also yields "n/a". This function never fails.
pub fn apply_rate_math(record: &mut LoadRecord, deadhead: f64) {
    match (numeric_field(record, "rate"), numeric_field(record, "distance")) {
        (Some(rate), Some(distance)) => {
            let total_distance = distance + deadhead;
            record.insert(
                "total_distance".to_string(),
                FieldValue::Number(total_distance),
            );
            let rate_per_mile = if total_distance > 0.0 {
                FieldValue::Number(round2(rate / total_distance))
            } else {
                FieldValue::NotApplicable
            };
            record.insert("rate_per_mile".to_string(), rate_per_mile);
        }
        _ => {
            record.insert("total_distance".to_string(), FieldValue::NotApplicable);
            record.insert("rate_per_mile".to_string(), FieldValue::NotApplicable);
        }
    }
    record.insert("deadhead".to_string(), FieldValue::Number(deadhead));
}

/// Absent keys read as 0; present values must have a numeric reading.
fn numeric_field(record: &LoadRecord, key: &str) -> Option<f64> {
    match record.get(key) {
        None => Some(0.0),
        Some(value) => value.as_f64(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
