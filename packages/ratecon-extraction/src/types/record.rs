//! Extracted load records.

use indexmap::IndexMap;

use super::field::FieldValue;

/// An extraction result: field name to value, in insertion order.
///
/// Strategies produce these with whatever keys they managed to fill; the
/// normalizer guarantees the canonical key set on the way out.
pub type LoadRecord = IndexMap<String, FieldValue>;

/// Every field a normalized record must carry, in output order.
pub const REQUIRED_FIELDS: &[&str] = &[
    "broker_name",
    "carrier_name",
    "load_number",
    "pickup_number",
    "rate",
    "distance",
    "pickup_address",
    "pickup_time",
    "delivery_address",
    "delivery_time",
    "commodity",
    "weight",
    "equipment",
    "notes",
    "total_distance",
    "rate_per_mile",
    "deadhead",
];

/// The derived subset of [`REQUIRED_FIELDS`], computed from rate and
/// distance rather than read from the document.
pub const DERIVED_FIELDS: &[&str] = &["total_distance", "rate_per_mile", "deadhead"];

/// Build a record from `(name, value)` pairs.
pub fn record_from_pairs<I, K, V>(pairs: I) -> LoadRecord
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<FieldValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_include_derived() {
        for field in DERIVED_FIELDS {
            assert!(REQUIRED_FIELDS.contains(field), "missing {field}");
        }
    }

    #[test]
    fn test_record_from_pairs_preserves_order() {
        let record = record_from_pairs([
            ("load_number", FieldValue::Text("L-100".into())),
            ("rate", FieldValue::Number(1500.0)),
        ]);
        let keys: Vec<_> = record.keys().cloned().collect();
        assert_eq!(keys, vec!["load_number", "rate"]);
    }
}
