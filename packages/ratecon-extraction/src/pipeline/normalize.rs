//! Canonical record construction.
//!
//! Whatever a strategy managed to fill, the caller always receives exactly
//! the required key set plus the driving-directions link.

use crate::types::{FieldValue, LoadRecord, REQUIRED_FIELDS};

const MAPS_LINK_FIELD: &str = "google_maps_link";

/// Normalize a raw extraction into the canonical field set.
///
/// Every required field is present (sentinel `"Not found"` when the
/// strategy produced nothing for it), extra keys are dropped, and
/// `google_maps_link` is appended (empty string when either address is
/// missing).
pub fn normalize(raw: &LoadRecord) -> LoadRecord {
    let mut canonical = LoadRecord::with_capacity(REQUIRED_FIELDS.len() + 1);

    for &field in REQUIRED_FIELDS {
        let value = raw.get(field).cloned().unwrap_or(FieldValue::NotFound);
        canonical.insert(field.to_string(), value);
    }

    let link = maps_link(raw).unwrap_or_default();
    canonical.insert(MAPS_LINK_FIELD.to_string(), FieldValue::Text(link));

    canonical
}

/// Driving-directions URL from pickup to delivery, when both addresses
/// were extracted.
fn maps_link(record: &LoadRecord) -> Option<String> {
    let pickup = address_text(record, "pickup_address")?;
    let delivery = address_text(record, "delivery_address")?;

    Some(format!(
        "https://www.google.com/maps/dir/?api=1&origin={}&destination={}&travelmode=driving&avoid=tolls",
        clean_address(pickup),
        clean_address(delivery),
    ))
}

fn address_text<'a>(record: &'a LoadRecord, field: &str) -> Option<&'a str> {
    record
        .get(field)
        .and_then(FieldValue::as_text)
        .filter(|s| !s.trim().is_empty())
}

/// Address formatting for the maps URL: spaces become `+`, commas vanish.
fn clean_address(address: &str) -> String {
    address.replace(' ', "+").replace(',', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record_from_pairs;

    #[test]
    fn test_exact_field_set_regardless_of_input() {
        let raw = record_from_pairs([
            ("rate", FieldValue::Number(1500.0)),
            ("surprise_key", FieldValue::Text("dropped".into())),
        ]);

        let canonical = normalize(&raw);

        let mut expected: Vec<&str> = REQUIRED_FIELDS.to_vec();
        expected.push("google_maps_link");
        let keys: Vec<_> = canonical.keys().map(String::as_str).collect();
        assert_eq!(keys, expected);
        assert_eq!(canonical["broker_name"], FieldValue::NotFound);
        assert!(!canonical.contains_key("surprise_key"));
    }

    #[test]
    fn test_maps_link_construction() {
        let raw = record_from_pairs([
            ("pickup_address", "123 Main St, Chicago"),
            ("delivery_address", "456 Oak St, Atlanta"),
        ]);

        let canonical = normalize(&raw);
        let link = canonical["google_maps_link"].as_text().unwrap();

        assert!(link.contains("origin=123+Main+St+Chicago"));
        assert!(link.contains("destination=456+Oak+St+Atlanta"));
        assert!(!link.contains(','));
        assert!(link.starts_with("https://www.google.com/maps/dir/?api=1"));
    }

    #[test]
    fn test_missing_address_means_empty_link() {
        let raw = record_from_pairs([("pickup_address", "123 Main St, Chicago")]);
        let canonical = normalize(&raw);
        assert_eq!(canonical["google_maps_link"], FieldValue::Text(String::new()));
    }

    #[test]
    fn test_not_found_address_means_empty_link() {
        let mut raw = record_from_pairs([("pickup_address", "123 Main St")]);
        raw.insert("delivery_address".to_string(), FieldValue::NotFound);
        let canonical = normalize(&raw);
        assert_eq!(canonical["google_maps_link"], FieldValue::Text(String::new()));
    }
}
