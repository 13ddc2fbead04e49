//! Tagged per-field values.
//!
//! Extracted fields are numbers, free text, or one of two sentinels. The
//! sentinel strings ("Not found", "n/a") only exist at the serialization
//! boundary; inside the pipeline every field is a [`FieldValue`].

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Sentinel emitted for fields the document did not yield.
pub const NOT_FOUND: &str = "Not found";

/// Sentinel emitted for derived fields that could not be computed.
pub const NOT_APPLICABLE: &str = "n/a";

/// A single extracted field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Numeric value (rate, distance, weight, derived fields)
    Number(f64),

    /// Free-text value
    Text(String),

    /// The field was not present in the document
    NotFound,

    /// The value could not be computed (failed derivation)
    NotApplicable,
}

impl FieldValue {
    /// Build from text, folding the sentinel strings back into their
    /// variants.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        match text.trim() {
            t if t.eq_ignore_ascii_case(NOT_FOUND) => Self::NotFound,
            t if t.eq_ignore_ascii_case(NOT_APPLICABLE) => Self::NotApplicable,
            _ => Self::Text(text),
        }
    }

    /// Lenient conversion from model-emitted JSON.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::NotFound,
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => Self::Number(f),
                None => Self::NotFound,
            },
            serde_json::Value::String(s) => Self::from_text(s),
            serde_json::Value::Bool(b) => Self::Text(b.to_string()),
            other => Self::Text(other.to_string()),
        }
    }

    /// Numeric reading of the field.
    ///
    /// Text values tolerate thousands separators and a leading dollar sign
    /// ("$2,000" parses as 2000.0). Sentinels have no numeric reading.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => parse_numeric(s),
            Self::NotFound | Self::NotApplicable => None,
        }
    }

    /// Whether this is the `NotFound` sentinel.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Text reading of the field, if it carries any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Text(s) => serializer.serialize_str(s),
            Self::NotFound => serializer.serialize_str(NOT_FOUND),
            Self::NotApplicable => serializer.serialize_str(NOT_APPLICABLE),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_json(value))
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

fn parse_numeric(s: &str) -> Option<f64> {
    let cleaned = s.trim().trim_start_matches('$').replace(',', "");
    cleaned.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_round_trip() {
        assert_eq!(FieldValue::from_text("Not found"), FieldValue::NotFound);
        assert_eq!(FieldValue::from_text("n/a"), FieldValue::NotApplicable);
        assert_eq!(
            serde_json::to_value(FieldValue::NotFound).unwrap(),
            serde_json::json!("Not found")
        );
        assert_eq!(
            serde_json::to_value(FieldValue::NotApplicable).unwrap(),
            serde_json::json!("n/a")
        );
    }

    #[test]
    fn test_from_json_null_is_not_found() {
        assert_eq!(
            FieldValue::from_json(serde_json::Value::Null),
            FieldValue::NotFound
        );
    }

    #[test]
    fn test_numeric_reading() {
        assert_eq!(FieldValue::Number(2000.0).as_f64(), Some(2000.0));
        assert_eq!(FieldValue::Text("2000".into()).as_f64(), Some(2000.0));
        assert_eq!(FieldValue::Text("$2,000.50".into()).as_f64(), Some(2000.5));
        assert_eq!(FieldValue::Text("400 miles".into()).as_f64(), None);
        assert_eq!(FieldValue::NotFound.as_f64(), None);
        assert_eq!(FieldValue::NotApplicable.as_f64(), None);
    }

    #[test]
    fn test_deserialize_from_model_output() {
        let v: FieldValue = serde_json::from_str("1250.5").unwrap();
        assert_eq!(v, FieldValue::Number(1250.5));

        let v: FieldValue = serde_json::from_str(r#""Dry Van""#).unwrap();
        assert_eq!(v, FieldValue::Text("Dry Van".into()));

        let v: FieldValue = serde_json::from_str(r#""Not found""#).unwrap();
        assert_eq!(v, FieldValue::NotFound);
    }
}
