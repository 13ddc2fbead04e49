//! Data types for rate confirmation extraction.

pub mod field;
pub mod record;
pub mod request;

pub use field::FieldValue;
pub use record::{record_from_pairs, LoadRecord, DERIVED_FIELDS, REQUIRED_FIELDS};
pub use request::ExtractionRequest;
