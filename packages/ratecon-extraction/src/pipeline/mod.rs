//! Extraction pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Strategy chaining (AI → pattern fallback → static record)
//! - Prompt construction with input truncation
//! - Model output parsing and JSON repair
//! - Derived trip economics (total distance, rate per mile)
//! - Canonical record normalization

pub mod normalize;
pub mod orchestrator;
pub mod parse;
pub mod prompts;
pub mod rates;

pub use normalize::normalize;
pub use orchestrator::Orchestrator;
pub use parse::{parse_model_output, strip_code_fences};
pub use prompts::{format_extract_prompt, truncate_chars, EXTRACT_PROMPT, PROMPT_CHAR_BUDGET};
pub use rates::apply_rate_math;
