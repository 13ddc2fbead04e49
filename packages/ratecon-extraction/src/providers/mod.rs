//! Provider implementations of the generation traits.

#[cfg(feature = "gemini")]
pub mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiModel, GeminiResolver, PREFERRED_MODELS};
