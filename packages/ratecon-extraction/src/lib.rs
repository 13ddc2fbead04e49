//! Rate Confirmation Extraction Library
//!
//! Extracts structured freight data (broker, carrier, rate, distance,
//! addresses) from rate confirmation document text through a layered
//! strategy chain: AI extraction with credential rotation, then regex
//! fallback, then a static sample record. The caller always gets a fully
//! populated canonical record; degraded extraction shows up as sentinel
//! values, never as an error.
//!
//! # Design Philosophy
//!
//! - Strategies are an explicit ordered chain, not exception control flow
//! - The credential pool is constructed and injected, never a global
//! - Sentinel strings ("Not found", "n/a") exist only at the boundary;
//!   inside the pipeline every field is a tagged [`FieldValue`]
//! - The provider sits behind traits so tests never touch the network
//!
//! # Usage
//!
//! ```rust,ignore
//! use ratecon_extraction::{
//!     ExtractionRequest, KeyPool, Orchestrator, PipelineConfig, PoolConfig,
//! };
//! use ratecon_extraction::providers::{GeminiModel, GeminiResolver};
//! use gemini_client::GeminiClient;
//!
//! let config = PipelineConfig::from_env();
//! let pool = KeyPool::new(config.api_keys.clone(), config.pool.clone());
//!
//! let client = GeminiClient::new();
//! let orchestrator = Orchestrator::standard_with_config(
//!     GeminiModel::new(client.clone()),
//!     GeminiResolver::new(client),
//!     pool.clone(),
//!     &config,
//! );
//!
//! let request = ExtractionRequest::new(document_text).with_deadhead(50.0);
//! let record = orchestrator.extract(&request).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Provider abstractions (GenerativeModel, ModelResolver, TextSource)
//! - [`types`] - Field values, records, requests
//! - [`pool`] - Credential pool with rotation and cool-downs
//! - [`pipeline`] - Orchestration, prompts, parsing, rate math, normalization
//! - [`extractors`] - The strategy chain implementations
//! - [`testing`] - Mock implementations for testing

pub mod config;
pub mod error;
pub mod extractors;
pub mod keys;
pub mod pipeline;
pub mod pool;
pub mod providers;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use config::PipelineConfig;
pub use error::{ExtractionError, Result};
pub use keys::ApiKey;
pub use pool::{CredentialId, CredentialLease, CredentialSnapshot, CredentialStatus, KeyPool, PoolConfig};
pub use traits::{Generation, GenerativeModel, ModelResolver, ProviderError, TextSource};
pub use types::{ExtractionRequest, FieldValue, LoadRecord, REQUIRED_FIELDS};

// Re-export pipeline components
pub use pipeline::{
    apply_rate_math, format_extract_prompt, normalize, parse_model_output, Orchestrator,
    PROMPT_CHAR_BUDGET,
};

// Re-export strategies
pub use extractors::{AiExtractor, Extractor, PatternExtractor, StaticFallbackExtractor};

// Re-export testing utilities
pub use testing::{MockModel, MockResolver, MockTextSource};
