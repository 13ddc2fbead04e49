//! Strategy chain orchestration.
//!
//! Strategies run in priority order, each at most once per request.
//! Retries live *inside* a strategy (the AI extractor rotates credentials);
//! out here a failure only ever means "next".

use std::sync::Arc;

use super::normalize::normalize;
use crate::config::PipelineConfig;
use crate::error::{ExtractionError, Result};
use crate::extractors::{AiExtractor, Extractor, PatternExtractor, StaticFallbackExtractor};
use crate::pool::KeyPool;
use crate::traits::{GenerativeModel, ModelResolver};
use crate::types::{ExtractionRequest, LoadRecord};

/// Ordered extraction chain.
///
/// The first strategy to produce a record wins; its output is normalized
/// into the canonical field set. With the standard chain the static
/// fallback makes the pipeline total, so callers only see
/// [`ExtractionError::AllStrategiesFailed`] if a custom chain leaves the
/// terminal strategy out.
pub struct Orchestrator {
    strategies: Vec<Box<dyn Extractor>>,
}

impl Orchestrator {
    /// Empty chain; add strategies in priority order.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// The standard chain: AI, then pattern matching, then the static
    /// sample record.
    pub fn standard<M, R>(model: M, resolver: R, pool: Arc<KeyPool>) -> Self
    where
        M: GenerativeModel + 'static,
        R: ModelResolver + 'static,
    {
        Self::new()
            .with_strategy(AiExtractor::new(model, resolver, pool))
            .with_strategy(PatternExtractor::new())
            .with_strategy(StaticFallbackExtractor::new())
    }

    /// The standard chain tuned by a [`PipelineConfig`]: the AI strategy
    /// gets the configured attempt budget, and a host-pinned model id
    /// takes the place of the built-in discovery fallback.
    pub fn standard_with_config<M, R>(
        model: M,
        resolver: R,
        pool: Arc<KeyPool>,
        config: &PipelineConfig,
    ) -> Self
    where
        M: GenerativeModel + 'static,
        R: ModelResolver + 'static,
    {
        let mut ai =
            AiExtractor::new(model, resolver, pool).with_max_attempts(config.max_attempts);
        if let Some(model_id) = &config.preferred_model {
            ai = ai.with_default_model(model_id.clone());
        }
        Self::new()
            .with_strategy(ai)
            .with_strategy(PatternExtractor::new())
            .with_strategy(StaticFallbackExtractor::new())
    }

    /// Append a strategy to the chain.
    pub fn with_strategy(mut self, strategy: impl Extractor + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Run the chain and normalize the winning record.
    pub async fn extract(&self, request: &ExtractionRequest) -> Result<LoadRecord> {
        for strategy in &self.strategies {
            match strategy.extract(request).await {
                Ok(record) => {
                    tracing::info!(strategy = strategy.name(), "extraction succeeded");
                    return Ok(normalize(&record));
                }
                Err(err) => {
                    tracing::warn!(
                        strategy = strategy.name(),
                        error = %err,
                        "strategy failed, falling through"
                    );
                }
            }
        }

        Err(ExtractionError::AllStrategiesFailed)
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct AlwaysFails;

    #[async_trait]
    impl Extractor for AlwaysFails {
        fn name(&self) -> &'static str {
            "always-fails"
        }

        async fn extract(&self, _request: &ExtractionRequest) -> Result<LoadRecord> {
            Err(ExtractionError::EmptyInput)
        }
    }

    #[tokio::test]
    async fn test_falls_through_to_next_strategy() {
        let orchestrator = Orchestrator::new()
            .with_strategy(AlwaysFails)
            .with_strategy(StaticFallbackExtractor::new());

        let record = orchestrator
            .extract(&ExtractionRequest::new("whatever"))
            .await
            .unwrap();
        assert_eq!(
            record["load_number"],
            crate::types::FieldValue::Text("SAMPLE-0000".into())
        );
    }

    #[tokio::test]
    async fn test_empty_chain_fails_terminally() {
        let orchestrator = Orchestrator::new();
        let err = orchestrator
            .extract(&ExtractionRequest::new("whatever"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::AllStrategiesFailed));
    }

    #[tokio::test]
    async fn test_config_pins_fallback_model() {
        let model = crate::testing::MockModel::new()
            .with_default_response(r#"{"rate": 100, "distance": 50}"#);
        let config = PipelineConfig::new()
            .with_api_keys(["k1"])
            .with_preferred_model("models/pinned-lite");
        let pool = KeyPool::new(config.api_keys.clone(), config.pool.clone());

        let orchestrator = Orchestrator::standard_with_config(
            model.clone(),
            crate::testing::MockResolver::unavailable(),
            pool,
            &config,
        );

        orchestrator
            .extract(&ExtractionRequest::new("doc"))
            .await
            .unwrap();
        assert_eq!(model.calls()[0].model, "models/pinned-lite");
    }

    #[tokio::test]
    async fn test_winning_record_is_normalized() {
        let orchestrator = Orchestrator::new().with_strategy(StaticFallbackExtractor::new());
        let record = orchestrator
            .extract(&ExtractionRequest::new("whatever"))
            .await
            .unwrap();
        assert!(record.contains_key("google_maps_link"));
        assert!(record.contains_key("pickup_time"));
    }
}
