//! AI extraction strategy.
//!
//! Drives the generative model through the credential pool: acquire a key,
//! call, classify the failure, report it, and rotate to another key until
//! the attempt budget runs out. Parsing failures don't retry: a second
//! call with the same prompt is no more likely to produce valid JSON.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::Extractor;
use crate::error::{ExtractionError, Result};
use crate::pipeline::parse::parse_model_output;
use crate::pipeline::prompts::format_extract_prompt;
use crate::pipeline::rates::apply_rate_math;
use crate::pool::KeyPool;
use crate::traits::{GenerativeModel, ModelResolver, ProviderError};
use crate::types::{ExtractionRequest, LoadRecord};

/// Model used when discovery fails or nothing suitable is listed.
pub const DEFAULT_MODEL: &str = "models/gemini-2.0-flash-lite";

/// How many credential leases one extraction may burn.
const MAX_ATTEMPTS: u32 = 3;

/// Rejections (bad key, bad request) get one retry on a fresh credential;
/// a second rejection fails the strategy.
const MAX_REJECTED_RETRIES: u32 = 1;

/// Model-backed strategy.
pub struct AiExtractor<M, R> {
    model: M,
    resolver: R,
    pool: Arc<KeyPool>,
    default_model: String,
    max_attempts: u32,
    resolved_model: OnceCell<String>,
}

impl<M, R> AiExtractor<M, R>
where
    M: GenerativeModel,
    R: ModelResolver,
{
    pub fn new(model: M, resolver: R, pool: Arc<KeyPool>) -> Self {
        Self {
            model,
            resolver,
            pool,
            default_model: DEFAULT_MODEL.to_string(),
            max_attempts: MAX_ATTEMPTS,
            resolved_model: OnceCell::new(),
        }
    }

    /// Override the fallback model id.
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Override the credential attempt budget.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Discover the model id once and pin it for the extractor's lifetime.
    async fn model_id(&self, api_key: &str) -> &str {
        self.resolved_model
            .get_or_init(|| async {
                match self.resolver.resolve(api_key).await {
                    Some(id) => {
                        tracing::info!(model = %id, "resolved generation model");
                        id
                    }
                    None => {
                        tracing::info!(model = %self.default_model, "model discovery failed, using default");
                        self.default_model.clone()
                    }
                }
            })
            .await
    }
}

#[async_trait]
impl<M, R> Extractor for AiExtractor<M, R>
where
    M: GenerativeModel,
    R: ModelResolver,
{
    fn name(&self) -> &'static str {
        "ai"
    }

    async fn extract(&self, request: &ExtractionRequest) -> Result<LoadRecord> {
        if request.text.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }

        let prompt = format_extract_prompt(&request.text, request.deadhead);
        let mut rejected_retries = 0u32;

        for attempt in 1..=self.max_attempts {
            let lease = self.pool.acquire()?;
            let model_id = self.model_id(lease.key.expose()).await.to_string();

            match self
                .model
                .generate(&model_id, &prompt, lease.key.expose())
                .await
            {
                Ok(generation) => {
                    let mut record = parse_model_output(&generation.text)?;
                    self.pool.report_success(lease.id, generation.tokens_used);
                    apply_rate_math(&mut record, request.deadhead);
                    return Ok(record);
                }
                Err(ProviderError::RateLimited) => {
                    tracing::warn!(key = %lease.key, attempt, "provider rate limited, rotating credential");
                    self.pool.report_rate_limited(lease.id);
                }
                Err(err @ (ProviderError::PermissionDenied(_) | ProviderError::InvalidArgument(_))) => {
                    let message = err.to_string();
                    self.pool.report_error(lease.id, &message);
                    if rejected_retries >= MAX_REJECTED_RETRIES {
                        return Err(ExtractionError::ProviderRejected(message));
                    }
                    rejected_retries += 1;
                    tracing::warn!(key = %lease.key, attempt, error = %message, "request rejected, retrying once with another credential");
                }
                Err(ProviderError::Transient(message)) => {
                    self.pool.report_error(lease.id, &message);
                    tracing::warn!(key = %lease.key, attempt, error = %message, "transient provider error, rotating credential");
                }
            }
        }

        Err(ExtractionError::RetriesExhausted {
            attempts: self.max_attempts,
        })
    }
}
