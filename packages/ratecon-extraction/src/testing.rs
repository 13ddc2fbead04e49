//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the extraction
//! library without making real AI or network calls.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{ExtractionError, Result};
use crate::traits::{Generation, GenerativeModel, ModelResolver, ProviderError, TextSource};

/// One scripted outcome for a [`MockModel`] call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Return this response text
    Text(String),

    /// Fail with a rate-limit signal
    RateLimited,

    /// Fail with a rejection (bad credential / bad request)
    Rejected(String),

    /// Fail with a transient fault
    Transient(String),
}

/// Record of a call made to the mock model.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub model: String,
    pub api_key: String,
    pub prompt: String,
}

/// A mock generative model with scripted, in-order outcomes.
///
/// Outcomes are consumed front to back; once the script runs dry the
/// default response (when set) answers every further call, otherwise the
/// call fails as transient.
#[derive(Clone, Default)]
pub struct MockModel {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    default_response: Arc<Mutex<Option<String>>>,
    usage_tokens: u32,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockModel {
    /// Create a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Text(text.into()));
        self
    }

    /// Queue a rate-limit failure.
    pub fn with_rate_limit(self) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::RateLimited);
        self
    }

    /// Queue a rejection failure.
    pub fn with_rejection(self, message: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Rejected(message.into()));
        self
    }

    /// Queue a transient failure.
    pub fn with_transient(self, message: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Transient(message.into()));
        self
    }

    /// Response served after the script is exhausted.
    pub fn with_default_response(self, text: impl Into<String>) -> Self {
        *self.default_response.lock().unwrap() = Some(text.into());
        self
    }

    /// Token usage reported with every successful call.
    pub fn with_usage_tokens(mut self, tokens: u32) -> Self {
        self.usage_tokens = tokens;
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        api_key: &str,
    ) -> std::result::Result<Generation, ProviderError> {
        self.calls.lock().unwrap().push(MockCall {
            model: model.to_string(),
            api_key: api_key.to_string(),
            prompt: prompt.to_string(),
        });

        let outcome = self.outcomes.lock().unwrap().pop_front();
        match outcome {
            Some(MockOutcome::Text(text)) => Ok(Generation {
                text,
                tokens_used: self.usage_tokens,
            }),
            Some(MockOutcome::RateLimited) => Err(ProviderError::RateLimited),
            Some(MockOutcome::Rejected(message)) => Err(ProviderError::PermissionDenied(message)),
            Some(MockOutcome::Transient(message)) => Err(ProviderError::Transient(message)),
            None => match self.default_response.lock().unwrap().clone() {
                Some(text) => Ok(Generation {
                    text,
                    tokens_used: self.usage_tokens,
                }),
                None => Err(ProviderError::Transient("mock script exhausted".into())),
            },
        }
    }
}

/// A mock model resolver.
#[derive(Debug, Clone, Default)]
pub struct MockResolver {
    model: Option<String>,
}

impl MockResolver {
    /// Always resolve to the given model id.
    pub fn fixed(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
        }
    }

    /// Simulate failed discovery.
    pub fn unavailable() -> Self {
        Self { model: None }
    }
}

#[async_trait]
impl ModelResolver for MockResolver {
    async fn resolve(&self, _api_key: &str) -> Option<String> {
        self.model.clone()
    }
}

/// A mock document text source keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MockTextSource {
    texts: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl MockTextSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the text returned for a path.
    pub fn with_text(self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.texts.lock().unwrap().insert(path.into(), text.into());
        self
    }
}

#[async_trait]
impl TextSource for MockTextSource {
    async fn extract_text(&self, path: &Path) -> Result<String> {
        self.texts
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                ExtractionError::TextExtraction(format!("no text registered for {}", path.display()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_model_scripted_order() {
        let model = MockModel::new()
            .with_rate_limit()
            .with_response("{\"ok\": 1}");

        assert!(matches!(
            model.generate("m", "p", "k").await,
            Err(ProviderError::RateLimited)
        ));
        let generation = model.generate("m", "p", "k").await.unwrap();
        assert_eq!(generation.text, "{\"ok\": 1}");
        assert_eq!(model.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_model_default_response() {
        let model = MockModel::new().with_default_response("{}").with_usage_tokens(7);
        let generation = model.generate("m", "p", "k").await.unwrap();
        assert_eq!(generation.text, "{}");
        assert_eq!(generation.tokens_used, 7);
    }

    #[tokio::test]
    async fn test_mock_text_source() {
        let source = MockTextSource::new().with_text("/tmp/rc.pdf", "Load# L-1");
        let text = source.extract_text(Path::new("/tmp/rc.pdf")).await.unwrap();
        assert_eq!(text, "Load# L-1");
        assert!(source.extract_text(Path::new("/tmp/other.pdf")).await.is_err());
    }
}
