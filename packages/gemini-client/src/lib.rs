//! Pure Google Generative Language REST API client
//!
//! A clean, minimal client for the Gemini API with no domain-specific logic.
//! Supports content generation and model listing.
//!
//! The API key is passed per call rather than held by the client, so a
//! single client (and its connection pool) can serve callers that rotate
//! between multiple keys.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, GenerateRequest, GenerationConfig};
//!
//! let client = GeminiClient::new();
//!
//! let response = client
//!     .generate_content(
//!         "models/gemini-2.0-flash-lite",
//!         api_key,
//!         GenerateRequest::from_prompt("Say hello")
//!             .with_config(GenerationConfig::json_output(2048)),
//!     )
//!     .await?;
//!
//! let models = client.list_models(api_key).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    base_url: String,
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for proxies or API version pinning).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate content with the given model and API key.
    ///
    /// The model id may be fully qualified ("models/gemini-2.0-flash-lite")
    /// or bare ("gemini-2.0-flash-lite").
    pub async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        request: GenerateRequest,
    ) -> Result<GenerateResponse> {
        let start = std::time::Instant::now();
        let model_path = qualify_model(model);

        let response = self
            .http_client
            .post(format!("{}/{}:generateContent", self.base_url, model_path))
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(GeminiError::from_status(status.as_u16(), error_text));
        }

        let raw: types::GenerateResponseRaw = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        let text = raw
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| GeminiError::Parse("No candidates in response".into()))?;

        debug!(
            model = %model_path,
            duration_ms = start.elapsed().as_millis(),
            "Gemini content generation"
        );

        Ok(GenerateResponse {
            text,
            usage: raw.usage_metadata,
        })
    }

    /// List available models for the given API key.
    pub async fn list_models(&self, api_key: &str) -> Result<Vec<ModelInfo>> {
        let response = self
            .http_client
            .get(format!("{}/models", self.base_url))
            .header("x-goog-api-key", api_key)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini models listing failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeminiError::from_status(status.as_u16(), error_text));
        }

        let raw: types::ListModelsResponseRaw = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        Ok(raw.models)
    }
}

/// Prefix bare model ids with "models/".
fn qualify_model(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = GeminiClient::new().with_base_url("https://custom.api.com/v1");
        assert_eq!(client.base_url(), "https://custom.api.com/v1");
    }

    #[test]
    fn test_qualify_model() {
        assert_eq!(
            qualify_model("gemini-2.0-flash-lite"),
            "models/gemini-2.0-flash-lite"
        );
        assert_eq!(
            qualify_model("models/gemini-2.0-flash-lite"),
            "models/gemini-2.0-flash-lite"
        );
    }

    #[test]
    fn test_response_text_extraction() {
        let raw: types::GenerateResponseRaw = serde_json::from_str(
            r#"{
                "candidates": [
                    {"content": {"role": "model", "parts": [{"text": "{\"rate\": "}, {"text": "1000}"}]}}
                ],
                "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15}
            }"#,
        )
        .unwrap();

        let text: String = raw.candidates[0]
            .content
            .as_ref()
            .unwrap()
            .parts
            .iter()
            .map(|p| p.text.clone())
            .collect();
        assert_eq!(text, "{\"rate\": 1000}");
        assert_eq!(raw.usage_metadata.unwrap().total_token_count, 15);
    }
}
