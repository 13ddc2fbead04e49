//! Gemini API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// generateContent
// =============================================================================

/// Content generation request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Conversation contents (usually a single user turn)
    pub contents: Vec<Content>,

    /// Generation tuning parameters
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateRequest {
    /// Create a request carrying a single user prompt.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
            generation_config: None,
        }
    }

    /// Set the generation config.
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

/// A content turn in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Role: "user" or "model"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Content parts
    pub parts: Vec<Part>,
}

/// A single text part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Generation tuning parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationConfig {
    /// Sampling temperature (0.0 to 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens in the completion
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    /// Response MIME type ("application/json" forces JSON output)
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

impl GenerationConfig {
    /// Config asking the model for low-temperature JSON output.
    pub fn json_output(max_output_tokens: u32) -> Self {
        Self {
            temperature: Some(0.1),
            max_output_tokens: Some(max_output_tokens),
            response_mime_type: Some("application/json".to_string()),
        }
    }
}

/// Content generation response.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// Concatenated text of the first candidate
    pub text: String,

    /// Token usage metadata, when reported
    pub usage: Option<UsageMetadata>,
}

/// Raw generateContent response (for internal parsing).
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponseRaw {
    #[serde(default)]
    pub candidates: Vec<CandidateRaw>,
    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateRaw {
    pub content: Option<Content>,
}

/// Token usage metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageMetadata {
    /// Tokens in the prompt
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_token_count: u32,

    /// Tokens in the completion
    #[serde(rename = "candidatesTokenCount", default)]
    pub candidates_token_count: u32,

    /// Total tokens billed
    #[serde(rename = "totalTokenCount", default)]
    pub total_token_count: u32,
}

// =============================================================================
// models listing
// =============================================================================

/// A model entry from the `models` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    /// Fully qualified model id (e.g. "models/gemini-2.0-flash-lite")
    pub name: String,

    /// Generation methods the model supports
    #[serde(rename = "supportedGenerationMethods", default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    /// Whether the model can serve `generateContent` calls.
    pub fn supports_generate_content(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == "generateContent")
    }
}

/// Raw models listing response.
#[derive(Debug, Deserialize)]
pub(crate) struct ListModelsResponseRaw {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}
