//! Pipeline configuration.

use crate::pool::PoolConfig;

/// Configuration the host hands the pipeline at startup.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Provider API keys; blanks are dropped by the pool.
    pub api_keys: Vec<String>,

    /// Model id to prefer over discovery, if the host pins one.
    pub preferred_model: Option<String>,

    /// Credential leases one AI extraction may burn. Default: 3.
    pub max_attempts: u32,

    /// Credential pool thresholds.
    pub pool: PoolConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            api_keys: Vec::new(),
            preferred_model: None,
            max_attempts: 3,
            pool: PoolConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read from the environment: `GOOGLE_AI_KEYS` (comma-separated, falling
    /// back to `GOOGLE_AI_KEY`) and `PREFERRED_MODEL`.
    pub fn from_env() -> Self {
        let api_keys = match std::env::var("GOOGLE_AI_KEYS") {
            Ok(joined) => joined.split(',').map(|k| k.trim().to_string()).collect(),
            Err(_) => std::env::var("GOOGLE_AI_KEY")
                .map(|k| vec![k])
                .unwrap_or_default(),
        };

        Self {
            api_keys,
            preferred_model: std::env::var("PREFERRED_MODEL").ok(),
            ..Self::default()
        }
    }

    /// Set the API keys.
    pub fn with_api_keys(mut self, keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.api_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Pin a model id, skipping discovery preference order.
    pub fn with_preferred_model(mut self, model: impl Into<String>) -> Self {
        self.preferred_model = Some(model.into());
        self
    }

    /// Set the AI attempt budget.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the pool thresholds.
    pub fn with_pool(mut self, pool: PoolConfig) -> Self {
        self.pool = pool;
        self
    }
}
