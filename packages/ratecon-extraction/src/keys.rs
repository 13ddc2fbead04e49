//! API key handling with secure memory.
//!
//! Uses the `secrecy` crate to prevent accidental logging of key material.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// How many leading characters of a key survive into its log label.
const LABEL_PREFIX_LEN: usize = 8;

/// A provider API key that won't be logged or displayed.
///
/// Key material lives in a `secrecy::SecretBox`; logs and status snapshots
/// only ever see the redacted [`label`](ApiKey::label).
pub struct ApiKey {
    secret: SecretBox<str>,
    label: String,
}

impl ApiKey {
    /// Create a new API key.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let label = redact(&value);
        Self {
            secret: SecretBox::new(Box::from(value.as_str())),
            label,
        }
    }

    /// Expose the key for use in a provider request.
    ///
    /// Only call this at the point the key goes on the wire.
    pub fn expose(&self) -> &str {
        self.secret.expose_secret()
    }

    /// Redacted label safe for logs and status output.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

fn redact(value: &str) -> String {
    let prefix: String = value.chars().take(LABEL_PREFIX_LEN).collect();
    format!("{prefix}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_not_in_debug() {
        let key = ApiKey::new("AIza-super-secret-key");
        let debug = format!("{:?}", key);
        assert!(!debug.contains("secret-key"));
        assert!(debug.starts_with("AIza-sup"));
        assert!(debug.ends_with('…'));
    }

    #[test]
    fn test_key_not_in_display() {
        let key = ApiKey::new("AIza-super-secret-key");
        let display = format!("{}", key);
        assert!(!display.contains("secret-key"));
    }

    #[test]
    fn test_expose_works() {
        let key = ApiKey::new("AIza-super-secret-key");
        assert_eq!(key.expose(), "AIza-super-secret-key");
    }

    #[test]
    fn test_short_key_label() {
        let key = ApiKey::new("abc");
        assert_eq!(key.label(), "abc…");
    }
}
