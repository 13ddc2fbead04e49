//! Credential pool with rotation, rate-limit cool-downs, and error
//! disablement.
//!
//! The pool is the only shared mutable state in the pipeline. Every
//! transition happens under one mutex; the rate-limit reactivation timer is
//! the only task the pool ever spawns, and it holds a `Weak` reference so a
//! dropped pool cancels nothing but the wake-up.

use serde::Serialize;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::time::Instant;

use crate::error::ExtractionError;
use crate::keys::ApiKey;

/// Tunable thresholds for the pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// How long a rate-limited credential stays benched
    pub cooldown: Duration,

    /// Rolling window after which per-key counters reset
    pub window: Duration,

    /// Consecutive errors before a credential is disabled
    pub error_threshold: u32,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_secs(120),
            window: Duration::from_secs(60),
            error_threshold: 5,
        }
    }
}

/// Credential health state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialStatus {
    /// Usable
    Active,

    /// Benched after a quota signal; returns after the cool-down
    RateLimited,

    /// Benched after too many consecutive errors
    Disabled,
}

/// Opaque handle to one credential in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CredentialId(usize);

/// What `acquire` hands out: the id to report against and a copy of the
/// key material for the call.
#[derive(Debug, Clone)]
pub struct CredentialLease {
    pub id: CredentialId,
    pub key: ApiKey,
}

/// Serializable per-credential status view, for host health endpoints.
/// Key material never appears; only the redacted label does.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialSnapshot {
    pub label: String,
    pub status: CredentialStatus,
    pub requests: u32,
    pub tokens: u64,
    pub consecutive_errors: u32,
    pub last_error: Option<String>,
}

struct CredentialState {
    key: ApiKey,
    status: CredentialStatus,
    last_used: Option<Instant>,
    requests: u32,
    tokens: u64,
    consecutive_errors: u32,
    last_error: Option<String>,
}

impl CredentialState {
    fn new(key: ApiKey) -> Self {
        Self {
            key,
            status: CredentialStatus::Active,
            last_used: None,
            requests: 0,
            tokens: 0,
            consecutive_errors: 0,
            last_error: None,
        }
    }
}

struct PoolInner {
    credentials: Vec<CredentialState>,
    window_resets_at: Instant,
}

/// Pool of provider credentials.
///
/// Constructed once per process (or per test) and passed by `Arc` to every
/// component that needs a key. Selection is oldest-last-used among active
/// credentials, which approximates round-robin under steady load.
pub struct KeyPool {
    config: PoolConfig,
    inner: Mutex<PoolInner>,
}

impl KeyPool {
    /// Create a pool from the configured key list. Blank entries are
    /// filtered out.
    pub fn new<I, S>(keys: I, config: PoolConfig) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let credentials: Vec<CredentialState> = keys
            .into_iter()
            .map(Into::into)
            .filter(|k| !k.trim().is_empty())
            .map(|k| CredentialState::new(ApiKey::new(k)))
            .collect();

        tracing::info!(count = credentials.len(), "initialized credential pool");

        Arc::new(Self {
            inner: Mutex::new(PoolInner {
                credentials,
                window_resets_at: Instant::now() + config.window,
            }),
            config,
        })
    }

    /// Number of credentials in the pool (any status).
    pub fn len(&self) -> usize {
        self.lock().credentials.len()
    }

    /// Whether the pool holds no credentials at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lease the active credential that has gone unused the longest.
    ///
    /// Lazily resets the rolling counters when the window has elapsed, and
    /// reclaims expired rate-limits once before giving up.
    pub fn acquire(&self) -> Result<CredentialLease, ExtractionError> {
        let now = Instant::now();
        let mut inner = self.lock();

        if now >= inner.window_resets_at {
            for cred in &mut inner.credentials {
                cred.requests = 0;
                cred.tokens = 0;
            }
            inner.window_resets_at = now + self.config.window;
        }

        if !inner.has_active() {
            Self::reclaim_locked(&mut inner, now, self.config.cooldown);
        }

        let chosen = inner
            .credentials
            .iter()
            .enumerate()
            .filter(|(_, c)| c.status == CredentialStatus::Active)
            .min_by_key(|(i, c)| (c.last_used, *i))
            .map(|(i, _)| i)
            .ok_or(ExtractionError::CredentialExhausted)?;

        let cred = &mut inner.credentials[chosen];
        cred.last_used = Some(now);
        cred.requests += 1;

        tracing::debug!(key = %cred.key.label(), "leased credential");

        Ok(CredentialLease {
            id: CredentialId(chosen),
            key: cred.key.clone(),
        })
    }

    /// Record a successful call: clears the error streak, accumulates
    /// token usage.
    pub fn report_success(&self, id: CredentialId, tokens_used: u32) {
        let mut inner = self.lock();
        if let Some(cred) = inner.credentials.get_mut(id.0) {
            cred.tokens += u64::from(tokens_used);
            cred.consecutive_errors = 0;
        }
    }

    /// Bench a credential after a quota signal and schedule its return.
    ///
    /// The timer needs a Tokio runtime; without one the lazy reclaim in
    /// [`acquire`](Self::acquire) still recovers the credential after the
    /// cool-down.
    pub fn report_rate_limited(self: &Arc<Self>, id: CredentialId) {
        {
            let mut inner = self.lock();
            let Some(cred) = inner.credentials.get_mut(id.0) else {
                return;
            };
            cred.status = CredentialStatus::RateLimited;
            tracing::warn!(key = %cred.key.label(), "credential rate limited");
        }

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let weak: Weak<Self> = Arc::downgrade(self);
            let cooldown = self.config.cooldown;
            handle.spawn(async move {
                tokio::time::sleep(cooldown).await;
                if let Some(pool) = weak.upgrade() {
                    pool.reactivate(id);
                }
            });
        }
    }

    /// Record a failed call; disables the credential once the consecutive
    /// error count reaches the threshold.
    pub fn report_error(&self, id: CredentialId, message: &str) {
        let mut inner = self.lock();
        let threshold = self.config.error_threshold;
        if let Some(cred) = inner.credentials.get_mut(id.0) {
            cred.consecutive_errors += 1;
            cred.last_error = Some(message.to_string());
            if cred.consecutive_errors >= threshold {
                cred.status = CredentialStatus::Disabled;
                tracing::warn!(
                    key = %cred.key.label(),
                    errors = cred.consecutive_errors,
                    "credential disabled after repeated errors"
                );
            }
        }
    }

    /// Reactivate rate-limited credentials whose cool-down has elapsed.
    pub fn reclaim_expired(&self) {
        let now = Instant::now();
        let mut inner = self.lock();
        Self::reclaim_locked(&mut inner, now, self.config.cooldown);
    }

    /// Per-credential status view with redacted labels.
    pub fn snapshot(&self) -> Vec<CredentialSnapshot> {
        let inner = self.lock();
        inner
            .credentials
            .iter()
            .map(|c| CredentialSnapshot {
                label: c.key.label().to_string(),
                status: c.status,
                requests: c.requests,
                tokens: c.tokens,
                consecutive_errors: c.consecutive_errors,
                last_error: c.last_error.clone(),
            })
            .collect()
    }

    fn reactivate(&self, id: CredentialId) {
        let mut inner = self.lock();
        if let Some(cred) = inner.credentials.get_mut(id.0) {
            if cred.status == CredentialStatus::RateLimited {
                cred.status = CredentialStatus::Active;
                cred.consecutive_errors = 0;
                tracing::info!(key = %cred.key.label(), "credential reactivated");
            }
        }
    }

    fn reclaim_locked(inner: &mut PoolInner, now: Instant, cooldown: Duration) {
        for cred in &mut inner.credentials {
            if cred.status == CredentialStatus::RateLimited
                && cred
                    .last_used
                    .is_none_or(|t| now.duration_since(t) >= cooldown)
            {
                cred.status = CredentialStatus::Active;
                cred.consecutive_errors = 0;
                tracing::info!(key = %cred.key.label(), "credential reclaimed after cool-down");
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PoolInner> {
        self.inner.lock().unwrap()
    }
}

impl PoolInner {
    fn has_active(&self) -> bool {
        self.credentials
            .iter()
            .any(|c| c.status == CredentialStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PoolConfig {
        PoolConfig::default()
    }

    fn pool_with_keys(n: usize) -> Arc<KeyPool> {
        KeyPool::new((0..n).map(|i| format!("test-key-{i:02}")), test_config())
    }

    #[test]
    fn test_blank_keys_filtered() {
        let pool = KeyPool::new(["good-key", "", "   "], test_config());
        assert_eq!(pool.len(), 1);
    }

    #[tokio::test]
    async fn test_round_robin_distinct_credentials() {
        let pool = pool_with_keys(4);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..4 {
            let lease = pool.acquire().unwrap();
            assert!(seen.insert(lease.id), "credential handed out twice");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_oldest_last_used_wins() {
        let pool = pool_with_keys(2);

        let first = pool.acquire().unwrap();
        tokio::time::advance(Duration::from_secs(1)).await;
        let second = pool.acquire().unwrap();
        assert_ne!(first.id, second.id);

        // Both used; the first lease is now the stalest.
        tokio::time::advance(Duration::from_secs(1)).await;
        let third = pool.acquire().unwrap();
        assert_eq!(third.id, first.id);
    }

    #[tokio::test]
    async fn test_disabled_after_error_threshold() {
        let pool = pool_with_keys(1);
        let lease = pool.acquire().unwrap();

        for _ in 0..4 {
            pool.report_error(lease.id, "boom");
        }
        assert_eq!(pool.snapshot()[0].status, CredentialStatus::Active);

        pool.report_error(lease.id, "boom");
        assert_eq!(pool.snapshot()[0].status, CredentialStatus::Disabled);
        assert!(pool.acquire().is_err());
    }

    #[tokio::test]
    async fn test_success_resets_error_streak() {
        let pool = pool_with_keys(1);
        let lease = pool.acquire().unwrap();

        for _ in 0..4 {
            pool.report_error(lease.id, "boom");
        }
        pool.report_success(lease.id, 120);
        for _ in 0..4 {
            pool.report_error(lease.id, "boom");
        }

        let snap = &pool.snapshot()[0];
        assert_eq!(snap.status, CredentialStatus::Active);
        assert_eq!(snap.tokens, 120);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_timer_reactivates() {
        let pool = pool_with_keys(1);
        let lease = pool.acquire().unwrap();

        pool.report_rate_limited(lease.id);
        assert!(matches!(
            pool.acquire(),
            Err(ExtractionError::CredentialExhausted)
        ));

        // Not a second sooner than the cool-down.
        tokio::time::sleep(Duration::from_secs(119)).await;
        assert_eq!(pool.snapshot()[0].status, CredentialStatus::RateLimited);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(pool.snapshot()[0].status, CredentialStatus::Active);
        assert!(pool.acquire().is_ok());
    }

    #[test]
    fn test_lazy_reclaim_without_runtime() {
        let config = PoolConfig {
            cooldown: Duration::from_millis(20),
            ..PoolConfig::default()
        };
        let pool = KeyPool::new(["only-key"], config);
        let lease = pool.acquire().unwrap();

        // No Tokio runtime here, so no timer gets spawned.
        pool.report_rate_limited(lease.id);
        assert!(pool.acquire().is_err());

        std::thread::sleep(Duration::from_millis(30));
        assert!(pool.acquire().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_resets_counters_not_status() {
        let pool = pool_with_keys(1);
        let lease = pool.acquire().unwrap();
        pool.report_success(lease.id, 500);
        pool.report_rate_limited(lease.id);

        {
            let snap = &pool.snapshot()[0];
            assert_eq!(snap.requests, 1);
            assert_eq!(snap.tokens, 500);
        }

        tokio::time::advance(Duration::from_secs(61)).await;
        // The window reset runs lazily inside acquire; the key is still
        // benched so the lease attempt fails, but counters must be clear.
        assert!(pool.acquire().is_err());

        let snap = &pool.snapshot()[0];
        assert_eq!(snap.requests, 0);
        assert_eq!(snap.tokens, 0);
    }

    #[tokio::test]
    async fn test_snapshot_redacts_keys() {
        let pool = KeyPool::new(["AIza-very-secret-material"], test_config());
        let snap = &pool.snapshot()[0];
        assert!(!snap.label.contains("secret-material"));
        assert!(snap.label.ends_with('…'));
    }
}
