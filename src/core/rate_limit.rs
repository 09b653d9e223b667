//! Rate-limited, deduplicating, retrying wrapper around upstream calls.
//!
//! Every network exchange with an upstream API goes through one
//! [`RateLimitedClient`] per API. The client layers three things over a
//! caller-supplied `invoke` closure:
//!
//! - **Admission control**: a sliding 60-second [`RateLimitWindow`]; once
//!   `limit` attempts were admitted in the current window, further attempts
//!   fail locally with [`FflError::RateLimitExceeded`].
//! - **Deduplication**: concurrent calls with the same key join the one
//!   in-flight request instead of issuing another.
//! - **Retry**: rate-limit failures (local or upstream 429) are retried up to
//!   [`RetryPolicy::max_retries`] times with exponential backoff, honoring a
//!   server `Retry-After` hint when it is shorter. Every other failure is
//!   returned immediately.
//!
//! In-flight requests are spawned onto the runtime, so they run to completion
//! even if every caller stops waiting.

use futures_util::future::{BoxFuture, FutureExt, Shared};
use serde::Serialize;
use serde_json::Value;
use std::{
    collections::HashMap,
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard,
    },
    time::Duration,
};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::{FflError, Result};

/// Length of one admission window.
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Per-API request budget for the current 60-second window.
#[derive(Debug, Clone)]
pub struct RateLimitWindow {
    count: u32,
    window_start: Instant,
    limit: u32,
}

impl RateLimitWindow {
    pub fn new(limit: u32) -> Self {
        Self {
            count: 0,
            window_start: Instant::now(),
            limit,
        }
    }

    fn roll(&mut self, now: Instant) {
        if now.duration_since(self.window_start) >= RATE_LIMIT_WINDOW {
            self.count = 0;
            self.window_start = now;
        }
    }

    /// Admit one attempt, or reject it when the window's budget is spent.
    pub fn try_admit(&mut self) -> Result<()> {
        self.roll(Instant::now());
        if self.count >= self.limit {
            return Err(FflError::RateLimitExceeded { retry_after: None });
        }
        self.count += 1;
        Ok(())
    }

    pub fn status(&mut self, in_flight: usize) -> RateLimitStatus {
        let now = Instant::now();
        self.roll(now);
        let elapsed = now.duration_since(self.window_start);
        RateLimitStatus {
            count: self.count,
            limit: self.limit,
            remaining: self.limit.saturating_sub(self.count),
            reset_in_secs: RATE_LIMIT_WINDOW.saturating_sub(elapsed).as_secs(),
            in_flight,
        }
    }
}

/// Rate-limit consumption for one upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimitStatus {
    pub count: u32,
    pub limit: u32,
    pub remaining: u32,
    pub reset_in_secs: u64,
    pub in_flight: usize,
}

/// Exponential backoff for rate-limited attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (0-based): `base * 2^retry`, or the
    /// server hint when that is shorter.
    pub fn delay_for_retry(&self, retry: u32, retry_after: Option<Duration>) -> Duration {
        let backoff = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(retry));
        match retry_after {
            Some(hint) => hint.min(backoff),
            None => backoff,
        }
    }
}

type SharedCall = Shared<BoxFuture<'static, Result<Value>>>;

struct PendingCall {
    id: u64,
    call: SharedCall,
}

struct ClientInner {
    name: &'static str,
    window: Mutex<RateLimitWindow>,
    pending: Mutex<HashMap<String, PendingCall>>,
    next_id: AtomicU64,
    retry: RetryPolicy,
}

impl ClientInner {
    fn window(&self) -> MutexGuard<'_, RateLimitWindow> {
        self.window.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn pending(&self) -> MutexGuard<'_, HashMap<String, PendingCall>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn run_with_retry<F, Fut>(&self, key: &str, invoke: &F) -> Result<Value>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Value>>,
    {
        let mut retry = 0;
        loop {
            // Admission and the counter bump happen under one lock acquisition.
            let admitted = self.window().try_admit();
            let outcome = match admitted {
                Ok(()) => invoke().await,
                Err(e) => Err(e),
            };

            match outcome {
                Err(e) if e.is_rate_limited() && retry < self.retry.max_retries => {
                    let delay = self.retry.delay_for_retry(retry, e.retry_after());
                    warn!(
                        api = self.name,
                        key,
                        attempt = retry + 1,
                        max_retries = self.retry.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                other => return other,
            }
        }
    }
}

/// Removes its registry entry when the in-flight request finishes, whatever
/// the outcome. Only the entry it registered is removed.
struct PendingGuard {
    inner: Arc<ClientInner>,
    key: String,
    id: u64,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        let mut pending = self.inner.pending();
        if pending.get(&self.key).is_some_and(|p| p.id == self.id) {
            pending.remove(&self.key);
        }
    }
}

/// Upstream call wrapper shared by every accessor of one API.
///
/// Cloning is cheap and clones share the window and the pending registry.
#[derive(Clone)]
pub struct RateLimitedClient {
    inner: Arc<ClientInner>,
}

impl RateLimitedClient {
    pub fn new(name: &'static str, limit_per_minute: u32, retry: RetryPolicy) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                name,
                window: Mutex::new(RateLimitWindow::new(limit_per_minute)),
                pending: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(0),
                retry,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Run `invoke` under admission control, deduplication and retry.
    ///
    /// `key` identifies the request (URL plus query). While a call for `key`
    /// is in flight, further calls with the same key resolve from it and
    /// `invoke` is not called again.
    pub async fn call<F, Fut>(&self, key: impl Into<String>, invoke: F) -> Result<Value>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let key = key.into();
        let call = {
            let mut pending = self.inner.pending();
            match pending.get(&key) {
                Some(existing) => {
                    debug!(api = self.inner.name, %key, "joining in-flight request");
                    existing.call.clone()
                }
                None => {
                    let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
                    let guard = PendingGuard {
                        inner: Arc::clone(&self.inner),
                        key: key.clone(),
                        id,
                    };
                    let inner = Arc::clone(&self.inner);
                    let call = async move {
                        let guard = guard;
                        let result = inner.run_with_retry(&guard.key, &invoke).await;
                        drop(guard);
                        result
                    }
                    .boxed()
                    .shared();

                    pending.insert(
                        key,
                        PendingCall {
                            id,
                            call: call.clone(),
                        },
                    );
                    tokio::spawn(call.clone());
                    call
                }
            }
        };
        call.await
    }

    /// Current window consumption and in-flight request count.
    pub fn status(&self) -> RateLimitStatus {
        let in_flight = self.inner.pending().len();
        self.inner.window().status(in_flight)
    }

    pub fn in_flight(&self) -> usize {
        self.inner.pending().len()
    }

    /// Forget every in-flight request; later calls start fresh requests.
    pub fn clear_pending(&self) {
        self.inner.pending().clear();
    }
}
