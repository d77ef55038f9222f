// ABOUTME: Sliding-window rate limiter for adapters with strict upstream quotas
// ABOUTME: Bursts degrade to waiting instead of surfacing upstream 429 responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Sliding-window request limiter scoped to one adapter instance.
///
/// Adapters with a published per-minute quota wrap outbound calls with
/// [`RateLimiter::acquire`] so p99 stays predictable under bursts.
#[derive(Debug)]
pub struct RateLimiter {
    inner: Mutex<Window>,
    limit: usize,
    window: Duration,
}

#[derive(Debug)]
struct Window {
    requests: Vec<Instant>,
}

impl RateLimiter {
    /// Create a limiter allowing `limit` requests per `window`.
    #[must_use]
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            inner: Mutex::new(Window {
                requests: Vec::new(),
            }),
            limit: limit as usize,
            window,
        }
    }

    /// Convenience constructor for per-minute quotas.
    #[must_use]
    pub fn per_minute(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    /// Wait until a request slot is available, then claim it.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut window = self.inner.lock().await;
                let now = Instant::now();
                window
                    .requests
                    .retain(|&t| now.duration_since(t) < self.window);
                if window.requests.len() < self.limit {
                    window.requests.push(now);
                    return;
                }
                // Oldest entry determines when a slot frees up
                window
                    .requests
                    .first()
                    .map_or(self.window, |&oldest| self.window - now.duration_since(oldest))
            };
            tokio::time::sleep(wait).await;
        }
    }
}
