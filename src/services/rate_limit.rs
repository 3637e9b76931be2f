//! Fixed-window login throttling, keyed by client identifier.
//!
//! State is per-process and lives for the process lifetime. A window is
//! never reset early: once a client crosses the threshold it stays blocked
//! until the window elapses.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::config::LoginThrottleConfig;

#[derive(Debug)]
struct Window {
    started: Instant,
    attempts: u32,
}

pub struct LoginRateLimiter {
    windows: RwLock<HashMap<String, Window>>,
    max_attempts: u32,
    window: Duration,
}

impl LoginRateLimiter {
    #[must_use]
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            windows: RwLock::new(HashMap::new()),
            max_attempts,
            window,
        }
    }

    #[must_use]
    pub fn from_config(config: &LoginThrottleConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_secs(config.window_seconds),
        )
    }

    /// Records an attempt for `key` and reports whether it is allowed.
    /// Returns false for every attempt past the threshold within the
    /// current window.
    pub async fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.write().await;

        let window = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            attempts: 0,
        });

        if now.duration_since(window.started) >= self.window {
            window.started = now;
            window.attempts = 0;
        }

        window.attempts += 1;
        window.attempts <= self.max_attempts
    }

    /// Drops windows that have fully elapsed. Called opportunistically;
    /// correctness does not depend on it.
    pub async fn cleanup(&self) {
        let now = Instant::now();
        let mut windows = self.windows.write().await;
        windows.retain(|_, w| now.duration_since(w.started) < self.window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_up_to_threshold_then_rejects() {
        let limiter = LoginRateLimiter::new(10, Duration::from_secs(900));

        for _ in 0..10 {
            assert!(limiter.check("203.0.113.9").await);
        }
        assert!(!limiter.check("203.0.113.9").await);
        assert!(!limiter.check("203.0.113.9").await);
    }

    #[tokio::test]
    async fn clients_are_counted_independently() {
        let limiter = LoginRateLimiter::new(2, Duration::from_secs(900));

        assert!(limiter.check("a").await);
        assert!(limiter.check("a").await);
        assert!(!limiter.check("a").await);

        assert!(limiter.check("b").await);
    }

    #[tokio::test]
    async fn window_resets_after_it_elapses() {
        let limiter = LoginRateLimiter::new(1, Duration::from_millis(40));

        assert!(limiter.check("x").await);
        assert!(!limiter.check("x").await);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(limiter.check("x").await);
    }

    #[tokio::test]
    async fn cleanup_drops_elapsed_windows_only() {
        let limiter = LoginRateLimiter::new(5, Duration::from_millis(40));

        limiter.check("old").await;
        tokio::time::sleep(Duration::from_millis(60)).await;
        limiter.check("fresh").await;

        limiter.cleanup().await;

        let windows = limiter.windows.read().await;
        assert!(!windows.contains_key("old"));
        assert!(windows.contains_key("fresh"));
    }
}
