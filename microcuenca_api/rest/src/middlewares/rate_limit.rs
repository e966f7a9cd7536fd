//! Fixed window request counters per client ip

use std::{
    collections::HashMap,
    net::IpAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{
        header::{HeaderName, RETRY_AFTER},
        HeaderMap, HeaderValue,
    },
    middleware::{from_fn_with_state, Next},
    response::Response,
    Router,
};
use tokio::sync::Mutex;
use tracing::warn;

use super::client_ip::ClientIp;
use crate::{errors::rate_limited, RateLimitConfig};

/// Number of tracked clients above which expired windows are dropped.
const PRUNE_THRESHOLD: usize = 10_000;

const RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
const RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
const RATELIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

pub fn add<S: Clone + Send + Sync + 'static>(
    limiter: Arc<RateLimiter>,
) -> impl FnOnce(Router<S>) -> Router<S> {
    |router| router.layer(from_fn_with_state(limiter, middleware))
}

pub async fn middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(&ClientIp(client_ip)) = request.extensions().get::<ClientIp>() else {
        return next.run(request).await;
    };

    let decision = limiter.check(client_ip).await;

    let mut response = if decision.allowed {
        next.run(request).await
    } else {
        warn!(%client_ip, route = %request.uri(), "Rate limit exceeded");
        let mut response = rate_limited(limiter.message, decision.reset_seconds());
        response
            .headers_mut()
            .insert(RETRY_AFTER, decision.reset_seconds().into());
        response
    };

    decision.add_headers(response.headers_mut());
    response
}

#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    message: &'static str,
    windows: Mutex<HashMap<IpAddr, Window>>,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    requests: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u64,
    pub remaining: u64,
    /// Time until the current window ends.
    pub reset: Duration,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig, message: &'static str) -> Self {
        Self {
            config,
            message,
            windows: Default::default(),
        }
    }

    pub async fn check(&self, client_ip: IpAddr) -> RateLimitDecision {
        self.check_at(client_ip, Instant::now()).await
    }

    async fn check_at(&self, client_ip: IpAddr, now: Instant) -> RateLimitDecision {
        let RateLimitConfig {
            window: length,
            max_requests,
        } = self.config;

        let mut windows = self.windows.lock().await;
        if windows.len() >= PRUNE_THRESHOLD {
            windows.retain(|_, window| now.duration_since(window.started_at) < length);
        }

        let window = windows.entry(client_ip).or_insert(Window {
            started_at: now,
            requests: 0,
        });
        if now.duration_since(window.started_at) >= length {
            *window = Window {
                started_at: now,
                requests: 0,
            };
        }
        window.requests += 1;

        RateLimitDecision {
            allowed: window.requests <= max_requests,
            limit: max_requests,
            remaining: max_requests.saturating_sub(window.requests),
            reset: length.saturating_sub(now.duration_since(window.started_at)),
        }
    }
}

impl RateLimitDecision {
    pub fn reset_seconds(&self) -> u64 {
        self.reset.as_secs() + u64::from(self.reset.subsec_nanos() > 0)
    }

    /// Adds the `RateLimit-*` headers unless a more specific limiter already
    /// set them.
    fn add_headers(&self, headers: &mut HeaderMap) {
        if headers.contains_key(RATELIMIT_LIMIT) {
            return;
        }
        headers.insert(RATELIMIT_LIMIT, HeaderValue::from(self.limit));
        headers.insert(RATELIMIT_REMAINING, HeaderValue::from(self.remaining));
        headers.insert(RATELIMIT_RESET, HeaderValue::from(self.reset_seconds()));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const CLIENT: IpAddr = IpAddr::V4(std::net::Ipv4Addr::new(192, 168, 1, 7));
    const OTHER_CLIENT: IpAddr = IpAddr::V4(std::net::Ipv4Addr::new(192, 168, 1, 8));

    fn limiter(max_requests: u64) -> RateLimiter {
        RateLimiter::new(
            RateLimitConfig {
                window: Duration::from_secs(3600),
                max_requests,
            },
            "slow down",
        )
    }

    #[tokio::test]
    async fn allows_up_to_limit() {
        // Arrange
        let sut = limiter(3);
        let now = Instant::now();

        // Act
        let mut results = Vec::new();
        for _ in 0..4 {
            results.push(sut.check_at(CLIENT, now).await);
        }

        // Assert
        assert_eq!(
            results.iter().map(|d| d.allowed).collect::<Vec<_>>(),
            [true, true, true, false]
        );
        assert_eq!(
            results.iter().map(|d| d.remaining).collect::<Vec<_>>(),
            [2, 1, 0, 0]
        );
        assert_eq!(results[3].reset_seconds(), 3600);
    }

    #[tokio::test]
    async fn clients_are_counted_separately() {
        let sut = limiter(1);
        let now = Instant::now();

        assert!(sut.check_at(CLIENT, now).await.allowed);
        assert!(!sut.check_at(CLIENT, now).await.allowed);
        assert!(sut.check_at(OTHER_CLIENT, now).await.allowed);
    }

    #[tokio::test]
    async fn window_resets() {
        // Arrange
        let sut = limiter(1);
        let now = Instant::now();
        sut.check_at(CLIENT, now).await;

        // Act
        let within = sut.check_at(CLIENT, now + Duration::from_secs(1800)).await;
        let after = sut.check_at(CLIENT, now + Duration::from_secs(3600)).await;

        // Assert
        assert!(!within.allowed);
        assert_eq!(within.reset, Duration::from_secs(1800));
        assert!(after.allowed);
        assert_eq!(after.remaining, 0);
    }

    #[test]
    fn reset_seconds_rounds_up() {
        let decision = RateLimitDecision {
            allowed: true,
            limit: 1,
            remaining: 0,
            reset: Duration::from_millis(1500),
        };

        assert_eq!(decision.reset_seconds(), 2);
    }
}
