// Rate limiting middleware using tower-governor
//
// Configuration:
// - 100 requests per 15 minutes per client IP by default (one request
//   replenished every 9s, bursts up to the full 100)
// - Client IP comes from X-Forwarded-For / X-Real-IP / Forwarded when a proxy
//   sets them, otherwise from the peer address
// - A limit of zero requests turns the limiter off
//
// Applied in app.rs as a layer on the /api routes; /health is not limited.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tracing::warn;

pub const DEFAULT_MAX_REQUESTS: u32 = 100;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(15 * 60);

/// How many requests one client may make per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: DEFAULT_WINDOW,
        }
    }
}

impl RateLimit {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    /// Time after which one more request is allowed, or `None` when the
    /// limit is off.
    pub fn replenish_interval(&self) -> Option<Duration> {
        self.window
            .checked_div(self.max_requests)
            .filter(|interval| !interval.is_zero())
    }
}

/// Wrap `router` in a per-client limiter.
pub fn with_rate_limit(router: Router, limit: RateLimit) -> Router {
    let Some(period) = limit.replenish_interval() else {
        warn!(?limit, "Rate limiting disabled");
        return router;
    };

    let Some(config) = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .period(period)
        .burst_size(limit.max_requests)
        .finish()
    else {
        warn!(?limit, "Rate limiter rejected its settings; limiting disabled");
        return router;
    };

    router.layer(GovernorLayer {
        config: Arc::new(config),
    })
}
