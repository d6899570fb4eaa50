// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use std::time::Duration;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// How often idle client buckets are dropped from the limiter.
const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Token bucket applied per client address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    pub per_second: u64,
    pub burst_size: u32,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            per_second: 10,
            burst_size: 20,
        }
    }
}

/// Returns `None` when the settings cannot form a valid quota (zero rate or
/// burst).
///
/// Clients are keyed on the TCP peer address, so the server must be served
/// with `ConnectInfo<SocketAddr>`. Forwarding headers are not trusted: behind
/// a reverse proxy every request shares the proxy's bucket.
pub fn rate_limit_layer(
    settings: RateLimitSettings,
) -> Option<GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware, Body>> {
    let mut builder = GovernorConfigBuilder::default();
    builder.per_second(settings.per_second);
    builder.burst_size(settings.burst_size);
    let config = builder.key_extractor(PeerIpKeyExtractor).finish()?;

    // without a runtime (plain unit tests) there is nothing to prune
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        let limiter = config.limiter().clone();
        handle.spawn(async move {
            let mut ticker = tokio::time::interval(PRUNE_INTERVAL);
            loop {
                ticker.tick().await;
                limiter.retain_recent();
                tracing::trace!(clients = limiter.len(), "pruned rate limiter");
            }
        });
    }

    Some(GovernorLayer::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_burst_is_rejected() {
        let settings = RateLimitSettings {
            per_second: 10,
            burst_size: 0,
        };
        assert!(rate_limit_layer(settings).is_none());
        assert!(rate_limit_layer(RateLimitSettings::default()).is_some());
    }

    #[tokio::test]
    async fn layer_builds_inside_a_runtime() {
        assert!(rate_limit_layer(RateLimitSettings::default()).is_some());
    }
}
