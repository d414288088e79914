use anyhow::Result;
use async_trait::async_trait;

use super::FeedEvent;

/// Trait that every live-score feed must implement.
#[async_trait]
pub trait ScoreFeed: Send + Sync {
    /// Return the events observed since the previous poll, oldest first.
    async fn poll(&self) -> Result<Vec<FeedEvent>>;

    /// `true` once the feed will never produce another event.
    async fn is_done(&self) -> bool {
        false
    }

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
