pub mod provider;
pub mod simulated;

pub use provider::ScoreFeed;
pub use simulated::{SimulatedFeed, SimulationSettings};

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{error, info, warn};

/// A change reported by a live feed. Feeds identify games by their own
/// `event_id`, not by scoreboard identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    Kickoff {
        event_id: String,
        home: String,
        away: String,
    },
    ScoreChange {
        event_id: String,
        home_score: u32,
        away_score: u32,
    },
    FullTime {
        event_id: String,
    },
}

impl FeedEvent {
    pub fn event_id(&self) -> &str {
        match self {
            FeedEvent::Kickoff { event_id, .. }
            | FeedEvent::ScoreChange { event_id, .. }
            | FeedEvent::FullTime { event_id } => event_id,
        }
    }
}

/// Spawns a background task that polls **all feeds concurrently** at the
/// configured interval and forwards their events through the returned
/// channel.
///
/// The task stops once every feed reports it is done, or when the receiver
/// is dropped; either way the channel closes.
pub fn start_feed_monitor(
    feeds: Vec<Arc<dyn ScoreFeed>>,
    poll_interval: Duration,
) -> mpsc::Receiver<FeedEvent> {
    let (tx, rx) = mpsc::channel(1024);

    tokio::spawn(async move {
        let feed_names: Vec<&str> = feeds.iter().map(|f| f.name()).collect();
        info!(
            "Feed monitor started ({} feeds: {:?}, interval={:?})",
            feeds.len(),
            feed_names,
            poll_interval
        );

        let poll_timeout = poll_interval.min(Duration::from_secs(2));
        let mut interval = tokio::time::interval(poll_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            interval.tick().await;

            let polls: Vec<_> = feeds
                .iter()
                .map(|f| {
                    let f = Arc::clone(f);
                    async move {
                        let out = match tokio::time::timeout(poll_timeout, f.poll()).await {
                            Ok(result) => result,
                            Err(_) => Err(anyhow::anyhow!("timed out after {:?}", poll_timeout)),
                        };
                        (f.name().to_string(), out)
                    }
                })
                .collect();

            let results = futures_util::future::join_all(polls).await;

            for (feed_name, result) in results {
                match result {
                    Ok(events) => {
                        for ev in events {
                            match tx.try_send(ev) {
                                Ok(()) => {}
                                Err(TrySendError::Full(ev)) => {
                                    error!("Feed event channel full, event DROPPED: {:?}", ev);
                                }
                                Err(TrySendError::Closed(_)) => {
                                    info!("Feed receiver dropped, monitor stopping");
                                    return;
                                }
                            }
                        }
                    }
                    Err(e) => {
                        warn!("Feed '{}' failed: {}", feed_name, e);
                    }
                }
            }

            let done = futures_util::future::join_all(feeds.iter().map(|f| f.is_done())).await;
            if done.into_iter().all(|d| d) {
                info!("All feeds exhausted, monitor stopping");
                return;
            }
        }
    });

    rx
}
