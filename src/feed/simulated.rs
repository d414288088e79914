//! Seeded random live feed.
//!
//! Stands in for a real score provider: fixtures kick off one per poll,
//! live fixtures score goals at random and blow the full-time whistle after
//! a fixed number of polls.  The same seed and fixtures always yield the
//! same event sequence.

use anyhow::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use tracing::debug;

use super::provider::ScoreFeed;
use super::FeedEvent;
use crate::models::Fixture;

#[derive(Debug, Clone, Copy)]
pub struct SimulationSettings {
    pub seed: u64,
    /// Chance (0.0–1.0) that a live fixture scores on a given poll.
    pub goal_probability: f64,
    /// Polls a fixture stays live before full time.
    pub match_length: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Scheduled,
    Live { polls: u32 },
    Finished,
}

struct SimFixture {
    event_id: String,
    home: String,
    away: String,
    home_score: u32,
    away_score: u32,
    phase: Phase,
}

struct SimState {
    rng: StdRng,
    fixtures: Vec<SimFixture>,
}

pub struct SimulatedFeed {
    settings: SimulationSettings,
    state: Mutex<SimState>,
}

impl SimulatedFeed {
    pub fn new(fixtures: Vec<Fixture>, settings: SimulationSettings) -> Self {
        let fixtures = fixtures
            .into_iter()
            .enumerate()
            .map(|(i, f)| SimFixture {
                event_id: format!("sim-{}", i),
                home: f.home,
                away: f.away,
                home_score: 0,
                away_score: 0,
                phase: Phase::Scheduled,
            })
            .collect();
        SimulatedFeed {
            settings: SimulationSettings {
                goal_probability: sanitize_probability(settings.goal_probability),
                ..settings
            },
            state: Mutex::new(SimState {
                rng: StdRng::seed_from_u64(settings.seed),
                fixtures,
            }),
        }
    }
}

/// Clamp to `0.0..=1.0`; NaN and infinities disable scoring.
fn sanitize_probability(p: f64) -> f64 {
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[async_trait]
impl ScoreFeed for SimulatedFeed {
    fn name(&self) -> &str {
        "Simulated"
    }

    async fn poll(&self) -> Result<Vec<FeedEvent>> {
        let mut guard = self.state.lock().await;
        let SimState { rng, fixtures } = &mut *guard;
        let mut events = Vec::new();

        for fixture in fixtures.iter_mut() {
            let Phase::Live { polls } = fixture.phase else {
                continue;
            };
            let polls = polls + 1;
            if polls >= self.settings.match_length {
                fixture.phase = Phase::Finished;
                events.push(FeedEvent::FullTime {
                    event_id: fixture.event_id.clone(),
                });
                continue;
            }
            fixture.phase = Phase::Live { polls };
            if rng.gen_bool(self.settings.goal_probability) {
                if rng.gen_bool(0.5) {
                    fixture.home_score += 1;
                } else {
                    fixture.away_score += 1;
                }
                events.push(FeedEvent::ScoreChange {
                    event_id: fixture.event_id.clone(),
                    home_score: fixture.home_score,
                    away_score: fixture.away_score,
                });
            }
        }

        if let Some(fixture) = fixtures.iter_mut().find(|f| f.phase == Phase::Scheduled) {
            fixture.phase = Phase::Live { polls: 0 };
            events.push(FeedEvent::Kickoff {
                event_id: fixture.event_id.clone(),
                home: fixture.home.clone(),
                away: fixture.away.clone(),
            });
        }

        debug!("Simulated feed produced {} event(s)", events.len());
        Ok(events)
    }

    async fn is_done(&self) -> bool {
        self.state
            .lock()
            .await
            .fixtures
            .iter()
            .all(|f| f.phase == Phase::Finished)
    }
}
