use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::feed::FeedEvent;
use crate::models::{Game, Score, Team};
use crate::scoreboard::{Scoreboard, ScoreboardError};
use crate::store::{DataStore, Id, MemoryStore};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("event '{0}' already kicked off")]
    DuplicateKickoff(String),

    #[error("event '{0}' was never kicked off")]
    UnknownEvent(String),

    #[error("event '{event_id}': {source}")]
    Scoreboard {
        event_id: String,
        #[source]
        source: ScoreboardError,
    },
}

/// Applies feed events to a scoreboard, translating the feed's event ids
/// into scoreboard identities.
#[derive(Debug)]
pub struct Session<S = MemoryStore<Game>> {
    scoreboard: Scoreboard<S>,
    ids: HashMap<String, Id>,
}

impl Session<MemoryStore<Game>> {
    pub fn in_memory() -> Self {
        Session::new(Scoreboard::in_memory())
    }
}

impl<S: DataStore<Game>> Session<S> {
    pub fn new(scoreboard: Scoreboard<S>) -> Self {
        Session {
            scoreboard,
            ids: HashMap::new(),
        }
    }

    pub fn scoreboard(&self) -> &Scoreboard<S> {
        &self.scoreboard
    }

    /// Scoreboard identity for a feed event id, if it has kicked off.
    pub fn id_for(&self, event_id: &str) -> Option<Id> {
        self.ids.get(event_id).copied()
    }

    pub fn apply(&mut self, event: FeedEvent) -> Result<(), SessionError> {
        match event {
            FeedEvent::Kickoff {
                event_id,
                home,
                away,
            } => {
                if self.ids.contains_key(&event_id) {
                    return Err(SessionError::DuplicateKickoff(event_id));
                }
                let id = self
                    .scoreboard
                    .add(Game::new(Team::new(home), Team::new(away)));
                debug!("Event '{}' mapped to game {}", event_id, id);
                self.ids.insert(event_id, id);
                Ok(())
            }
            FeedEvent::ScoreChange {
                event_id,
                home_score,
                away_score,
            } => {
                let id = self.lookup(&event_id)?;
                self.scoreboard
                    .update(id, Score::new(home_score, away_score))
                    .map_err(|source| SessionError::Scoreboard { event_id, source })
            }
            FeedEvent::FullTime { event_id } => {
                let id = self.lookup(&event_id)?;
                self.scoreboard
                    .complete(id)
                    .map_err(|source| SessionError::Scoreboard { event_id, source })
            }
        }
    }

    fn lookup(&self, event_id: &str) -> Result<Id, SessionError> {
        self.id_for(event_id)
            .ok_or_else(|| SessionError::UnknownEvent(event_id.to_string()))
    }
}
