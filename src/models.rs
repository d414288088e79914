use serde::{Deserialize, Serialize};
use std::fmt;

use crate::store::{Id, Identified};

/// A named participant in a game. Two teams are equal when their names are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    name: String,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Team { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Home/away goal pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Score { home, away }
    }

    pub fn total(&self) -> u64 {
        u64::from(self.home) + u64::from(self.away)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

// Serialized as a two-element array, matching the JSON summary export.
impl Serialize for Score {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.home, self.away].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [home, away] = <[u32; 2]>::deserialize(deserializer)?;
        Ok(Score { home, away })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Pending,
    InProgress,
    Completed,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameStatus::Pending => "pending",
            GameStatus::InProgress => "in_progress",
            GameStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// A game tracked by the scoreboard.
///
/// Games start out `Pending` with no score and no identity. The identity is
/// handed out by the store on insertion; score and status only change
/// through [`crate::scoreboard::Scoreboard`].
#[derive(Debug)]
pub struct Game {
    id: Option<Id>,
    home: Team,
    away: Team,
    score: Option<Score>,
    status: GameStatus,
}

impl Game {
    pub fn new(home: Team, away: Team) -> Self {
        Game {
            id: None,
            home,
            away,
            score: None,
            status: GameStatus::Pending,
        }
    }

    pub fn home(&self) -> &Team {
        &self.home
    }

    pub fn away(&self) -> &Team {
        &self.away
    }

    pub fn score(&self) -> Option<Score> {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == GameStatus::InProgress
    }

    /// Sum of both sides, or `None` before kick-off.
    pub fn total_score(&self) -> Option<u64> {
        self.score.map(|s| s.total())
    }

    pub fn to_json(&self) -> GameJson {
        GameJson {
            home: self.home.clone(),
            away: self.away.clone(),
            score: self.score,
        }
    }

    /// Kick-off: zeroes the score and moves the game to `InProgress`,
    /// whatever state it was in before.
    pub(crate) fn start(&mut self) {
        self.score = Some(Score::default());
        self.status = GameStatus::InProgress;
    }

    pub(crate) fn set_score(&mut self, score: Score) {
        self.score = Some(score);
    }

    pub(crate) fn finish(&mut self) {
        self.status = GameStatus::Completed;
    }
}

impl Identified for Game {
    fn id(&self) -> Option<Id> {
        self.id
    }

    /// One-shot: once a game has an identity, later calls are ignored.
    fn assign_id(&mut self, id: Id) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }
}

/// Renders `"home 3 - away 2"`, or an empty string when there is no score yet.
impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.score {
            Some(score) => write!(
                f,
                "{} {} - {} {}",
                self.home.name, score.home, self.away.name, score.away
            ),
            None => Ok(()),
        }
    }
}

/// JSON view of a game: both team names and the score (`null` before kick-off).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameJson {
    pub home: Team,
    pub away: Team,
    pub score: Option<Score>,
}

/// A scheduled pairing, as read from a fixtures file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub home: String,
    pub away: String,
}
