pub mod config;
pub mod feed;
pub mod models;
pub mod scoreboard;
pub mod session;
pub mod store;

pub use models::{Game, GameJson, GameStatus, Score, Team};
pub use scoreboard::{Scoreboard, ScoreboardError};
pub use store::{DataStore, Id, Identified, MemoryStore};
