use std::cmp::Ordering;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Game, GameJson, GameStatus, Score};
use crate::store::{DataStore, Id, Identified, MemoryStore};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreboardError {
    #[error("no game with id {0}")]
    NotFound(Id),

    #[error("game {id} is {from}, only in-progress games can be completed")]
    InvalidTransition { id: Id, from: GameStatus },
}

/// Live scoreboard over a single store.
///
/// The scoreboard never keeps its own copy of a game: every write looks the
/// game up in the store by identity first, and [`Scoreboard::summaries`]
/// hands out references into the store.
#[derive(Debug)]
pub struct Scoreboard<S = MemoryStore<Game>> {
    store: S,
}

impl Scoreboard<MemoryStore<Game>> {
    /// Scoreboard over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Scoreboard::new(MemoryStore::new())
    }
}

impl<S: DataStore<Game>> Scoreboard<S> {
    pub fn new(store: S) -> Self {
        Scoreboard { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get(&self, id: Id) -> Option<&Game> {
        self.store.get_by_id(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Kick the game off at 0-0 and store it. Returns the identity the store
    /// assigned.
    pub fn add(&mut self, mut game: Game) -> Id {
        game.start();
        let label = format!("{} vs {}", game.home().name(), game.away().name());
        let id = self.store.add(game);
        info!("Game {} started: {}", id, label);
        id
    }

    /// Replace the score of a stored game.
    pub fn update(&mut self, id: Id, score: Score) -> Result<(), ScoreboardError> {
        let game = self
            .store
            .get_by_id_mut(id)
            .ok_or(ScoreboardError::NotFound(id))?;
        game.set_score(score);
        debug!("Game {} score {}", id, score);
        Ok(())
    }

    /// Mark an in-progress game as completed. Pending and already completed
    /// games are left untouched.
    pub fn complete(&mut self, id: Id) -> Result<(), ScoreboardError> {
        let game = self
            .store
            .get_by_id_mut(id)
            .ok_or(ScoreboardError::NotFound(id))?;
        if game.status() != GameStatus::InProgress {
            return Err(ScoreboardError::InvalidTransition {
                id,
                from: game.status(),
            });
        }
        game.finish();
        info!("Game {} completed", id);
        Ok(())
    }

    /// In-progress games, highest total score first. Equal totals put the
    /// most recently added game (higher identity) first.
    pub fn summaries(&self) -> Vec<&Game> {
        let mut games = self.store.get_all_by(Game::is_in_progress);
        games.sort_by(|a, b| summary_order(a, b));
        games
    }

    pub fn text_summaries(&self) -> Vec<String> {
        self.summaries().iter().map(|g| g.to_string()).collect()
    }

    pub fn json_summaries(&self) -> Vec<GameJson> {
        self.summaries().iter().map(|g| g.to_json()).collect()
    }
}

fn summary_order(a: &Game, b: &Game) -> Ordering {
    let a_total = a.total_score().unwrap_or(0);
    let b_total = b.total_score().unwrap_or(0);
    b_total.cmp(&a_total).then_with(|| b.id().cmp(&a.id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Team;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn game(home: &str, away: &str) -> Game {
        Game::new(Team::new(home), Team::new(away))
    }

    fn games(n: usize) -> Vec<Game> {
        (0..n)
            .map(|i| game(&format!("home{}", i), &format!("away{}", i)))
            .collect()
    }

    /// Adds every game, gives each a random score and completes the ones at
    /// odd positions.  Returns ids in insertion order with their scores.
    fn setup_in_progress(
        board: &mut Scoreboard,
        games: Vec<Game>,
        rng: &mut StdRng,
    ) -> Vec<(Id, Score)> {
        let ids: Vec<Id> = games.into_iter().map(|g| board.add(g)).collect();
        let scores: Vec<(Id, Score)> = ids
            .iter()
            .map(|&id| (id, Score::new(rng.gen_range(0..=10), rng.gen_range(0..=10))))
            .collect();
        for &(id, score) in &scores {
            board.update(id, score).unwrap();
        }
        for (index, &id) in ids.iter().enumerate() {
            if index % 2 == 1 {
                board.complete(id).unwrap();
            }
        }
        scores
    }

    /// Store that records what it was asked to add.
    #[derive(Default)]
    struct RecordingStore {
        inner: MemoryStore<Game>,
        added: Vec<String>,
    }

    impl DataStore<Game> for RecordingStore {
        fn add(&mut self, item: Game) -> Id {
            self.added.push(item.to_string());
            self.inner.add(item)
        }

        fn get_by_id(&self, id: Id) -> Option<&Game> {
            self.inner.get_by_id(id)
        }

        fn get_by_id_mut(&mut self, id: Id) -> Option<&mut Game> {
            self.inner.get_by_id_mut(id)
        }

        fn get_all_by<P>(&self, predicate: P) -> Vec<&Game>
        where
            P: Fn(&Game) -> bool,
        {
            self.inner.get_all_by(predicate)
        }

        fn len(&self) -> usize {
            self.inner.len()
        }
    }

    #[test]
    fn test_add_delegates_started_game_to_store() {
        let mut board = Scoreboard::new(RecordingStore::default());
        board.add(game("home", "away"));
        assert_eq!(board.store().added, vec!["home 0 - away 0".to_string()]);
    }

    #[test]
    fn test_add_sets_starting_score_and_status() {
        let mut board = Scoreboard::in_memory();
        let id = board.add(game("home", "away"));
        let stored = board.get(id).unwrap();
        assert_eq!(stored.score(), Some(Score::new(0, 0)));
        assert_eq!(stored.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_first_game_gets_id_zero() {
        let mut board = Scoreboard::in_memory();
        let id = board.add(game("home", "away"));
        assert_eq!(id, 0);
        assert_eq!(board.get(id).unwrap().id(), Some(0));
    }

    #[test]
    fn test_add_restarts_previously_scored_game() {
        let mut g = game("home", "away");
        g.set_score(Score::new(5, 5));
        g.finish();
        let mut board = Scoreboard::in_memory();
        let id = board.add(g);
        assert_eq!(board.get(id).unwrap().score(), Some(Score::new(0, 0)));
        assert!(board.get(id).unwrap().is_in_progress());
    }

    #[test]
    fn test_update_score() {
        let mut board = Scoreboard::in_memory();
        let id = board.add(game("home", "away"));
        board.update(id, Score::new(3, 2)).unwrap();
        assert_eq!(board.get(id).unwrap().score(), Some(Score::new(3, 2)));
    }

    #[test]
    fn test_update_unknown_id_changes_nothing() {
        let mut board = Scoreboard::in_memory();
        let a = board.add(game("a", "b"));
        let c = board.add(game("c", "d"));
        board.update(a, Score::new(1, 0)).unwrap();

        let result = board.update(99, Score::new(7, 7));
        assert_eq!(result, Err(ScoreboardError::NotFound(99)));
        assert_eq!(board.len(), 2);
        assert_eq!(board.get(a).unwrap().score(), Some(Score::new(1, 0)));
        assert_eq!(board.get(c).unwrap().score(), Some(Score::new(0, 0)));
        assert_eq!(board.text_summaries(), vec!["a 1 - b 0", "c 0 - d 0"]);
    }

    #[test]
    fn test_complete_game() {
        let mut board = Scoreboard::in_memory();
        let id = board.add(game("home", "away"));
        board.update(id, Score::new(3, 2)).unwrap();
        board.complete(id).unwrap();
        assert_eq!(board.get(id).unwrap().status(), GameStatus::Completed);
    }

    #[test]
    fn test_complete_unknown_id() {
        let mut board = Scoreboard::in_memory();
        assert_eq!(board.complete(3), Err(ScoreboardError::NotFound(3)));
    }

    #[test]
    fn test_complete_twice_is_rejected() {
        let mut board = Scoreboard::in_memory();
        let id = board.add(game("home", "away"));
        board.complete(id).unwrap();
        assert_eq!(
            board.complete(id),
            Err(ScoreboardError::InvalidTransition {
                id,
                from: GameStatus::Completed
            })
        );
        assert_eq!(board.get(id).unwrap().status(), GameStatus::Completed);
    }

    /// Store holding a game that never went through `Scoreboard::add`.
    fn board_with_pending_game() -> Scoreboard {
        let mut store = MemoryStore::<Game>::new();
        store.add(game("pending-home", "pending-away"));
        Scoreboard::new(store)
    }

    #[test]
    fn test_summary_excludes_pending_games() {
        let mut board = board_with_pending_game();
        let live = board.add(game("home", "away"));

        let ids: Vec<Option<Id>> = board.summaries().iter().map(|g| g.id()).collect();
        assert_eq!(ids, vec![Some(live)]);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_complete_pending_is_rejected() {
        let mut board = board_with_pending_game();
        assert_eq!(
            board.complete(0),
            Err(ScoreboardError::InvalidTransition {
                id: 0,
                from: GameStatus::Pending
            })
        );
        assert_eq!(board.get(0).unwrap().status(), GameStatus::Pending);
    }

    #[test]
    fn test_debug_output_lists_games() {
        let mut board = Scoreboard::in_memory();
        board.add(game("Mexico", "Canada"));
        let debug = format!("{:?}", board);
        assert!(debug.contains("Mexico"));
    }

    #[test]
    fn test_summary_single_game() {
        let mut board = Scoreboard::in_memory();
        let id = board.add(game("home", "away"));
        board.update(id, Score::new(3, 2)).unwrap();

        let summaries = board.summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total_score(), Some(5));
        assert_eq!(summaries[0].to_string(), "home 3 - away 2");
        assert_eq!(
            summaries[0].to_json(),
            GameJson {
                home: Team::new("home"),
                away: Team::new("away"),
                score: Some(Score::new(3, 2)),
            }
        );
    }

    #[test]
    fn test_summary_single_in_progress_amongst_completed() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = Scoreboard::in_memory();
        let scores = setup_in_progress(&mut board, games(2), &mut rng);

        let summaries = board.json_summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(
            summaries[0],
            GameJson {
                home: Team::new("home0"),
                away: Team::new("away0"),
                score: Some(scores[0].1),
            }
        );
    }

    #[test]
    fn test_summary_excludes_completed_games() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut board = Scoreboard::in_memory();
        setup_in_progress(&mut board, games(10), &mut rng);

        let summaries = board.summaries();
        assert_eq!(summaries.len(), 5);
        assert!(summaries.iter().all(|g| g.is_in_progress()));
    }

    #[test]
    fn test_summaries_ordered_by_total_score() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Scoreboard::in_memory();
        let scores = setup_in_progress(&mut board, games(10), &mut rng);

        // Independent expectation: even positions are the live ones.
        let mut expected: Vec<(Id, u64)> = scores
            .iter()
            .enumerate()
            .filter(|(index, _)| index % 2 == 0)
            .map(|(_, &(id, score))| (id, score.total()))
            .collect();
        expected.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

        let actual: Vec<(Id, u64)> = board
            .summaries()
            .iter()
            .map(|g| (g.id().unwrap(), g.total_score().unwrap()))
            .collect();
        assert_eq!(actual, expected);
        assert!(actual.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_tie_broken_by_most_recent() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut board = Scoreboard::in_memory();
        let scores = setup_in_progress(&mut board, games(10), &mut rng);
        let (older, newer) = (scores[2].0, scores[4].0);
        board.update(older, Score::new(2, 2)).unwrap();
        board.update(newer, Score::new(2, 2)).unwrap();

        let ids: Vec<Option<Id>> = board.summaries().iter().map(|g| g.id()).collect();
        let older_pos = ids.iter().position(|&id| id == Some(older)).unwrap();
        let newer_pos = ids.iter().position(|&id| id == Some(newer)).unwrap();
        assert!(newer_pos < older_pos);
    }

    #[test]
    fn test_tie_at_four_places_later_game_first() {
        let mut board = Scoreboard::in_memory();
        let x = board.add(game("X-home", "X-away"));
        let y = board.add(game("Y-home", "Y-away"));
        board.update(x, Score::new(4, 0)).unwrap();
        board.update(y, Score::new(1, 3)).unwrap();

        assert_eq!(
            board.text_summaries(),
            vec!["Y-home 1 - Y-away 3", "X-home 4 - X-away 0"]
        );
    }

    #[test]
    fn test_summary_order_independent_of_update_order() {
        let mut board = Scoreboard::in_memory();
        let ids: Vec<Id> = games(4).into_iter().map(|g| board.add(g)).collect();
        for &id in ids.iter().rev() {
            board.update(id, Score::new(1, 1)).unwrap();
        }
        let order: Vec<Option<Id>> = board.summaries().iter().map(|g| g.id()).collect();
        assert_eq!(order, vec![Some(3), Some(2), Some(1), Some(0)]);
    }

    #[test]
    fn test_text_summaries_match_rendering() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut board = Scoreboard::in_memory();
        setup_in_progress(&mut board, games(10), &mut rng);

        let expected: Vec<String> = board
            .summaries()
            .iter()
            .map(|g| {
                let s = g.score().unwrap();
                format!("{} {} - {} {}", g.home().name(), s.home, g.away().name(), s.away)
            })
            .collect();
        assert_eq!(board.text_summaries(), expected);
    }

    #[test]
    fn test_empty_board_has_no_summaries() {
        let board = Scoreboard::in_memory();
        assert!(board.is_empty());
        assert!(board.summaries().is_empty());
        assert!(board.text_summaries().is_empty());
    }
}
