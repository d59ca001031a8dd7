use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::generators::staircase;
use crate::grids::obstacle_grid::Maze;
use crate::grids::{Cell, Direction};
use crate::runner::{self, MoveQueue, Outcome, RunResult};
use crate::store::{KeyValueStore, StoreError, WinCounter};
use crate::timeline::{Frame, Playback, PlaybackState, Timeline};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// moves can be queued
    Planning,
    Playing(Playback),
    Victory,
}

/// One player's session: the current board, the queued moves and the
/// all-time win count.
pub struct Game<S: KeyValueStore> {
    config: GameConfig,
    size: usize,
    maze: Maze,
    path: Vec<Cell>,
    moves: MoveQueue,
    bunny: Cell,
    wins: WinCounter<S>,
    phase: Phase,
    last_run: Option<RunResult>,
    rng: StdRng,
}

impl<S: KeyValueStore> Game<S> {
    pub fn new(config: GameConfig, store: S) -> Result<Self, StoreError> {
        let wins = WinCounter::load(store)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let size = config.clamp_size(config.maze_size);

        let mut game = Self {
            config,
            size,
            maze: Maze::with_size(size),
            path: Vec::new(),
            moves: MoveQueue::new(),
            bunny: Cell::ORIGIN,
            wins,
            phase: Phase::Planning,
            last_run: None,
            rng,
        };
        game.regenerate();

        Ok(game)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// The monotone path kept clear when the current maze was generated.
    pub fn guaranteed_path(&self) -> &[Cell] {
        &self.path
    }

    pub fn moves(&self) -> &MoveQueue {
        &self.moves
    }

    pub fn bunny(&self) -> Cell {
        self.bunny
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn total_wins(&self) -> u64 {
        self.wins.total()
    }

    pub fn last_run(&self) -> Option<&RunResult> {
        self.last_run.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn set_size(&mut self, size: usize) -> usize {
        self.size = self.config.clamp_size(size);
        self.regenerate();
        self.size
    }

    /// Throws the board away and builds a new one. Any playback in progress
    /// is cancelled; queued moves are kept.
    pub fn regenerate(&mut self) {
        self.cancel_playback();
        let generated = staircase::generate(self.size, &mut self.rng);
        self.maze = generated.maze;
        self.path = generated.path;
        self.bunny = Cell::ORIGIN;
        self.phase = Phase::Planning;
        info!("new {0}x{0} maze", self.size);
    }

    /// Replaces the board with a hand-made one.
    pub fn load_maze(&mut self, maze: Maze) {
        self.cancel_playback();
        self.size = maze.size();
        self.maze = maze;
        self.path = Vec::new();
        self.bunny = Cell::ORIGIN;
        self.phase = Phase::Planning;
    }

    fn cancel_playback(&mut self) {
        if let Phase::Playing(playback) = &mut self.phase {
            playback.cancel();
            debug!("playback cancelled");
        }
    }

    /// Returns false if the move was not queued.
    pub fn push_move(&mut self, direction: Direction) -> bool {
        if self.phase != Phase::Planning {
            return false;
        }
        self.moves.push(direction);
        true
    }

    pub fn push_symbols(&mut self, input: &str) -> Result<usize, char> {
        if self.phase != Phase::Planning {
            return Ok(0);
        }
        self.moves.push_symbols(input)
    }

    pub fn clear_moves(&mut self) {
        self.moves.clear();
    }

    /// Runs the queued moves, counts a win, and starts playback.
    pub fn run(&mut self) -> Result<RunResult, StoreError> {
        let result = runner::run(&self.maze, self.moves.as_slice());
        info!(
            "run of {} moves: {:?} at {}",
            self.moves.len(),
            result.outcome,
            result.final_cell
        );

        self.wins.record(&result)?;
        self.moves.clear();

        let timeline = Timeline::from_run(
            &result,
            self.config.step_interval,
            self.config.settle_delay,
        );
        self.phase = Phase::Playing(Playback::new(timeline));
        self.last_run = Some(result.clone());

        Ok(result)
    }

    /// Advances playback to `elapsed` since `run`. Returns the frame to show,
    /// `None` once the board is back at rest.
    pub fn tick(&mut self, elapsed: Duration) -> Option<Frame> {
        let state = match &self.phase {
            Phase::Playing(playback) => match playback.poll(elapsed) {
                PlaybackState::Showing(frame) => Ok(*frame),
                PlaybackState::Settled(outcome) => Err(Some(outcome)),
                PlaybackState::Cancelled => Err(None),
            },
            _ => return None,
        };

        match state {
            Ok(frame) => {
                self.bunny = frame.bunny;
                Some(frame)
            }
            Err(outcome) => {
                self.bunny = Cell::ORIGIN;
                self.phase = if outcome == Some(Outcome::ReachedGoal) {
                    Phase::Victory
                } else {
                    Phase::Planning
                };
                None
            }
        }
    }

    /// Leaves the victory screen and starts a fresh round.
    pub fn dismiss_victory(&mut self) {
        if self.phase != Phase::Victory {
            return;
        }
        self.reset_round();
    }

    pub fn reset_round(&mut self) {
        self.moves.clear();
        self.last_run = None;
        self.regenerate();
    }
}

#[cfg(test)]
mod test_game {
    use super::*;
    use crate::grids::Direction::*;
    use crate::store::MemoryStore;

    fn config() -> GameConfig {
        GameConfig {
            seed: Some(5),
            ..GameConfig::default()
        }
    }

    fn game() -> Game<MemoryStore> {
        Game::new(config(), MemoryStore::new()).unwrap()
    }

    fn play_out<S: KeyValueStore>(game: &mut Game<S>) {
        let end = match game.phase() {
            Phase::Playing(playback) => playback.timeline().settle_at(),
            _ => return,
        };
        game.tick(end);
    }

    #[test]
    fn starts_planning_with_default_size() {
        let game = game();
        assert_eq!(game.size(), 8);
        assert_eq!(game.maze().size(), 8);
        assert_eq!(*game.phase(), Phase::Planning);
        assert_eq!(game.guaranteed_path().len(), 15);
        assert_eq!(game.total_wins(), 0);
    }

    #[test]
    fn size_changes_are_clamped_and_regenerate() {
        let mut game = game();
        assert_eq!(game.set_size(3), 5);
        assert_eq!(game.maze().size(), 5);
        assert_eq!(game.set_size(99), 15);
        assert_eq!(game.maze().size(), 15);
        assert_eq!(game.guaranteed_path().len(), 29);
    }

    #[test]
    fn guaranteed_path_always_wins() {
        let mut game = game();
        for size in 5..=15 {
            game.set_size(size);
            let queue = MoveQueue::from_path(game.guaranteed_path());
            for dir in queue.iter() {
                assert!(game.push_move(*dir));
            }

            let before = game.total_wins();
            let result = game.run().unwrap();
            assert_eq!(result.outcome, Outcome::ReachedGoal);
            assert_eq!(game.total_wins(), before + 1);

            play_out(&mut game);
            assert_eq!(*game.phase(), Phase::Victory);
            game.dismiss_victory();
            assert_eq!(*game.phase(), Phase::Planning);
        }
        assert_eq!(game.total_wins(), 11);
    }

    #[test]
    fn blocked_run_plays_back_then_returns_to_planning() {
        let mut game = game();
        let mut maze = Maze::with_size(3);
        maze.set_obstacle(Cell::new(2, 1), true);
        game.load_maze(maze);

        game.push_symbols("RRD").unwrap();
        let result = game.run().unwrap();
        assert_eq!(result.outcome, Outcome::HitObstacle);
        assert_eq!(result.final_cell, Cell::new(2, 0));
        assert_eq!(game.total_wins(), 0);
        assert!(game.moves().is_empty());

        // no queueing mid playback
        assert!(!game.push_move(Up));

        let frame = game.tick(Duration::from_millis(1200)).unwrap();
        assert_eq!(frame.bunny, Cell::new(2, 0));
        assert_eq!(frame.next, Some(Cell::new(2, 1)));
        assert_eq!(game.bunny(), Cell::new(2, 0));

        assert_eq!(game.tick(Duration::from_secs(60)), None);
        assert_eq!(*game.phase(), Phase::Planning);
        assert_eq!(game.bunny(), Cell::ORIGIN);
        assert_eq!(
            game.last_run().map(|r| r.outcome),
            Some(Outcome::HitObstacle)
        );
    }

    #[test]
    fn two_by_two_win_counts_once() {
        let mut game = game();
        game.load_maze(Maze::with_size(2));
        game.push_move(Right);
        game.push_move(Down);

        let result = game.run().unwrap();
        assert_eq!(result.outcome, Outcome::ReachedGoal);
        assert_eq!(result.final_cell, Cell::new(1, 1));
        assert_eq!(game.total_wins(), 1);

        play_out(&mut game);
        assert_eq!(*game.phase(), Phase::Victory);
        // ticking the settled board changes nothing
        assert_eq!(game.tick(Duration::from_secs(100)), None);
        assert_eq!(game.total_wins(), 1);
    }

    #[test]
    fn regenerate_cancels_playback() {
        let mut game = game();
        game.push_symbols("dd").unwrap();
        game.run().unwrap();
        assert!(matches!(game.phase(), Phase::Playing(_)));

        game.regenerate();
        assert_eq!(*game.phase(), Phase::Planning);
        assert_eq!(game.tick(Duration::from_millis(500)), None);
    }

    #[test]
    fn regenerate_keeps_queue_and_clear_empties_it() {
        let mut game = game();
        game.push_symbols("rdrd").unwrap();
        game.regenerate();
        assert_eq!(game.moves().len(), 4);

        game.clear_moves();
        assert!(game.moves().is_empty());
    }

    #[test]
    fn bad_symbol_queues_nothing() {
        let mut game = game();
        assert_eq!(game.push_symbols("rrq"), Err('q'));
        assert!(game.moves().is_empty());
    }

    #[test]
    fn same_seed_same_board() {
        assert_eq!(game().maze(), game().maze());
    }
}
