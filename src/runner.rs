use crate::grids::obstacle_grid::Maze;
use crate::grids::{Cell, Direction};

/// Moves queued up by the player for the next run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveQueue {
    moves: Vec<Direction>,
}

impl MoveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, direction: Direction) {
        self.moves.push(direction);
    }

    /// Queues every `U`/`D`/`L`/`R` letter of `input`. Nothing is queued if
    /// any other character shows up, the offending one is returned instead.
    pub fn push_symbols(&mut self, input: &str) -> Result<usize, char> {
        let parsed = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Direction::from_symbol(c).ok_or(c))
            .collect::<Result<Vec<_>, _>>()?;

        let count = parsed.len();
        self.moves.extend(parsed);
        Ok(count)
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn as_slice(&self) -> &[Direction] {
        &self.moves
    }

    pub fn iter(&self) -> impl Iterator<Item = &Direction> {
        self.moves.iter()
    }

    /// Re-expresses a chain of neighboring squares as the moves walking it.
    /// Gaps between squares are skipped.
    pub fn from_path(path: &[Cell]) -> Self {
        Self {
            moves: path
                .windows(2)
                .filter_map(|pair| pair[0].direction_to(pair[1]))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    ReachedGoal,
    HitObstacle,
    Incomplete,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::ReachedGoal => "Bunny reached the goal!",
            Outcome::HitObstacle => "Bunny hit an obstacle!",
            Outcome::Incomplete => "Bunny did not reach the goal.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub final_cell: Cell,
    pub outcome: Outcome,
    /// every square the bunny stood on, starting with the origin
    pub traversed: Vec<Cell>,
    /// the rock the bunny bumped into, if any
    pub blocked_at: Option<Cell>,
    pub moves_used: usize,
}

impl RunResult {
    pub fn is_win(&self) -> bool {
        self.outcome == Outcome::ReachedGoal
    }
}

/// Walks `moves` from the top left square of `maze`.
///
/// Moves pushing against the edge of the grid are clamped and keep the bunny
/// in place. The first move onto a rock ends the run without committing it.
pub fn run(maze: &Maze, moves: &[Direction]) -> RunResult {
    let size = maze.size();
    let mut position = Cell::ORIGIN;
    let mut traversed = vec![position];

    for (used, direction) in moves.iter().enumerate() {
        let candidate = position.step_clamped(*direction, size);

        if maze.is_obstacle(candidate) {
            log::debug!(
                "move {} ({:?}) from {} blocked by rock at {}",
                used + 1,
                direction,
                position,
                candidate
            );
            return RunResult {
                final_cell: position,
                outcome: Outcome::HitObstacle,
                traversed,
                blocked_at: Some(candidate),
                moves_used: used + 1,
            };
        }

        position = candidate;
        traversed.push(position);
    }

    let outcome = if position == maze.goal() {
        Outcome::ReachedGoal
    } else {
        Outcome::Incomplete
    };

    RunResult {
        final_cell: position,
        outcome,
        traversed,
        blocked_at: None,
        moves_used: moves.len(),
    }
}
