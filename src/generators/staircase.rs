use crate::generators::{GeneratedMaze, Generator};
use crate::grids::obstacle_grid::Maze;
use crate::grids::Cell;
use rand::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    /// walking the guaranteed path towards the goal
    Walking,
    /// scattering rocks, row by row
    Scattering(usize),
    Done,
}

/// Random staircase walk from the top left to the bottom right, every other
/// square becomes a rock on a coin flip.
pub struct StaircaseWalk<R: Rng> {
    maze: Maze,
    path: Vec<Cell>,
    on_path: Vec<bool>,
    cursor: Cell,
    phase: Phase,
    rng: R,
}

impl StaircaseWalk<ThreadRng> {
    pub fn new(size: usize) -> Self {
        Self::with_rng(size, rand::thread_rng())
    }
}

impl<R: Rng> StaircaseWalk<R> {
    pub fn with_rng(size: usize, rng: R) -> Self {
        let size = size.max(1);
        let mut on_path = vec![false; size * size];
        on_path[0] = true;

        Self {
            maze: Maze::with_size(size),
            path: vec![Cell::ORIGIN],
            on_path,
            cursor: Cell::ORIGIN,
            phase: Phase::Walking,
            rng,
        }
    }

    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    fn walk(&mut self) {
        let goal = self.maze.goal();
        if self.cursor == goal {
            self.phase = Phase::Scattering(0);
            return;
        }

        let last = self.maze.size() - 1;
        let heads = self.rng.gen_bool(0.5);
        // one axis maxed out forces the other
        if heads && self.cursor.x < last {
            self.cursor.x += 1;
        } else if self.cursor.y < last {
            self.cursor.y += 1;
        } else {
            self.cursor.x += 1;
        }

        self.on_path[(self.cursor.y * self.maze.size()) + self.cursor.x] = true;
        self.path.push(self.cursor);

        if self.cursor == goal {
            self.phase = Phase::Scattering(0);
        }
    }

    fn scatter_row(&mut self, row: usize) {
        let size = self.maze.size();
        for col in 0..size {
            if !self.on_path[(row * size) + col] {
                let rock = self.rng.gen_bool(0.5);
                self.maze.set_obstacle(Cell::new(col, row), rock);
            }
        }

        self.phase = if row + 1 < size {
            Phase::Scattering(row + 1)
        } else {
            Phase::Done
        };
    }
}

impl<R: Rng> Generator for StaircaseWalk<R> {
    fn step_generation(&mut self) {
        match self.phase {
            Phase::Walking => self.walk(),
            Phase::Scattering(row) => self.scatter_row(row),
            Phase::Done => {}
        }
    }

    fn next_step(&mut self) -> &Maze {
        self.step_generation();
        &self.maze
    }

    fn generate_maze(&mut self) -> GeneratedMaze {
        while !self.is_done() {
            self.step_generation();
        }

        log::debug!(
            "generated {0}x{0} maze, path of {1} squares, {2} rocks",
            self.maze.size(),
            self.path.len(),
            self.maze.obstacle_count()
        );

        GeneratedMaze {
            maze: self.maze.clone(),
            path: self.path.clone(),
        }
    }

    fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }
}

/// One-shot generation of a `size` by `size` maze.
pub fn generate<R: Rng>(size: usize, rng: &mut R) -> GeneratedMaze {
    StaircaseWalk::with_rng(size, rng).generate_maze()
}
