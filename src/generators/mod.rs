pub mod staircase;

use crate::grids::obstacle_grid::Maze;
use crate::grids::Cell;

/// A generated maze together with the monotone path that was kept clear
/// from the start square to the goal.
#[derive(Debug, Clone)]
pub struct GeneratedMaze {
    pub maze: Maze,
    pub path: Vec<Cell>,
}

pub trait Generator {
    fn step_generation(&mut self);
    fn next_step(&mut self) -> &Maze;
    fn generate_maze(&mut self) -> GeneratedMaze;
    fn is_done(&self) -> bool;
}
