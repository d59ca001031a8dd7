use crate::grids::obstacle_grid::Maze;
use crate::grids::Cell;
use crate::runner::MoveQueue;

pub const BUNNY: &str = "🐰";
pub const ROCK: &str = "🪨";
pub const CARROT: &str = "🥕";
pub const GRASS: &str = "🌿";
pub const NEXT: &str = "🟨";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Bunny,
    Rock,
    Carrot,
    Grass,
    /// the square the bunny hops to next
    Next,
}

impl Tile {
    pub fn glyph(self) -> &'static str {
        match self {
            Tile::Bunny => BUNNY,
            Tile::Rock => ROCK,
            Tile::Carrot => CARROT,
            Tile::Grass => GRASS,
            Tile::Next => NEXT,
        }
    }
}

/// What to draw at `cell`. The bunny hides everything under it; a rock stays
/// a rock even when highlighted so a bump is visible.
pub fn tile_at(maze: &Maze, cell: Cell, bunny: Cell, next: Option<Cell>) -> Tile {
    if cell == bunny {
        Tile::Bunny
    } else if maze.is_obstacle(cell) {
        Tile::Rock
    } else if next == Some(cell) {
        Tile::Next
    } else if cell == maze.goal() {
        Tile::Carrot
    } else {
        Tile::Grass
    }
}

pub fn render_board(maze: &Maze, bunny: Cell, next: Option<Cell>) -> String {
    let size = maze.size();
    let mut out = String::new();

    for row in 0..size {
        for col in 0..size {
            out.push_str(tile_at(maze, Cell::new(col, row), bunny, next).glyph());
        }
        out.push('\n');
    }

    out
}

pub fn render_moves(moves: &MoveQueue) -> String {
    moves.iter().map(|dir| dir.arrow()).collect::<Vec<_>>().join(" ")
}

pub fn render_victory(total_wins: u64) -> String {
    format!(
        "\n   ⭐ ⭐ ⭐\n   🏆 Total Wins: {}\n\npress enter to play again\n",
        total_wins
    )
}
