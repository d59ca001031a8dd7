pub mod obstacle_grid;

use std::fmt;

/// A square on the grid, `x` grows to the right and `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Moves one square towards `direction`, staying inside a `size` wide grid.
    /// A step into the edge of the grid leaves that axis untouched.
    pub fn step_clamped(self, direction: Direction, size: usize) -> Cell {
        let max = size.saturating_sub(1);
        match direction {
            Direction::Up => Cell::new(self.x, self.y.saturating_sub(1)),
            Direction::Down => Cell::new(self.x, (self.y + 1).min(max)),
            Direction::Left => Cell::new(self.x.saturating_sub(1), self.y),
            Direction::Right => Cell::new((self.x + 1).min(max), self.y),
        }
    }

    /// Direction of a single orthogonal step from `self` to `other`
    pub fn direction_to(self, other: Cell) -> Option<Direction> {
        if self.y == other.y && self.x + 1 == other.x {
            Some(Direction::Right)
        } else if self.y == other.y && other.x + 1 == self.x {
            Some(Direction::Left)
        } else if self.x == other.x && self.y + 1 == other.y {
            Some(Direction::Down)
        } else if self.x == other.x && other.y + 1 == self.y {
            Some(Direction::Up)
        } else {
            None
        }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((x, y): (usize, usize)) -> Self {
        Cell::new(x, y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Up => "⬆️",
            Direction::Down => "⬇️",
            Direction::Left => "⬅️",
            Direction::Right => "➡️",
        }
    }
}

impl std::ops::Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Self::Output {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}
