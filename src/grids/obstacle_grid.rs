use crate::grids::Cell;

/// Square grid of obstacles. `true` squares block the bunny.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    size: usize,
    cells: Vec<bool>,
}

impl Maze {
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Builds a maze from rows of obstacle flags, `rows[y][x]`.
    /// Returns `None` unless the rows form a non-empty square.
    pub fn from_rows(rows: &[Vec<bool>]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|row| row.len() != size) {
            return None;
        }

        Some(Self {
            size,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn start(&self) -> Cell {
        Cell::ORIGIN
    }

    pub fn goal(&self) -> Cell {
        let last = self.size.saturating_sub(1);
        Cell::new(last, last)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.size && cell.y < self.size
    }

    fn index_of(&self, cell: Cell) -> usize {
        (self.size * cell.y) + cell.x
    }

    /// Squares outside the grid count as blocked.
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        if !self.contains(cell) {
            return true;
        }
        self.cells[self.index_of(cell)]
    }

    pub fn is_passable(&self, cell: Cell) -> bool {
        !self.is_obstacle(cell)
    }

    // returns the previous state of the square
    pub fn set_obstacle(&mut self, cell: Cell, obstacle: bool) -> bool {
        let index = self.index_of(cell);
        let prev = self.cells[index];
        self.cells[index] = obstacle;

        prev
    }

    pub fn clear(&mut self) {
        self.cells = vec![false; self.cells.len()];
    }

    pub fn fill(&mut self) {
        self.cells = vec![true; self.cells.len()];
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|blocked| **blocked).count()
    }

    /// Rows of obstacle flags, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.size.max(1))
    }
}
