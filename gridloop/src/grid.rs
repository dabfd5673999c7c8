// grid.rs - Grid types for the cell animation

use std::fmt;
use std::sync::Arc;

use rand::Rng;

use crate::color::{Color, HueBand};
use crate::config::{GRID_HEIGHT, GRID_WIDTH};

/// One revealed grid position. Cells are replaced, never edited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub color: Color,
}

impl Cell {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.color)
    }
}

/// Column/row coordinate used to address unrevealed cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

pub type TRow = [Option<Cell>; GRID_WIDTH];
pub type TGrid = [TRow; GRID_HEIGHT];

/// Fixed-size matrix of optional cells. The dimensions are part of the type,
/// so they cannot change after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: TGrid,
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grid {
    pub fn empty() -> Self {
        Self { cells: [[None; GRID_WIDTH]; GRID_HEIGHT] }
    }

    /// Grid with every cell holding an independently sampled color.
    pub fn random<R: Rng + ?Sized>(band: HueBand, rng: &mut R) -> Self {
        let mut grid = Self::empty();
        for row in grid.cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = Some(Cell::new(Color::random(band, rng)));
            }
        }
        grid
    }

    pub fn height(&self) -> usize {
        GRID_HEIGHT
    }

    pub fn width(&self) -> usize {
        GRID_WIDTH
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row)?.get(col)?.as_ref()
    }

    /// Places `cell` at `point`. Returns false and leaves the grid untouched
    /// when the point is outside the grid.
    pub fn set(&mut self, point: Point, cell: Cell) -> bool {
        match self.cells.get_mut(point.y).and_then(|row| row.get_mut(point.x)) {
            Some(slot) => {
                *slot = Some(cell);
                true
            }
            None => false,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &TRow> {
        self.cells.iter()
    }

    /// Every coordinate that has not been revealed yet, in row-major order.
    pub fn empty_points(&self) -> Vec<Point> {
        let mut points = Vec::new();
        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if cell.is_none() {
                    points.push(Point::new(x, y));
                }
            }
        }
        points
    }

    pub fn revealed_count(&self) -> usize {
        self.rows().map(|row| row.iter().filter(|cell| cell.is_some()).count()).sum()
    }

    pub fn is_full(&self) -> bool {
        self.revealed_count() == GRID_WIDTH * GRID_HEIGHT
    }

    /// Read-only copy for handing to the renderer.
    pub fn snapshot(&self) -> Arc<Grid> {
        Arc::new(self.clone())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                match cell {
                    Some(cell) => write!(f, "{cell}")?,
                    None => write!(f, "[ ]")?,
                }
            }
        }
        Ok(())
    }
}
