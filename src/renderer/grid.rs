//! Cell grid rasterizer
//!
//! Actors live in pixel space; the terminal draws whole character cells.
//! A position maps to the cell `(x / cell_size, y / cell_size)` and the
//! actor's text is written left to right from there, clipped to the grid.

use crate::sim::{Actor, Color};

/// One character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Cell { ch: ' ', color: None }
    }
}

/// A fixed-size grid of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    cols: usize,
    rows: usize,
    cell_size: i32,
    cells: Vec<Cell>,
}

impl CellGrid {
    pub fn new(cols: usize, rows: usize, cell_size: i32) -> Self {
        Self {
            cols,
            rows,
            cell_size: cell_size.max(1),
            cells: vec![Cell::default(); cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Reset every cell to blank
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        let start = (row * self.cols).min(self.cells.len());
        let end = (start + self.cols).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Draw actors in order; later actors paint over earlier ones
    pub fn draw_actors(&mut self, actors: &[&Actor]) {
        for actor in actors {
            self.draw_actor(actor);
        }
    }

    fn draw_actor(&mut self, actor: &Actor) {
        // Off-grid positions (e.g. below the floor) draw nothing
        if actor.position.x < 0 || actor.position.y < 0 {
            return;
        }
        let col = (actor.position.x / self.cell_size) as usize;
        let row = (actor.position.y / self.cell_size) as usize;
        if row >= self.rows {
            return;
        }

        for (i, ch) in actor.text.chars().enumerate() {
            let c = col + i;
            if c >= self.cols {
                break;
            }
            self.cells[row * self.cols + c] = Cell {
                ch,
                color: Some(actor.color),
            };
        }
    }

    /// Plain-text dump, one line per row (trailing blanks trimmed)
    pub fn to_text(&self) -> String {
        (0..self.rows)
            .map(|r| {
                let line: String = self.row(r).iter().map(|c| c.ch).collect();
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
