//! Terminal rendering module
//!
//! Rasterizes actors onto a character grid. Pure: knows nothing about the
//! terminal itself, which lives in `platform::terminal`.

pub mod grid;

pub use grid::{Cell, CellGrid};
