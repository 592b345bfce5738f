//! Grid geometry and color value types
//!
//! Positions live in pixel space: a grid cell is `cell_size` pixels wide, so
//! a cell coordinate becomes a position via [`scale`].

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Integer 2D point / vector
pub type Point = IVec2;

/// Scale both coordinates uniformly
#[inline]
pub fn scale(point: Point, factor: i32) -> Point {
    point * factor
}

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}
