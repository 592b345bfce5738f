//! Platform abstraction layer
//!
//! The Director talks to the outside world through two services:
//! - [`KeyboardService`]: per-frame directional input
//! - [`VideoService`]: output surface lifecycle and drawing
//!
//! `terminal` implements both on crossterm; `headless` implements them in
//! memory for tests and unattended runs.

use anyhow::Result;

use crate::sim::{Actor, Point};

pub mod headless;
pub mod terminal;

pub use headless::{HeadlessVideo, ScriptedKeyboard};
pub use terminal::{TerminalKeyboard, TerminalVideo};

/// Directional input
pub trait KeyboardService {
    /// Direction of the currently held movement keys, already scaled by the
    /// step distance. Must not block; returns the zero vector with no input.
    fn get_direction(&mut self) -> Point;
}

/// Output surface
pub trait VideoService {
    fn open_window(&mut self) -> Result<()>;
    fn close_window(&mut self) -> Result<()>;
    fn is_window_open(&self) -> bool;
    /// Surface width in pixels
    fn get_width(&self) -> i32;
    /// Surface height in pixels
    fn get_height(&self) -> i32;
    fn clear_buffer(&mut self) -> Result<()>;
    fn draw_actors(&mut self, actors: &[&Actor]) -> Result<()>;
    fn flush_buffer(&mut self) -> Result<()>;
}
