//! In-memory services
//!
//! No terminal, no timing. The video surface closes itself after a fixed
//! number of presented frames and keeps the last frame for inspection.

use std::collections::VecDeque;

use anyhow::{Result, bail};

use super::{KeyboardService, VideoService};
use crate::renderer::CellGrid;
use crate::settings::Settings;
use crate::sim::{Actor, Point};

/// Replays a queue of directions, then reports no input
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeyboard {
    directions: VecDeque<Point>,
}

impl ScriptedKeyboard {
    pub fn new(directions: impl IntoIterator<Item = Point>) -> Self {
        Self {
            directions: directions.into_iter().collect(),
        }
    }

    pub fn push(&mut self, direction: Point) {
        self.directions.push_back(direction);
    }
}

impl KeyboardService for ScriptedKeyboard {
    fn get_direction(&mut self) -> Point {
        self.directions.pop_front().unwrap_or(Point::ZERO)
    }
}

/// Video surface with no display
#[derive(Debug, Clone)]
pub struct HeadlessVideo {
    width: i32,
    height: i32,
    open: bool,
    /// Close after this many flushed frames (`None` = stay open)
    max_frames: Option<u64>,
    frames: u64,
    drawing: bool,
    grid: CellGrid,
    last_frame: CellGrid,
}

impl HeadlessVideo {
    pub fn new(settings: &Settings, max_frames: Option<u64>) -> Self {
        let cols = settings.cols.max(0) as usize;
        let rows = settings.rows.max(0) as usize;
        let grid = CellGrid::new(cols, rows, settings.cell_size);
        Self {
            width: settings.play_width(),
            height: settings.play_height(),
            open: false,
            max_frames,
            frames: 0,
            drawing: false,
            last_frame: grid.clone(),
            grid,
        }
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The most recently flushed frame
    pub fn last_frame(&self) -> &CellGrid {
        &self.last_frame
    }

    /// Close the surface from outside (like a user closing the window)
    pub fn request_close(&mut self) {
        self.open = false;
    }
}

impl VideoService for HeadlessVideo {
    fn open_window(&mut self) -> Result<()> {
        if self.open {
            bail!("headless window already open");
        }
        self.open = self.max_frames != Some(0);
        Ok(())
    }

    fn close_window(&mut self) -> Result<()> {
        self.open = false;
        Ok(())
    }

    fn is_window_open(&self) -> bool {
        self.open
    }

    fn get_width(&self) -> i32 {
        self.width
    }

    fn get_height(&self) -> i32 {
        self.height
    }

    fn clear_buffer(&mut self) -> Result<()> {
        self.grid.clear();
        self.drawing = true;
        Ok(())
    }

    fn draw_actors(&mut self, actors: &[&Actor]) -> Result<()> {
        if !self.drawing {
            bail!("draw_actors called before clear_buffer");
        }
        self.grid.draw_actors(actors);
        Ok(())
    }

    fn flush_buffer(&mut self) -> Result<()> {
        self.last_frame.clone_from(&self.grid);
        self.drawing = false;
        self.frames += 1;
        if self.max_frames.is_some_and(|max| self.frames >= max) {
            self.open = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_keyboard_then_zero() {
        let mut keyboard = ScriptedKeyboard::new([Point::new(15, 0), Point::new(-15, 0)]);
        assert_eq!(keyboard.get_direction(), Point::new(15, 0));
        assert_eq!(keyboard.get_direction(), Point::new(-15, 0));
        assert_eq!(keyboard.get_direction(), Point::ZERO);
        keyboard.push(Point::new(15, 0));
        assert_eq!(keyboard.get_direction(), Point::new(15, 0));
    }

    #[test]
    fn test_headless_closes_after_max_frames() {
        let mut video = HeadlessVideo::new(&Settings::default(), Some(2));
        assert!(!video.is_window_open());
        video.open_window().expect("open");
        assert!(video.is_window_open());
        assert_eq!(video.get_width(), 900);
        assert_eq!(video.get_height(), 600);

        for _ in 0..2 {
            video.clear_buffer().expect("clear");
            video.flush_buffer().expect("flush");
        }
        assert!(!video.is_window_open());
        assert_eq!(video.frames(), 2);
    }

    #[test]
    fn test_draw_requires_clear() {
        let mut video = HeadlessVideo::new(&Settings::default(), None);
        video.open_window().expect("open");
        assert!(video.draw_actors(&[]).is_err());
    }
}
