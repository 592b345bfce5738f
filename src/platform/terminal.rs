//! Terminal services on crossterm
//!
//! The keyboard and the video surface share one close flag: quit keys are
//! read from the same event queue as movement keys, but it is the video
//! surface that reports itself closed.

use std::cell::Cell as FlagCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, queue, style, terminal};

use super::{KeyboardService, VideoService};
use crate::renderer::CellGrid;
use crate::settings::Settings;
use crate::sim::{Actor, Color, Point};

/// Create a keyboard/video pair sharing a close flag
pub fn open_pair(settings: &Settings) -> (TerminalKeyboard, TerminalVideo) {
    let closed = Rc::new(FlagCell::new(false));
    (
        TerminalKeyboard::new(settings.cell_size, closed.clone()),
        TerminalVideo::new(settings, closed),
    )
}

/// Reads arrow keys (or `a`/`d`) without blocking
pub struct TerminalKeyboard {
    step: i32,
    closed: Rc<FlagCell<bool>>,
}

impl TerminalKeyboard {
    fn new(step: i32, closed: Rc<FlagCell<bool>>) -> Self {
        Self { step, closed }
    }

    fn read_pending(&mut self) -> io::Result<i32> {
        let mut dx = 0;
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match key.code {
                KeyCode::Left | KeyCode::Char('a') => dx = -1,
                KeyCode::Right | KeyCode::Char('d') => dx = 1,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.closed.set(true);
                }
                KeyCode::Char('q') | KeyCode::Esc => self.closed.set(true),
                _ => {}
            }
        }
        Ok(dx)
    }
}

impl KeyboardService for TerminalKeyboard {
    fn get_direction(&mut self) -> Point {
        match self.read_pending() {
            Ok(dx) => Point::new(dx, 0) * self.step,
            Err(e) => {
                log::warn!("Keyboard read failed: {e}");
                Point::ZERO
            }
        }
    }
}

/// The play field drawn in the alternate screen
pub struct TerminalVideo {
    caption: String,
    width: i32,
    height: i32,
    frame_interval: Duration,
    grid: CellGrid,
    open: bool,
    raw: bool,
    closed: Rc<FlagCell<bool>>,
    last_flush: Option<Instant>,
    stdout: io::Stdout,
}

impl TerminalVideo {
    fn new(settings: &Settings, closed: Rc<FlagCell<bool>>) -> Self {
        let cols = settings.cols.max(0) as usize;
        let rows = settings.rows.max(0) as usize;
        Self {
            caption: settings.caption.clone(),
            width: settings.play_width(),
            height: settings.play_height(),
            frame_interval: Duration::from_secs(1) / settings.frame_rate.max(1),
            grid: CellGrid::new(cols, rows, settings.cell_size),
            open: false,
            raw: false,
            closed,
            last_flush: None,
            stdout: io::stdout(),
        }
    }

    fn restore(&mut self) {
        if self.raw {
            let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
            self.raw = false;
        }
    }

    fn render_status(&mut self) -> Result<()> {
        let status = format!(" {} | \u{2190}\u{2192}: move | q: quit ", self.caption);
        let mut cs = style::ContentStyle::default();
        cs.attributes.set(style::Attribute::Dim);
        queue!(
            self.stdout,
            cursor::MoveTo(0, self.grid.rows() as u16),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::PrintStyledContent(style::StyledContent::new(cs, status)),
        )?;
        Ok(())
    }

    /// Sleep off whatever is left of the current frame
    fn pace(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last_flush {
            let elapsed = now.duration_since(last);
            if elapsed < self.frame_interval {
                thread::sleep(self.frame_interval - elapsed);
            }
        }
        self.last_flush = Some(Instant::now());
    }
}

impl VideoService for TerminalVideo {
    fn open_window(&mut self) -> Result<()> {
        let (term_w, term_h) = terminal::size()?;
        let need_w = u16::try_from(self.grid.cols()).context("Play field too wide")?;
        // +1 for the status line
        let need_h = u16::try_from(self.grid.rows() + 1).context("Play field too tall")?;
        if term_w < need_w || term_h < need_h {
            bail!(
                "Terminal too small: need {}x{}, have {}x{}",
                need_w,
                need_h,
                term_w,
                term_h,
            );
        }

        terminal::enable_raw_mode()?;
        self.raw = true;
        execute!(
            self.stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;
        self.closed.set(false);
        self.open = true;
        log::info!("Opened {}x{} play field", need_w, need_h - 1);
        Ok(())
    }

    fn close_window(&mut self) -> Result<()> {
        self.restore();
        self.open = false;
        Ok(())
    }

    fn is_window_open(&self) -> bool {
        self.open && !self.closed.get()
    }

    fn get_width(&self) -> i32 {
        self.width
    }

    fn get_height(&self) -> i32 {
        self.height
    }

    fn clear_buffer(&mut self) -> Result<()> {
        self.grid.clear();
        Ok(())
    }

    fn draw_actors(&mut self, actors: &[&Actor]) -> Result<()> {
        self.grid.draw_actors(actors);
        Ok(())
    }

    fn flush_buffer(&mut self) -> Result<()> {
        for y in 0..self.grid.rows() {
            queue!(self.stdout, cursor::MoveTo(0, y as u16))?;
            for cell in self.grid.row(y) {
                let mut cs = style::ContentStyle::default();
                cs.foreground_color = cell.color.map(to_ct_color);
                queue!(
                    self.stdout,
                    style::PrintStyledContent(style::StyledContent::new(cs, cell.ch))
                )?;
            }
        }
        self.render_status()?;
        self.stdout.flush()?;
        self.pace();
        Ok(())
    }
}

impl Drop for TerminalVideo {
    fn drop(&mut self) {
        // Leave the user's terminal usable even if the game loop bailed
        self.restore();
    }
}

pub fn to_ct_color(c: Color) -> style::Color {
    style::Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}
