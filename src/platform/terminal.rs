//! Terminal surface
//!
//! Scales the viewport onto the terminal grid. Each character cell shows two
//! stacked pixels through an upper half block: foreground is the top pixel,
//! background the bottom one.

use std::io::{self, IsTerminal, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use super::{Clock, Surface};
use crate::error::{PacsaverError, Result};
use crate::{Rgb, Viewport};

const HALF_BLOCK: char = '▀';

pub struct TerminalSurface {
    out: Stdout,
    viewport: Viewport,
    clock: Clock,
    cols: u16,
    rows: u16,
    /// `cols x rows*2` pixel grid, `None` is background
    cells: Vec<Option<Rgb>>,
    color: Rgb,
    background: Rgb,
}

impl TerminalSurface {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor
    ///
    /// On failure everything acquired so far is released again.
    pub fn create(viewport: Viewport) -> Result<Self> {
        let mut out = io::stdout();
        if !out.is_terminal() {
            return Err(PacsaverError::BackendInit("stdout is not a terminal".into()));
        }

        enable_raw_mode().map_err(|e| PacsaverError::BackendInit(format!("failed to enable raw mode: {e}")))?;

        if let Err(e) = execute!(out, EnterAlternateScreen, Hide) {
            restore_terminal(&mut out);
            return Err(PacsaverError::BackendInit(format!(
                "failed to enter alternate screen: {e}"
            )));
        }

        let (cols, rows) = match terminal::size() {
            Ok(size) => size,
            Err(e) => {
                restore_terminal(&mut out);
                return Err(PacsaverError::BackendInit(format!("failed to query terminal size: {e}")));
            }
        };

        log::info!("Terminal surface {}x{} cells for a {}x{} viewport", cols, rows, viewport.width, viewport.height);

        let mut surface = Self {
            out,
            viewport,
            clock: Clock::system(),
            cols: 0,
            rows: 0,
            cells: Vec::new(),
            color: Rgb::default(),
            background: Rgb::default(),
        };
        surface.resize(cols, rows);
        Ok(surface)
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.cells = vec![None; self.cols as usize * self.rows as usize * 2];
    }

    fn pixel_rows(&self) -> usize {
        self.rows as usize * 2
    }

    fn is_close_key(key: &KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        matches!(
            (key.code, key.modifiers),
            (KeyCode::Esc, _) | (KeyCode::Char('q'), _) | (KeyCode::Char('Q'), _)
        ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn restore_terminal(out: &mut Stdout) {
    if let Err(err) = execute!(out, ResetColor, Show, LeaveAlternateScreen) {
        log::error!("failed to leave alternate screen: {err}");
    }
    if let Err(err) = disable_raw_mode() {
        log::error!("failed to disable raw mode: {err}");
    }
}

impl Surface for TerminalSurface {
    fn poll_close(&mut self) -> Result<bool> {
        let mut close = false;
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if Self::is_close_key(&key) => close = true,
                Event::Resize(cols, rows) => {
                    log::debug!("Terminal resized to {}x{}", cols, rows);
                    self.resize(cols, rows);
                }
                _ => {}
            }
        }
        Ok(close)
    }

    fn clear(&mut self, color: Rgb) {
        self.background = color;
        self.cells.fill(None);
    }

    fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn draw_point(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u64, y as u64);
        let (width, height) = (self.viewport.width as u64, self.viewport.height as u64);
        if x >= width || y >= height {
            return;
        }
        let col = (x * self.cols as u64 / width) as usize;
        let row = (y * self.pixel_rows() as u64 / height) as usize;
        let index = row * self.cols as usize + col;
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = Some(self.color);
        }
    }

    fn present(&mut self) -> Result<()> {
        let cols = self.cols as usize;
        let mut last: Option<(Rgb, Rgb)> = None;

        for row in 0..self.rows {
            queue!(self.out, MoveTo(0, row))?;
            let top_row = row as usize * 2 * cols;
            let bottom_row = top_row + cols;
            for col in 0..cols {
                let top = self.cells[top_row + col].unwrap_or(self.background);
                let bottom = self.cells[bottom_row + col].unwrap_or(self.background);
                if last != Some((top, bottom)) {
                    queue!(self.out, SetForegroundColor(to_color(top)), SetBackgroundColor(to_color(bottom)))?;
                    last = Some((top, bottom));
                }
                queue!(self.out, Print(HALF_BLOCK))?;
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        Ok(())
    }

    fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }

    fn sleep_millis(&mut self, ms: u64) {
        self.clock.sleep(ms);
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        restore_terminal(&mut self.out);
    }
}
