//! In-memory surface for tests and windowless runs

use glam::IVec2;

use super::{Clock, Surface};
use crate::error::Result;
use crate::{Rgb, Viewport};

pub struct HeadlessSurface {
    viewport: Viewport,
    clock: Clock,
    /// Manual clock advance per presented frame
    frame_cost_ms: u64,
    close_after: Option<u64>,
    close_requested: bool,
    color: Rgb,
    background: Rgb,
    pending: Vec<(IVec2, Rgb)>,
    last_frame: Vec<(IVec2, Rgb)>,
    frames_presented: u64,
    points_drawn: u64,
}

impl HeadlessSurface {
    /// Surface on the system clock
    pub fn new(viewport: Viewport) -> Self {
        Self::with_clock(viewport, Clock::system())
    }

    pub fn with_clock(viewport: Viewport, clock: Clock) -> Self {
        Self {
            viewport,
            clock,
            frame_cost_ms: 0,
            close_after: None,
            close_requested: false,
            color: Rgb::default(),
            background: Rgb::default(),
            pending: Vec::new(),
            last_frame: Vec::new(),
            frames_presented: 0,
            points_drawn: 0,
        }
    }

    /// Manual clock starting at `start_ms`, advancing `frame_cost_ms` per present
    pub fn manual(viewport: Viewport, start_ms: u64, frame_cost_ms: u64) -> Self {
        Self {
            frame_cost_ms,
            ..Self::with_clock(viewport, Clock::manual(start_ms))
        }
    }

    /// Report a close event once `frames` frames have been presented
    pub fn close_after(mut self, frames: u64) -> Self {
        self.close_after = Some(frames);
        self
    }

    /// Queue a close event for the next poll
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Total in-bounds points plotted over the run
    pub fn points_drawn(&self) -> u64 {
        self.points_drawn
    }

    /// Pixels of the last presented frame, in draw order
    pub fn last_frame(&self) -> &[(IVec2, Rgb)] {
        &self.last_frame
    }

    pub fn background(&self) -> Rgb {
        self.background
    }
}

impl Surface for HeadlessSurface {
    fn poll_close(&mut self) -> Result<bool> {
        let budget_spent = self.close_after.is_some_and(|n| self.frames_presented >= n);
        Ok(self.close_requested || budget_spent)
    }

    fn clear(&mut self, color: Rgb) {
        self.background = color;
        self.pending.clear();
    }

    fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn draw_point(&mut self, x: i32, y: i32) {
        let inside = x >= 0 && y >= 0 && (x as u32) < self.viewport.width && (y as u32) < self.viewport.height;
        if inside {
            self.pending.push((IVec2::new(x, y), self.color));
            self.points_drawn += 1;
        }
    }

    fn present(&mut self) -> Result<()> {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
        self.clock.advance(self.frame_cost_ms);
        Ok(())
    }

    fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }

    fn sleep_millis(&mut self, ms: u64) {
        self.clock.sleep(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_outside_are_dropped() {
        let mut surface = HeadlessSurface::manual(Viewport::new(100, 100), 0, 16);
        surface.clear(Rgb::default());
        surface.set_color(Rgb::new(1, 2, 3));
        surface.draw_point(5, 5);
        surface.draw_point(-1, 5);
        surface.draw_point(100, 5);
        surface.present().unwrap();

        assert_eq!(surface.last_frame(), &[(IVec2::new(5, 5), Rgb::new(1, 2, 3))]);
        assert_eq!(surface.points_drawn(), 1);
        assert_eq!(surface.now_millis(), 16);
    }

    #[test]
    fn test_close_after_budget() {
        let mut surface = HeadlessSurface::manual(Viewport::default(), 0, 0).close_after(2);
        assert!(!surface.poll_close().unwrap());
        surface.present().unwrap();
        assert!(!surface.poll_close().unwrap());
        surface.present().unwrap();
        assert!(surface.poll_close().unwrap());
    }

    #[test]
    fn test_request_close() {
        let mut surface = HeadlessSurface::new(Viewport::default());
        surface.request_close();
        assert!(surface.poll_close().unwrap());
    }
}
