//! Platform abstraction layer
//!
//! The frame driver only talks to a `Surface`:
//! - Close events
//! - Point plotting and presentation
//! - Monotonic time and sleeping
//!
//! Backends: a crossterm terminal and an in-memory headless surface.

pub mod headless;
pub mod terminal;

pub use headless::HeadlessSurface;
pub use terminal::TerminalSurface;

use std::time::{Duration, Instant};

use crate::Rgb;
use crate::error::Result;

/// Drawing target and clock the frame driver runs against
pub trait Surface {
    /// Drain pending input; true if a close was requested
    fn poll_close(&mut self) -> Result<bool>;

    fn clear(&mut self, color: Rgb);

    fn set_color(&mut self, color: Rgb);

    /// Plot one pixel in viewport coordinates with the current colour.
    /// Points outside the viewport are ignored.
    fn draw_point(&mut self, x: i32, y: i32);

    fn present(&mut self) -> Result<()>;

    /// Monotonic milliseconds since the surface was created
    fn now_millis(&self) -> u64;

    fn sleep_millis(&mut self, ms: u64);
}

/// Time source: the real monotonic clock, or a manual one for replayable runs
#[derive(Debug, Clone)]
pub enum Clock {
    System { epoch: Instant },
    Manual { now_ms: u64 },
}

impl Clock {
    pub fn system() -> Self {
        Clock::System { epoch: Instant::now() }
    }

    pub fn manual(start_ms: u64) -> Self {
        Clock::Manual { now_ms: start_ms }
    }

    pub fn now_millis(&self) -> u64 {
        match self {
            Clock::System { epoch } => u64::try_from(epoch.elapsed().as_millis()).unwrap_or(u64::MAX),
            Clock::Manual { now_ms } => *now_ms,
        }
    }

    /// Block for `ms` (system) or jump ahead by `ms` (manual)
    pub fn sleep(&mut self, ms: u64) {
        match self {
            Clock::System { .. } => std::thread::sleep(Duration::from_millis(ms)),
            Clock::Manual { now_ms } => *now_ms = now_ms.saturating_add(ms),
        }
    }

    /// Advance a manual clock without sleeping; no-op on the system clock
    pub fn advance(&mut self, ms: u64) {
        if let Clock::Manual { now_ms } = self {
            *now_ms = now_ms.saturating_add(ms);
        }
    }
}
