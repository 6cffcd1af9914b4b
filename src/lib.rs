//! Pacsaver - bouncing circles, predators and prey in a fixed viewport
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, motion, behaviour)
//! - `renderer`: Draw-list emission from simulation state
//! - `platform`: Surface backends (terminal, headless) and clocks
//! - `driver`: Frame loop tying input, simulation and presentation together
//! - `settings`: Tunable runtime configuration

pub mod cli;
pub mod driver;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{DriverState, FrameDriver, RunReport};
pub use error::{PacsaverError, Result};
pub use settings::Settings;

/// Simulation and rendering constants
pub mod consts {
    /// Default viewport dimensions (pixels)
    pub const SCREEN_WIDTH: u32 = 640;
    pub const SCREEN_HEIGHT: u32 = 480;

    /// Spawn radius range (inclusive)
    pub const MIN_RADIUS: u32 = 10;
    pub const MAX_RADIUS: u32 = 29;

    /// Mouth cut-out band, as a fraction of π
    pub const MOUTH_MIN: f32 = 0.05;
    pub const MOUTH_MAX: f32 = 0.3;
    pub const MOUTH_STEP: f32 = 0.01;
    /// Initial mouth opening for freshly spawned predators
    pub const MOUTH_START: f32 = 0.1;

    /// Eye sweep band (pixels, relative to the resting eye position)
    pub const EYE_MIN: f32 = -5.0;
    pub const EYE_MAX: f32 = 5.0;
    pub const EYE_STEP: f32 = 0.1;
    /// Horizontal distance of each eye from the prey centre
    pub const EYE_SPACING: f64 = 5.0;
    /// Eyes sit this far above the prey centre
    pub const EYE_RISE: f64 = 5.0;
    pub const EYE_RADIUS: f64 = 3.0;

    /// How long an eaten prey stays hidden
    pub const INVISIBILITY_MS: u64 = 2000;

    /// Angular sampling step for outlines and wedges (radians)
    pub const ANGLE_STEP: f64 = 0.01;

    /// Frame cap of the plain circle screensaver
    pub const DEFAULT_FRAME_CAP: u32 = 30;
    /// Frames between fps log lines
    pub const FPS_REPORT_INTERVAL: u32 = 30;

    /// One more entity activates every this many ticks when progressive activation is on
    pub const TICKS_PER_ACTIVATION: u64 = 100;

    pub const PREDATOR_COLOR: crate::Rgb = crate::Rgb::new(255, 255, 0);
    pub const EYE_COLOR: crate::Rgb = crate::Rgb::new(255, 255, 255);
    pub const BACKGROUND: crate::Rgb = crate::Rgb::new(0, 0, 0);
}

/// 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Viewport bounds in pixels; entities live in `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: consts::SCREEN_WIDTH,
            height: consts::SCREEN_HEIGHT,
        }
    }
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether a circle of `radius` centred at `pos` lies fully inside
    #[inline]
    pub fn contains_circle(&self, pos: glam::DVec2, radius: f64) -> bool {
        pos.x - radius >= 0.0
            && pos.x + radius <= self.width as f64
            && pos.y - radius >= 0.0
            && pos.y + radius <= self.height as f64
    }
}
