//! Frame driver
//!
//! Runs one tick per frame: drain input, simulate, draw, present, pace. A
//! close event is honoured at the next frame boundary; the frame in flight
//! always completes.

use crate::error::Result;
use crate::platform::Surface;
use crate::renderer::{self, DrawList};
use crate::settings::Settings;
use crate::sim::{self, TickSummary, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Quit,
}

/// Totals for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Seed the world was spawned from
    pub seed: u64,
    pub frames: u64,
    pub ticks: u64,
    pub predations: u64,
    pub elapsed_ms: u64,
}

/// Rolling frame-rate measurement over a fixed number of frames
#[derive(Debug, Clone)]
struct FpsMeter {
    interval: u32,
    frames: u32,
    window_start_ms: Option<u64>,
}

impl FpsMeter {
    fn new(interval: u32) -> Self {
        Self {
            interval,
            frames: 0,
            window_start_ms: None,
        }
    }

    /// Count a frame finishing at `now_ms`; yields the rate once per window
    fn record(&mut self, now_ms: u64) -> Option<f64> {
        if self.interval == 0 {
            return None;
        }
        let start = *self.window_start_ms.get_or_insert(now_ms);
        self.frames += 1;
        if self.frames < self.interval {
            return None;
        }
        let elapsed = now_ms.saturating_sub(start);
        let fps = if elapsed == 0 {
            f64::INFINITY
        } else {
            self.frames as f64 * 1000.0 / elapsed as f64
        };
        self.frames = 0;
        self.window_start_ms = Some(now_ms);
        Some(fps)
    }
}

/// Owns the world for the lifetime of a run
pub struct FrameDriver {
    world: World,
    settings: Settings,
    state: DriverState,
    max_frames: Option<u64>,
    frames: u64,
    predations: u64,
    fps: FpsMeter,
    last_tick: TickSummary,
}

impl FrameDriver {
    pub fn new(world: World, settings: Settings) -> Self {
        let fps = FpsMeter::new(settings.fps_report_interval);
        Self {
            world,
            settings,
            state: DriverState::Running,
            max_frames: None,
            frames: 0,
            predations: 0,
            fps,
            last_tick: TickSummary::default(),
        }
    }

    /// Stop after `frames` frames as if the window had been closed
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Summary of the most recent tick
    pub fn last_tick(&self) -> &TickSummary {
        &self.last_tick
    }

    /// Run a single frame and return what was drawn
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<DrawList> {
        let start = surface.now_millis();

        if surface.poll_close()? && self.state == DriverState::Running {
            log::info!("Close requested after {} frames", self.frames);
            self.state = DriverState::Quit;
        }

        let summary = sim::tick(&mut self.world, &self.settings, start);
        self.predations += summary.predations.len() as u64;
        self.last_tick = summary;

        let list = renderer::build(&self.world, self.settings.eye_policy);
        renderer::submit(&list, surface);
        surface.present()?;
        self.frames += 1;

        if self.max_frames.is_some_and(|max| self.frames >= max) {
            self.state = DriverState::Quit;
        }

        if let Some(cap) = self.settings.frame_cap_fps.filter(|&fps| fps > 0) {
            let budget = 1000 / cap as u64;
            let elapsed = surface.now_millis().saturating_sub(start);
            if elapsed < budget {
                surface.sleep_millis(budget - elapsed);
            }
        }

        if let Some(fps) = self.fps.record(surface.now_millis()) {
            log::info!("FPS: {:.1} ({} active entities)", fps, self.last_tick.active);
        }

        Ok(list)
    }

    /// Run frames until a close event (or the frame limit)
    pub fn run<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<RunReport> {
        let started = surface.now_millis();
        log::info!(
            "Running {} entities (seed {}), policy {}, cap {:?} fps",
            self.world.len(),
            self.world.rng_state.seed,
            self.settings.collision_policy.as_str(),
            self.settings.frame_cap_fps
        );

        while self.state == DriverState::Running {
            self.frame(surface)?;
        }

        let report = RunReport {
            seed: self.world.rng_state.seed,
            frames: self.frames,
            ticks: self.world.time_ticks,
            predations: self.predations,
            elapsed_ms: surface.now_millis().saturating_sub(started),
        };
        log::info!(
            "Stopped after {} frames in {} ms ({} predations)",
            report.frames,
            report.elapsed_ms,
            report.predations
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::platform::HeadlessSurface;

    #[test]
    fn test_fps_meter_windows() {
        let mut meter = FpsMeter::new(3);
        assert_eq!(meter.record(0), None);
        assert_eq!(meter.record(50), None);
        let fps = meter.record(100).unwrap();
        assert!((fps - 30.0).abs() < 1e-9);
        assert_eq!(meter.record(150), None);
    }

    #[test]
    fn test_fps_meter_disabled() {
        let mut meter = FpsMeter::new(0);
        assert!((0..100).all(|t| meter.record(t).is_none()));
    }

    #[test]
    fn test_close_completes_frame_in_flight() {
        let settings = Settings::predator_prey();
        let world = World::predator_prey(&settings, 42, 1, 1);
        let mut driver = FrameDriver::new(world, settings);
        let mut surface = HeadlessSurface::manual(Viewport::default(), 0, 16);
        surface.request_close();

        let list = driver.frame(&mut surface).unwrap();
        assert_eq!(driver.state(), DriverState::Quit);
        assert_eq!(surface.frames_presented(), 1);
        assert_eq!(driver.world().time_ticks, 1);
        assert!(!list.is_empty());
    }

    /// Headless surface that counts how often it is cleared
    struct ClearCounter {
        inner: HeadlessSurface,
        clears: u32,
    }

    impl Surface for ClearCounter {
        fn poll_close(&mut self) -> Result<bool> {
            self.inner.poll_close()
        }

        fn clear(&mut self, color: crate::Rgb) {
            self.clears += 1;
            self.inner.clear(color);
        }

        fn set_color(&mut self, color: crate::Rgb) {
            self.inner.set_color(color);
        }

        fn draw_point(&mut self, x: i32, y: i32) {
            self.inner.draw_point(x, y);
        }

        fn present(&mut self) -> Result<()> {
            self.inner.present()
        }

        fn now_millis(&self) -> u64 {
            self.inner.now_millis()
        }

        fn sleep_millis(&mut self, ms: u64) {
            self.inner.sleep_millis(ms);
        }
    }

    #[test]
    fn test_one_clear_per_frame() {
        let settings = Settings::predator_prey();
        let world = World::predator_prey(&settings, 5, 1, 2);
        let mut driver = FrameDriver::new(world, settings).with_max_frames(3);
        let mut surface = ClearCounter {
            inner: HeadlessSurface::manual(Viewport::default(), 0, 1),
            clears: 0,
        };

        driver.run(&mut surface).unwrap();
        assert_eq!(surface.clears, 3);
    }

    #[test]
    fn test_report_carries_seed() {
        let settings = Settings::plain();
        let world = World::plain(&settings, 77, 2);
        let mut driver = FrameDriver::new(world, settings).with_max_frames(1);
        let report = driver.run(&mut HeadlessSurface::manual(Viewport::default(), 0, 1)).unwrap();
        assert_eq!(report.seed, 77);
    }

    #[test]
    fn test_frame_cap_sleeps_out_the_budget() {
        let settings = Settings::plain();
        let world = World::plain(&settings, 1, 3);
        let mut driver = FrameDriver::new(world, settings).with_max_frames(10);
        let mut surface = HeadlessSurface::manual(Viewport::default(), 0, 5);

        let report = driver.run(&mut surface).unwrap();
        assert_eq!(report.frames, 10);
        // 1000 / 30 = 33 ms per frame, 5 of them spent presenting
        assert_eq!(report.elapsed_ms, 330);
    }

    #[test]
    fn test_uncapped_does_not_sleep() {
        let settings = Settings::predator_prey();
        let world = World::predator_prey(&settings, 1, 2, 2);
        let mut driver = FrameDriver::new(world, settings).with_max_frames(4);
        let mut surface = HeadlessSurface::manual(Viewport::default(), 0, 2);

        let report = driver.run(&mut surface).unwrap();
        assert_eq!(report.elapsed_ms, 8);
        assert_eq!(report.ticks, 4);
    }
}
