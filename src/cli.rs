//! Command-line surface shared by both screensavers

use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser};

use crate::driver::{FrameDriver, RunReport};
use crate::error::{PacsaverError, Result};
use crate::platform::{HeadlessSurface, TerminalSurface};
use crate::settings::Settings;
use crate::sim::{CollisionPolicy, EyePolicy, World};

/// Flags common to both programs; each one overrides the settings file
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Random seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Collision response: separate, swap or off
    #[arg(long)]
    pub policy: Option<CollisionPolicy>,

    /// Prey eyes while the body is hidden: always or with-body
    #[arg(long)]
    pub eyes: Option<EyePolicy>,

    /// Activate entities one at a time as the run goes on
    #[arg(long)]
    pub progressive: bool,

    /// Frame rate cap
    #[arg(long, conflicts_with = "uncapped")]
    pub fps: Option<u32>,

    /// Run as fast as possible
    #[arg(long)]
    pub uncapped: bool,

    /// Simulate without a terminal (needs `--frames`, nothing else can close it)
    #[arg(long, requires = "frames")]
    pub headless: bool,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,
}

/// Bouncing circles screensaver
#[derive(Parser, Debug)]
#[command(name = "circles", version, about)]
pub struct CirclesArgs {
    /// Number of circles (at least 1)
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub num_circles: u32,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Predators chasing prey around the screen
#[derive(Parser, Debug)]
#[command(name = "pacsaver", version, about)]
pub struct PacArgs {
    /// Number of predators
    pub num_predators: u32,

    /// Number of prey
    pub num_prey: u32,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Outcome of argument parsing
pub enum Parsed<T> {
    Run(T),
    /// `--help` / `--version` output, already formatted; exit 0 after printing
    Info(String),
}

/// Parse arguments, mapping anything malformed to a usage error
pub fn parse<T, I, A>(args: I) -> Result<Parsed<T>>
where
    T: Parser,
    I: IntoIterator<Item = A>,
    A: Into<OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(parsed) => Ok(Parsed::Run(parsed)),
        Err(err) if !err.use_stderr() => Ok(Parsed::Info(err.render().to_string())),
        Err(err) => Err(PacsaverError::Usage(err.render().to_string())),
    }
}

impl CommonArgs {
    /// Merge `base`, the settings file and the flags, in that order
    pub fn settings(&self, base: Settings) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path, &base)?,
            None => base,
        };
        if let Some(policy) = self.policy {
            settings.collision_policy = policy;
        }
        if let Some(eyes) = self.eyes {
            settings.eye_policy = eyes;
        }
        if self.progressive {
            settings.activation.enabled = true;
        }
        if self.uncapped {
            settings.frame_cap_fps = None;
        } else if let Some(fps) = self.fps {
            settings.frame_cap_fps = Some(fps);
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Default log filter: quiet while the terminal is drawn on
    pub fn default_log_filter(&self) -> &'static str {
        if self.headless || !std::io::stderr().is_terminal() {
            "info"
        } else {
            "warn"
        }
    }

    /// Pick a surface and drive `world` until closed
    pub fn run(&self, world: World, settings: Settings) -> Result<RunReport> {
        let viewport = settings.viewport();
        let mut driver = FrameDriver::new(world, settings);
        if let Some(frames) = self.frames {
            driver = driver.with_max_frames(frames);
        }

        if self.headless {
            let mut surface = HeadlessSurface::new(viewport);
            return driver.run(&mut surface);
        }
        let mut surface = TerminalSurface::create(viewport)?;
        driver.run(&mut surface)
    }
}

/// Entry point of the `circles` binary
pub fn run_circles(args: &CirclesArgs) -> Result<RunReport> {
    let settings = args.common.settings(Settings::plain())?;
    let seed = args.common.seed();
    let world = World::plain(&settings, seed, args.num_circles);
    args.common.run(world, settings)
}

/// Entry point of the `pacsaver` binary
pub fn run_pac(args: &PacArgs) -> Result<RunReport> {
    let settings = args.common.settings(Settings::predator_prey())?;
    let seed = args.common.seed();
    let world = World::predator_prey(&settings, seed, args.num_predators, args.num_prey);
    args.common.run(world, settings)
}
