//! Runtime settings
//!
//! Physics stays fixed; these only pick between documented behaviours and
//! frame pacing. Loaded from JSON, then overridden by CLI flags.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{PacsaverError, Result};
use crate::sim::{CollisionPolicy, EyePolicy};
use crate::Viewport;

/// Progressive activation: entities join the simulation one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activation {
    pub enabled: bool,
    /// Inverse growth rate: one more active entity per this many ticks
    pub ticks_per_activation: u64,
}

impl Default for Activation {
    fn default() -> Self {
        Self {
            enabled: false,
            ticks_per_activation: TICKS_PER_ACTIVATION,
        }
    }
}

impl Activation {
    /// Number of active entities after `ticks` ticks out of `total`
    pub fn limit(&self, ticks: u64, total: usize) -> usize {
        if !self.enabled {
            return total;
        }
        let grown = ticks / self.ticks_per_activation.max(1);
        usize::try_from(grown).map_or(total, |grown| grown.min(total))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: u32,
    pub height: u32,

    // === Simulation ===
    pub collision_policy: CollisionPolicy,
    pub eye_policy: EyePolicy,
    pub activation: Activation,
    /// How long an eaten prey stays hidden
    pub invisibility_ms: u64,

    // === Frame loop ===
    /// `None` runs uncapped
    pub frame_cap_fps: Option<u32>,
    /// Frames between fps log lines, 0 disables
    pub fps_report_interval: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            collision_policy: CollisionPolicy::default(),
            eye_policy: EyePolicy::default(),
            activation: Activation::default(),
            invisibility_ms: INVISIBILITY_MS,
            frame_cap_fps: None,
            fps_report_interval: FPS_REPORT_INTERVAL,
        }
    }
}

impl Settings {
    /// Defaults of the plain bouncing-circle screensaver
    pub fn plain() -> Self {
        Self {
            frame_cap_fps: Some(DEFAULT_FRAME_CAP),
            ..Self::default()
        }
    }

    /// Defaults of the predator/prey screensaver (uncapped)
    pub fn predator_prey() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Load settings from a JSON file; missing fields keep `base` values
    pub fn load(path: &Path, base: &Settings) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let mut value = serde_json::to_value(base)?;
        let overrides: serde_json::Value = serde_json::from_str(&json)?;
        merge_json(&mut value, overrides);
        let settings: Settings = serde_json::from_value(value)?;
        log::info!("Loaded settings from {}", path.display());
        settings.validate()?;
        Ok(settings)
    }

    /// Reject combinations the simulation cannot honour
    pub fn validate(&self) -> Result<()> {
        let min_side = 2 * MAX_RADIUS;
        if self.width <= min_side || self.height <= min_side {
            return Err(PacsaverError::Config(format!(
                "viewport {}x{} must exceed {min_side} pixels on each side",
                self.width, self.height
            )));
        }
        if self.activation.ticks_per_activation == 0 {
            return Err(PacsaverError::Config(
                "activation.ticks_per_activation must be positive".into(),
            ));
        }
        if self.frame_cap_fps == Some(0) {
            return Err(PacsaverError::Config("frame_cap_fps must be positive".into()));
        }
        Ok(())
    }
}

fn merge_json(base: &mut serde_json::Value, overrides: serde_json::Value) {
    match (base, overrides) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
        assert!(Settings::plain().validate().is_ok());
        assert_eq!(Settings::plain().frame_cap_fps, Some(30));
        assert_eq!(Settings::predator_prey().frame_cap_fps, None);
    }

    #[test]
    fn test_validate_rejects_tiny_viewport() {
        let settings = Settings {
            width: 40,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(PacsaverError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_rates() {
        let mut settings = Settings::default();
        settings.activation.ticks_per_activation = 0;
        assert!(settings.validate().is_err());

        let settings = Settings {
            frame_cap_fps: Some(0),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_activation_limit_grows_slowly() {
        let activation = Activation {
            enabled: true,
            ticks_per_activation: 100,
        };
        assert_eq!(activation.limit(0, 5), 0);
        assert_eq!(activation.limit(99, 5), 0);
        assert_eq!(activation.limit(100, 5), 1);
        assert_eq!(activation.limit(350, 5), 3);
        assert_eq!(activation.limit(10_000, 5), 5);

        let off = Activation::default();
        assert_eq!(off.limit(0, 5), 5);
    }

    #[test]
    fn test_partial_json_keeps_base_values() {
        let dir = std::env::temp_dir().join(format!("pacsaver-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        std::fs::write(
            &path,
            r#"{ "collision_policy": "swap", "activation": { "enabled": true } }"#,
        )
        .unwrap();

        let settings = Settings::load(&path, &Settings::plain()).unwrap();
        assert_eq!(settings.collision_policy, CollisionPolicy::Swap);
        assert!(settings.activation.enabled);
        assert_eq!(settings.activation.ticks_per_activation, TICKS_PER_ACTIVATION);
        assert_eq!(settings.frame_cap_fps, Some(30));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let dir = std::env::temp_dir().join(format!("pacsaver-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Settings::load(&path, &Settings::default()),
            Err(PacsaverError::Json(_))
        ));

        std::fs::remove_dir_all(&dir).ok();
    }
}
