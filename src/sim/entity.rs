//! Entities and their per-kind animation state

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::Rgb;
use crate::consts::*;

/// Stable entity identity, assigned in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Direction of the mouth oscillator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouthPhase {
    /// Cut-out angle growing toward `MOUTH_MAX`
    Opening,
    /// Cut-out angle shrinking toward `MOUTH_MIN`
    Closing,
}

/// Predator mouth: a wedge cut out of the body, oscillating every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mouth {
    /// Half-angle of the cut-out, as a fraction of π. Stays in `[MOUTH_MIN, MOUTH_MAX]`.
    pub open: f32,
    pub phase: MouthPhase,
}

impl Default for Mouth {
    fn default() -> Self {
        Self {
            open: MOUTH_START,
            phase: MouthPhase::Opening,
        }
    }
}

impl Mouth {
    pub fn step(&mut self) {
        match self.phase {
            MouthPhase::Opening => {
                self.open = (self.open + MOUTH_STEP).min(MOUTH_MAX);
                if self.open >= MOUTH_MAX {
                    self.phase = MouthPhase::Closing;
                }
            }
            MouthPhase::Closing => {
                self.open = (self.open - MOUTH_STEP).max(MOUTH_MIN);
                if self.open <= MOUTH_MIN {
                    self.phase = MouthPhase::Opening;
                }
            }
        }
    }

    /// Angle (radians) at which the drawn body starts; it ends at `2π - start`
    #[inline]
    pub fn start_angle(&self) -> f64 {
        self.open as f64 * std::f64::consts::PI
    }
}

/// Direction of the eye sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EyeDirection {
    Right,
    Left,
}

/// Prey eyes sweeping left and right
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeSweep {
    /// Horizontal offset of both eyes, in `[EYE_MIN, EYE_MAX]`
    pub offset: f32,
    pub direction: EyeDirection,
}

impl Default for EyeSweep {
    fn default() -> Self {
        Self {
            offset: 0.0,
            direction: EyeDirection::Right,
        }
    }
}

impl EyeSweep {
    pub fn step(&mut self) {
        match self.direction {
            EyeDirection::Right => {
                self.offset = (self.offset + EYE_STEP).min(EYE_MAX);
                if self.offset >= EYE_MAX {
                    self.direction = EyeDirection::Left;
                }
            }
            EyeDirection::Left => {
                self.offset = (self.offset - EYE_STEP).max(EYE_MIN);
                if self.offset <= EYE_MIN {
                    self.direction = EyeDirection::Right;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Visible,
    /// Eaten at `since_ms` (monotonic clock)
    Hidden { since_ms: u64 },
}

/// Prey-only state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Prey {
    pub eyes: EyeSweep,
    pub visibility: Visibility,
}

impl Prey {
    #[inline]
    pub fn is_visible(&self) -> bool {
        matches!(self.visibility, Visibility::Visible)
    }

    pub fn invisible_since(&self) -> Option<u64> {
        match self.visibility {
            Visibility::Visible => None,
            Visibility::Hidden { since_ms } => Some(since_ms),
        }
    }

    /// Hide a visible prey. Returns false if it was already hidden.
    pub fn hide(&mut self, now_ms: u64) -> bool {
        if !self.is_visible() {
            return false;
        }
        self.visibility = Visibility::Hidden { since_ms: now_ms };
        true
    }

    /// Restore visibility once `window_ms` has elapsed. Returns true on restore.
    pub fn restore_if_due(&mut self, now_ms: u64, window_ms: u64) -> bool {
        match self.visibility {
            Visibility::Hidden { since_ms } if now_ms.saturating_sub(since_ms) >= window_ms => {
                self.visibility = Visibility::Visible;
                true
            }
            _ => false,
        }
    }
}

/// What an entity is, and the state only that kind carries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Bouncing circle with no behaviour
    Plain,
    /// Pac-man: hides prey on contact
    Predator(Mouth),
    /// Ghost: hidden for a while after contact with a predator
    Prey(Prey),
}

impl EntityKind {
    pub fn predator() -> Self {
        EntityKind::Predator(Mouth::default())
    }

    pub fn prey() -> Self {
        EntityKind::Prey(Prey::default())
    }

    #[inline]
    pub fn is_predator(&self) -> bool {
        matches!(self, EntityKind::Predator(_))
    }

    #[inline]
    pub fn is_prey(&self) -> bool {
        matches!(self, EntityKind::Prey(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Centre, in viewport pixels
    pub pos: DVec2,
    /// Displacement per tick
    pub vel: DVec2,
    radius: u32,
    pub color: Rgb,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(id: EntityId, pos: DVec2, vel: DVec2, radius: u32, color: Rgb, kind: EntityKind) -> Self {
        debug_assert!(radius > 0, "entity radius must be positive");
        Self {
            id,
            pos,
            vel,
            radius: radius.max(1),
            color,
            kind,
        }
    }

    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    #[inline]
    pub fn radius_f64(&self) -> f64 {
        self.radius as f64
    }

    /// Prey state if this is a prey
    pub fn prey(&self) -> Option<&Prey> {
        match &self.kind {
            EntityKind::Prey(prey) => Some(prey),
            _ => None,
        }
    }

    pub fn prey_mut(&mut self) -> Option<&mut Prey> {
        match &mut self.kind {
            EntityKind::Prey(prey) => Some(prey),
            _ => None,
        }
    }

    pub fn mouth(&self) -> Option<&Mouth> {
        match &self.kind {
            EntityKind::Predator(mouth) => Some(mouth),
            _ => None,
        }
    }

    /// Whether the two circles overlap (strictly)
    #[inline]
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.pos.distance(other.pos) < self.radius_f64() + other.radius_f64()
    }
}
