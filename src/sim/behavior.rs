//! Per-entity timed animation: mouths, eyes and prey visibility
//!
//! Oscillators advance one step per tick. Visibility is polled against the
//! tick timestamp rather than scheduled.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};

/// Whether prey eyes are drawn while the body is hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EyePolicy {
    /// Eyes float on while the body is hidden
    #[default]
    AlwaysDrawn,
    /// Eyes vanish together with the body
    HiddenWithBody,
}

impl FromStr for EyePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" | "always-drawn" => Ok(EyePolicy::AlwaysDrawn),
            "with-body" | "hidden-with-body" => Ok(EyePolicy::HiddenWithBody),
            other => Err(format!("unknown eye policy `{other}` (expected always or with-body)")),
        }
    }
}

/// Entities whose visibility came back this tick
#[derive(Debug, Clone, Default)]
pub struct BehaviorReport {
    pub restored: Vec<EntityId>,
}

/// Step every entity's animation state
pub fn update(entities: &mut [Entity], now_ms: u64, invisibility_ms: u64) -> BehaviorReport {
    let mut report = BehaviorReport::default();
    for entity in entities.iter_mut() {
        if step(entity, now_ms, invisibility_ms) {
            log::debug!("{:?} visible again at {} ms", entity.id, now_ms);
            report.restored.push(entity.id);
        }
    }
    report
}

/// Step one entity. Returns true if a hidden prey became visible.
pub fn step(entity: &mut Entity, now_ms: u64, invisibility_ms: u64) -> bool {
    match &mut entity.kind {
        EntityKind::Plain => false,
        EntityKind::Predator(mouth) => {
            mouth.step();
            false
        }
        EntityKind::Prey(prey) => {
            prey.eyes.step();
            prey.restore_if_due(now_ms, invisibility_ms)
        }
    }
}
