//! Draw-list emission
//!
//! Turns the active entities into per-shape point lists, then replays them
//! onto any `Surface`.

pub mod shapes;

use glam::IVec2;

use crate::Rgb;
use crate::consts::{BACKGROUND, EYE_COLOR};
use crate::platform::Surface;
use crate::sim::{Entity, EntityKind, EyePolicy, World};

/// One shape: a colour and the pixels it lights
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub color: Rgb,
    pub points: Vec<IVec2>,
}

/// Everything drawn in one frame, in store order
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    pub background: Rgb,
    pub calls: Vec<DrawCall>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self {
            background: BACKGROUND,
            calls: Vec::new(),
        }
    }
}

impl DrawList {
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.calls.iter().map(|c| c.points.len()).sum()
    }

    fn push(&mut self, color: Rgb, points: Vec<IVec2>) {
        if !points.is_empty() {
            self.calls.push(DrawCall { color, points });
        }
    }

    /// Append the shapes of one entity
    pub fn push_entity(&mut self, entity: &Entity, eye_policy: EyePolicy) {
        match &entity.kind {
            EntityKind::Plain => {
                self.push(entity.color, shapes::circle_outline(entity.pos, entity.radius_f64()));
            }
            EntityKind::Predator(mouth) => {
                self.push(
                    entity.color,
                    shapes::wedge(entity.pos, entity.radius(), mouth.start_angle()),
                );
            }
            EntityKind::Prey(prey) => {
                let visible = prey.is_visible();
                if visible {
                    self.push(entity.color, shapes::circle_outline(entity.pos, entity.radius_f64()));
                }
                if visible || eye_policy == EyePolicy::AlwaysDrawn {
                    self.push(EYE_COLOR, shapes::eyes(entity.pos, prey.eyes.offset));
                }
            }
        }
    }
}

/// Build the frame's draw list from the active entities
pub fn build(world: &World, eye_policy: EyePolicy) -> DrawList {
    let mut list = DrawList::default();
    for entity in world.active() {
        list.push_entity(entity, eye_policy);
    }
    list
}

/// Clear the surface and replay `list` onto it (does not present)
pub fn submit<S: Surface + ?Sized>(list: &DrawList, surface: &mut S) {
    surface.clear(list.background);
    for call in &list.calls {
        surface.set_color(call.color);
        for p in &call.points {
            surface.draw_point(p.x, p.y);
        }
    }
}
