//! Point generation for 2D primitives
//!
//! Everything is sampled on continuous coordinates and rounded to pixels
//! only here.

use glam::{DVec2, IVec2};
use std::f64::consts::TAU;

use crate::consts::{ANGLE_STEP, EYE_RADIUS, EYE_RISE, EYE_SPACING};

#[inline]
fn to_pixel(p: DVec2) -> IVec2 {
    IVec2::new(p.x.round() as i32, p.y.round() as i32)
}

#[inline]
fn polar(center: DVec2, radius: f64, theta: f64) -> DVec2 {
    center + DVec2::new(radius * theta.cos(), radius * theta.sin())
}

/// Sort and drop repeated pixels
fn dedup(mut points: Vec<IVec2>) -> Vec<IVec2> {
    points.sort_unstable_by_key(|p| (p.y, p.x));
    points.dedup();
    points
}

/// Pixels of a circle outline, sampled over `[0, 2π]`
pub fn circle_outline(center: DVec2, radius: f64) -> Vec<IVec2> {
    let steps = (TAU / ANGLE_STEP) as usize;
    let points = (0..=steps)
        .map(|i| to_pixel(polar(center, radius, i as f64 * ANGLE_STEP)))
        .collect();
    dedup(points)
}

/// Pixels of a filled disc with a wedge cut out facing +x
///
/// Covers integer radii `0..radius` at angles strictly between `start` and
/// `2π - start`.
pub fn wedge(center: DVec2, radius: u32, start: f64) -> Vec<IVec2> {
    let end = TAU - start;
    let mut points = Vec::new();
    let mut k = 1u32;
    loop {
        let theta = start + k as f64 * ANGLE_STEP;
        if theta >= end {
            break;
        }
        for r in 0..radius {
            points.push(to_pixel(polar(center, r as f64, theta)));
        }
        k += 1;
    }
    dedup(points)
}

/// Pixels of the two eye rings of a prey
pub fn eyes(center: DVec2, offset: f32) -> Vec<IVec2> {
    let rise = DVec2::new(offset as f64, -EYE_RISE);
    let left = center + rise - DVec2::new(EYE_SPACING, 0.0);
    let right = center + rise + DVec2::new(EYE_SPACING, 0.0);
    let mut points = circle_outline(left, EYE_RADIUS);
    points.extend(circle_outline(right, EYE_RADIUS));
    dedup(points)
}
