//! Vector helpers shared by the force and collision code
//!
//! Thin wrappers over `glam::Vec2` for the few operations that need a
//! guarded or field-specific form.

use glam::Vec2;

/// Unit vector from `from` toward `to` plus the distance between them.
///
/// Returns `None` when the points coincide (no direction exists).
#[inline]
pub fn separation(from: Vec2, to: Vec2) -> Option<(Vec2, f32)> {
    let delta = to - from;
    let dist = delta.length();
    if dist > 0.0 && dist.is_finite() {
        Some((delta / dist, dist))
    } else {
        None
    }
}

/// Rescale `v` to `max` if it is longer, preserving direction.
///
/// A non-finite `v` has no usable direction and collapses to zero.
#[inline]
pub fn limit_speed(v: Vec2, max: f32) -> Vec2 {
    if !is_finite(v) {
        return Vec2::ZERO;
    }
    if v.length_squared() <= max * max {
        return v;
    }
    // Prescale so the length cannot overflow for huge components
    let scaled = v / v.abs().max_element();
    scaled.normalize() * max
}

/// Both components finite
#[inline]
pub fn is_finite(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

/// Component of `v` along unit `normal`
#[inline]
pub fn normal_speed(v: Vec2, normal: Vec2) -> f32 {
    v.dot(normal)
}
