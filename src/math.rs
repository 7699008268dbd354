//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec3` / `Quat` inputs, making them straightforward to unit-test.

use bevy::prelude::{Quat, Vec2, Vec3};
use bevy::reflect::Reflect;

/// Shaping curve applied to a timer's raw `[0, 1]` progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum Easing {
    /// Identity.
    Linear,
    /// Sinusoidal ease-in-out: slow start, slow finish.
    #[default]
    InOutSine,
    /// Cubic ease-out: fast start, gentle deceleration.
    OutCubic,
    /// Quadratic ease-out.
    OutQuad,
}

impl Easing {
    /// Applies the curve to `t`, which should already be in `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::InOutSine => ease_in_out_sine(t),
            Self::OutCubic => ease_out_cubic(t),
            Self::OutQuad => ease_out_quad(t),
        }
    }
}

/// Sinusoidal ease-in-out. Returns `-(cos(PI * t) - 1) / 2`.
pub fn ease_in_out_sine(t: f32) -> f32 {
    -((std::f32::consts::PI * t).cos() - 1.0) / 2.0
}

/// Cubic ease-out curve: fast start, gentle deceleration.
///
/// `t` should be in `[0, 1]`. Returns `1 - (1 - t)^3`.
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Quadratic ease-out. Returns `1 - (1 - t)^2`.
pub fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(2)
}

/// Values that can be blended between two endpoints by a progress value.
///
/// Positions and scalars blend linearly; rotations use spherical
/// interpolation so angular speed stays uniform.
pub trait Blend: Copy {
    /// Returns the value at progress `t` between `from` and `to`.
    fn blend(from: Self, to: Self, t: f32) -> Self;
}

impl Blend for f32 {
    fn blend(from: Self, to: Self, t: f32) -> Self {
        lerp(from, to, t)
    }
}

impl Blend for Vec2 {
    fn blend(from: Self, to: Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Blend for Vec3 {
    fn blend(from: Self, to: Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Blend for Quat {
    fn blend(from: Self, to: Self, t: f32) -> Self {
        slerp(from, to, t)
    }
}

/// Linear interpolation: `a + (b - a) * t`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Minimal-arc spherical interpolation between two unit quaternions.
///
/// The endpoints are returned exactly so a finished channel lands on its
/// target without floating-point residue.
pub fn slerp(from: Quat, to: Quat, t: f32) -> Quat {
    if t <= 0.0 {
        return from;
    }
    if t >= 1.0 {
        return to;
    }
    from.slerp(to, t)
}

/// Viewport-relative scale factor, `width / reference_width` clamped to `[min_size, 1]`.
pub fn scale_factor(width: f32, reference_width: f32, min_size: f32) -> f32 {
    (width / reference_width).min(1.0).max(min_size)
}

/// Maps a scale factor onto `[0, 100]` across the `[min_size, 1]` range.
///
/// `min_size` is always `< 1`, so the denominator is positive.
pub fn scale_percent(scale_factor: f32, min_size: f32) -> f32 {
    let total_range = 1.0 - min_size;
    100.0 - ((1.0 - scale_factor) * 100.0) / total_range
}

/// Vertical field of view (degrees) for the current scale percent.
///
/// Narrow viewports widen the view; portrait layouts with an aspect ratio
/// under `0.5` always get `max_fov`.
pub fn field_of_view(scale_percent: f32, aspect: f32, min_fov: f32, max_fov: f32) -> f32 {
    if aspect < 0.5 {
        return max_fov;
    }
    max_fov - (scale_percent * (max_fov - min_fov) / 100.0)
}
