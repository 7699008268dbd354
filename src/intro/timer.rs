use bevy::prelude::*;

use crate::math::Easing;

/// One-shot progress clock for a single animated channel.
///
/// Accumulates `speed * dt` each frame and reports progress clamped to
/// `[0, 1]`. The stored value is always un-eased so phase hand-offs can key
/// off raw progress while the channel writes the eased value.
#[derive(Clone, Debug, Reflect)]
pub struct ProgressTimer {
    speed: f32,
    elapsed: f32,
    easing: Easing,
}

impl ProgressTimer {
    /// Timer advancing `speed` progress units per second.
    pub fn new(speed: f32, easing: Easing) -> Self {
        Self {
            speed,
            elapsed: 0.0,
            easing,
        }
    }

    /// Advances by `dt` seconds and returns the eased progress.
    ///
    /// Negative `dt` is accepted and rewinds the clock; the frame driver
    /// never produces one.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += self.speed * dt;
        self.eased()
    }

    /// Un-eased progress in `[0, 1]`.
    pub fn raw(&self) -> f32 {
        self.elapsed.clamp(0.0, 1.0)
    }

    /// Eased progress in `[0, 1]`.
    pub fn eased(&self) -> f32 {
        self.easing.apply(self.raw())
    }

    /// `true` once raw progress has reached 1.
    pub fn is_complete(&self) -> bool {
        self.raw() >= 1.0
    }
}
