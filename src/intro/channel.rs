use bevy::prelude::*;

use super::gate::SequenceGate;
use super::timer::ProgressTimer;
use crate::math::{Blend, Easing};

/// Timing and gating for one intro channel.
#[derive(Clone, Debug, Reflect)]
pub struct ChannelSettings {
    /// Progress units per second (`1 / speed` seconds end to end).
    pub speed: f32,
    /// Curve applied to the raw progress before blending.
    pub easing: Easing,
    /// Planet angle (degrees) the driver must exceed before the channel runs.
    /// `None` means always open.
    pub gate: Option<f32>,
}

impl ChannelSettings {
    /// Settings gated on the planet angle exceeding `gate` degrees.
    pub fn gated(speed: f32, easing: Easing, gate: f32) -> Self {
        Self {
            speed,
            easing,
            gate: Some(gate),
        }
    }

    /// Settings with no planet gate.
    pub fn ungated(speed: f32, easing: Easing) -> Self {
        Self {
            speed,
            easing,
            gate: None,
        }
    }
}

/// One animated attribute: a timer, two endpoints, and an optional gate.
///
/// Once the timer completes the final value is returned one last time and
/// the channel settles; later calls to [`Channel::advance`] yield `None`.
#[derive(Clone, Debug)]
pub struct Channel<T> {
    timer: ProgressTimer,
    from: T,
    to: T,
    gate: Option<SequenceGate>,
    settled: bool,
}

impl<T: Blend> Channel<T> {
    /// Builds a channel from its settings and endpoints.
    pub fn new(settings: &ChannelSettings, from: T, to: T) -> Self {
        Self {
            timer: ProgressTimer::new(settings.speed, settings.easing),
            from,
            to,
            gate: settings.gate.map(SequenceGate::above),
            settled: false,
        }
    }

    /// Evaluates the gate against this frame's driver value.
    pub fn is_open(&mut self, driver: f32) -> bool {
        self.gate.as_mut().is_none_or(|gate| gate.is_open(driver))
    }

    /// Whether the gate has already latched (always `true` without a gate).
    pub fn is_latched(&self) -> bool {
        self.gate.as_ref().is_none_or(SequenceGate::is_latched)
    }

    /// Advances the timer and returns the blended value to write.
    pub fn advance(&mut self, dt: f32) -> Option<T> {
        if self.settled {
            return None;
        }
        let t = self.timer.advance(dt);
        if self.timer.is_complete() {
            self.settled = true;
            return Some(self.to);
        }
        Some(T::blend(self.from, self.to, t))
    }

    /// Raw (un-eased) progress.
    pub fn progress(&self) -> f32 {
        self.timer.raw()
    }

    /// `true` once the timer has reached 1.
    pub fn is_complete(&self) -> bool {
        self.timer.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ungated_channel_is_always_open() {
        let mut ch = Channel::new(&ChannelSettings::ungated(1.0, Easing::Linear), 0.0, 1.0);
        assert!(ch.is_latched());
        assert!(ch.is_open(-1000.0));
    }

    #[test]
    fn gated_channel_waits_for_driver() {
        let mut ch = Channel::new(
            &ChannelSettings::gated(1.0, Easing::Linear, 285.0),
            Vec3::ZERO,
            Vec3::X,
        );
        assert!(!ch.is_open(280.0));
        assert!(!ch.is_latched());
        assert!(ch.is_open(286.0));
        assert!(ch.is_open(0.0));
    }

    #[test]
    fn writes_final_value_once_then_settles() {
        let mut ch = Channel::new(&ChannelSettings::ungated(0.5, Easing::Linear), 0.0, 10.0);
        let first = ch.advance(1.0).unwrap();
        assert!((first - 5.0).abs() < 1e-6);
        assert_eq!(ch.advance(1.0), Some(10.0));
        assert!(ch.is_complete());
        assert_eq!(ch.advance(1.0), None);
    }

    #[test]
    fn eases_the_blend_but_reports_raw_progress() {
        let mut ch = Channel::new(&ChannelSettings::ungated(1.0, Easing::OutCubic), 0.0, 1.0);
        let v = ch.advance(0.5).unwrap();
        assert!((ch.progress() - 0.5).abs() < 1e-6);
        assert!((v - 0.875).abs() < 1e-6);
    }
}
