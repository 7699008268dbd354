use bevy::prelude::*;

/// Comparison that opens a [`SequenceGate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum GateEdge {
    /// Opens when the driver is strictly greater than the threshold.
    Above,
    /// Opens when the driver is greater than or equal to the threshold.
    AtLeast,
}

/// One-way latch opened the first time a driver value crosses a threshold.
///
/// The planet angle is continuous and may wrap, so once latched the gate
/// ignores every later driver value.
#[derive(Clone, Debug, Reflect)]
pub struct SequenceGate {
    threshold: f32,
    edge: GateEdge,
    latched: bool,
}

impl SequenceGate {
    /// Gate opening when `driver > threshold`.
    pub fn above(threshold: f32) -> Self {
        Self {
            threshold,
            edge: GateEdge::Above,
            latched: false,
        }
    }

    /// Gate opening when `driver >= threshold`.
    pub fn at_least(threshold: f32) -> Self {
        Self {
            threshold,
            edge: GateEdge::AtLeast,
            latched: false,
        }
    }

    /// Evaluates the gate against this frame's driver value.
    pub fn is_open(&mut self, driver: f32) -> bool {
        if !self.latched {
            self.latched = match self.edge {
                GateEdge::Above => driver > self.threshold,
                GateEdge::AtLeast => driver >= self.threshold,
            };
        }
        self.latched
    }

    /// Whether the gate has latched, without evaluating a new driver value.
    pub fn is_latched(&self) -> bool {
        self.latched
    }

    /// The configured threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_until_threshold_is_crossed() {
        let mut gate = SequenceGate::above(285.0);
        assert!(!gate.is_open(230.0));
        assert!(!gate.is_open(285.0));
        assert!(gate.is_open(285.01));
    }

    #[test]
    fn at_least_opens_on_equality() {
        let mut gate = SequenceGate::at_least(0.7);
        assert!(!gate.is_open(0.69));
        assert!(gate.is_open(0.7));
    }

    #[test]
    fn stays_open_after_driver_drops() {
        let mut gate = SequenceGate::above(285.0);
        assert!(gate.is_open(290.0));
        // Driver wraps past 360 and comes back around below threshold.
        for driver in [10.0, 0.0, -50.0, 284.0, 120.0] {
            assert!(gate.is_open(driver));
        }
        assert!(gate.is_latched());
    }

    #[test]
    fn independent_gates_use_their_own_thresholds() {
        let mut text = SequenceGate::above(265.0);
        let mut camera = SequenceGate::above(285.0);
        assert!(text.is_open(270.0));
        assert!(!camera.is_open(270.0));
        assert_eq!(camera.threshold(), 285.0);
    }
}
