/// Bounded scale feedback driven by a per-frame hit-test result.
///
/// Stored as an integer level so the walk between bounds takes a fixed
/// number of frames and lands on the bounds exactly.
#[derive(Clone, Debug)]
pub struct HoverScaleChannel {
    level: u32,
    steps: u32,
    step: f32,
    min: f32,
    max: f32,
}

impl HoverScaleChannel {
    /// Channel resting at `min`, moving `step` per frame up to `max`.
    pub fn new(min: f32, max: f32, step: f32) -> Self {
        let steps = ((max - min) / step).round().max(1.0) as u32;
        Self {
            level: 0,
            steps,
            step,
            min,
            max,
        }
    }

    /// Steps toward `max` on a hit and toward `min` on a miss, returning the
    /// new scale.
    pub fn update(&mut self, hit: bool) -> f32 {
        self.level = if hit {
            (self.level + 1).min(self.steps)
        } else {
            self.level.saturating_sub(1)
        };
        self.scale()
    }

    /// Current uniform scale.
    pub fn scale(&self) -> f32 {
        if self.level >= self.steps {
            self.max
        } else {
            self.min + self.level as f32 * self.step
        }
    }

    /// Frames needed to travel from one bound to the other.
    pub fn frames_between_bounds(&self) -> u32 {
        self.steps
    }
}

impl Default for HoverScaleChannel {
    fn default() -> Self {
        Self::new(1.0, 1.2, 0.01)
    }
}
