use bevy::prelude::*;

use crate::intro::ProgressTimer;
use crate::math::{self, Easing};

/// Page scroll position in logical pixels, clamped to `[0, max_pages * height]`.
#[derive(Resource, Default, Debug, Reflect)]
pub struct PageScroll {
    /// Distance scrolled from the top, in pixels.
    pub offset: f32,
}

impl PageScroll {
    /// Applies a wheel delta (positive scrolls up) and clamps to the page.
    pub fn scroll_by(&mut self, delta: f32, max_offset: f32) {
        self.offset = (self.offset - delta).clamp(0.0, max_offset.max(0.0));
    }

    /// Offset in viewport heights.
    pub fn pages(&self, height: f32) -> f32 {
        if height > 0.0 {
            self.offset / height
        } else {
            0.0
        }
    }
}

/// Scrubbed scroll window, in viewport heights.
#[derive(Clone, Copy, Debug, Reflect)]
pub struct ScrollTrack {
    /// Scroll position where the track starts.
    pub start: f32,
    /// Scroll position where the track ends.
    pub end: f32,
}

impl ScrollTrack {
    /// Track spanning `start..end` pages.
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Progress through the track, clamped to `[0, 1]`.
    pub fn progress(&self, pages: f32) -> f32 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if pages >= self.end { 1.0 } else { 0.0 };
        }
        ((pages - self.start) / span).clamp(0.0, 1.0)
    }
}

/// Transform field a [`ScrollBinding`] writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum TrackedProperty {
    /// `translation.x`.
    TranslationX,
    /// `translation.y`.
    TranslationY,
    /// Yaw, written as a full rotation about y.
    RotationY,
}

/// One scrubbed property on a scene node.
#[derive(Clone, Debug, Reflect)]
pub struct ScrollBinding {
    /// Scroll window.
    pub track: ScrollTrack,
    /// Field written.
    pub property: TrackedProperty,
    /// Value at the top of the window.
    pub from: f32,
    /// Value at the bottom of the window.
    pub to: f32,
}

impl ScrollBinding {
    /// Value for a scroll position in pages.
    pub fn value(&self, pages: f32) -> f32 {
        math::lerp(self.from, self.to, self.track.progress(pages))
    }

    /// Writes the value into `transform`.
    pub fn apply(&self, pages: f32, transform: &mut Transform) {
        let v = self.value(pages);
        match self.property {
            TrackedProperty::TranslationX => transform.translation.x = v,
            TrackedProperty::TranslationY => transform.translation.y = v,
            TrackedProperty::RotationY => transform.rotation = Quat::from_rotation_y(v),
        }
    }
}

/// Scroll bindings attached to a scene node.
#[derive(Component, Clone, Debug, Default, Reflect)]
pub struct ScrollBindings(pub Vec<ScrollBinding>);

/// Post-intro slide of the planet and key light toward the right.
#[derive(Resource, Debug)]
pub struct HeroTimeline {
    timer: ProgressTimer,
}

impl HeroTimeline {
    /// Timeline lasting `duration` seconds.
    pub fn new(duration: f32) -> Self {
        Self {
            timer: ProgressTimer::new(1.0 / duration.max(f32::EPSILON), Easing::OutQuad),
        }
    }

    /// Advances and returns the eased progress.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.timer.advance(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_clamps_to_page() {
        let mut scroll = PageScroll::default();
        scroll.scroll_by(100.0, 1000.0);
        assert_eq!(scroll.offset, 0.0);
        scroll.scroll_by(-400.0, 1000.0);
        assert_eq!(scroll.offset, 400.0);
        scroll.scroll_by(-4000.0, 1000.0);
        assert_eq!(scroll.offset, 1000.0);
    }

    #[test]
    fn track_progress_is_scrubbed_and_clamped() {
        let track = ScrollTrack::new(1.0, 2.0);
        assert_eq!(track.progress(0.5), 0.0);
        assert!((track.progress(1.25) - 0.25).abs() < 1e-6);
        assert_eq!(track.progress(3.0), 1.0);
    }

    #[test]
    fn degenerate_track_is_a_step() {
        let track = ScrollTrack::new(1.0, 1.0);
        assert_eq!(track.progress(0.99), 0.0);
        assert_eq!(track.progress(1.0), 1.0);
    }

    #[test]
    fn binding_writes_only_its_field() {
        let binding = ScrollBinding {
            track: ScrollTrack::new(0.0, 1.0),
            property: TrackedProperty::TranslationY,
            from: -8.0,
            to: -6.8,
        };
        let mut tf = Transform::from_xyz(1.0, 0.0, 2.8);
        binding.apply(0.5, &mut tf);
        assert!((tf.translation.y - -7.4).abs() < 1e-5);
        assert_eq!(tf.translation.x, 1.0);
        assert_eq!(tf.translation.z, 2.8);
    }

    #[test]
    fn hero_timeline_finishes_after_duration() {
        let mut hero = HeroTimeline::new(1.0);
        let half = hero.advance(0.5);
        assert!(half > 0.5, "ease-out runs ahead of linear");
        assert_eq!(hero.advance(0.6), 1.0);
    }
}
