//! Interactive-mode motion: the hero slide after the intro, page scrolling,
//! camera follow, and scrubbed scroll tracks for the monitor and galaxy.

mod entities;
mod systems;

pub use entities::{
    HeroTimeline, PageScroll, ScrollBinding, ScrollBindings, ScrollTrack, TrackedProperty,
};
pub use systems::{apply_scroll_tracks, follow_scroll, play_hero, read_wheel, start_hero};

use bevy::prelude::*;

use crate::{FrameSet, GameState};

/// Per-plugin configuration for scrolling.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct ScrollConfig {
    /// Scrollable length in viewport heights.
    pub max_pages: f32,
    /// Pixels per wheel line.
    pub line_height: f32,
    /// Camera world-units of descent per viewport height scrolled.
    pub camera_travel: f32,
    /// Hero slide duration in seconds.
    pub hero_duration: f32,
    /// Planet x per logical pixel of window width at the end of the slide.
    pub planet_shift_per_px: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            max_pages: 2.0,
            line_height: 40.0,
            camera_travel: 4.0,
            hero_duration: 1.0,
            planet_shift_per_px: 0.0012,
        }
    }
}

/// Scroll-driven motion, active once the intro has handed off.
pub struct ScrollPlugin(pub ScrollConfig);

impl Plugin for ScrollPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ScrollConfig>()
            .register_type::<PageScroll>()
            .register_type::<ScrollBindings>()
            .insert_resource(self.0.clone())
            .init_resource::<PageScroll>()
            .add_systems(OnEnter(GameState::Interactive), start_hero)
            .add_systems(
                Update,
                (read_wheel, play_hero, follow_scroll, apply_scroll_tracks)
                    .chain()
                    .in_set(FrameSet::Interactive)
                    .run_if(in_state(GameState::Interactive)),
            );
    }
}
