//! Interactive title shown after the intro.
//!
//! Rises into view, grows while hovered and shrinks back when the pointer
//! leaves, and reports clicks. All of it is inert until the
//! [`WorldState`](crate::world::WorldState) leaves intro mode.

mod entities;
mod hover;
mod systems;

pub use entities::{Hotspot, HotspotActivated, HotspotEntry, HotspotHover, HotspotScale};
pub use hover::HoverScaleChannel;
pub use systems::{
    activate_on_click, animate_entry, apply_hover_scale, hit_test_hotspot, spawn_hotspot,
};

use bevy::prelude::*;

use crate::{FrameSet, GameState};

/// Per-plugin configuration for the hotspot.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct HotspotConfig {
    /// Asset catalog name of the model.
    pub model: String,
    /// Position the title rises from.
    pub start_position: Vec3,
    /// Resting position.
    pub end_position: Vec3,
    /// Fixed x tilt in radians.
    pub tilt: f32,
    /// Z rotation covered by the entry spin, in radians.
    pub spin: f32,
    /// Entry channel speed (progress per second).
    pub entry_speed: f32,
    /// Resting scale.
    pub min_scale: f32,
    /// Scale while hovered.
    pub max_scale: f32,
    /// Scale change per frame.
    pub scale_step: f32,
    /// Link reported on click.
    pub url: String,
}

impl Default for HotspotConfig {
    fn default() -> Self {
        Self {
            model: "interactiveText".into(),
            start_position: Vec3::new(0.0, -2.0, 1.0),
            end_position: Vec3::new(0.0, -0.9, 1.0),
            tilt: std::f32::consts::FRAC_PI_2,
            spin: std::f32::consts::TAU,
            entry_speed: 0.6,
            min_scale: 1.0,
            max_scale: 1.2,
            scale_step: 0.01,
            url: "https://recruitment.casino/".into(),
        }
    }
}

/// Spawns and drives the interactive title.
pub struct HotspotPlugin(pub HotspotConfig);

impl Plugin for HotspotPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<HotspotConfig>()
            .register_type::<Hotspot>()
            .insert_resource(self.0.clone())
            .init_resource::<HotspotHover>()
            .add_message::<HotspotActivated>()
            .add_systems(OnEnter(GameState::Interactive), spawn_hotspot)
            .add_systems(
                Update,
                (
                    animate_entry,
                    hit_test_hotspot,
                    apply_hover_scale,
                    activate_on_click,
                )
                    .chain()
                    .in_set(FrameSet::Interactive)
                    .run_if(in_state(GameState::Interactive)),
            );
    }
}
