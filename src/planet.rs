//! Rotating planet: earth, water, clouds and atmosphere shells.
//!
//! The earth's accumulated rotation, in degrees, is the driver signal that
//! gates the intro. It is published every frame as [`PlanetSpin`].

mod entities;
mod systems;

pub use entities::{Clouds, Earth, Planet, PlanetSpin};
pub use systems::{spawn_planet, spin_planet};

use bevy::prelude::*;

use crate::{FrameSet, GameState};

/// Per-plugin configuration for the planet.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct PlanetConfig {
    /// Earth spin in radians per second. Clouds turn at half this rate.
    pub rotation_speed: f32,
    /// Earth yaw at startup, in degrees.
    pub initial_rotation: f32,
    /// Earth sphere radius.
    pub earth_radius: f32,
    /// Water sphere radius, just under the earth surface.
    pub water_radius: f32,
    /// Cloud shell radius.
    pub clouds_radius: f32,
    /// Atmosphere shell radius.
    pub atmosphere_radius: f32,
    /// Water tint.
    pub water_color: Color,
    /// Atmosphere tint; alpha is the glow intensity.
    pub atmosphere_color: Color,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            rotation_speed: 0.15,
            initial_rotation: 230.0,
            earth_radius: 1.0,
            water_radius: 0.995,
            clouds_radius: 1.03,
            atmosphere_radius: 1.1,
            water_color: Color::srgb_u8(0x00, 0x55, 0xff),
            atmosphere_color: Color::srgba_u8(0x00, 0x91, 0xff, 77),
        }
    }
}

/// Spawns the planet and spins it while the scene is live.
pub struct PlanetPlugin(pub PlanetConfig);

impl Plugin for PlanetPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PlanetConfig>()
            .register_type::<PlanetSpin>()
            .register_type::<Planet>()
            .insert_resource(self.0.clone())
            .insert_resource(PlanetSpin {
                degrees: self.0.initial_rotation,
            })
            .add_systems(Startup, spawn_planet)
            .add_systems(
                Update,
                spin_planet
                    .in_set(FrameSet::Driver)
                    .run_if(not(in_state(GameState::Loading))),
            );
    }
}
