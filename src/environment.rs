//! Key spot light and background.
//!
//! The light's position belongs to the intro (light channel) and then to
//! the hero timeline; this module only spawns it and keeps it aimed at the
//! planet.

use bevy::prelude::*;

use crate::FrameSet;
use crate::intro::IntroConfig;
use crate::planet::Planet;

/// Per-plugin configuration for lighting.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct EnvironmentConfig {
    /// Spot light intensity in lumens.
    pub intensity: f32,
    /// Spot light range.
    pub range: f32,
    /// Horizontal offset of the light from the planet once interactive.
    pub planet_offset: f32,
    /// Background clear color.
    pub clear_color: Color,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            intensity: 4_000_000.0,
            range: 10.0,
            planet_offset: 3.0,
            clear_color: Color::srgb(0.005, 0.005, 0.02),
        }
    }
}

/// Marker on the key spot light.
#[derive(Component, Reflect)]
pub struct KeyLight;

/// Spawns the key light and keeps it aimed at the planet.
pub struct EnvironmentPlugin(pub EnvironmentConfig);

impl Plugin for EnvironmentPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<EnvironmentConfig>()
            .register_type::<KeyLight>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .add_systems(Startup, spawn_key_light)
            .add_systems(Update, aim_key_light.after(FrameSet::Interactive));
    }
}

/// Spawns the spot light at the intro's starting position.
pub fn spawn_key_light(mut commands: Commands, cfg: Res<EnvironmentConfig>, intro: Res<IntroConfig>) {
    commands.spawn((
        Name::new("KeyLight"),
        SpotLight {
            intensity: cfg.intensity,
            range: cfg.range,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(intro.light.start_position).looking_at(Vec3::ZERO, Vec3::Y),
        KeyLight,
    ));
}

/// Points the light at the planet centre. Writes rotation only.
pub fn aim_key_light(
    planet_q: Query<&Transform, (With<Planet>, Without<KeyLight>)>,
    mut light_q: Query<&mut Transform, (With<KeyLight>, Without<Planet>)>,
) {
    let Ok(mut light) = light_q.single_mut() else {
        return;
    };
    let target = planet_q.single().map_or(Vec3::ZERO, |tf| tf.translation);
    if light.translation.distance_squared(target) > f32::EPSILON {
        light.look_at(target, Vec3::Y);
    }
}
