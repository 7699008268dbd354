//! Monitor model revealed by scrolling.

use bevy::prelude::*;

use crate::GameState;
use crate::assets::AssetCatalog;
use crate::scroll::{ScrollBinding, ScrollBindings, ScrollTrack, TrackedProperty};

/// Per-plugin configuration for the monitor.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct MonitorConfig {
    /// Asset catalog name of the model.
    pub model: String,
    /// Resting position.
    pub position: Vec3,
    /// Scroll window, in viewport heights, that swings the monitor in.
    pub track: ScrollTrack,
    /// Yaw before the swing, in radians.
    pub from_yaw: f32,
    /// Yaw after the swing.
    pub to_yaw: f32,
    /// X offset before the swing.
    pub from_x: f32,
    /// X offset after the swing.
    pub to_x: f32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            model: "monitorModel".into(),
            position: Vec3::new(0.0, -6.5, 3.0),
            track: ScrollTrack::new(0.8, 1.6),
            from_yaw: -std::f32::consts::PI,
            to_yaw: 0.0,
            from_x: 2.0,
            to_x: 0.0,
        }
    }
}

/// Marker on the monitor root.
#[derive(Component, Reflect)]
pub struct Monitor;

/// Spawns the monitor once assets are loaded.
pub struct MonitorPlugin(pub MonitorConfig);

impl Plugin for MonitorPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<MonitorConfig>()
            .register_type::<Monitor>()
            .insert_resource(self.0.clone())
            .add_systems(OnEnter(GameState::Intro), spawn_monitor);
    }
}

/// Spawns the monitor scene with its scroll bindings.
pub fn spawn_monitor(mut commands: Commands, catalog: Res<AssetCatalog>, cfg: Res<MonitorConfig>) {
    let mut entity = commands.spawn((
        Name::new("Monitor"),
        Transform::from_translation(cfg.position).with_rotation(Quat::from_rotation_y(cfg.from_yaw)),
        Visibility::default(),
        Monitor,
        ScrollBindings(vec![
            ScrollBinding {
                track: cfg.track,
                property: TrackedProperty::RotationY,
                from: cfg.from_yaw,
                to: cfg.to_yaw,
            },
            ScrollBinding {
                track: cfg.track,
                property: TrackedProperty::TranslationX,
                from: cfg.from_x,
                to: cfg.to_x,
            },
        ]),
    ));
    match catalog.scene(&cfg.model) {
        Some(scene) => {
            entity.insert(SceneRoot(scene));
        }
        None => warn!("monitor model `{}` is not in the asset catalog", cfg.model),
    }
}
