//! Scene camera: spawn at the intro's close-up pose, and keep the field of
//! view matched to the viewport width.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::post_process::bloom::{Bloom, BloomCompositeMode};
use bevy::prelude::*;
use bevy::render::view::Hdr;

use crate::intro::IntroConfig;
use crate::math;
use crate::viewport::Viewport;
use crate::FrameSet;

/// Per-plugin configuration for the scene camera.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct CameraConfig {
    /// Field of view (degrees) on full-width viewports.
    pub min_fov: f32,
    /// Field of view (degrees) on the narrowest viewports.
    pub max_fov: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
    /// Bloom post-processing intensity.
    pub bloom_intensity: f32,
    /// Ambient fill brightness.
    pub ambient_brightness: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_fov: 35.0,
            max_fov: 55.0,
            near: 0.1,
            far: 100.0,
            bloom_intensity: 0.15,
            ambient_brightness: 80.0,
        }
    }
}

/// Marker on the single scene camera.
#[derive(Component, Reflect)]
pub struct MainCamera;

/// Spawns the camera and keeps its field of view in sync with the window.
pub struct CameraPlugin(pub CameraConfig);

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CameraConfig>()
            .register_type::<MainCamera>()
            .insert_resource(self.0.clone())
            .add_systems(Startup, spawn_camera)
            .add_systems(
                Update,
                apply_field_of_view
                    .in_set(FrameSet::Collaborators)
                    .run_if(resource_changed::<Viewport>),
            );
    }
}

/// Spawns the Camera3d at the intro's starting pose.
pub fn spawn_camera(
    mut commands: Commands,
    cfg: Res<CameraConfig>,
    intro: Res<IntroConfig>,
    viewport: Res<Viewport>,
) {
    let start = &intro.camera;
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        start.start_rotation.x,
        start.start_rotation.y,
        start.start_rotation.z,
    );
    commands.spawn((
        Name::new("Camera"),
        Camera3d::default(),
        Hdr,
        Tonemapping::TonyMcMapface,
        Bloom {
            intensity: cfg.bloom_intensity,
            composite_mode: BloomCompositeMode::Additive,
            ..Bloom::NATURAL
        },
        Projection::Perspective(PerspectiveProjection {
            fov: field_of_view(&cfg, &viewport).to_radians(),
            near: cfg.near,
            far: cfg.far,
            ..default()
        }),
        AmbientLight {
            color: Color::srgb_u8(0x40, 0x40, 0x40),
            brightness: cfg.ambient_brightness,
            ..default()
        },
        Transform::from_translation(start.start_position).with_rotation(rotation),
        MainCamera,
    ));
}

/// Field of view in degrees for the current viewport.
pub fn field_of_view(cfg: &CameraConfig, viewport: &Viewport) -> f32 {
    math::field_of_view(viewport.scale_percent, viewport.aspect, cfg.min_fov, cfg.max_fov)
}

/// Recomputes the perspective field of view after a resize.
pub fn apply_field_of_view(
    cfg: Res<CameraConfig>,
    viewport: Res<Viewport>,
    mut query: Query<&mut Projection, With<MainCamera>>,
) {
    let Ok(mut projection) = query.single_mut() else {
        return;
    };
    if let Projection::Perspective(perspective) = &mut *projection {
        perspective.fov = field_of_view(&cfg, &viewport).to_radians();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::ViewportConfig;

    #[test]
    fn shrinking_window_widens_view_linearly() {
        let cfg = CameraConfig::default();
        let vp_cfg = ViewportConfig::default();
        let wide = Viewport::new(1500.0, 900.0, &vp_cfg);
        let narrow = Viewport::new(320.0, 600.0, &vp_cfg);
        assert!((field_of_view(&cfg, &wide) - cfg.min_fov).abs() < 1e-4);
        assert!((field_of_view(&cfg, &narrow) - cfg.max_fov).abs() < 1e-3);

        let mut prev = field_of_view(&cfg, &wide);
        for width in (320..=1500).rev().step_by(59) {
            let fov = field_of_view(&cfg, &Viewport::new(width as f32, 900.0, &vp_cfg));
            assert!(fov >= prev - 1e-5);
            prev = fov;
        }
    }

    #[test]
    fn portrait_window_uses_max_fov() {
        let cfg = CameraConfig::default();
        let tall = Viewport::new(1500.0, 3200.0, &ViewportConfig::default());
        assert_eq!(field_of_view(&cfg, &tall), cfg.max_fov);
    }
}
