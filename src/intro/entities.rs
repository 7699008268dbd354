use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::camera::MainCamera;
use crate::environment::KeyLight;

/// Marker on the 3D title animated by the intro.
#[derive(Component, Reflect)]
pub struct IntroText;

/// Transforms written by the intro channels, one query per target.
#[derive(SystemParam)]
pub struct IntroTargets<'w, 's> {
    /// Scene camera.
    pub camera: Query<
        'w,
        's,
        &'static mut Transform,
        (With<MainCamera>, Without<KeyLight>, Without<IntroText>),
    >,
    /// Key spot light.
    pub light: Query<
        'w,
        's,
        &'static mut Transform,
        (With<KeyLight>, Without<MainCamera>, Without<IntroText>),
    >,
    /// Intro title.
    pub text: Query<
        'w,
        's,
        &'static mut Transform,
        (With<IntroText>, Without<MainCamera>, Without<KeyLight>),
    >,
}

/// Read-only frame inputs for the intro sequencer.
#[derive(SystemParam)]
pub struct IntroInputs<'w> {
    /// Frame clock.
    pub time: Res<'w, Time>,
    /// Driver angle.
    pub spin: Res<'w, crate::planet::PlanetSpin>,
    /// Named asset readiness.
    pub readiness: Res<'w, crate::assets::AssetReadiness>,
    /// Intro configuration.
    pub cfg: Res<'w, super::IntroConfig>,
}
