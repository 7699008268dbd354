use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use super::ScrollConfig;
use super::entities::{HeroTimeline, PageScroll, ScrollBindings};
use crate::camera::MainCamera;
use crate::environment::{EnvironmentConfig, KeyLight};
use crate::math;
use crate::planet::Planet;
use crate::viewport::Viewport;

/// Starts the hero slide as the scene becomes interactive.
pub fn start_hero(mut commands: Commands, cfg: Res<ScrollConfig>) {
    debug!("hero timeline started ({}s)", cfg.hero_duration);
    commands.insert_resource(HeroTimeline::new(cfg.hero_duration));
}

/// Accumulates wheel input into [`PageScroll`].
pub fn read_wheel(
    mut wheel: MessageReader<MouseWheel>,
    cfg: Res<ScrollConfig>,
    viewport: Res<Viewport>,
    mut scroll: ResMut<PageScroll>,
) {
    let max_offset = cfg.max_pages * viewport.height;
    for ev in wheel.read() {
        let delta = match ev.unit {
            MouseScrollUnit::Line => ev.y * cfg.line_height,
            MouseScrollUnit::Pixel => ev.y,
        };
        scroll.scroll_by(delta, max_offset);
    }
}

/// Slides the planet right by a width-proportional amount and keeps the
/// key light at a fixed offset from it. Writes `translation.x` only.
///
/// The target follows the window width, so the slide keeps tracking
/// resizes after it has finished.
pub fn play_hero(
    time: Res<Time>,
    cfg: Res<ScrollConfig>,
    env: Res<EnvironmentConfig>,
    viewport: Res<Viewport>,
    hero: Option<ResMut<HeroTimeline>>,
    mut planet_q: Query<&mut Transform, (With<Planet>, Without<KeyLight>)>,
    mut light_q: Query<&mut Transform, (With<KeyLight>, Without<Planet>)>,
) {
    let Some(mut hero) = hero else {
        return;
    };
    let t = hero.advance(time.delta_secs());
    let planet_x = math::lerp(0.0, viewport.width * cfg.planet_shift_per_px, t);

    if let Ok(mut planet) = planet_q.single_mut() {
        planet.translation.x = planet_x;
    }
    if let Ok(mut light) = light_q.single_mut() {
        light.translation.x = planet_x + env.planet_offset;
    }
}

/// Moves the camera down the page with the scroll. Writes `translation.y` only.
pub fn follow_scroll(
    cfg: Res<ScrollConfig>,
    viewport: Res<Viewport>,
    scroll: Res<PageScroll>,
    mut camera_q: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut camera) = camera_q.single_mut() else {
        return;
    };
    let y = -scroll.pages(viewport.height) * cfg.camera_travel;
    if camera.translation.y != y {
        camera.translation.y = y;
    }
}

/// Scrubs every [`ScrollBindings`] node to the current scroll position.
pub fn apply_scroll_tracks(
    viewport: Res<Viewport>,
    scroll: Res<PageScroll>,
    mut query: Query<(&mut Transform, &ScrollBindings)>,
) {
    let pages = scroll.pages(viewport.height);
    for (mut transform, bindings) in &mut query {
        for binding in &bindings.0 {
            binding.apply(pages, &mut transform);
        }
    }
}
