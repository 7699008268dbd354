use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::HotspotConfig;
use super::entities::{Hotspot, HotspotActivated, HotspotEntry, HotspotHover, HotspotScale};
use super::hover::HoverScaleChannel;
use crate::assets::{AssetCatalog, AssetReadiness};
use crate::camera::MainCamera;
use crate::intro::{Channel, ChannelSettings};
use crate::math::Easing;
use crate::world::WorldState;

/// Spawns the interactive title below the frame, ready to rise.
pub fn spawn_hotspot(mut commands: Commands, catalog: Res<AssetCatalog>, cfg: Res<HotspotConfig>) {
    let entry = ChannelSettings::ungated(cfg.entry_speed, Easing::InOutSine);
    let mut entity = commands.spawn((
        Name::new("Hotspot"),
        Transform::from_translation(cfg.start_position)
            .with_rotation(Quat::from_rotation_x(cfg.tilt))
            .with_scale(Vec3::splat(cfg.min_scale)),
        Visibility::default(),
        Hotspot,
        HotspotEntry {
            rise: Channel::new(&entry, cfg.start_position, cfg.end_position),
            spin: Channel::new(&entry, 0.0, cfg.spin),
            tilt: cfg.tilt,
        },
        HotspotScale(HoverScaleChannel::new(
            cfg.min_scale,
            cfg.max_scale,
            cfg.scale_step,
        )),
    ));
    match catalog.scene(&cfg.model) {
        Some(scene) => {
            entity.insert(SceneRoot(scene));
        }
        None => warn!("hotspot model `{}` is not in the asset catalog", cfg.model),
    }
}

/// Plays the rise-and-spin entry. Writes translation and rotation only.
pub fn animate_entry(
    time: Res<Time>,
    cfg: Res<HotspotConfig>,
    readiness: Res<AssetReadiness>,
    mut query: Query<(&mut Transform, &mut HotspotEntry), With<Hotspot>>,
) {
    if !readiness.is_ready(&cfg.model) {
        return;
    }
    let dt = time.delta_secs();
    for (mut transform, mut entry) in &mut query {
        if let Some(position) = entry.rise.advance(dt) {
            transform.translation = position;
        }
        if let Some(z) = entry.spin.advance(dt) {
            transform.rotation = Quat::from_euler(EulerRot::XYZ, entry.tilt, 0.0, z);
        }
    }
}

/// Casts a ray from the camera through the cursor and records whether it
/// hits any mesh under the hotspot.
pub fn hit_test_hotspot(
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    hotspot_q: Query<Entity, With<Hotspot>>,
    parents: Query<&ChildOf>,
    mut ray_cast: MeshRayCast,
    mut hover: ResMut<HotspotHover>,
) {
    let hit = pointer_hit(&windows, &camera_q, &hotspot_q, &parents, &mut ray_cast)
        .unwrap_or(false);

    if hover.0 != hit {
        hover.0 = hit;
    }
}

fn pointer_hit(
    windows: &Query<&Window, With<PrimaryWindow>>,
    camera_q: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    hotspot_q: &Query<Entity, With<Hotspot>>,
    parents: &Query<&ChildOf>,
    ray_cast: &mut MeshRayCast,
) -> Option<bool> {
    let cursor = windows.single().ok()?.cursor_position()?;
    let (camera, cam_tf) = camera_q.single().ok()?;
    let root = hotspot_q.single().ok()?;
    let ray = camera.viewport_to_world(cam_tf, cursor).ok()?;
    let hits = ray_cast.cast_ray(ray, &MeshRayCastSettings::default());
    Some(hits.iter().any(|(entity, _)| is_under(*entity, root, parents)))
}

fn is_under(mut entity: Entity, root: Entity, parents: &Query<&ChildOf>) -> bool {
    loop {
        if entity == root {
            return true;
        }
        match parents.get(entity) {
            Ok(child_of) => entity = child_of.parent(),
            Err(_) => return false,
        }
    }
}

/// Steps the hover scale from the latest hit test. Writes scale only.
pub fn apply_hover_scale(
    world: Res<WorldState>,
    hover: Res<HotspotHover>,
    mut query: Query<(&mut Transform, &mut HotspotScale), With<Hotspot>>,
) {
    if world.is_intro() {
        return;
    }
    for (mut transform, mut scale) in &mut query {
        let s = scale.0.update(hover.0);
        transform.scale = Vec3::splat(s);
    }
}

/// Reports a click on the hovered hotspot.
pub fn activate_on_click(
    world: Res<WorldState>,
    mouse: Res<ButtonInput<MouseButton>>,
    hover: Res<HotspotHover>,
    cfg: Res<HotspotConfig>,
    mut activated: MessageWriter<HotspotActivated>,
) {
    if world.is_intro() || !hover.0 || !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    info!("hotspot activated: {}", cfg.url);
    activated.write(HotspotActivated {
        url: cfg.url.clone(),
    });
}

#[cfg(test)]
mod tests {
    use bevy::state::app::StatesPlugin;

    use super::*;
    use crate::ScenePlugin;

    #[derive(Resource, Default)]
    struct ActivatedCount(usize);

    fn count_activated(
        mut reader: MessageReader<HotspotActivated>,
        mut count: ResMut<ActivatedCount>,
    ) {
        count.0 += reader.read().count();
    }

    fn hover_app() -> App {
        let cfg = HotspotConfig::default();
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, ScenePlugin))
            .insert_resource(HotspotHover(true))
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<ActivatedCount>()
            .add_message::<HotspotActivated>()
            .add_systems(
                Update,
                (apply_hover_scale, activate_on_click, count_activated).chain(),
            );
        app.world_mut().spawn((
            Transform::default(),
            Hotspot,
            HotspotScale(HoverScaleChannel::new(
                cfg.min_scale,
                cfg.max_scale,
                cfg.scale_step,
            )),
        ));
        app.insert_resource(cfg);
        app
    }

    fn hotspot_scale(app: &mut App) -> Vec3 {
        let world = app.world_mut();
        let mut q = world.query_filtered::<&Transform, With<Hotspot>>();
        q.single(world).expect("hotspot").scale
    }

    fn click(app: &mut App) {
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .clear();
    }

    #[test]
    fn hover_and_click_are_inert_during_intro() {
        let mut app = hover_app();
        click(&mut app);
        for _ in 0..30 {
            app.update();
        }
        assert_eq!(hotspot_scale(&mut app), Vec3::ONE);
        assert_eq!(app.world().resource::<ActivatedCount>().0, 0);
    }

    #[test]
    fn hover_grows_to_max_after_the_flip() {
        let mut app = hover_app();
        assert!(app.world_mut().resource_mut::<WorldState>().finish_intro());

        for _ in 0..20 {
            app.update();
        }
        assert_eq!(hotspot_scale(&mut app), Vec3::splat(1.2));

        app.world_mut().resource_mut::<HotspotHover>().0 = false;
        for _ in 0..20 {
            app.update();
        }
        assert_eq!(hotspot_scale(&mut app), Vec3::ONE);
    }

    #[test]
    fn click_on_hovered_hotspot_reports_once() {
        let mut app = hover_app();
        assert!(app.world_mut().resource_mut::<WorldState>().finish_intro());
        click(&mut app);
        for _ in 0..5 {
            app.update();
        }
        assert_eq!(app.world().resource::<ActivatedCount>().0, 1);
    }
}
