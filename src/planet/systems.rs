use bevy::prelude::*;

use super::PlanetConfig;
use super::entities::{Clouds, Earth, Planet, PlanetSpin};
use crate::assets::AssetCatalog;

/// Spawns the planet group: earth, water, clouds and atmosphere.
pub fn spawn_planet(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    catalog: Res<AssetCatalog>,
    cfg: Res<PlanetConfig>,
) {
    let specular = catalog.image("earthSpecularTexture");

    let earth_material = materials.add(StandardMaterial {
        base_color_texture: catalog.image("earthColorTexture"),
        metallic: 0.5,
        perceptual_roughness: 1.0,
        metallic_roughness_texture: specular,
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    let water_material = materials.add(StandardMaterial {
        base_color: cfg.water_color,
        metallic: 0.25,
        perceptual_roughness: 0.57,
        ..default()
    });

    let clouds_material = materials.add(StandardMaterial {
        base_color_texture: catalog.image("cloudsTexture"),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    // Rendered inside-out and added on top: a soft halo around the rim.
    let atmosphere_material = materials.add(StandardMaterial {
        base_color: cfg.atmosphere_color,
        alpha_mode: AlphaMode::Add,
        unlit: true,
        cull_mode: None,
        ..default()
    });

    let yaw = Quat::from_rotation_y(cfg.initial_rotation.to_radians());

    commands
        .spawn((
            Name::new("Planet"),
            Transform::default(),
            Visibility::default(),
            Planet,
        ))
        .with_children(|planet| {
            planet.spawn((
                Name::new("Earth"),
                Mesh3d(meshes.add(Sphere::new(cfg.earth_radius).mesh().uv(100, 100))),
                MeshMaterial3d(earth_material),
                Transform::from_rotation(yaw),
                Earth,
            ));
            planet.spawn((
                Name::new("Water"),
                Mesh3d(meshes.add(Sphere::new(cfg.water_radius).mesh().uv(100, 100))),
                MeshMaterial3d(water_material),
            ));
            planet.spawn((
                Name::new("Atmosphere"),
                Mesh3d(meshes.add(Sphere::new(cfg.atmosphere_radius).mesh().uv(32, 32))),
                MeshMaterial3d(atmosphere_material),
            ));
            planet.spawn((
                Name::new("Clouds"),
                Mesh3d(meshes.add(Sphere::new(cfg.clouds_radius).mesh().uv(32, 32))),
                MeshMaterial3d(clouds_material),
                Clouds,
            ));
        });
}

/// Spins earth and clouds and publishes the driver angle.
pub fn spin_planet(
    time: Res<Time>,
    cfg: Res<PlanetConfig>,
    mut spin: ResMut<PlanetSpin>,
    mut earth_q: Query<&mut Transform, (With<Earth>, Without<Clouds>)>,
    mut clouds_q: Query<&mut Transform, (With<Clouds>, Without<Earth>)>,
) {
    let dt = time.delta_secs();
    let yaw = spin.advance(cfg.rotation_speed, dt);

    if let Ok(mut earth) = earth_q.single_mut() {
        earth.rotation = Quat::from_rotation_y(yaw);
    }
    if let Ok(mut clouds) = clouds_q.single_mut() {
        clouds.rotate_y(cfg.rotation_speed * dt / 2.0);
    }
}
