//! Spiral point-cloud galaxy below the fold.
//!
//! The scatter is sampled from seeded value noise, so a given
//! [`GalaxyConfig`] always produces the same cloud.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;
use noise::{NoiseFn, Value};

use crate::scroll::{ScrollBinding, ScrollBindings, ScrollTrack, TrackedProperty};
use crate::{FrameSet, GameState};

/// Per-plugin configuration for the galaxy.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct GalaxyConfig {
    /// Number of points.
    pub count: u32,
    /// Outer radius.
    pub radius: f32,
    /// Number of spiral arms.
    pub branches: u32,
    /// Arm twist, in radians per unit of radius.
    pub spin: f32,
    /// Scatter around each arm, as a fraction of the point's radius.
    pub randomness: f32,
    /// Exponent pulling the scatter toward the arm.
    pub randomness_power: f32,
    /// Color at the core.
    pub inside_color: Color,
    /// Color at the rim.
    pub outside_color: Color,
    /// Spawn position.
    pub position: Vec3,
    /// Fixed x tilt in radians.
    pub tilt: f32,
    /// Self rotation in radians per second.
    pub rotation_speed: f32,
    /// Noise seed for the scatter.
    pub seed: u32,
    /// Scroll window, in viewport heights, that raises the galaxy.
    pub track: ScrollTrack,
    /// Height at the top of the scroll window.
    pub from_y: f32,
    /// Height at the bottom of the scroll window.
    pub to_y: f32,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            count: 100_000,
            radius: 2.0,
            branches: 5,
            spin: 2.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inside_color: Color::srgb_u8(0x2e, 0x35, 0xff),
            outside_color: Color::srgb_u8(0xff, 0x00, 0x00),
            position: Vec3::new(0.0, -4.7, 2.8),
            tilt: 0.4,
            rotation_speed: 0.1,
            seed: 7,
            track: ScrollTrack::new(1.4, 2.0),
            from_y: -8.0,
            to_y: -6.8,
        }
    }
}

/// Galaxy root. Holds the accumulated yaw.
#[derive(Component, Default, Reflect)]
pub struct Galaxy {
    /// Yaw in radians.
    pub yaw: f32,
}

/// Spawns the galaxy and keeps it turning.
pub struct GalaxyPlugin(pub GalaxyConfig);

impl Plugin for GalaxyPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<GalaxyConfig>()
            .register_type::<Galaxy>()
            .insert_resource(self.0.clone())
            .add_systems(Startup, spawn_galaxy)
            .add_systems(
                Update,
                spin_galaxy
                    .in_set(FrameSet::Interactive)
                    .run_if(not(in_state(GameState::Loading))),
            );
    }
}

/// Point positions and vertex colors for the cloud.
pub struct Scatter {
    /// Local positions.
    pub positions: Vec<[f32; 3]>,
    /// Linear RGBA per point.
    pub colors: Vec<[f32; 4]>,
}

// Value noise at integer lattice points is an 8-bit hash; pairing two
// samples gives 16-bit steps.
fn unit(noise: &Value, index: u32, channel: u32) -> f32 {
    let sample = |c: u32| {
        let p = [
            f64::from(index % 256),
            f64::from((index / 256) % 256),
            f64::from(index / 65_536),
            f64::from(c),
        ];
        ((noise.get(p) as f32 + 1.0) * 0.5).clamp(0.0, 1.0)
    };
    let coarse = sample(channel * 2);
    let fine = sample(channel * 2 + 1);
    ((coarse * 255.0 + fine) / 256.0).clamp(0.0, 1.0)
}

fn jitter(noise: &Value, index: u32, channel: u32, cfg: &GalaxyConfig, radius: f32) -> f32 {
    let magnitude = unit(noise, index, channel).powf(cfg.randomness_power);
    let sign = if unit(noise, index, channel + 3) < 0.5 { 1.0 } else { -1.0 };
    magnitude * sign * cfg.randomness * radius
}

/// Builds the spiral scatter for `cfg`.
pub fn scatter(cfg: &GalaxyConfig) -> Scatter {
    let noise = Value::new(cfg.seed);
    let inside = cfg.inside_color.to_linear();
    let outside = cfg.outside_color.to_linear();
    let branches = cfg.branches.max(1);

    let mut positions = Vec::with_capacity(cfg.count as usize);
    let mut colors = Vec::with_capacity(cfg.count as usize);
    for i in 0..cfg.count {
        let radius = unit(&noise, i, 0) * cfg.radius;
        let spin_angle = radius * cfg.spin;
        let branch_angle = (i % branches) as f32 / branches as f32 * std::f32::consts::TAU;
        let angle = branch_angle + spin_angle;

        positions.push([
            angle.cos() * radius + jitter(&noise, i, 1, cfg, radius),
            jitter(&noise, i, 2, cfg, radius),
            angle.sin() * radius + jitter(&noise, i, 3, cfg, radius),
        ]);

        let t = if cfg.radius > 0.0 { radius / cfg.radius } else { 0.0 };
        colors.push(inside.mix(&outside, t).to_f32_array());
    }
    Scatter { positions, colors }
}

/// Builds the point-list mesh and spawns the galaxy.
pub fn spawn_galaxy(
    mut commands: Commands,
    cfg: Res<GalaxyConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Scatter { positions, colors } = scatter(&cfg);
    debug!("galaxy scatter: {} points", positions.len());

    let mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors);

    commands.spawn((
        Name::new("Galaxy"),
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            alpha_mode: AlphaMode::Add,
            ..default()
        })),
        Transform::from_translation(cfg.position).with_rotation(Quat::from_rotation_x(cfg.tilt)),
        Galaxy::default(),
        ScrollBindings(vec![ScrollBinding {
            track: cfg.track,
            property: TrackedProperty::TranslationY,
            from: cfg.from_y,
            to: cfg.to_y,
        }]),
    ));
}

/// Turns the galaxy about its own axis. Writes rotation only.
pub fn spin_galaxy(
    time: Res<Time>,
    cfg: Res<GalaxyConfig>,
    mut query: Query<(&mut Transform, &mut Galaxy)>,
) {
    for (mut transform, mut galaxy) in &mut query {
        galaxy.yaw += cfg.rotation_speed * time.delta_secs();
        transform.rotation = Quat::from_euler(EulerRot::XYZ, cfg.tilt, galaxy.yaw, 0.0);
    }
}
