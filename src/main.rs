//! Planet landing scene viewer.
//!
//! Esc quits; Tab toggles the world inspector.

use bevy::app::AppExit;
use bevy::prelude::*;
#[cfg(feature = "native")]
use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
use bevy_inspector_egui::quick::WorldInspectorPlugin;
#[cfg(feature = "native")]
use clap::Parser;

use orbital_landing::assets::AssetCatalogPlugin;
use orbital_landing::camera::{CameraConfig, CameraPlugin};
use orbital_landing::environment::{EnvironmentConfig, EnvironmentPlugin};
use orbital_landing::galaxy::{GalaxyConfig, GalaxyPlugin};
use orbital_landing::hotspot::{HotspotConfig, HotspotPlugin};
use orbital_landing::intro::{IntroConfig, IntroPlugin};
use orbital_landing::monitor::{MonitorConfig, MonitorPlugin};
use orbital_landing::planet::{PlanetConfig, PlanetPlugin};
use orbital_landing::scroll::{ScrollConfig, ScrollPlugin};
use orbital_landing::viewport::{ViewportConfig, ViewportPlugin};
use orbital_landing::ScenePlugin;

/// Command-line overrides.
#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(version, about = "Animated planet landing scene")]
struct Cli {
    /// Driver angle (degrees) that opens every gated intro channel.
    #[arg(long)]
    gate: Option<f32>,
    /// Planet spin in radians per second.
    #[arg(long)]
    planet_speed: Option<f32>,
    /// Start with the world inspector open.
    #[arg(long)]
    inspector: bool,
}

/// Whether the world inspector is drawn.
#[derive(Resource, Default, Reflect)]
struct InspectorVisible(bool);

fn main() {
    let (intro, planet, inspector) = scene_configs();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Orbital Landing".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<InspectorVisible>()
    .insert_resource(inspector)
    .add_plugins(ScenePlugin)
    .add_plugins(AssetCatalogPlugin)
    .add_plugins(ViewportPlugin(ViewportConfig::default()))
    .add_plugins(PlanetPlugin(planet))
    .add_plugins(CameraPlugin(CameraConfig::default()))
    .add_plugins(EnvironmentPlugin(EnvironmentConfig::default()))
    .add_plugins(IntroPlugin(intro))
    .add_plugins(HotspotPlugin(HotspotConfig::default()))
    .add_plugins(ScrollPlugin(ScrollConfig::default()))
    .add_plugins(GalaxyPlugin(GalaxyConfig::default()))
    .add_plugins(MonitorPlugin(MonitorConfig::default()))
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(WorldInspectorPlugin::new().run_if(|v: Res<InspectorVisible>| v.0))
    .add_systems(Update, (exit_on_esc, toggle_inspector));

    #[cfg(feature = "native")]
    app.add_plugins(RemotePlugin::default())
        .add_plugins(RemoteHttpPlugin::default());

    app.run();
}

#[cfg(feature = "native")]
fn scene_configs() -> (IntroConfig, PlanetConfig, InspectorVisible) {
    let cli = Cli::parse();
    let mut intro = IntroConfig::default();
    if let Some(gate) = cli.gate {
        intro = intro.with_gate(gate);
    }
    let mut planet = PlanetConfig::default();
    if let Some(speed) = cli.planet_speed {
        planet.rotation_speed = speed;
    }
    (intro, planet, InspectorVisible(cli.inspector))
}

#[cfg(not(feature = "native"))]
fn scene_configs() -> (IntroConfig, PlanetConfig, InspectorVisible) {
    (
        IntroConfig::default(),
        PlanetConfig::default(),
        InspectorVisible::default(),
    )
}

fn toggle_inspector(keys: Res<ButtonInput<KeyCode>>, mut visible: ResMut<InspectorVisible>) {
    if keys.just_pressed(KeyCode::Tab) {
        visible.0 = !visible.0;
        debug!("inspector visible: {}", visible.0);
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
