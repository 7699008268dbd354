use bevy::prelude::*;

use super::IntroConfig;
use super::entities::{IntroInputs, IntroTargets, IntroText};
use super::sequencer::{Completion, FrameInput, IntroSequencer, TargetReadiness};
use crate::GameState;
use crate::assets::AssetCatalog;
use crate::world::{IntroFinished, WorldState};

/// Spawns the title model at its starting pose.
pub fn spawn_intro_text(mut commands: Commands, catalog: Res<AssetCatalog>, cfg: Res<IntroConfig>) {
    let text = &cfg.text;
    let transform = Transform::from_translation(text.start_position).with_rotation(
        Quat::from_euler(
            EulerRot::XYZ,
            text.start_rotation.x,
            text.start_rotation.y,
            text.start_rotation.z,
        ),
    );
    let mut entity = commands.spawn((Name::new("IntroText"), transform, IntroText));
    match catalog.scene(&text.model) {
        Some(scene) => {
            entity.insert(SceneRoot(scene));
        }
        None => warn!("intro title model `{}` is not in the asset catalog", text.model),
    }
}

/// Advances the intro channels and flips the world into interactive mode
/// when the title lands.
pub fn run_intro(
    inputs: IntroInputs,
    mut sequencer: ResMut<IntroSequencer>,
    mut world: ResMut<WorldState>,
    mut finished: MessageWriter<IntroFinished>,
    mut next: ResMut<NextState<GameState>>,
    mut targets: IntroTargets,
) {
    if !world.is_intro() {
        return;
    }

    let mut camera = targets.camera.single_mut().ok();
    let mut light = targets.light.single_mut().ok();
    let mut text = targets.text.single_mut().ok();

    let degrees = inputs.spin.degrees;
    let input = FrameInput {
        dt: inputs.time.delta_secs(),
        driver: degrees,
        readiness: TargetReadiness {
            camera: camera.is_some(),
            light: light.is_some(),
            text: text.is_some() && inputs.readiness.is_ready(&inputs.cfg.text.model),
        },
    };
    let (pose, completion) = sequencer.step(&input);

    for id in &pose.opened {
        info!("intro gate opened for {id:?} at {degrees:.1}°");
    }

    if let Some(tf) = camera.as_mut() {
        if let Some(rotation) = pose.camera_rotation {
            tf.rotation = rotation;
        }
        if let Some(translation) = pose.camera_translation {
            tf.translation = translation;
        }
    }
    if let (Some(tf), Some(translation)) = (light.as_mut(), pose.light_translation) {
        tf.translation = translation;
    }
    if let Some(tf) = text.as_mut() {
        if let Some(rotation) = pose.text_rotation {
            tf.rotation = rotation;
        }
        if let Some(translation) = pose.text_translation {
            tf.translation = translation;
        }
    }

    if completion == Completion::JustFinished && world.finish_intro() {
        info!("intro finished, switching to interactive mode");
        finished.write(IntroFinished);
        next.set(GameState::Interactive);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::ScenePlugin;
    use crate::assets::AssetReadiness;
    use crate::camera::MainCamera;
    use crate::environment::KeyLight;
    use crate::planet::PlanetSpin;

    #[derive(Resource, Default)]
    struct FinishedCount(usize);

    fn count_finished(mut reader: MessageReader<IntroFinished>, mut count: ResMut<FinishedCount>) {
        count.0 += reader.read().count();
    }

    fn intro_app() -> App {
        let cfg = IntroConfig::default();
        let mut readiness = AssetReadiness::default();
        readiness.mark_ready(cfg.text.model.clone());

        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, ScenePlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .insert_resource(IntroSequencer::new(&cfg))
            .insert_resource(cfg)
            .insert_resource(readiness)
            .insert_resource(PlanetSpin { degrees: 300.0 })
            .init_resource::<FinishedCount>()
            .add_systems(
                Update,
                (run_intro, count_finished).chain(),
            );

        let world = app.world_mut();
        world.spawn((Transform::default(), MainCamera));
        world.spawn((Transform::default(), KeyLight));
        world.spawn((Transform::default(), IntroText));
        world
            .resource_mut::<NextState<GameState>>()
            .set(GameState::Intro);
        app
    }

    #[test]
    fn intro_hands_off_once() {
        let mut app = intro_app();
        for _ in 0..1_000 {
            app.update();
            if *app.world().resource::<State<GameState>>().get() == GameState::Interactive {
                break;
            }
        }

        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::Interactive
        );
        assert!(!app.world().resource::<WorldState>().is_intro());
        assert_eq!(app.world().resource::<FinishedCount>().0, 1);

        for _ in 0..10 {
            app.update();
        }
        assert_eq!(app.world().resource::<FinishedCount>().0, 1);
    }

    fn run_until_interactive(app: &mut App) {
        for _ in 0..1_000 {
            app.update();
            if *app.world().resource::<State<GameState>>().get() == GameState::Interactive {
                return;
            }
        }
        panic!("intro never finished");
    }

    #[test]
    fn no_intro_writes_after_the_flip() {
        let mut app = intro_app();
        run_until_interactive(&mut app);

        let moved = Transform::from_xyz(9.0, 9.0, 9.0);
        let world = app.world_mut();
        let mut q = world.query_filtered::<&mut Transform, Or<(
            With<MainCamera>,
            With<KeyLight>,
            With<IntroText>,
        )>>();
        for mut tf in q.iter_mut(world) {
            *tf = moved;
        }
        // A rewound sequencer would write again if the world still allowed it.
        let fresh = IntroSequencer::new(world.resource::<IntroConfig>());
        world.insert_resource(fresh);

        for _ in 0..10 {
            app.update();
        }

        let world = app.world_mut();
        let mut q = world.query_filtered::<&Transform, Or<(
            With<MainCamera>,
            With<KeyLight>,
            With<IntroText>,
        )>>();
        let poses: Vec<Transform> = q.iter(world).copied().collect();
        assert_eq!(poses.len(), 3);
        assert!(poses.iter().all(|tf| *tf == moved));
        assert_eq!(world.resource::<FinishedCount>().0, 1);
    }

    #[test]
    fn camera_lands_on_its_final_pose() {
        let mut app = intro_app();
        for _ in 0..1_000 {
            app.update();
        }
        let end = IntroConfig::default().camera.end_position;
        let mut q = app
            .world_mut()
            .query_filtered::<&Transform, With<MainCamera>>();
        let camera = q.single(app.world()).expect("camera");
        assert_eq!(camera.translation, end);
    }
}
