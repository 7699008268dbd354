//! Intro sequence played once the scene has loaded.
//!
//! Waits for the planet to rotate past a per-channel threshold, then swings
//! the camera out, sweeps the key light into place, spins and tilts the 3D
//! title, and finally flies the title past the camera. When the title lands
//! the [`WorldState`](crate::world::WorldState) flips to interactive mode.

mod channel;
mod entities;
mod gate;
mod sequencer;
mod systems;
mod timer;

pub use channel::{Channel, ChannelSettings};
pub use entities::{IntroInputs, IntroTargets, IntroText};
pub use gate::{GateEdge, SequenceGate};
pub use sequencer::{
    ChannelId, Completion, FrameInput, IntroPose, IntroSequencer, TargetReadiness,
};
pub use systems::run_intro;
pub use timer::ProgressTimer;

use bevy::prelude::*;

use crate::math::Easing;
use crate::{FrameSet, GameState};

/// Planet angle (degrees) that opens the intro in the default configuration.
pub const DEFAULT_GATE: f32 = 285.0;

/// Camera endpoints. Rotations are `XYZ` Euler angles in radians.
#[derive(Clone, Debug, Reflect)]
pub struct CameraPath {
    /// Close-up position the scene starts from.
    pub start_position: Vec3,
    /// Resting position after the intro.
    pub end_position: Vec3,
    /// Tilted starting orientation.
    pub start_rotation: Vec3,
    /// Resting orientation.
    pub end_rotation: Vec3,
}

/// Key light endpoints.
#[derive(Clone, Debug, Reflect)]
pub struct LightPath {
    /// Position behind and above the planet.
    pub start_position: Vec3,
    /// Front-lit resting position.
    pub end_position: Vec3,
}

/// Title endpoints. Rotations are `XYZ` Euler angles in radians.
#[derive(Clone, Debug, Reflect)]
pub struct TextPath {
    /// Asset catalog name of the title model.
    pub model: String,
    /// Initial orientation.
    pub start_rotation: Vec3,
    /// Final orientation.
    pub end_rotation: Vec3,
    /// Initial position.
    pub start_position: Vec3,
    /// Final position, just past the camera.
    pub end_position: Vec3,
}

/// Per-plugin configuration for the intro sequence.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct IntroConfig {
    /// Camera orientation channel.
    pub camera_rotate: ChannelSettings,
    /// Camera position channel.
    pub camera_move: ChannelSettings,
    /// Key light position channel.
    pub light_move: ChannelSettings,
    /// Title z-axis spin (phase 1).
    pub text_spin: ChannelSettings,
    /// Title x/y tilt (phase 2), also gated on spin progress.
    pub text_tilt: ChannelSettings,
    /// Title fly-out, also gated on the spin completing. Terminal channel.
    pub text_move: ChannelSettings,
    /// Raw spin progress at which the tilt phase starts.
    pub tilt_handoff: f32,
    /// Camera endpoints.
    pub camera: CameraPath,
    /// Key light endpoints.
    pub light: LightPath,
    /// Title endpoints.
    pub text: TextPath,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            camera_rotate: ChannelSettings::gated(0.1, Easing::InOutSine, DEFAULT_GATE),
            camera_move: ChannelSettings::gated(0.06, Easing::InOutSine, DEFAULT_GATE),
            light_move: ChannelSettings::gated(0.1, Easing::InOutSine, DEFAULT_GATE),
            text_spin: ChannelSettings::gated(0.06, Easing::OutCubic, DEFAULT_GATE),
            text_tilt: ChannelSettings::ungated(0.06, Easing::InOutSine),
            text_move: ChannelSettings::ungated(0.3, Easing::InOutSine),
            tilt_handoff: 0.7,
            camera: CameraPath {
                start_position: Vec3::new(0.4, 0.65, 1.2),
                end_position: Vec3::new(0.0, 0.0, 6.0),
                start_rotation: Vec3::new(0.0, 0.0, -0.61),
                end_rotation: Vec3::ZERO,
            },
            light: LightPath {
                start_position: Vec3::new(3.0, 2.6, -2.3),
                end_position: Vec3::new(3.0, 0.5, 2.5),
            },
            text: TextPath {
                model: "textModel".into(),
                start_rotation: Vec3::new(1.62, 0.9, -0.3),
                end_rotation: Vec3::new(1.58, 0.0, 3.15),
                start_position: Vec3::ZERO,
                end_position: Vec3::new(-0.05, -0.05, 6.0),
            },
        }
    }
}

impl IntroConfig {
    /// Moves every planet-gated channel to `degrees`. Ungated channels stay ungated.
    pub fn with_gate(mut self, degrees: f32) -> Self {
        for settings in [
            &mut self.camera_rotate,
            &mut self.camera_move,
            &mut self.light_move,
            &mut self.text_spin,
            &mut self.text_tilt,
            &mut self.text_move,
        ] {
            if settings.gate.is_some() {
                settings.gate = Some(degrees);
            }
        }
        self
    }
}

/// Plays the intro and flips the scene into interactive mode.
pub struct IntroPlugin(pub IntroConfig);

impl Plugin for IntroPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<IntroConfig>()
            .register_type::<IntroText>()
            .insert_resource(self.0.clone())
            .insert_resource(IntroSequencer::new(&self.0))
            .add_systems(OnEnter(GameState::Intro), systems::spawn_intro_text)
            .add_systems(
                Update,
                run_intro
                    .in_set(FrameSet::Intro)
                    .run_if(in_state(GameState::Intro)),
            );
    }
}
