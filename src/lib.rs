#![warn(missing_docs)]
//! Animated planet landing scene.
//!
//! A rotating planet drives a gated intro sequence (camera, key light and a
//! 3D title), which hands off once to an interactive mode with a hoverable
//! hotspot and scroll-driven monitor/galaxy tracks.

pub mod assets;
pub mod camera;
pub mod environment;
pub mod galaxy;
pub mod hotspot;
pub mod intro;
pub mod math;
pub mod monitor;
pub mod planet;
pub mod scroll;
pub mod viewport;
pub mod world;

use bevy::prelude::*;

/// Application-wide scene state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Waiting for the asset catalog to settle.
    #[default]
    Loading,
    /// Intro channels playing.
    Intro,
    /// Post-intro: hotspot, hero timeline, scroll tracks.
    Interactive,
}

/// Per-frame pipeline ordering inside `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Asset readiness and viewport bookkeeping.
    Collaborators,
    /// Planet spin: updates the driver angle.
    Driver,
    /// Intro sequencer and the mode flip.
    Intro,
    /// Interactive-mode channels.
    Interactive,
}

/// Orders [`FrameSet`] and registers shared state. Added before every other
/// scene plugin.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<GameState>()
            .register_type::<world::WorldState>()
            .init_state::<GameState>()
            .init_resource::<world::WorldState>()
            .add_message::<world::IntroFinished>()
            .configure_sets(
                Update,
                (
                    FrameSet::Collaborators,
                    FrameSet::Driver,
                    FrameSet::Intro,
                    FrameSet::Interactive,
                )
                    .chain(),
            );
    }
}
