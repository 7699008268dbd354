//! Intro → Interactive mode latch.
//!
//! [`WorldState`] flips exactly once when the intro's terminal channel
//! completes. The flip is immediate (same frame), unlike the
//! [`GameState`](crate::GameState) transition which is applied by Bevy at the
//! next state-transition point, so input handlers and intro systems read the
//! latch rather than the scheduled state.

use bevy::prelude::*;

/// Which set of channels is allowed to write transforms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum Mode {
    /// Intro channels run; hover and click handling are off.
    #[default]
    Intro,
    /// Hotspot, hero timeline and scroll tracks run.
    Interactive,
}

/// Current [`Mode`] plus the single-fire completion latch.
#[derive(Resource, Default, Debug, Reflect)]
pub struct WorldState {
    mode: Mode,
}

impl WorldState {
    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// `true` until the intro finishes. Read by click/hover handling.
    pub fn is_intro(&self) -> bool {
        self.mode == Mode::Intro
    }

    /// Flips Intro → Interactive. Returns `true` only for the call that
    /// performed the flip; every later call is ignored.
    pub fn finish_intro(&mut self) -> bool {
        if self.mode != Mode::Intro {
            return false;
        }
        self.mode = Mode::Interactive;
        true
    }
}

/// Written once, on the frame the intro completes.
#[derive(Message, Debug, Clone, Copy)]
pub struct IntroFinished;
