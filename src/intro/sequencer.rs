use bevy::prelude::*;

use super::IntroConfig;
use super::channel::Channel;
use super::gate::SequenceGate;

/// Intro channels in the order they are advanced each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelId {
    /// Camera orientation, slerped.
    CameraRotate,
    /// Camera position.
    CameraMove,
    /// Key light position.
    LightMove,
    /// Text rotation, z axis.
    TextSpin,
    /// Text rotation, x and y axes.
    TextTilt,
    /// Text position. Terminal channel.
    TextMove,
}

impl ChannelId {
    /// Fixed priority order.
    pub const ORDER: [ChannelId; 6] = [
        ChannelId::CameraRotate,
        ChannelId::CameraMove,
        ChannelId::LightMove,
        ChannelId::TextSpin,
        ChannelId::TextTilt,
        ChannelId::TextMove,
    ];
}

/// Which transform targets exist and may be written this frame.
#[derive(Clone, Copy, Debug)]
pub struct TargetReadiness {
    /// Camera entity spawned.
    pub camera: bool,
    /// Key light entity spawned.
    pub light: bool,
    /// Text entity spawned and its model loaded.
    pub text: bool,
}

impl TargetReadiness {
    /// Every target ready.
    pub const ALL: Self = Self {
        camera: true,
        light: true,
        text: true,
    };
}

/// Per-frame inputs from the render loop and collaborators.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    /// Frame delta in seconds.
    pub dt: f32,
    /// Planet rotation in degrees.
    pub driver: f32,
    /// Target readiness.
    pub readiness: TargetReadiness,
}

/// Transform writes produced by one frame. `None` fields are left untouched.
#[derive(Debug, Default)]
pub struct IntroPose {
    /// Camera orientation.
    pub camera_rotation: Option<Quat>,
    /// Camera position.
    pub camera_translation: Option<Vec3>,
    /// Key light position.
    pub light_translation: Option<Vec3>,
    /// Text orientation, composed from both text rotation phases.
    pub text_rotation: Option<Quat>,
    /// Text position.
    pub text_translation: Option<Vec3>,
    /// Planet gates that latched this frame.
    pub opened: Vec<ChannelId>,
}

impl IntroPose {
    /// `true` if the frame writes nothing.
    pub fn is_empty(&self) -> bool {
        self.camera_rotation.is_none()
            && self.camera_translation.is_none()
            && self.light_translation.is_none()
            && self.text_rotation.is_none()
            && self.text_translation.is_none()
    }
}

/// Completion state reported after each step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// Terminal channel still running (or waiting on its gate).
    Pending,
    /// Terminal channel reached 1 on this frame. Reported exactly once.
    JustFinished,
    /// Already finished on an earlier frame; the step was a no-op.
    Finished,
}

/// Drives every intro channel from the planet angle and the frame delta.
#[derive(Resource)]
pub struct IntroSequencer {
    camera_rotate: Channel<Quat>,
    camera_move: Channel<Vec3>,
    light_move: Channel<Vec3>,
    text_spin: Channel<f32>,
    text_tilt: Channel<Vec2>,
    text_move: Channel<Vec3>,
    tilt_handoff: SequenceGate,
    move_handoff: SequenceGate,
    text_euler: Vec3,
    finished: bool,
}

impl IntroSequencer {
    /// Builds all channels from configuration.
    pub fn new(cfg: &IntroConfig) -> Self {
        let camera_from = euler_quat(cfg.camera.start_rotation);
        let camera_to = euler_quat(cfg.camera.end_rotation);
        let text = &cfg.text;
        Self {
            camera_rotate: Channel::new(&cfg.camera_rotate, camera_from, camera_to),
            camera_move: Channel::new(
                &cfg.camera_move,
                cfg.camera.start_position,
                cfg.camera.end_position,
            ),
            light_move: Channel::new(
                &cfg.light_move,
                cfg.light.start_position,
                cfg.light.end_position,
            ),
            text_spin: Channel::new(&cfg.text_spin, text.start_rotation.z, text.end_rotation.z),
            text_tilt: Channel::new(
                &cfg.text_tilt,
                text.start_rotation.truncate(),
                text.end_rotation.truncate(),
            ),
            text_move: Channel::new(&cfg.text_move, text.start_position, text.end_position),
            tilt_handoff: SequenceGate::at_least(cfg.tilt_handoff),
            move_handoff: SequenceGate::at_least(1.0),
            text_euler: text.start_rotation,
            finished: false,
        }
    }

    /// Advances every open, ready channel in priority order.
    pub fn step(&mut self, input: &FrameInput) -> (IntroPose, Completion) {
        let mut pose = IntroPose::default();
        if self.finished {
            return (pose, Completion::Finished);
        }
        let FrameInput {
            dt,
            driver,
            readiness,
        } = *input;
        let opened = &mut pose.opened;

        pose.camera_rotation = drive(
            &mut self.camera_rotate,
            ChannelId::CameraRotate,
            driver,
            readiness.camera,
            dt,
            opened,
        );
        pose.camera_translation = drive(
            &mut self.camera_move,
            ChannelId::CameraMove,
            driver,
            readiness.camera,
            dt,
            opened,
        );
        pose.light_translation = drive(
            &mut self.light_move,
            ChannelId::LightMove,
            driver,
            readiness.light,
            dt,
            opened,
        );

        // Phase 1 owns z, phase 2 owns x and y.
        let mut rotated = false;
        if let Some(z) = drive(
            &mut self.text_spin,
            ChannelId::TextSpin,
            driver,
            readiness.text,
            dt,
            opened,
        ) {
            self.text_euler.z = z;
            rotated = true;
        }

        let spin = self.text_spin.progress();
        let tilt_ready = self.tilt_handoff.is_open(spin) && readiness.text;
        if let Some(xy) = drive(
            &mut self.text_tilt,
            ChannelId::TextTilt,
            driver,
            tilt_ready,
            dt,
            opened,
        ) {
            self.text_euler.x = xy.x;
            self.text_euler.y = xy.y;
            rotated = true;
        }
        if rotated {
            pose.text_rotation = Some(euler_quat(self.text_euler));
        }

        let move_ready = self.move_handoff.is_open(spin) && readiness.text;
        pose.text_translation = drive(
            &mut self.text_move,
            ChannelId::TextMove,
            driver,
            move_ready,
            dt,
            opened,
        );

        if self.text_move.is_complete() {
            self.finished = true;
            return (pose, Completion::JustFinished);
        }
        (pose, Completion::Pending)
    }

    /// Raw progress of a channel.
    pub fn progress(&self, id: ChannelId) -> f32 {
        match id {
            ChannelId::CameraRotate => self.camera_rotate.progress(),
            ChannelId::CameraMove => self.camera_move.progress(),
            ChannelId::LightMove => self.light_move.progress(),
            ChannelId::TextSpin => self.text_spin.progress(),
            ChannelId::TextTilt => self.text_tilt.progress(),
            ChannelId::TextMove => self.text_move.progress(),
        }
    }

    /// Current text Euler angles (`XYZ` order, radians).
    pub fn text_euler(&self) -> Vec3 {
        self.text_euler
    }

    /// `true` once the terminal channel has completed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

fn drive<T: crate::math::Blend>(
    channel: &mut Channel<T>,
    id: ChannelId,
    driver: f32,
    ready: bool,
    dt: f32,
    opened: &mut Vec<ChannelId>,
) -> Option<T> {
    let was_open = channel.is_latched();
    let open = channel.is_open(driver);
    if open && !was_open {
        opened.push(id);
    }
    if !open || !ready {
        return None;
    }
    channel.advance(dt)
}

fn euler_quat(e: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, e.x, e.y, e.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn frame(driver: f32) -> FrameInput {
        FrameInput {
            dt: DT,
            driver,
            readiness: TargetReadiness::ALL,
        }
    }

    // ── gating ──────────────────────────────────────────────────────

    #[test]
    fn camera_channels_wait_for_gate_then_advance_independently() {
        let mut seq = IntroSequencer::new(&IntroConfig::default());
        let mut opened_at = None;
        let mut frames_since_open = 0;
        let mut checked = Vec::new();

        for i in 0..2000u32 {
            let t = i as f32 * DT;
            // 0° → 300° over 10 s, still rising afterwards.
            let driver = 30.0 * t;
            let (pose, _) = seq.step(&frame(driver));

            if opened_at.is_none() {
                if pose.opened.contains(&ChannelId::CameraRotate) {
                    assert!(driver > 285.0);
                    assert!(30.0 * (t - DT) <= 285.0);
                    assert!(pose.opened.contains(&ChannelId::CameraMove));
                    opened_at = Some(i);
                } else {
                    assert_eq!(seq.progress(ChannelId::CameraRotate), 0.0);
                    assert_eq!(seq.progress(ChannelId::CameraMove), 0.0);
                    continue;
                }
            }

            frames_since_open += 1;
            if frames_since_open == 60 || frames_since_open == 300 {
                let elapsed = frames_since_open as f32 * DT;
                let rotate = seq.progress(ChannelId::CameraRotate);
                let mv = seq.progress(ChannelId::CameraMove);
                assert!((rotate - (elapsed * 0.1).min(1.0)).abs() < 1e-4);
                assert!((mv - (elapsed * 0.06).min(1.0)).abs() < 1e-4);
                checked.push(frames_since_open);
            }
        }

        assert!(opened_at.is_some());
        assert_eq!(checked, vec![60, 300]);
    }

    #[test]
    fn gate_latches_even_when_driver_wraps() {
        let mut seq = IntroSequencer::new(&IntroConfig::default());
        seq.step(&frame(290.0));
        let before = seq.progress(ChannelId::CameraMove);
        seq.step(&frame(5.0));
        assert!(seq.progress(ChannelId::CameraMove) > before);
    }

    #[test]
    fn stuck_but_safe_when_gate_never_opens() {
        let mut seq = IntroSequencer::new(&IntroConfig::default());
        for _ in 0..10_000 {
            let (pose, completion) = seq.step(&frame(100.0));
            assert!(pose.is_empty());
            assert_eq!(completion, Completion::Pending);
        }
        for id in ChannelId::ORDER {
            assert_eq!(seq.progress(id), 0.0);
        }
        assert!(!seq.is_finished());
    }

    // ── readiness ───────────────────────────────────────────────────

    #[test]
    fn unready_text_is_skipped_without_blocking_camera() {
        let mut seq = IntroSequencer::new(&IntroConfig::default());
        let input = FrameInput {
            dt: DT,
            driver: 300.0,
            readiness: TargetReadiness {
                camera: true,
                light: true,
                text: false,
            },
        };
        for _ in 0..120 {
            let (pose, _) = seq.step(&input);
            assert!(pose.text_rotation.is_none());
            assert!(pose.text_translation.is_none());
        }
        assert_eq!(seq.progress(ChannelId::TextSpin), 0.0);
        assert!(seq.progress(ChannelId::CameraRotate) > 0.0);

        let (pose, _) = seq.step(&frame(300.0));
        assert!(pose.text_rotation.is_some());
        assert!(seq.progress(ChannelId::TextSpin) > 0.0);
    }

    // ── text rotation hand-off ──────────────────────────────────────

    #[test]
    fn phase_one_only_touches_z() {
        let cfg = IntroConfig::default();
        let start = cfg.text.start_rotation;
        let mut seq = IntroSequencer::new(&cfg);
        while seq.progress(ChannelId::TextSpin) < cfg.tilt_handoff - 0.05 {
            seq.step(&frame(300.0));
            let e = seq.text_euler();
            assert_eq!(e.x, start.x);
            assert_eq!(e.y, start.y);
        }
        assert!(seq.text_euler().z != start.z);
    }

    #[test]
    fn hand_off_is_continuous() {
        let cfg = IntroConfig::default();
        let mut seq = IntroSequencer::new(&cfg);
        let mut prev = seq.text_euler();
        let mut prev_z_step = 0.0f32;
        let mut crossed = false;

        for _ in 0..2000 {
            let was_before = seq.progress(ChannelId::TextSpin) < cfg.tilt_handoff;
            seq.step(&frame(300.0));
            let now = seq.text_euler();
            let is_after = seq.progress(ChannelId::TextSpin) >= cfg.tilt_handoff;

            if was_before && is_after {
                crossed = true;
                assert!((now.x - prev.x).abs() < 1e-4, "x jumped at hand-off");
                assert!((now.y - prev.y).abs() < 1e-4, "y jumped at hand-off");
                // z keeps its own pace across the boundary.
                let z_step = (now.z - prev.z).abs();
                assert!(z_step <= prev_z_step * 1.01 + 1e-6);
                assert!(seq.progress(ChannelId::TextTilt) > 0.0);
            }
            prev_z_step = (now.z - prev.z).abs();
            prev = now;
        }
        assert!(crossed);
    }

    #[test]
    fn tilt_waits_for_handoff() {
        let cfg = IntroConfig::default();
        let mut seq = IntroSequencer::new(&cfg);
        while seq.progress(ChannelId::TextSpin) < cfg.tilt_handoff {
            assert_eq!(seq.progress(ChannelId::TextTilt), 0.0);
            seq.step(&frame(300.0));
        }
        assert!(seq.progress(ChannelId::TextTilt) > 0.0);
    }

    #[test]
    fn text_move_starts_after_spin_completes() {
        let mut seq = IntroSequencer::new(&IntroConfig::default());
        while seq.progress(ChannelId::TextSpin) < 1.0 {
            assert_eq!(seq.progress(ChannelId::TextMove), 0.0);
            seq.step(&frame(300.0));
        }
        assert!(seq.progress(ChannelId::TextMove) > 0.0);
    }

    // ── completion ──────────────────────────────────────────────────

    #[test]
    fn completion_fires_exactly_once() {
        let cfg = IntroConfig::default();
        let mut seq = IntroSequencer::new(&cfg);
        let mut fired = 0;
        let mut last_text = None;
        for _ in 0..20_000 {
            let (pose, completion) = seq.step(&frame(300.0));
            if let Some(p) = pose.text_translation {
                last_text = Some(p);
            }
            match completion {
                Completion::JustFinished => fired += 1,
                Completion::Finished => assert!(pose.is_empty()),
                Completion::Pending => {}
            }
        }
        assert_eq!(fired, 1);
        assert!(seq.is_finished());
        assert_eq!(last_text, Some(cfg.text.end_position));
    }

    #[test]
    fn tilt_is_still_partial_when_the_title_lands() {
        let cfg = IntroConfig::default();
        let mut seq = IntroSequencer::new(&cfg);
        while seq.step(&frame(300.0)).1 != Completion::JustFinished {}

        let tilt = seq.progress(ChannelId::TextTilt);
        assert!(tilt > 0.0 && tilt < 1.0, "tilt progress {tilt}");
        let euler = seq.text_euler();
        assert!((euler.z - cfg.text.end_rotation.z).abs() < 1e-5);
        assert!(euler.y > cfg.text.end_rotation.y);
    }

    #[test]
    fn finished_step_is_ignored() {
        let mut seq = IntroSequencer::new(&IntroConfig::default());
        while seq.step(&frame(300.0)).1 != Completion::JustFinished {}
        let before = seq.progress(ChannelId::TextTilt);
        let (pose, completion) = seq.step(&frame(300.0));
        assert_eq!(completion, Completion::Finished);
        assert!(pose.is_empty());
        assert_eq!(seq.progress(ChannelId::TextTilt), before);
    }

    #[test]
    fn camera_lands_exactly_on_final_pose() {
        let cfg = IntroConfig::default();
        let mut seq = IntroSequencer::new(&cfg);
        let mut rotation = None;
        let mut translation = None;
        for _ in 0..2000 {
            let (pose, _) = seq.step(&frame(300.0));
            rotation = pose.camera_rotation.or(rotation);
            translation = pose.camera_translation.or(translation);
        }
        assert_eq!(rotation, Some(euler_quat(cfg.camera.end_rotation)));
        assert_eq!(translation, Some(cfg.camera.end_position));
    }
}
