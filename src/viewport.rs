//! Window size bookkeeping.
//!
//! Keeps a [`Viewport`] resource in sync with the primary window. Consumers
//! react through change detection (`resource_changed::<Viewport>`).

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::FrameSet;
use crate::math;

/// Per-plugin configuration for viewport scaling.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct ViewportConfig {
    /// Width (px) at which the layout is at full scale.
    pub reference_width: f32,
    /// Smallest scale factor, as a fraction of the reference width.
    pub min_size: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            reference_width: 1500.0,
            min_size: 320.0 / 1500.0,
        }
    }
}

/// Current window metrics.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct Viewport {
    /// Logical width in pixels.
    pub width: f32,
    /// Logical height in pixels.
    pub height: f32,
    /// `width / height`.
    pub aspect: f32,
    /// `width / reference_width` clamped to `[min_size, 1]`.
    pub scale_factor: f32,
    /// Scale factor mapped onto `[0, 100]`.
    pub scale_percent: f32,
}

impl Viewport {
    /// Metrics for a window of `width` × `height`.
    pub fn new(width: f32, height: f32, cfg: &ViewportConfig) -> Self {
        let scale_factor = math::scale_factor(width, cfg.reference_width, cfg.min_size);
        Self {
            width,
            height,
            aspect: if height > 0.0 { width / height } else { 1.0 },
            scale_factor,
            scale_percent: math::scale_percent(scale_factor, cfg.min_size),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, &ViewportConfig::default())
    }
}

/// Tracks the primary window size.
pub struct ViewportPlugin(pub ViewportConfig);

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ViewportConfig>()
            .register_type::<Viewport>()
            .insert_resource(self.0.clone())
            .init_resource::<Viewport>()
            .add_systems(PreStartup, read_initial_size)
            .add_systems(Update, track_resize.in_set(FrameSet::Collaborators));
    }
}

/// Seeds [`Viewport`] from the primary window.
pub fn read_initial_size(
    windows: Query<&Window, With<PrimaryWindow>>,
    cfg: Res<ViewportConfig>,
    mut viewport: ResMut<Viewport>,
) {
    let Ok(window) = windows.single() else { return };
    *viewport = Viewport::new(window.width(), window.height(), &cfg);
}

/// Applies the latest resize of the frame.
pub fn track_resize(
    mut resized: MessageReader<WindowResized>,
    cfg: Res<ViewportConfig>,
    mut viewport: ResMut<Viewport>,
) {
    let Some(last) = resized.read().last() else {
        return;
    };
    *viewport = Viewport::new(last.width, last.height, &cfg);
    debug!(
        "viewport {}x{} scale {:.0} %",
        viewport.width, viewport.height, viewport.scale_percent
    );
}
