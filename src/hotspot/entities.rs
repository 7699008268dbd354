use bevy::prelude::*;

use super::hover::HoverScaleChannel;
use crate::intro::Channel;

/// Marker on the interactive title.
#[derive(Component, Reflect)]
pub struct Hotspot;

/// Entry animation played once the hotspot appears: rise into place while
/// spinning a full turn about z.
#[derive(Component)]
pub struct HotspotEntry {
    /// Position channel.
    pub rise: Channel<Vec3>,
    /// Z rotation channel (radians).
    pub spin: Channel<f32>,
    /// Fixed x tilt (radians).
    pub tilt: f32,
}

/// Hover feedback state for the hotspot.
#[derive(Component, Default)]
pub struct HotspotScale(pub HoverScaleChannel);

/// Latest hit-test result: `true` while the pointer is over the hotspot.
#[derive(Resource, Default, Debug)]
pub struct HotspotHover(pub bool);

/// Written when the hotspot is clicked in interactive mode.
#[derive(Message, Debug, Clone)]
pub struct HotspotActivated {
    /// Link configured for the hotspot.
    pub url: String,
}
