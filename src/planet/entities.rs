use bevy::prelude::*;

/// Root of the planet group. The hero timeline slides this sideways.
#[derive(Component, Reflect)]
pub struct Planet;

/// Earth sphere; its yaw is the driver signal.
#[derive(Component)]
pub struct Earth;

/// Cloud shell, turning at half the earth's rate.
#[derive(Component)]
pub struct Clouds;

/// Driver signal: the earth's accumulated yaw in degrees.
///
/// Increases monotonically and is never wrapped, so it can pass 360.
#[derive(Resource, Default, Debug, Reflect)]
pub struct PlanetSpin {
    /// Accumulated yaw in degrees.
    pub degrees: f32,
}

impl PlanetSpin {
    /// Advances by `speed` radians per second over `dt` seconds and returns
    /// the new yaw in radians.
    pub fn advance(&mut self, speed: f32, dt: f32) -> f32 {
        let radians = self.degrees.to_radians() + speed * dt;
        self.degrees = radians.to_degrees();
        radians
    }
}
