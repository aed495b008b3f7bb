//! Rocket Strike - A single-screen rocket launch arcade game
//!
//! Core modules:
//! - `sim`: Simulation engine (ballistics, collisions, particles, session state)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use sim::{GameEvent, GamePhase, GameState, Snapshot, TickInput, tick};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (scene units, y grows downward)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    /// Height of the ground band at the bottom of the playfield
    pub const GROUND_HEIGHT: f32 = 20.0;

    /// Gravity (units/s², pointing down)
    pub const GRAVITY: f32 = 400.0;

    /// Launch speed per power percent
    pub const SPEED_PER_POWER: f32 = 8.0;
    /// Default slider settings
    pub const DEFAULT_ANGLE_DEG: f32 = 45.0;
    pub const DEFAULT_POWER: f32 = 60.0;
    pub const MAX_ANGLE_DEG: f32 = 90.0;
    pub const MAX_POWER: f32 = 100.0;

    /// Launcher placement (fixed for the session)
    pub const LAUNCHER_X: f32 = 100.0;
    pub const LAUNCHER_GROUND_OFFSET: f32 = 50.0;
    pub const LAUNCHER_WIDTH: f32 = 40.0;
    pub const LAUNCHER_HEIGHT: f32 = 20.0;
    /// Rockets leave the launch tube this far above the launcher
    pub const MUZZLE_OFFSET: f32 = 30.0;

    /// Rocket bounding box
    pub const ROCKET_WIDTH: f32 = 10.0;
    pub const ROCKET_HEIGHT: f32 = 30.0;

    /// Target placement band and size
    pub const TARGET_MIN_X: f32 = 550.0;
    pub const TARGET_X_SPAN: f32 = 150.0;
    pub const TARGET_GROUND_OFFSET: f32 = 80.0;
    pub const TARGET_SIZE: f32 = 60.0;

    /// Points awarded per target hit
    pub const POINTS_PER_HIT: u64 = 100;
    /// Seconds before a hit target is replaced
    pub const RESPAWN_DELAY: f32 = 1.0;
    /// Seconds between projectile removal and the launcher re-arming
    pub const REARM_DELAY: f32 = 1.0;

    /// Minimum travel on either axis before a new trail point is recorded
    pub const TRAIL_SPACING: f32 = 5.0;
}

/// Degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Unit vector for a launch angle in degrees.
///
/// Angles are measured counter-clockwise from +X, but the scene's y axis
/// points down, so the vertical component is negated.
#[inline]
pub fn launch_direction(angle_deg: f32) -> Vec2 {
    let theta = deg_to_rad(angle_deg);
    Vec2::new(theta.cos(), -theta.sin())
}

/// Heading of a velocity vector (tangent to the trajectory)
#[inline]
pub fn heading_of(vel: Vec2) -> f32 {
    vel.y.atan2(vel.x)
}
