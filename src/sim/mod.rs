//! Simulation engine
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform concerns:
//! - Variable timestep supplied by the host clock
//! - Injectable RNG only
//! - Deferred effects resolved inside `tick`, never by host timers

pub mod collision;
pub mod particles;
pub mod schedule;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use collision::{out_of_bounds, point_in_box, projectile_hits_target};
pub use particles::{BURST_SIZE, advance_particles, spawn_burst};
pub use schedule::{Deferred, Schedule};
pub use snapshot::{LauncherView, ParticleView, ProjectileView, SessionView, Snapshot, TargetView};
pub use state::{
    GameEvent, GamePhase, GameState, Launcher, Particle, ParticleKind, Projectile, Target,
};
pub use tick::{TickInput, advance, tick};
pub use trajectory::{predict_trajectory, record_trail};
