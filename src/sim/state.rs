//! Game state and core simulation types
//!
//! `GameState` owns every entity of a session. Nothing here is global, so any
//! number of sessions can run side by side.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::point_in_box;
use super::schedule::{Deferred, Schedule};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{heading_of, launch_direction};

/// Launch lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No projectile, launch accepted
    Idle,
    /// A projectile is live, launch rejected
    InFlight,
    /// Projectile gone, waiting for the launcher to re-arm
    Settling,
}

/// Discrete feedback for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Target hit; carries the points awarded and the new total score
    Hit { points: u64, score: u64 },
    /// Projectile left the playfield without hitting anything
    Miss,
    /// Session was reset
    Reset,
}

impl GameEvent {
    /// Short player-facing message for the event
    pub fn message(&self) -> String {
        match self {
            GameEvent::Hit { points, .. } => format!("Target hit! +{points}"),
            GameEvent::Miss => "Missed the target, try again!".to_string(),
            GameEvent::Reset => "Game reset, new challenge begins!".to_string(),
        }
    }
}

/// The rocket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Launch number that created this projectile (1-based)
    pub shot: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Orientation along the trajectory tangent (radians)
    pub heading: f32,
    /// Set once on the first target overlap; inert afterwards
    pub hit: bool,
    pub size: Vec2,
}

impl Projectile {
    /// Create a projectile leaving `origin` at the given angle and power
    pub fn launch(origin: Vec2, angle_deg: f32, power: f32, speed_per_power: f32, shot: u32) -> Self {
        let vel = launch_direction(angle_deg) * (power * speed_per_power);
        Self {
            shot,
            pos: origin,
            vel,
            heading: heading_of(vel),
            hit: false,
            size: Vec2::new(ROCKET_WIDTH, ROCKET_HEIGHT),
        }
    }

    /// Semi-implicit Euler step: velocity first, then position from the new velocity
    pub fn advance(&mut self, gravity: f32, dt: f32) {
        self.vel.y += gravity * dt;
        self.pos += self.vel * dt;
        self.heading = heading_of(self.vel);
    }

    /// Speed (units/s)
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The thing to hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Center of the target
    pub pos: Vec2,
    pub size: Vec2,
}

impl Target {
    /// Place a target at a random spot in the target band
    pub fn random<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Self {
        let x = TARGET_MIN_X + rng.random::<f32>() * TARGET_X_SPAN;
        let y = tuning.playfield_height - TARGET_GROUND_OFFSET;
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::splat(TARGET_SIZE),
        }
    }

    /// Strict point-inside test against the target rectangle
    pub fn contains(&self, point: Vec2) -> bool {
        point_in_box(point, self.pos, self.size)
    }
}

/// Fixed launch platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Launcher {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Launcher {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(LAUNCHER_X, tuning.playfield_height - LAUNCHER_GROUND_OFFSET),
            size: Vec2::new(LAUNCHER_WIDTH, LAUNCHER_HEIGHT),
        }
    }

    /// Where new rockets appear
    pub fn muzzle(&self) -> Vec2 {
        self.pos - Vec2::new(0.0, MUZZLE_OFFSET)
    }
}

/// Particle category; drives physics response and fade style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Bright explosion fragment, falls
    Spark,
    /// Buoyant explosion puff, rises
    Smoke,
    /// Short white flash, falls
    Light,
}

impl ParticleKind {
    /// Opacity multiplier applied to remaining life
    pub fn opacity_scale(&self) -> f32 {
        match self {
            ParticleKind::Spark => 0.8,
            ParticleKind::Light => 0.6,
            ParticleKind::Smoke => 0.4,
        }
    }

    /// Glow radius for the renderer (0 = no glow)
    pub fn glow(&self) -> f32 {
        match self {
            ParticleKind::Spark => 10.0,
            ParticleKind::Light => 15.0,
            ParticleKind::Smoke => 0.0,
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases at `1 / max_life` per second
    pub life: f32,
    /// Seconds from full to zero life
    pub max_life: f32,
    pub size: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Render color (smoke uses a single tint regardless of spawn color)
    pub fn render_color(&self) -> u32 {
        match self.kind {
            ParticleKind::Smoke => 0xff8844,
            _ => self.color,
        }
    }

    /// Render opacity derived from remaining life
    pub fn opacity(&self) -> f32 {
        self.life.max(0.0) * self.kind.opacity_scale()
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Active tuning
    pub tuning: Tuning,
    /// Random source for target placement and bursts
    pub rng: Pcg32,
    pub launcher: Launcher,
    /// Live rocket, if any
    pub projectile: Option<Projectile>,
    /// Current target (`None` during the respawn gap)
    pub target: Option<Target>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub score: u64,
    /// Accepted launches this session
    pub launches: u32,
    /// Launch angle setting (degrees, 0-90)
    pub angle_deg: f32,
    /// Launch power setting (percent, 0-100)
    pub power: f32,
    pub phase: GamePhase,
    /// Session generation; bumped by every reset
    pub epoch: u32,
    /// Seconds simulated since the state was created
    pub time: f64,
    /// Positions visited by the current rocket
    pub trail: Vec<Vec2>,
    pub(crate) schedule: Schedule,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with default tuning and a seeded generator
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Tuning::default(), Pcg32::seed_from_u64(seed))
    }

    /// Create a new session with explicit tuning and random source
    pub fn with_rng(tuning: Tuning, mut rng: Pcg32) -> Self {
        let launcher = Launcher::new(&tuning);
        let target = Target::random(&mut rng, &tuning);
        Self {
            tuning,
            rng,
            launcher,
            projectile: None,
            target: Some(target),
            particles: Vec::new(),
            score: 0,
            launches: 0,
            angle_deg: DEFAULT_ANGLE_DEG,
            power: DEFAULT_POWER,
            phase: GamePhase::Idle,
            epoch: 0,
            time: 0.0,
            trail: Vec::new(),
            schedule: Schedule::default(),
            events: Vec::new(),
        }
    }

    /// Set the launch angle (clamped to 0-90 degrees)
    pub fn set_angle(&mut self, degrees: f32) {
        self.angle_deg = degrees.clamp(0.0, MAX_ANGLE_DEG);
    }

    /// Set the launch power (clamped to 0-100 percent)
    pub fn set_power(&mut self, percent: f32) {
        self.power = percent.clamp(0.0, MAX_POWER);
    }

    /// Whether a launch would be accepted right now
    pub fn can_launch(&self) -> bool {
        self.phase == GamePhase::Idle
    }

    /// Fire a rocket with the current settings.
    ///
    /// Returns false (and changes nothing) unless the launcher is idle.
    pub fn launch(&mut self) -> bool {
        if !self.can_launch() {
            return false;
        }
        debug_assert!(self.projectile.is_none(), "idle launcher with a live projectile");

        self.launches += 1;
        let projectile = Projectile::launch(
            self.launcher.muzzle(),
            self.angle_deg,
            self.power,
            self.tuning.speed_per_power,
            self.launches,
        );
        log::info!(
            "Launch #{}: angle={}° power={}% vel=({:.1}, {:.1})",
            self.launches,
            self.angle_deg,
            self.power,
            projectile.vel.x,
            projectile.vel.y
        );
        self.projectile = Some(projectile);
        self.trail.clear();
        self.phase = GamePhase::InFlight;
        true
    }

    /// Start over: new target, zero score, launcher armed immediately
    pub fn reset(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.schedule.clear();
        self.projectile = None;
        self.target = Some(Target::random(&mut self.rng, &self.tuning));
        self.score = 0;
        self.launches = 0;
        self.trail.clear();
        self.phase = GamePhase::Idle;
        self.events.push(GameEvent::Reset);
        log::info!("Session reset (epoch {})", self.epoch);
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of deferred effects still waiting to fire
    pub fn pending_effects(&self) -> usize {
        self.schedule.len()
    }

    /// Queue a deferred effect for the current epoch
    pub(crate) fn defer(&mut self, delay: f32, action: Deferred) {
        self.schedule.push(self.epoch, delay, action);
    }
}
