//! Read-only view of the simulation for renderers and HUDs

use glam::Vec2;
use serde::Serialize;

use super::state::{GamePhase, GameState, ParticleKind};
use super::trajectory::predict_trajectory;

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rotation to draw the rocket along its path (radians)
    pub heading: f32,
    pub hit: bool,
    pub size: Vec2,
    pub speed: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetView {
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Serialize)]
pub struct LauncherView {
    pub pos: Vec2,
    pub size: Vec2,
    /// Launch tube angle (degrees, counter-clockwise from +X)
    pub aim_deg: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    /// 0xRRGGBB to draw with
    pub color: u32,
    pub opacity: f32,
    pub glow: f32,
    pub kind: ParticleKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub score: u64,
    pub launches: u32,
    pub phase: GamePhase,
    pub angle_deg: f32,
    pub power: f32,
    pub can_launch: bool,
    /// Seconds simulated since the state was created (not cleared by reset)
    pub time: f64,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub playfield: Vec2,
    pub ground_y: f32,
    pub projectile: Option<ProjectileView>,
    pub target: Option<TargetView>,
    pub launcher: LauncherView,
    pub particles: Vec<ParticleView>,
    pub session: SessionView,
    /// Recorded path of the current rocket
    pub trail: Vec<Vec2>,
    /// Aim preview; empty unless the launcher is idle
    pub predicted: Vec<Vec2>,
}

impl GameState {
    /// Capture the current state for drawing
    pub fn snapshot(&self) -> Snapshot {
        let tuning = &self.tuning;

        let predicted = if self.can_launch() {
            predict_trajectory(
                self.launcher.muzzle(),
                self.angle_deg,
                self.power,
                tuning.speed_per_power,
                tuning.gravity,
                tuning.ground_y(),
            )
        } else {
            Vec::new()
        };

        Snapshot {
            playfield: Vec2::new(tuning.playfield_width, tuning.playfield_height),
            ground_y: tuning.ground_y(),
            projectile: self.projectile.as_ref().map(|p| ProjectileView {
                pos: p.pos,
                vel: p.vel,
                heading: p.heading,
                hit: p.hit,
                size: p.size,
                speed: p.speed(),
            }),
            target: self.target.as_ref().map(|t| TargetView {
                pos: t.pos,
                size: t.size,
            }),
            launcher: LauncherView {
                pos: self.launcher.pos,
                size: self.launcher.size,
                aim_deg: self.angle_deg,
            },
            particles: self
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    size: p.size,
                    color: p.render_color(),
                    opacity: p.opacity(),
                    glow: p.kind.glow(),
                    kind: p.kind,
                })
                .collect(),
            session: SessionView {
                score: self.score,
                launches: self.launches,
                phase: self.phase,
                angle_deg: self.angle_deg,
                power: self.power,
                can_launch: self.can_launch(),
                time: self.time,
            },
            trail: self.trail.clone(),
            predicted,
        }
    }
}
