//! Explosion particles
//!
//! A burst is spawned on every target hit. Each particle fades on its own
//! clock (`max_life`) and is dropped once its life runs out.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Particle, ParticleKind};

/// Explosion fragments per burst
pub const EXPLOSION_PARTICLES: usize = 40;
/// White flash particles per burst
pub const FLASH_PARTICLES: usize = 20;
/// Total particles per burst
pub const BURST_SIZE: usize = EXPLOSION_PARTICLES + FLASH_PARTICLES;

/// Warm explosion palette
pub const EXPLOSION_COLORS: [u32; 5] = [0xff4444, 0xff6b00, 0xffaa00, 0xffff00, 0xff6666];
pub const FLASH_COLOR: u32 = 0xffffff;

/// Random draw above which an explosion fragment is a spark (else smoke)
pub const SPARK_THRESHOLD: f32 = 0.7;

/// Velocity kept per update call. Applied once per call, not per second.
pub const DAMPING: f32 = 0.95;
/// Smoke rises at this fraction of gravity
pub const SMOKE_BUOYANCY: f32 = 0.3;
/// Sparks and flashes fall at this fraction of gravity
pub const FALL_FACTOR: f32 = 0.5;

/// Spawn a full burst (40 explosion + 20 flash particles) at `origin`
pub fn spawn_burst<R: Rng + ?Sized>(origin: Vec2, rng: &mut R) -> Vec<Particle> {
    let mut burst = Vec::with_capacity(BURST_SIZE);

    for i in 0..EXPLOSION_PARTICLES {
        // Evenly spread around the circle with a little jitter
        let angle = TAU * i as f32 / EXPLOSION_PARTICLES as f32 + (rng.random::<f32>() - 0.5) * 0.5;
        let speed = 200.0 + rng.random::<f32>() * 300.0;
        let max_life = 0.6 + rng.random::<f32>() * 0.4;
        let size = 4.0 + rng.random::<f32>() * 6.0;
        let color = EXPLOSION_COLORS[rng.random_range(0..EXPLOSION_COLORS.len())];
        let kind = if rng.random::<f32>() > SPARK_THRESHOLD {
            ParticleKind::Spark
        } else {
            ParticleKind::Smoke
        };

        burst.push(Particle {
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: 1.0,
            max_life,
            size,
            color,
            kind,
        });
    }

    for _ in 0..FLASH_PARTICLES {
        let angle = rng.random::<f32>() * TAU;
        let speed = 100.0 + rng.random::<f32>() * 200.0;
        let max_life = 0.3 + rng.random::<f32>() * 0.3;
        let size = 2.0 + rng.random::<f32>() * 4.0;

        burst.push(Particle {
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: 1.0,
            max_life,
            size,
            color: FLASH_COLOR,
            kind: ParticleKind::Light,
        });
    }

    log::debug!("Spawned burst of {} particles at ({:.0}, {:.0})", burst.len(), origin.x, origin.y);
    burst
}

/// Advance every particle by `dt` and drop the expired ones
pub fn advance_particles(particles: &mut Vec<Particle>, gravity: f32, dt: f32) {
    for particle in particles.iter_mut() {
        particle.life -= dt / particle.max_life;

        match particle.kind {
            ParticleKind::Smoke => particle.vel.y -= gravity * SMOKE_BUOYANCY * dt,
            ParticleKind::Spark | ParticleKind::Light => particle.vel.y += gravity * FALL_FACTOR * dt,
        }

        particle.vel *= DAMPING;
        particle.pos += particle.vel * dt;
    }
    particles.retain(|p| p.life > 0.0);
}
