//! Per-frame simulation step
//!
//! The host calls [`tick`] once per frame with the elapsed time. Order within
//! a tick: settings, reset, launch, deferred effects, rocket, particles.

use super::collision::{out_of_bounds, projectile_hits_target};
use super::particles::{advance_particles, spawn_burst};
use super::schedule::Deferred;
use super::state::{GameEvent, GamePhase, GameState, Target};
use super::trajectory::record_trail;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New launch angle (degrees)
    pub angle: Option<f32>,
    /// New launch power (percent)
    pub power: Option<f32>,
    /// Fire (ignored unless idle)
    pub launch: bool,
    /// Start a fresh session
    pub reset: bool,
}

/// Apply input, then advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if let Some(angle) = input.angle {
        state.set_angle(angle);
    }
    if let Some(power) = input.power {
        state.set_power(power);
    }
    if input.reset {
        state.reset();
    }
    if input.launch {
        state.launch();
    }

    advance(state, dt);
}

/// Advance the simulation by `dt` seconds without any input
pub fn advance(state: &mut GameState, dt: f32) {
    // Host clocks can hiccup; never run time backwards
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    state.time += f64::from(dt);

    for action in state.schedule.advance(state.epoch, dt) {
        apply_deferred(state, action);
    }

    step_projectile(state, dt);

    let gravity = state.tuning.gravity;
    advance_particles(&mut state.particles, gravity, dt);
}

/// Move the rocket, then resolve target overlap and playfield exit
fn step_projectile(state: &mut GameState, dt: f32) {
    let gravity = state.tuning.gravity;
    let (width, height) = (state.tuning.playfield_width, state.tuning.playfield_height);
    let spacing = state.tuning.trail_spacing;

    let Some(projectile) = state.projectile.as_mut() else {
        return;
    };

    projectile.advance(gravity, dt);
    record_trail(&mut state.trail, projectile.pos, spacing);

    let hit_now = projectile_hits_target(projectile, state.target.as_ref());
    if hit_now {
        projectile.hit = true;
    }
    let exited = out_of_bounds(projectile.pos, width, height);
    let (shot, ever_hit) = (projectile.shot, projectile.hit);

    if hit_now {
        register_hit(state, shot);
    }
    if exited {
        remove_projectile(state, !ever_hit);
    }
}

/// Score the hit, blow up the target and queue its replacement
fn register_hit(state: &mut GameState, shot: u32) {
    let points = state.tuning.points_per_hit;
    state.score += points;
    log::info!("Shot #{shot} hit the target, score {}", state.score);
    state.events.push(GameEvent::Hit {
        points,
        score: state.score,
    });

    if let Some(target) = state.target.take() {
        let burst = spawn_burst(target.pos, &mut state.rng);
        state.particles.extend(burst);
    }

    let delay = state.tuning.respawn_delay;
    state.defer(delay, Deferred::RespawnTarget);
    state.defer(delay, Deferred::ExpireProjectile { shot });
}

/// Take the rocket off the field and start the re-arm countdown
fn remove_projectile(state: &mut GameState, missed: bool) {
    if state.projectile.take().is_none() {
        return;
    }
    if missed {
        log::info!("Shot #{} missed", state.launches);
        state.events.push(GameEvent::Miss);
    }
    state.phase = GamePhase::Settling;
    let delay = state.tuning.rearm_delay;
    state.defer(delay, Deferred::Rearm);
}

fn apply_deferred(state: &mut GameState, action: Deferred) {
    match action {
        Deferred::RespawnTarget => {
            let target = Target::random(&mut state.rng, &state.tuning);
            log::debug!("New target at ({:.0}, {:.0})", target.pos.x, target.pos.y);
            state.target = Some(target);
        }
        Deferred::ExpireProjectile { shot } => {
            let same_shot = state.projectile.as_ref().is_some_and(|p| p.shot == shot);
            if same_shot {
                remove_projectile(state, false);
            }
        }
        Deferred::Rearm => {
            if state.phase == GamePhase::Settling {
                state.phase = GamePhase::Idle;
                state.trail.clear();
                log::info!("Launcher re-armed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const DT: f32 = 0.05;

    /// Session with the target parked where a straight drop from the muzzle
    /// passes through it (box spans y 532..592 at x 70..130)
    fn drop_setup() -> GameState {
        let mut state = GameState::new(12345);
        state.target = Some(Target {
            pos: Vec2::new(100.0, 562.0),
            size: Vec2::splat(60.0),
        });
        state.set_angle(90.0);
        state.set_power(0.0);
        state
    }

    fn count(events: &[GameEvent], pred: impl Fn(&GameEvent) -> bool) -> usize {
        events.iter().filter(|e| pred(e)).count()
    }

    #[test]
    fn test_launch_velocity_45_60() {
        let mut state = GameState::new(1);
        let input = TickInput {
            angle: Some(45.0),
            power: Some(60.0),
            launch: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);

        let p = state.projectile.as_ref().unwrap();
        assert!((p.vel.x - 339.41).abs() < 0.01);
        assert!((p.vel.y + 339.41).abs() < 0.01);
        assert_eq!(state.launches, 1);
    }

    #[test]
    fn test_straight_drop() {
        let mut state = drop_setup();
        state.target = None;
        state.launch();

        let mut last_y = state.projectile.as_ref().unwrap().pos.y;
        for _ in 0..12 {
            advance(&mut state, DT);
            let p = state.projectile.as_ref().unwrap();
            assert_eq!(p.vel.x, 0.0);
            assert!(p.pos.y > last_y);
            last_y = p.pos.y;
        }
    }

    #[test]
    fn test_single_hit_across_ticks() {
        let mut state = drop_setup();
        state.launch();

        // Inside the box from tick 5 through 11, out of bounds at tick 13
        for _ in 0..5 {
            advance(&mut state, DT);
        }
        assert_eq!(state.score, 100);
        assert_eq!(state.particles.len(), 60);

        for _ in 0..8 {
            advance(&mut state, DT);
        }
        let events = state.drain_events();
        assert_eq!(count(&events, |e| matches!(e, GameEvent::Hit { .. })), 1);
        assert_eq!(count(&events, |e| *e == GameEvent::Miss), 0);
        assert_eq!(state.score, 100);

        // A hit projectile leaving the field is not a miss
        assert!(state.projectile.is_none());
        assert_eq!(state.phase, GamePhase::Settling);
        assert!(state.target.is_none());
    }

    #[test]
    fn test_target_respawns_after_delay() {
        let mut state = drop_setup();
        state.launch();

        for _ in 0..5 {
            advance(&mut state, DT);
        }
        assert!(state.target.is_none(), "target removed on hit");

        for _ in 0..19 {
            advance(&mut state, DT);
        }
        assert!(state.target.is_none(), "still in the respawn gap");

        advance(&mut state, DT);
        let target = state.target.as_ref().expect("respawned one second after the hit");
        assert!(target.pos.x >= 550.0 && target.pos.x < 700.0);
    }

    #[test]
    fn test_hit_projectile_expires_after_delay() {
        // Straight up through a target above the launcher; apex stays on screen
        let mut state = GameState::new(3);
        state.target = Some(Target {
            pos: Vec2::new(100.0, 400.0),
            size: Vec2::splat(60.0),
        });
        state.set_angle(90.0);
        state.set_power(50.0);
        state.launch();

        let mut ticks = 0;
        while state.score == 0 {
            advance(&mut state, DT);
            ticks += 1;
            assert!(ticks < 20, "rocket never reached the target");
        }
        assert!(state.projectile.is_some());

        for _ in 0..19 {
            advance(&mut state, DT);
        }
        assert!(state.projectile.is_some(), "lingers for a second after the hit");
        assert_eq!(state.phase, GamePhase::InFlight);

        advance(&mut state, DT);
        assert!(state.projectile.is_none());
        assert_eq!(state.phase, GamePhase::Settling);
        assert!(!state.drain_events().contains(&GameEvent::Miss));
    }

    #[test]
    fn test_score_per_hit_and_launch_count() {
        let mut state = drop_setup();

        for round in 1..=2u64 {
            state.target = Some(Target {
                pos: Vec2::new(100.0, 562.0),
                size: Vec2::splat(60.0),
            });
            assert!(state.launch());
            // Rejected launches do not count
            assert!(!state.launch());

            // 13 ticks to leave the field, then a full second to re-arm
            for _ in 0..40 {
                advance(&mut state, DT);
            }
            assert_eq!(state.score, 100 * round);
            assert_eq!(state.phase, GamePhase::Idle);
        }
        assert_eq!(state.launches, 2);
    }

    #[test]
    fn test_miss_then_rearm() {
        let mut state = GameState::new(99);
        // Park the target well away from the 45°/60% arc
        state.target = Some(Target {
            pos: Vec2::new(750.0, 100.0),
            size: Vec2::splat(60.0),
        });
        state.set_angle(45.0);
        state.set_power(60.0);
        assert!(state.launch());

        let mut ticks = 0;
        while state.projectile.is_some() {
            advance(&mut state, 0.1);
            ticks += 1;
            assert!(ticks <= 25, "rocket never left the playfield");
        }
        // Leaves through the bottom edge on tick 19
        assert_eq!(ticks, 19);
        assert_eq!(state.drain_events(), vec![GameEvent::Miss]);
        assert_eq!(state.phase, GamePhase::Settling);
        assert_eq!(state.score, 0);

        for _ in 0..9 {
            advance(&mut state, 0.1);
            assert!(!state.launch(), "launch must wait for the re-arm");
        }
        advance(&mut state, 0.1);
        assert!(state.can_launch());
        assert!(state.launch());
        assert_eq!(state.launches, 2);
    }

    #[test]
    fn test_reset_from_flight() {
        let mut state = drop_setup();
        state.launch();
        for _ in 0..6 {
            advance(&mut state, DT);
        }
        assert_eq!(state.score, 100);

        let input = TickInput {
            reset: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);

        assert_eq!(state.score, 0);
        assert_eq!(state.launches, 0);
        assert!(state.projectile.is_none());
        assert!(state.trail.is_empty());
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.pending_effects(), 0);
        assert!(state.drain_events().contains(&GameEvent::Reset));

        // Immediately accepts a new launch
        assert!(state.launch());
    }

    #[test]
    fn test_reset_cancels_pending_respawn() {
        let mut state = drop_setup();
        state.launch();
        for _ in 0..5 {
            advance(&mut state, DT);
        }
        assert!(state.target.is_none());

        state.reset();
        let fresh = state.target.as_ref().unwrap().pos;
        let epoch = state.epoch;

        // Past the point the old respawn would have fired
        for _ in 0..40 {
            advance(&mut state, DT);
        }
        assert_eq!(state.target.as_ref().unwrap().pos, fresh);
        assert_eq!(state.epoch, epoch);
    }

    #[test]
    fn test_stale_entry_is_ignored() {
        let mut state = GameState::new(8);
        let before = state.target.as_ref().unwrap().pos;

        // Queue a respawn in an old epoch, then move on
        state.schedule.push(state.epoch, 0.5, Deferred::RespawnTarget);
        state.epoch += 1;
        advance(&mut state, 1.0);

        assert_eq!(state.target.as_ref().unwrap().pos, before);
        assert_eq!(state.pending_effects(), 0);
    }

    #[test]
    fn test_particles_animate_while_settling() {
        let mut state = drop_setup();
        state.launch();
        for _ in 0..13 {
            advance(&mut state, DT);
        }
        assert_eq!(state.phase, GamePhase::Settling);
        let before = state.particles.len();
        let first = state.particles[0].pos;

        advance(&mut state, DT);
        assert!(state.particles.len() <= before);
        assert_ne!(state.particles[0].pos, first);
    }

    #[test]
    fn test_settings_apply_to_next_launch_only() {
        let mut state = GameState::new(5);
        state.launch();
        let vel = state.projectile.as_ref().unwrap().vel;

        let input = TickInput {
            angle: Some(10.0),
            power: Some(100.0),
            launch: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);

        assert_eq!(state.projectile.as_ref().unwrap().vel, vel);
        assert_eq!(state.angle_deg, 10.0);
        assert_eq!(state.launches, 1);
    }

    #[test]
    fn test_trail_recorded_in_flight() {
        let mut state = GameState::new(4);
        state.target = None;
        state.launch();
        for _ in 0..10 {
            advance(&mut state, DT);
        }
        assert!(state.trail.len() >= 2);
        for pair in state.trail.windows(2) {
            let d = (pair[1] - pair[0]).abs();
            assert!(d.x > 5.0 || d.y > 5.0);
        }
    }

    #[test]
    fn test_reset_from_settling_skips_cooldown() {
        let mut state = GameState::new(99);
        state.target = Some(Target {
            pos: Vec2::new(750.0, 100.0),
            size: Vec2::splat(60.0),
        });
        state.set_angle(45.0);
        state.set_power(60.0);
        state.launch();
        while state.phase != GamePhase::Settling {
            advance(&mut state, 0.1);
        }
        assert_eq!(state.pending_effects(), 1);

        state.reset();
        assert!(state.can_launch(), "reset re-arms without waiting");
        assert_eq!(state.pending_effects(), 0);

        // Straight drop away from the fresh target; leaves the field on tick 13
        state.set_angle(90.0);
        state.set_power(0.0);
        assert!(state.launch());
        for _ in 0..13 {
            advance(&mut state, DT);
        }
        assert_eq!(state.phase, GamePhase::Settling);

        // The re-arm queued before the reset would have fired by now
        for _ in 0..18 {
            advance(&mut state, DT);
            assert_eq!(state.phase, GamePhase::Settling);
        }
        advance(&mut state, DT);
        advance(&mut state, DT);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.launches, 1);
    }

    #[test]
    fn test_reset_from_idle() {
        let mut state = GameState::new(6);
        state.reset();
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.epoch, 1);
        assert_eq!(state.drain_events(), vec![GameEvent::Reset]);
        assert!(state.launch());
    }

    #[test]
    fn test_hit_uses_tuned_points() {
        let mut state = drop_setup();
        state.tuning.points_per_hit = 250;
        state.launch();
        for _ in 0..5 {
            advance(&mut state, DT);
        }
        let events = state.drain_events();
        assert_eq!(events, vec![GameEvent::Hit { points: 250, score: 250 }]);
        assert_eq!(events[0].message(), "Target hit! +250");
    }

    #[test]
    fn test_session_clock_accumulates() {
        let mut state = GameState::new(2);
        for _ in 0..4 {
            advance(&mut state, 0.25);
        }
        assert!((state.time - 1.0).abs() < 1e-9);
        assert!((state.snapshot().session.time - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut state = GameState::new(2);
        state.launch();
        let pos = state.projectile.as_ref().unwrap().pos;
        advance(&mut state, -1.0);
        advance(&mut state, f32::NAN);
        assert_eq!(state.projectile.as_ref().unwrap().pos, pos);
        assert_eq!(state.time, 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                angle: Some(30.0),
                ..Default::default()
            },
            TickInput {
                launch: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                power: Some(80.0),
                ..Default::default()
            },
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input, 1.0 / 60.0);
                tick(&mut state2, input, 1.0 / 60.0);
            }
        }

        assert_eq!(state1.launches, state2.launches);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.target.map(|t| t.pos), state2.target.map(|t| t.pos));
    }
}
