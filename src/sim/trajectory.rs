//! Flight path helpers: recorded trail and predicted aim arc

use glam::Vec2;

use crate::launch_direction;

/// Time between samples of the predicted arc (seconds)
pub const PREDICTION_STEP: f32 = 0.05;
/// Maximum samples in the predicted arc
pub const PREDICTION_POINTS: usize = 40;

/// Append `pos` to the trail if it moved more than `spacing` on either axis
/// since the last recorded point
pub fn record_trail(trail: &mut Vec<Vec2>, pos: Vec2, spacing: f32) {
    let far_enough = trail
        .last()
        .is_none_or(|last| (last.x - pos.x).abs() > spacing || (last.y - pos.y).abs() > spacing);
    if far_enough {
        trail.push(pos);
    }
}

/// Closed-form ballistic arc for the current aim, stopping at the ground band
pub fn predict_trajectory(
    origin: Vec2,
    angle_deg: f32,
    power: f32,
    speed_per_power: f32,
    gravity: f32,
    ground_y: f32,
) -> Vec<Vec2> {
    let vel = launch_direction(angle_deg) * (power * speed_per_power);
    let mut points = Vec::with_capacity(PREDICTION_POINTS);

    for i in 0..PREDICTION_POINTS {
        let t = i as f32 * PREDICTION_STEP;
        let point = origin + vel * t + Vec2::new(0.0, 0.5 * gravity * t * t);
        if point.y > ground_y {
            break;
        }
        points.push(point);
    }
    points
}
