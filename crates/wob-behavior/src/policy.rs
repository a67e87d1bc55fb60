//! The action policy: steer towards the next path corner.

use wob_core::{AgentRng, DiscreteAction, Pose, Vec3};
use wob_nav::NavPath;

/// Choose a discrete action that moves the agent along `path`.
///
/// 1. Without a next corner (fewer than two corners) the agent idles.
/// 2. With probability `mistake_prob` a uniform pick from
///    [`DiscreteAction::MISTAKE_SET`] is returned instead.
/// 3. Otherwise the agent turns towards the next corner if the signed angle
///    to it exceeds what it can turn in `dt` seconds, and walks forward once
///    it is lined up.
///
/// The direction to the corner is measured with the agent's height replaced
/// by the corner's, so slopes never register as heading error.
pub fn compute_heuristic_action(
    pose:          &Pose,
    path:          &NavPath,
    angular_speed: f32,
    dt:            f32,
    mistake_prob:  f32,
    rng:           &mut AgentRng,
) -> DiscreteAction {
    let Some(corner) = path.next_corner() else {
        return DiscreteAction::None;
    };

    if rng.chance(mistake_prob) {
        if let Some(&mistake) = rng.pick(&DiscreteAction::MISTAKE_SET) {
            return mistake;
        }
    }

    let direction = (corner - pose.position.with_y(corner.y)).normalized();
    let angle = pose.forward.signed_angle_deg(direction, Vec3::UP);
    let rangle = angle.signum() * dt * angular_speed;

    if angle.abs() > rangle.abs() {
        if angle < 0.0 {
            DiscreteAction::RotateLeft
        } else {
            DiscreteAction::RotateRight
        }
    } else {
        DiscreteAction::Forward
    }
}
