//! Host kinematics: how a discrete action moves an agent over one step.
//!
//! | Action        | Effect over `dt` seconds                           |
//! |---------------|----------------------------------------------------|
//! | `None`        | nothing                                            |
//! | `Forward`     | `move_speed * dt` metres along the heading         |
//! | `RotateLeft`  | yaw by `-angular_speed * dt` degrees               |
//! | `RotateRight` | yaw by `+angular_speed * dt` degrees               |

use wob_agent::AgentStore;
use wob_core::{AgentId, DiscreteAction, Pose};

/// Pose after applying `action` for `dt` seconds.
pub fn apply_action(pose: Pose, action: DiscreteAction, move_speed: f32, angular_speed: f32, dt: f32) -> Pose {
    let mut next = pose;
    match action {
        DiscreteAction::None        => {}
        DiscreteAction::Forward     => next.position += pose.forward * (move_speed * dt),
        DiscreteAction::RotateLeft  => next.rotate(-angular_speed * dt),
        DiscreteAction::RotateRight => next.rotate(angular_speed * dt),
    }
    next
}

/// Apply `action` to `agent` in place using its stored speeds.
pub fn advance(store: &mut AgentStore, agent: AgentId, action: DiscreteAction, dt: f32) {
    let i = agent.index();
    let next = apply_action(store.pose(agent), action, store.move_speed[i], store.angular_speed[i], dt);
    store.set_pose(agent, next);
}
