//! The discrete action space shared by every behaviour and the host.

use crate::WobError;

/// One of the four discrete actions an agent can take on a decision.
///
/// The numeric values match the single-branch discrete action buffer used by
/// the learning framework: `0 = none, 1 = forward, 2 = rotate left,
/// 3 = rotate right`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DiscreteAction {
    /// Do nothing this step.
    #[default]
    None = 0,
    /// Move along the current heading.
    Forward = 1,
    /// Turn counter-clockwise (viewed from above).
    RotateLeft = 2,
    /// Turn clockwise (viewed from above).
    RotateRight = 3,
}

impl DiscreteAction {
    /// Every action, in buffer-index order.
    pub const ALL: [DiscreteAction; 4] = [
        DiscreteAction::None,
        DiscreteAction::Forward,
        DiscreteAction::RotateLeft,
        DiscreteAction::RotateRight,
    ];

    /// Actions eligible for random "mistake" substitution.  `RotateRight` is
    /// deliberately absent.
    pub const MISTAKE_SET: [DiscreteAction; 3] = [
        DiscreteAction::None,
        DiscreteAction::Forward,
        DiscreteAction::RotateLeft,
    ];

    /// Value written into the discrete action buffer.
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// `true` for actions that change the agent's pose.
    #[inline]
    pub fn is_motion(self) -> bool {
        !matches!(self, DiscreteAction::None)
    }

    /// Human-readable label, useful for CSV/SQLite column values.
    pub fn as_str(self) -> &'static str {
        match self {
            DiscreteAction::None        => "none",
            DiscreteAction::Forward     => "forward",
            DiscreteAction::RotateLeft  => "rotate_left",
            DiscreteAction::RotateRight => "rotate_right",
        }
    }
}

impl TryFrom<i32> for DiscreteAction {
    type Error = WobError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DiscreteAction::None),
            1 => Ok(DiscreteAction::Forward),
            2 => Ok(DiscreteAction::RotateLeft),
            3 => Ok(DiscreteAction::RotateRight),
            other => Err(WobError::Parse(format!("discrete action {other} out of range 0..=3"))),
        }
    }
}

impl std::fmt::Display for DiscreteAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
