//! 3-D vector and agent pose types.
//!
//! Conventions follow a left-handed, y-up world: `+z` is the default forward
//! direction, `+x` is right, and a positive yaw turns clockwise when viewed
//! from above.  Signed angles about [`Vec3::UP`] are therefore positive when
//! the target lies to the agent's right.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use std::str::FromStr;

use crate::WobError;

/// Vectors shorter than this are treated as zero when normalizing.
const EPSILON: f32 = 1e-5;

/// A single-precision 3-D vector / point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO:    Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP:      Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };
    pub const FORWARD: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };
    pub const RIGHT:   Vec3 = Vec3 { x: 1.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vec3) -> f32 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or `Vec3::ZERO` for (near-)zero input.
    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len < EPSILON {
            Vec3::ZERO
        } else {
            self * (1.0 / len)
        }
    }

    /// Copy of `self` with `y` replaced.
    #[inline]
    pub fn with_y(self, y: f32) -> Vec3 {
        Vec3::new(self.x, y, self.z)
    }

    /// Projection onto the horizontal (XZ) plane.
    #[inline]
    pub fn horizontal(self) -> Vec3 {
        self.with_y(0.0)
    }

    /// Unsigned angle between two vectors in degrees, `[0, 180]`.
    ///
    /// Returns `0.0` if either vector is (near-)zero.
    pub fn angle_deg(self, other: Vec3) -> f32 {
        let denom = (self.dot(self) * other.dot(other)).sqrt();
        if denom < EPSILON * EPSILON {
            return 0.0;
        }
        (self.dot(other) / denom).clamp(-1.0, 1.0).acos().to_degrees()
    }

    /// Signed angle from `self` to `to` about `axis`, in degrees.
    ///
    /// The sign is taken from `axis · (self × to)`, with zero counted as
    /// positive, so the result lies in `(-180, 180]`.
    pub fn signed_angle_deg(self, to: Vec3, axis: Vec3) -> f32 {
        let unsigned = self.angle_deg(to);
        if axis.dot(self.cross(to)) < 0.0 {
            -unsigned
        } else {
            unsigned
        }
    }

    /// Rotate about the up axis by `degrees` (positive = clockwise from above).
    pub fn rotate_yaw(self, degrees: f32) -> Vec3 {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Vec3::new(
            self.x * cos + self.z * sin,
            self.y,
            -self.x * sin + self.z * cos,
        )
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn from_array(a: [f32; 3]) -> Self {
        Vec3::new(a[0], a[1], a[2])
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// Parses `"x,y,z"` (whitespace around components is ignored), the format
/// typed into the game-helper teleport fields.
impl FromStr for Vec3 {
    type Err = WobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [x, y, z] = parts.as_slice() else {
            return Err(WobError::Parse(format!("expected \"x,y,z\", got {s:?}")));
        };
        let component = |v: &str| {
            v.parse::<f32>()
                .map_err(|e| WobError::Parse(format!("bad vector component {v:?}: {e}")))
        };
        Ok(Vec3::new(component(x)?, component(y)?, component(z)?))
    }
}

// ── Pose ──────────────────────────────────────────────────────────────────────

/// World transform of an agent: a position and a horizontal forward heading.
///
/// The frame is yaw-only: `right = UP × forward`, `up = UP`.  Scale is always
/// one.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position: Vec3,
    pub forward:  Vec3,
}

impl Pose {
    /// Build a pose, normalizing the horizontal part of `forward`.
    ///
    /// A degenerate heading falls back to `Vec3::FORWARD`.
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        let f = forward.horizontal().normalized();
        Self {
            position,
            forward: if f == Vec3::ZERO { Vec3::FORWARD } else { f },
        }
    }

    /// Pose at `position` facing `yaw_deg` degrees clockwise from `+z`.
    pub fn from_yaw(position: Vec3, yaw_deg: f32) -> Self {
        Self { position, forward: Vec3::FORWARD.rotate_yaw(yaw_deg) }
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        Vec3::UP.cross(self.forward)
    }

    /// Heading in degrees clockwise from `+z`, in `(-180, 180]`.
    pub fn yaw_deg(&self) -> f32 {
        Vec3::FORWARD.signed_angle_deg(self.forward, Vec3::UP)
    }

    /// Transform a point from the agent's local frame into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.right() * local.x + Vec3::UP * local.y + self.forward * local.z
    }

    /// Turn in place by `degrees` (positive = right).
    pub fn rotate(&mut self, degrees: f32) {
        self.forward = self.forward.rotate_yaw(degrees).normalized();
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self { position: Vec3::ZERO, forward: Vec3::FORWARD }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} yaw {:.1}°", self.position, self.yaw_deg())
    }
}
