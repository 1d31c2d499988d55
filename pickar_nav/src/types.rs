// Core types shared across the navigation crate.
//
// Defines the spatial point type (`Vec3`) used for waypoint positions and
// query points, and the stable waypoint identity (`WaypointId`). All types
// derive `Serialize` and `Deserialize` so graph snapshots and configs can be
// stored as JSON.
//
// Coordinates follow the host application's frame: Y is up, and X/Z span the
// ground plane. "Horizontal" below always means "with Y zeroed".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Vectors at or below this magnitude have no usable direction.
pub const DIRECTION_EPSILON: f32 = 1e-5;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A point or displacement in 3D space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Straight-line distance between two points.
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// The same vector projected onto the ground plane.
    pub fn horizontal(self) -> Self {
        Self::new(self.x, 0.0, self.z)
    }

    /// Unit vector in the same direction, or `None` for a (near-)zero vector.
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len > DIRECTION_EPSILON {
            Some(self * (1.0 / len))
        } else {
            None
        }
    }

    /// Unsigned angle between two vectors in degrees (0..=180).
    ///
    /// Returns 0 when either vector is degenerate.
    pub fn angle_degrees(self, other: Self) -> f32 {
        let denom = (self.length_squared() * other.length_squared()).sqrt();
        if denom < 1e-15 {
            return 0.0;
        }
        let cos = (self.dot(other) / denom).clamp(-1.0, 1.0);
        cos.acos().to_degrees()
    }
}

/// Unit vector on the ground plane pointing from `from` toward `to`, or
/// `None` when the two points coincide horizontally.
pub fn horizontal_direction(from: Vec3, to: Vec3) -> Option<Vec3> {
    (to - from).horizontal().normalized()
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Waypoint identity
// ---------------------------------------------------------------------------

/// Stable identity of a waypoint. Assigned once at creation and never reused,
/// unlike the dense `index` that `reindex()` refreshes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaypointId(pub u32);

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
