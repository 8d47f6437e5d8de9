//! Rotation transform
//!
//! Rotations are always built from zero: a frame's yaw, pitch and roll become
//! one matrix, and that matrix is applied to the original points. Nothing is
//! accumulated between frames.

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::shapes::Point;

/// Yaw, pitch and roll in radians
///
/// ## Combined matrix
/// ```text
/// | ca·cb   ca·sb·sc − sa·cc   ca·sb·cc + sa·sc |
/// | sa·cb   sa·sb·sc + ca·cc   sa·sb·cc − ca·sc |
/// | −sb     cb·sc              cb·cc            |
/// ```
/// with `a` = yaw (about z), `b` = pitch (about y), `c` = roll (about x).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl Rotation {
    pub fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self { yaw, pitch, roll }
    }

    /// The zero rotation
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a rotation from angles in degrees
    pub fn from_degrees(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self::new(yaw.to_radians(), pitch.to_radians(), roll.to_radians())
    }

    /// The single combined rotation matrix
    pub fn matrix(&self) -> Matrix3<f64> {
        let (sa, ca) = self.yaw.sin_cos();
        let (sb, cb) = self.pitch.sin_cos();
        let (sc, cc) = self.roll.sin_cos();

        Matrix3::new(
            ca * cb,
            ca * sb * sc - sa * cc,
            ca * sb * cc + sa * sc,
            sa * cb,
            sa * sb * sc + ca * cc,
            sa * sb * cc - ca * sc,
            -sb,
            cb * sc,
            cb * cc,
        )
    }

    /// Rotate one point about the origin
    pub fn apply(&self, point: &Point) -> Point {
        self.matrix() * point
    }
}

/// Rotate `point` by yaw `a`, pitch `b` and roll `c` (radians)
pub fn rotate(point: &Point, yaw: f64, pitch: f64, roll: f64) -> Point {
    Rotation::new(yaw, pitch, roll).apply(point)
}
