//! Solid trait and the sampled point cloud it produces
//!
//! A `Solid` turns its dimensions, a point budget and a [`Pivot`] into a
//! [`PointCloud`]: the ordered lattice points plus the viewport half-width
//! `lim` that bounds the cloud at every orientation.

use std::fmt;
use std::str::FromStr;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::effects::Rotation;

/// A point in model space
pub type Point = Point3<f64>;

/// Errors that can occur while sampling a solid
#[derive(Error, Debug, PartialEq)]
pub enum ShapeError {
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("point budget must be at least 1")]
    EmptyBudget,

    #[error("point budget too small: {axis} axis would get {samples} samples")]
    DegenerateLattice { axis: &'static str, samples: f64 },

    #[error("invalid pivot '{0}': expected 'auto' or 'x,y,z'")]
    InvalidPivot(String),
}

/// Where the solid's anchor sits relative to the rotation origin
///
/// The anchor is the prism's lowest corner, the sphere's centre or the
/// tetrahedron's apex. `AutoCenter` lets each solid pick its natural placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pivot {
    #[default]
    AutoCenter,
    Explicit { x: f64, y: f64, z: f64 },
}

impl Pivot {
    pub fn explicit(x: f64, y: f64, z: f64) -> Self {
        Pivot::Explicit { x, y, z }
    }

    /// Resolve to a concrete anchor, using `natural` for `AutoCenter`
    pub fn anchor(&self, natural: Point) -> Point {
        match *self {
            Pivot::AutoCenter => natural,
            Pivot::Explicit { x, y, z } => Point::new(x, y, z),
        }
    }
}

impl FromStr for Pivot {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Pivot::AutoCenter);
        }

        let coords = trimmed
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ShapeError::InvalidPivot(s.to_string()))?;

        match coords.as_slice() {
            &[x, y, z] if x.is_finite() && y.is_finite() && z.is_finite() => {
                Ok(Pivot::explicit(x, y, z))
            }
            _ => Err(ShapeError::InvalidPivot(s.to_string())),
        }
    }
}

impl fmt::Display for Pivot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pivot::AutoCenter => write!(f, "auto"),
            Pivot::Explicit { x, y, z } => write!(f, "{},{},{}", x, y, z),
        }
    }
}

/// A sampled solid: ordered points plus the viewport half-width
#[derive(Clone, Debug)]
pub struct PointCloud {
    points: Vec<Point>,
    lim: f64,
}

impl PointCloud {
    /// Create a cloud, widening `lim` to the largest point norm if needed.
    ///
    /// Rotation about the origin preserves norms, so after widening no point
    /// can leave `[-lim, lim]` on any axis at any orientation.
    pub fn new(points: Vec<Point>, lim: f64) -> Self {
        let max_norm = points
            .iter()
            .map(|p| p.coords.norm())
            .fold(0.0_f64, f64::max);

        Self {
            points,
            lim: lim.max(max_norm),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn lim(&self) -> f64 {
        self.lim
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Map every point through `rotation`, leaving the cloud untouched
    pub fn rotated(&self, rotation: &Rotation) -> Vec<Point> {
        let matrix = rotation.matrix();
        self.points.iter().map(|p| matrix * p).collect()
    }
}

/// A parametric solid that can be sampled into a point cloud
pub trait Solid {
    /// Sample roughly `n` points of the solid anchored at `pivot`
    fn sample(&self, n: usize, pivot: Pivot) -> Result<PointCloud, ShapeError>;

    /// Human-readable name, used in logs
    fn name(&self) -> &str;
}

/// Largest absolute coordinate of an anchor
pub(crate) fn max_offset(anchor: &Point) -> f64 {
    let coords: Vector3<f64> = anchor.coords;
    coords.amax()
}
