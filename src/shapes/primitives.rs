//! Primitive solids - RectangularPrism, Sphere, Tetrahedron
//!
//! Each solid converts a point budget into a lattice density so that the
//! sampled cloud holds roughly that many points. Counts are approximate.

use std::f64::consts::PI;

use super::lattice::{grid, positive, AxisSamples};
use super::traits::{max_offset, Pivot, Point, PointCloud, ShapeError, Solid};

/// Slack for lattice points that land exactly on a curved surface
const SURFACE_EPSILON: f64 = 1e-9;

fn check_budget(n: usize) -> Result<(), ShapeError> {
    if n == 0 {
        return Err(ShapeError::EmptyBudget);
    }
    Ok(())
}

/// An axis-aligned box sampled through its volume
///
/// The anchor is the lowest corner; `AutoCenter` puts the box's centre on the
/// rotation origin.
#[derive(Clone, Debug)]
pub struct RectangularPrism {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl RectangularPrism {
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// A cube with the given side
    pub fn cube(side: f64) -> Self {
        Self::new(side, side, side)
    }
}

impl Solid for RectangularPrism {
    fn sample(&self, n: usize, pivot: Pivot) -> Result<PointCloud, ShapeError> {
        let l = positive("length", self.length)?;
        let w = positive("width", self.width)?;
        let h = positive("height", self.height)?;
        check_budget(n)?;

        let corner = pivot.anchor(Point::new(-l / 2.0, -w / 2.0, -h / 2.0));
        let points_per_unit = (n as f64 / (l * w * h)).cbrt();

        let xs = AxisSamples::with_density("x", corner.x, corner.x + l, points_per_unit)?;
        let ys = AxisSamples::with_density("y", corner.y, corner.y + w, points_per_unit)?;
        let zs = AxisSamples::with_density("z", corner.z, corner.z + h, points_per_unit)?;

        let points: Vec<Point> = grid(xs, ys, zs).collect();
        let lim = l.max(w).max(h) / 2.0 + max_offset(&corner);

        Ok(PointCloud::new(points, lim))
    }

    fn name(&self) -> &str {
        "Rectangular prism"
    }
}

/// A ball sampled through its volume
///
/// The anchor is the centre; `AutoCenter` puts it on the rotation origin.
#[derive(Clone, Debug)]
pub struct Sphere {
    pub radius: f64,
}

impl Sphere {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl Solid for Sphere {
    fn sample(&self, n: usize, pivot: Pivot) -> Result<PointCloud, ShapeError> {
        let r = positive("radius", self.radius)?;
        check_budget(n)?;

        let centre = pivot.anchor(Point::origin());
        let volume = 4.0 / 3.0 * PI * r.powi(3);
        // Doubled for the cube-to-ball volume ratio; halved again below by
        // spreading the samples over the diameter rather than the radius.
        let points_per_unit = (n as f64 / volume).cbrt() * 2.0;
        let density = points_per_unit / 2.0;

        let xs = AxisSamples::with_density("x", centre.x - r, centre.x + r, density)?;
        let ys = AxisSamples::with_density("y", centre.y - r, centre.y + r, density)?;
        let zs = AxisSamples::with_density("z", centre.z - r, centre.z + r, density)?;

        let points: Vec<Point> = grid(xs, ys, zs)
            .filter(|p| (p - centre).norm() <= r + SURFACE_EPSILON)
            .collect();

        if points.is_empty() {
            return Err(ShapeError::DegenerateLattice {
                axis: "radial",
                samples: 0.0,
            });
        }

        let lim = max_offset(&centre) + 2.0 * r;
        Ok(PointCloud::new(points, lim))
    }

    fn name(&self) -> &str {
        "Sphere"
    }
}

/// Points of one triangular slice, grouped by row
pub type Layer = Vec<Vec<Point>>;

/// A tetrahedron sliced from apex to base into triangular layers
///
/// The anchor is the apex; `AutoCenter` puts it on the rotation origin and the
/// body hangs below it along -z.
#[derive(Clone, Debug)]
pub struct Tetrahedron {
    pub side: f64,
}

impl Tetrahedron {
    /// Vertical spacing factor between layers and between rows
    pub const HEIGHT_RATIO: f64 = 0.866_025_403_784_438_6; // sqrt(3) / 2

    pub fn new(side: f64) -> Self {
        Self { side }
    }

    /// Number of triangular layers for a point budget
    pub fn points_per_side(n: usize) -> usize {
        (n as f64 * 72.0_f64.sqrt()).cbrt().round() as usize
    }

    /// Build the lattice layer by layer.
    ///
    /// There are `points_per_side` layers. Layer `i` holds `i + 1` rows and
    /// row `j` holds `j + 1` points, so the apex layer is a single point and
    /// the base layer has `points_per_side` rows.
    pub fn layers(&self, n: usize, pivot: Pivot) -> Result<Vec<Layer>, ShapeError> {
        let s = positive("side", self.side)?;
        check_budget(n)?;

        let per_side = Self::points_per_side(n);
        if per_side < 1 {
            return Err(ShapeError::DegenerateLattice {
                axis: "layer",
                samples: per_side as f64,
            });
        }

        let apex = pivot.anchor(Point::origin());
        let spacing = s / per_side as f64;
        let hr = Self::HEIGHT_RATIO;

        let layers = (0..per_side)
            .map(|i| {
                let z = apex.z - (i as f64 / per_side as f64) * s * hr;
                let centroid_row = (i as f64 - 1.0) * 2.0 / 3.0;

                (0..=i)
                    .map(|j| {
                        let y = apex.y - (j as f64 - centroid_row) * spacing * hr;
                        (0..=j)
                            .map(|k| {
                                let x = apex.x + (k as f64 - j as f64 / 2.0) * spacing;
                                Point::new(x, y, z)
                            })
                            .collect::<Vec<Point>>()
                    })
                    .collect::<Layer>()
            })
            .collect::<Vec<Layer>>();

        Ok(layers)
    }
}

impl Solid for Tetrahedron {
    fn sample(&self, n: usize, pivot: Pivot) -> Result<PointCloud, ShapeError> {
        let layers = self.layers(n, pivot)?;
        let points: Vec<Point> = layers.into_iter().flatten().flatten().collect();

        let apex = pivot.anchor(Point::origin());
        let lim = apex.z.abs() + self.side / 2.0;
        Ok(PointCloud::new(points, lim))
    }

    fn name(&self) -> &str {
        "Tetrahedron"
    }
}
