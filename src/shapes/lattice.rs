//! Evenly spaced lattices for solid sampling
//!
//! Grids are built lazily: nothing is materialised until the caller collects,
//! so the sphere can filter candidates without holding the full cube.

use super::traits::{Point, ShapeError};

/// Evenly spaced samples along one axis, endpoints inclusive
#[derive(Clone, Copy, Debug)]
pub struct AxisSamples {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl AxisSamples {
    /// Sample `[start, end]` with `round(length * density)` points.
    ///
    /// Fails if the rounded count is below one.
    pub fn with_density(
        axis: &'static str,
        start: f64,
        end: f64,
        density: f64,
    ) -> Result<Self, ShapeError> {
        let samples = ((end - start).abs() * density).round();
        if !(samples >= 1.0) {
            return Err(ShapeError::DegenerateLattice { axis, samples });
        }

        Ok(Self {
            start,
            end,
            count: samples as usize,
        })
    }

    /// The sample positions. A single sample sits at `start`.
    pub fn values(self) -> impl Iterator<Item = f64> + Clone {
        let Self { start, end, count } = self;
        let step = if count > 1 {
            (end - start) / (count - 1) as f64
        } else {
            0.0
        };

        (0..count).map(move |i| {
            if count > 1 && i == count - 1 {
                end
            } else {
                start + step * i as f64
            }
        })
    }
}

/// Cartesian product of three axes, x-major then y then z
pub fn grid(xs: AxisSamples, ys: AxisSamples, zs: AxisSamples) -> impl Iterator<Item = Point> {
    xs.values().flat_map(move |x| {
        ys.values()
            .flat_map(move |y| zs.values().map(move |z| Point::new(x, y, z)))
    })
}

/// Check that a dimension is positive and finite
pub fn positive(name: &'static str, value: f64) -> Result<f64, ShapeError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ShapeError::InvalidDimension { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_inclusive() {
        let axis = AxisSamples { start: -1.0, end: 1.0, count: 5 };
        let values: Vec<f64> = axis.values().collect();
        assert_eq!(values, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_single_sample_at_start() {
        let axis = AxisSamples { start: 2.0, end: 4.0, count: 1 };
        let values: Vec<f64> = axis.values().collect();
        assert_eq!(values, vec![2.0]);
    }

    #[test]
    fn test_with_density_rounds() {
        let axis = AxisSamples::with_density("x", 0.0, 3.0, 1.4).unwrap();
        assert_eq!(axis.count, 4);
    }

    #[test]
    fn test_with_density_rejects_zero_samples() {
        let err = AxisSamples::with_density("z", 0.0, 0.1, 1.0).unwrap_err();
        assert!(matches!(err, ShapeError::DegenerateLattice { axis: "z", .. }));
    }

    #[test]
    fn test_grid_order() {
        let a = AxisSamples { start: 0.0, end: 1.0, count: 2 };
        let points: Vec<Point> = grid(a, a, a).collect();
        assert_eq!(points.len(), 8);
        assert_eq!(points[0], Point::new(0.0, 0.0, 0.0));
        assert_eq!(points[1], Point::new(0.0, 0.0, 1.0));
        assert_eq!(points[2], Point::new(0.0, 1.0, 0.0));
        assert_eq!(points[4], Point::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_positive() {
        assert_eq!(positive("r", 1.5), Ok(1.5));
        assert!(positive("r", 0.0).is_err());
        assert!(positive("r", -2.0).is_err());
        assert!(positive("r", f64::NAN).is_err());
    }
}
