//! Shapes module - point sampling of parametric solids
//!
//! This module provides:
//! - `Solid` trait for abstracting over sampled solids
//! - Primitive solids: RectangularPrism, Sphere, Tetrahedron
//! - `Pivot` and `PointCloud`, the inputs and output of sampling
//! - `SolidSpec`, a serialisable description used by settings

mod lattice;
mod primitives;
mod traits;

pub use primitives::{RectangularPrism, Sphere, Tetrahedron};
pub use traits::{Pivot, Point, PointCloud, ShapeError, Solid};

use serde::{Deserialize, Serialize};

/// A solid and its dimensions, as chosen by the user
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolidSpec {
    Prism { length: f64, width: f64, height: f64 },
    Sphere { radius: f64 },
    Tetrahedron { side: f64 },
}

impl Default for SolidSpec {
    fn default() -> Self {
        SolidSpec::Prism {
            length: 2.0,
            width: 2.0,
            height: 2.0,
        }
    }
}

impl SolidSpec {
    /// Build the described solid
    pub fn build(&self) -> Box<dyn Solid> {
        match *self {
            SolidSpec::Prism {
                length,
                width,
                height,
            } => Box::new(RectangularPrism::new(length, width, height)),
            SolidSpec::Sphere { radius } => Box::new(Sphere::new(radius)),
            SolidSpec::Tetrahedron { side } => Box::new(Tetrahedron::new(side)),
        }
    }

    /// Check every dimension without sampling
    pub fn validate(&self) -> Result<(), ShapeError> {
        match *self {
            SolidSpec::Prism {
                length,
                width,
                height,
            } => {
                lattice::positive("length", length)?;
                lattice::positive("width", width)?;
                lattice::positive("height", height)?;
            }
            SolidSpec::Sphere { radius } => {
                lattice::positive("radius", radius)?;
            }
            SolidSpec::Tetrahedron { side } => {
                lattice::positive("side", side)?;
            }
        }
        Ok(())
    }
}

/// Sample a solid, logging what was produced
pub fn sample_solid(
    spec: &SolidSpec,
    n: usize,
    pivot: Pivot,
) -> Result<PointCloud, ShapeError> {
    let solid = spec.build();
    let cloud = solid.sample(n, pivot)?;
    log::info!(
        "Sampled {} with {} points (budget {}, pivot {}, lim {:.3})",
        solid.name(),
        cloud.len(),
        n,
        pivot,
        cloud.lim()
    );
    Ok(cloud)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_builds_matching_solid() {
        let spec = SolidSpec::Sphere { radius: 1.0 };
        assert_eq!(spec.build().name(), "Sphere");

        let spec = SolidSpec::Tetrahedron { side: 1.0 };
        assert_eq!(spec.build().name(), "Tetrahedron");
    }

    #[test]
    fn test_spec_json_shape() {
        let spec: SolidSpec =
            serde_json::from_str(r#"{"kind":"sphere","radius":2.5}"#).unwrap();
        assert_eq!(spec, SolidSpec::Sphere { radius: 2.5 });
    }

    #[test]
    fn test_validate_dimensions() {
        assert!(SolidSpec::default().validate().is_ok());
        assert_eq!(
            SolidSpec::Tetrahedron { side: -1.0 }.validate(),
            Err(ShapeError::InvalidDimension {
                name: "side",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_sample_solid_propagates_errors() {
        let spec = SolidSpec::Sphere { radius: 0.0 };
        assert!(sample_solid(&spec, 100, Pivot::AutoCenter).is_err());
    }
}
