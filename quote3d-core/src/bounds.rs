/// Axis-aligned bounds and centering of a mesh
use log::debug;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::triangle_count;
use crate::transform;
use crate::units::LengthUnit;

/// Minimal axis-aligned box containing every vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

/// Box size along each axis
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extents {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<Vector3<f64>> for Extents {
    fn from(v: Vector3<f64>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl BoundingBox {
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// `max - min` per axis, in source units
    pub fn extents(&self) -> Extents {
        (self.max - self.min).into()
    }

    /// Extents of a millimeter mesh converted into `unit`
    pub fn extents_in(&self, unit: LengthUnit) -> Extents {
        ((self.max - self.min) * unit.mm_factor()).into()
    }

    /// Extents of a mesh in `source` units converted into `target`
    pub fn extents_between(&self, source: LengthUnit, target: LengthUnit) -> Extents {
        ((self.max - self.min) * source.length_factor(target)).into()
    }

    /// The box moved by `offset`
    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }
}

/// Scan all vertices and track per-axis min and max
pub fn compute_bounds(positions: &[f64]) -> Result<BoundingBox> {
    triangle_count(positions)?;

    let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
    let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);

    for vertex in positions.chunks_exact(3) {
        for axis in 0..3 {
            min[axis] = min[axis].min(vertex[axis]);
            max[axis] = max[axis].max(vertex[axis]);
        }
    }

    Ok(BoundingBox { min, max })
}

/// Move the mesh so its bounding-box center sits on the origin.
///
/// Returns the translation applied. Calling it again with freshly computed
/// bounds returns a translation of zero within floating-point tolerance.
pub fn center_in_place(positions: &mut [f64], bounds: &BoundingBox) -> Vector3<f64> {
    let offset = -bounds.center().coords;
    transform::translate(positions, &offset);
    debug!("centered mesh by ({:.4}, {:.4}, {:.4})", offset.x, offset.y, offset.z);
    offset
}
