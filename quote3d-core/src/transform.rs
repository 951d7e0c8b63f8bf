/// Affine transforms and the linear scale factor applied to a model
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::FLOATS_PER_TRIANGLE;

/// Uniform linear scale expressed as a percentage (100 = unchanged).
///
/// Volume follows the cube of the linear factor: halving every edge leaves
/// one eighth of the material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScaleFactor {
    percent: f64,
}

impl ScaleFactor {
    pub fn from_percent(percent: f64) -> Result<Self> {
        if !percent.is_finite() || percent < 0.0 {
            return Err(Error::invalid_input(format!(
                "scale must be a finite, non-negative percentage (got {percent})"
            )));
        }
        Ok(Self { percent })
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Multiplier applied to each axis
    pub fn linear(&self) -> f64 {
        self.percent / 100.0
    }

    /// Multiplier applied to volume
    pub fn volumetric(&self) -> f64 {
        self.linear().powi(3)
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self { percent: 100.0 }
    }
}

/// Transform builder for mesh placement
pub struct Transform;

impl Transform {
    /// Create a translation matrix
    pub fn translation_matrix(offset: &Vector3<f64>) -> Matrix4<f64> {
        Matrix4::new_translation(offset)
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f64, sy: f64, sz: f64) -> Matrix4<f64> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Uniform scale matrix for a percentage scale factor
    pub fn scale_factor_matrix(scale: ScaleFactor) -> Matrix4<f64> {
        Matrix4::new_scaling(scale.linear())
    }
}

/// Transform every vertex of a flattened buffer in place
pub fn apply(positions: &mut [f64], matrix: &Matrix4<f64>) {
    debug_assert!(positions.len() % FLOATS_PER_TRIANGLE == 0);
    for vertex in positions.chunks_exact_mut(3) {
        let p = matrix.transform_point(&Point3::new(vertex[0], vertex[1], vertex[2]));
        vertex.copy_from_slice(&[p.x, p.y, p.z]);
    }
}

/// Translate every vertex of a flattened buffer in place
pub fn translate(positions: &mut [f64], offset: &Vector3<f64>) {
    for vertex in positions.chunks_exact_mut(3) {
        vertex[0] += offset.x;
        vertex[1] += offset.y;
        vertex[2] += offset.z;
    }
}
