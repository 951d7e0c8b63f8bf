/// Enclosed volume of a triangle mesh by signed tetrahedron summation
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{triangle_count, Triangle, FLOATS_PER_TRIANGLE};
use crate::units::LengthUnit;

/// Enclosed volume of a mesh together with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeResult {
    /// Absolute volume in cubic source units
    pub volume: f64,
    /// Linear unit of the source mesh
    pub unit: LengthUnit,
    /// Volume converted to cubic centimeters
    pub volume_cm3: f64,
}

/// Raw signed sum of the per-triangle tetrahedron volumes.
///
/// Positive for outward winding, negative when every triangle is reversed.
pub fn signed_volume(positions: &[f64]) -> Result<f64> {
    let triangles = triangle_count(positions)?;

    let sum: f64 = positions
        .chunks_exact(FLOATS_PER_TRIANGLE)
        .map(|coords| Triangle::from_slice(coords).signed_volume())
        .sum();

    debug!("signed volume over {triangles} triangles: {sum}");
    Ok(sum)
}

/// Enclosed volume in the mesh's native cubic units.
///
/// Each triangle forms a tetrahedron with the origin; the signed sum is the
/// enclosed volume of any closed, consistently wound surface wherever it sits.
///
/// Terms are triple products of absolute coordinates, so a small model far
/// from the origin loses digits to cancellation. Open or self-intersecting
/// meshes are not detected and give a volume with no guarantee.
pub fn compute_volume(positions: &[f64]) -> Result<f64> {
    Ok(signed_volume(positions)?.abs())
}

/// Enclosed volume tagged with its unit and converted to cm³
pub fn measure_volume(positions: &[f64], unit: LengthUnit) -> Result<VolumeResult> {
    let volume = compute_volume(positions)?;
    Ok(VolumeResult {
        volume,
        unit,
        volume_cm3: unit.volume_to_cm3(volume),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::geometry::Mesh;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_unit_cube_volume() {
        let cube = Mesh::cube(1.0);
        assert_relative_eq!(compute_volume(cube.positions()).unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_reversed_winding_negates_signed_sum() {
        let mut cube = Mesh::cube(2.0);
        let forward = signed_volume(cube.positions()).unwrap();
        cube.flip_winding();
        let backward = signed_volume(cube.positions()).unwrap();

        assert_relative_eq!(forward, 8.0, epsilon = 1e-9);
        assert_relative_eq!(backward, -forward, epsilon = 1e-9);
        assert_relative_eq!(compute_volume(cube.positions()).unwrap(), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_translation_invariance() {
        let mut cube = Mesh::cube(3.0);
        cube.translate(&Vector3::new(125.0, -40.5, 7.25));
        assert_relative_eq!(compute_volume(cube.positions()).unwrap(), 27.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rejects_malformed_buffer() {
        assert!(matches!(compute_volume(&[0.0; 10]), Err(Error::InvalidMesh(_))));
        assert!(matches!(compute_volume(&[]), Err(Error::InvalidMesh(_))));
    }

    #[test]
    fn test_open_mesh_passes_through() {
        // A single triangle is not closed but is still accepted
        let tri = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        assert_relative_eq!(compute_volume(&tri).unwrap(), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_measure_volume_converts_mm3() {
        let cube = Mesh::cube(20.0);
        let result = measure_volume(cube.positions(), LengthUnit::Millimeter).unwrap();
        assert_relative_eq!(result.volume, 8000.0, epsilon = 1e-6);
        assert_relative_eq!(result.volume_cm3, 8.0, epsilon = 1e-9);
        assert_eq!(result.unit, LengthUnit::Millimeter);
    }
}
