/// Geometry primitives over a flattened triangle buffer
use nalgebra::{Matrix4, Point3, Vector3};

use crate::error::{Error, Result};

/// Floats per triangle: three vertices of x, y, z
pub const FLOATS_PER_TRIANGLE: usize = 9;

/// Check a flattened vertex buffer and return its triangle count.
///
/// Fails on an empty buffer or on one whose length leaves a remainder
/// modulo 9.
pub fn triangle_count(positions: &[f64]) -> Result<usize> {
    if positions.is_empty() {
        return Err(Error::invalid_mesh("vertex buffer is empty"));
    }
    check_stride(positions)?;
    Ok(positions.len() / FLOATS_PER_TRIANGLE)
}

fn check_stride(positions: &[f64]) -> Result<()> {
    if positions.len() % FLOATS_PER_TRIANGLE != 0 {
        return Err(Error::invalid_mesh(format!(
            "buffer length {} is not a multiple of {}",
            positions.len(),
            FLOATS_PER_TRIANGLE
        )));
    }
    Ok(())
}

/// A triangle read out of a vertex buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Point3<f64>,
    pub b: Point3<f64>,
    pub c: Point3<f64>,
}

impl Triangle {
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self { a, b, c }
    }

    /// Build a triangle from exactly nine coordinates
    pub fn from_slice(coords: &[f64]) -> Self {
        Self {
            a: Point3::new(coords[0], coords[1], coords[2]),
            b: Point3::new(coords[3], coords[4], coords[5]),
            c: Point3::new(coords[6], coords[7], coords[8]),
        }
    }

    /// Signed volume of the tetrahedron spanned by this triangle and the origin
    pub fn signed_volume(&self) -> f64 {
        let (a, b, c) = (&self.a, &self.b, &self.c);
        (a.x * (b.y * c.z - b.z * c.y) - a.y * (b.x * c.z - b.z * c.x)
            + a.z * (b.x * c.y - b.y * c.x))
            / 6.0
    }

    /// Unit face normal following the winding order
    pub fn normal(&self) -> Vector3<f64> {
        let edge1 = self.b - self.a;
        let edge2 = self.c - self.a;

        edge1.cross(&edge2).normalize()
    }

    /// Same triangle with the opposite winding
    pub fn reversed(&self) -> Self {
        Self::new(self.c, self.b, self.a)
    }

    pub fn to_array(&self) -> [f64; FLOATS_PER_TRIANGLE] {
        [
            self.a.x, self.a.y, self.a.z, self.b.x, self.b.y, self.b.z, self.c.x, self.c.y,
            self.c.z,
        ]
    }
}

/// A triangle mesh stored as a flattened position buffer.
///
/// The buffer always holds a whole number of triangles. It may be empty,
/// which every metrology operation rejects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    positions: Vec<f64>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
        }
    }

    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(triangles * FLOATS_PER_TRIANGLE),
        }
    }

    /// Wrap an existing buffer, rejecting a partial trailing triangle
    pub fn from_positions(positions: Vec<f64>) -> Result<Self> {
        check_stride(&positions)?;
        Ok(Self { positions })
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.positions.extend_from_slice(&triangle.to_array());
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / FLOATS_PER_TRIANGLE
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [f64] {
        &mut self.positions
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.positions
            .chunks_exact(FLOATS_PER_TRIANGLE)
            .map(Triangle::from_slice)
    }

    /// Reverse the winding of every triangle
    pub fn flip_winding(&mut self) {
        for tri in self.positions.chunks_exact_mut(FLOATS_PER_TRIANGLE) {
            let (first, rest) = tri.split_at_mut(3);
            first.swap_with_slice(&mut rest[3..6]);
        }
    }

    /// Apply an affine transform to every vertex
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        crate::transform::apply(&mut self.positions, matrix);
    }

    pub fn translate(&mut self, offset: &Vector3<f64>) {
        crate::transform::translate(&mut self.positions, offset);
    }

    /// Scale about the origin by a linear factor
    pub fn scale_uniform(&mut self, factor: f64) {
        self.transform(&crate::transform::Transform::scale_matrix(factor, factor, factor));
    }

    /// Axis-aligned cube centred on the origin with outward winding
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let p = |x: f64, y: f64, z: f64| Point3::new(x * h, y * h, z * h);
        let faces = [
            // +Z
            [p(-1., -1., 1.), p(1., -1., 1.), p(1., 1., 1.), p(-1., 1., 1.)],
            // -Z
            [p(-1., -1., -1.), p(-1., 1., -1.), p(1., 1., -1.), p(1., -1., -1.)],
            // +Y
            [p(-1., 1., -1.), p(-1., 1., 1.), p(1., 1., 1.), p(1., 1., -1.)],
            // -Y
            [p(-1., -1., -1.), p(1., -1., -1.), p(1., -1., 1.), p(-1., -1., 1.)],
            // +X
            [p(1., -1., -1.), p(1., 1., -1.), p(1., 1., 1.), p(1., -1., 1.)],
            // -X
            [p(-1., -1., -1.), p(-1., -1., 1.), p(-1., 1., 1.), p(-1., 1., -1.)],
        ];

        let mut mesh = Self::with_capacity(12);
        for [q0, q1, q2, q3] in faces {
            mesh.add_triangle(Triangle::new(q0, q1, q2));
            mesh.add_triangle(Triangle::new(q0, q2, q3));
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_triangle_count_rejects_remainder() {
        assert!(matches!(triangle_count(&[0.0; 10]), Err(Error::InvalidMesh(_))));
        assert!(matches!(triangle_count(&[]), Err(Error::InvalidMesh(_))));
        assert_eq!(triangle_count(&[0.0; 18]).unwrap(), 2);
    }

    #[test]
    fn test_from_positions_allows_empty() {
        let mesh = Mesh::from_positions(Vec::new()).unwrap();
        assert!(mesh.is_empty());
        assert!(Mesh::from_positions(vec![1.0; 8]).is_err());
    }

    #[test]
    fn test_cube_normals_point_outward() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.triangle_count(), 12);
        for tri in cube.triangles() {
            let centroid = (tri.a.coords + tri.b.coords + tri.c.coords) / 3.0;
            assert!(tri.normal().dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn test_flip_winding_reverses_each_triangle() {
        let mut mesh = Mesh::cube(1.0);
        let before: Vec<Triangle> = mesh.triangles().collect();
        mesh.flip_winding();
        for (orig, flipped) in before.iter().zip(mesh.triangles()) {
            assert_eq!(orig.reversed(), flipped);
        }
    }

    #[test]
    fn test_scale_uniform() {
        let mut mesh = Mesh::cube(1.0);
        mesh.scale_uniform(3.0);
        let max = mesh.positions().iter().cloned().fold(f64::MIN, f64::max);
        assert_relative_eq!(max, 1.5);
    }
}
