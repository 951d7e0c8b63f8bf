/// End-to-end checks across loading, measurement and pricing
use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use quote3d_core::{
    compute_bounds, compute_volume, estimate_price, load_mesh, signed_volume, Error, LengthUnit,
    Mesh, QuoteConfig, QuotePipeline, QuoteRequest, Triangle,
};

/// Regular octahedron with vertices at distance `r` on each axis
fn octahedron(r: f64) -> Mesh {
    let px = Point3::new(r, 0.0, 0.0);
    let nx = Point3::new(-r, 0.0, 0.0);
    let py = Point3::new(0.0, r, 0.0);
    let ny = Point3::new(0.0, -r, 0.0);
    let pz = Point3::new(0.0, 0.0, r);
    let nz = Point3::new(0.0, 0.0, -r);

    let mut mesh = Mesh::new();
    for (a, b, c) in [
        (px, py, pz),
        (py, nx, pz),
        (nx, ny, pz),
        (ny, px, pz),
        (py, px, nz),
        (nx, py, nz),
        (ny, nx, nz),
        (px, ny, nz),
    ] {
        mesh.add_triangle(Triangle::new(a, b, c));
    }
    mesh
}

fn binary_stl(mesh: &Mesh) -> Vec<u8> {
    let mut data = vec![0u8; 80];
    data.extend_from_slice(&(mesh.triangle_count() as u32).to_le_bytes());
    for tri in mesh.triangles() {
        data.extend_from_slice(&[0u8; 12]);
        for v in tri.to_array() {
            data.extend_from_slice(&(v as f32).to_le_bytes());
        }
        data.extend_from_slice(&[0u8; 2]);
    }
    data
}

#[test]
fn octahedron_volume_is_four_thirds_r_cubed() {
    let mesh = octahedron(3.0);
    let expected = 4.0 / 3.0 * 27.0;
    assert_relative_eq!(signed_volume(mesh.positions()).unwrap(), expected, epsilon = 1e-9);
}

#[test]
fn volume_is_invariant_under_translation_and_winding() {
    let base = octahedron(2.0);
    let expected = compute_volume(base.positions()).unwrap();

    for offset in [
        Vector3::new(10.0, 0.0, 0.0),
        Vector3::new(-3.5, 7.25, 100.0),
        Vector3::new(0.001, -0.002, 0.003),
    ] {
        let mut moved = base.clone();
        moved.translate(&offset);
        assert_relative_eq!(compute_volume(moved.positions()).unwrap(), expected, epsilon = 1e-6);

        moved.flip_winding();
        assert_relative_eq!(signed_volume(moved.positions()).unwrap(), -expected, epsilon = 1e-6);
        assert_relative_eq!(compute_volume(moved.positions()).unwrap(), expected, epsilon = 1e-6);
    }
}

#[test]
fn scaling_a_mesh_matches_cubic_price_rule() {
    let original = Mesh::cube(30.0);
    let mut halved = original.clone();
    halved.scale_uniform(0.5);

    let full_cm3 = LengthUnit::Millimeter.volume_to_cm3(compute_volume(original.positions()).unwrap());
    let half_cm3 = LengthUnit::Millimeter.volume_to_cm3(compute_volume(halved.positions()).unwrap());

    let by_rule = estimate_price(full_cm3, 0.2, 50.0, 1).unwrap();
    let by_geometry = estimate_price(half_cm3, 0.2, 100.0, 1).unwrap();
    assert_relative_eq!(by_rule.unit_price, by_geometry.unit_price, epsilon = 1e-9);
}

#[test]
fn stl_file_runs_through_pipeline() {
    let mut part = Mesh::cube(10.0);
    part.translate(&Vector3::new(40.0, 40.0, 5.0));
    let bytes = binary_stl(&part);

    let pipeline = QuotePipeline::new(QuoteConfig::default()).unwrap();
    let summary = pipeline
        .run("bracket.stl", &bytes, &QuoteRequest::new("PETG", 100.0, 4))
        .unwrap();

    assert_relative_eq!(summary.volume_cm3, 1.0, epsilon = 1e-6);
    assert_relative_eq!(summary.bounding_box_extents.z, 10.0, epsilon = 1e-5);
    assert_relative_eq!(summary.unit_price, 0.15, epsilon = 1e-6);
    assert_relative_eq!(summary.total_price, 0.60, epsilon = 1e-6);

    let json = serde_json::to_value(&summary).unwrap();
    assert!(json.get("volume_cm3").is_some());
    assert!(json.get("bounding_box_extents").is_some());
}

#[test]
fn loaded_mesh_can_be_recentered() {
    let mut part = octahedron(1.0);
    part.translate(&Vector3::new(5.0, 5.0, 5.0));
    let mut mesh = load_mesh("part.stl", &binary_stl(&part)).unwrap();

    let bounds = compute_bounds(mesh.positions()).unwrap();
    quote3d_core::center_in_place(mesh.positions_mut(), &bounds);
    let centered = compute_bounds(mesh.positions()).unwrap();
    assert_relative_eq!(centered.center().coords, Vector3::zeros(), epsilon = 1e-6);
}

#[test]
fn malformed_inputs_are_rejected() {
    assert!(matches!(compute_volume(&[1.0; 17]), Err(Error::InvalidMesh(_))));
    assert!(matches!(compute_bounds(&[]), Err(Error::InvalidMesh(_))));
    assert!(matches!(estimate_price(10.0, 0.1, 100.0, 0), Err(Error::InvalidInput(_))));
    assert!(matches!(estimate_price(-10.0, 0.1, 100.0, 1), Err(Error::InvalidInput(_))));
    assert!(matches!(
        load_mesh("scene.gltf", b"{}"),
        Err(Error::UnsupportedFormat { .. })
    ));

    // An empty STL parses but cannot be measured
    let mut empty = vec![0u8; 84];
    empty[80..84].copy_from_slice(&0u32.to_le_bytes());
    let pipeline = QuotePipeline::new(QuoteConfig::default()).unwrap();
    assert!(matches!(
        pipeline.run("empty.stl", &empty, &QuoteRequest::default()),
        Err(Error::InvalidMesh(_))
    ));
}
