//! End-to-end tests: seeds to validated Noperthedron mesh

use approx::assert_relative_eq;
use noperthedron::{
    ConvexHull3D, FaceMode, HullMesh, JsonSink, MemorySink, Pipeline, PipelineConfig, Point3,
    SeedSet, TransformGroup, generate_vertices,
};

fn polygon_pipeline() -> Pipeline {
    Pipeline::default()
}

fn triangle_pipeline() -> Pipeline {
    Pipeline::new(PipelineConfig {
        face_mode: FaceMode::Triangles,
        ..Default::default()
    })
}

/// Signed volume of every fan triangle against the centroid
fn assert_outward(mesh: &HullMesh) {
    let centroid = mesh.centroid();
    let v = mesh.vertices();
    for [a, b, c] in mesh.triangulate() {
        let normal = v[b].sub(&v[a]).cross(&v[c].sub(&v[a]));
        let signed = normal.dot(&v[a].sub(&centroid));
        assert!(signed > 0.0, "triangle ({a}, {b}, {c}) faces inward");
    }
}

#[test]
fn test_polygon_mesh_topology() {
    let output = polygon_pipeline().build().unwrap();
    let mesh = &output.mesh;

    assert_eq!(output.points.len(), 90);
    assert_eq!(mesh.vertex_count(), 90);
    assert_eq!(mesh.face_count(), 152);
    assert_eq!(mesh.edge_count(), 240);
    assert_eq!(mesh.face_size_histogram(), vec![(3, 150), (15, 2)]);
    assert_eq!(mesh.euler_characteristic(), 2);
    assert_outward(mesh);
}

#[test]
fn test_triangle_mesh_topology() {
    let output = triangle_pipeline().build().unwrap();
    let mesh = &output.mesh;

    assert_eq!(mesh.vertex_count(), 90);
    assert_eq!(mesh.face_count(), 176);
    assert_eq!(mesh.edge_count(), 264);
    assert_eq!(mesh.face_size_histogram(), vec![(3, 176)]);
    assert_eq!(mesh.euler_characteristic(), 2);
    assert_outward(mesh);
}

#[test]
fn test_face_modes_describe_same_solid() {
    let polygons = polygon_pipeline().build().unwrap().mesh;
    let triangles = triangle_pipeline().build().unwrap().mesh;

    assert_eq!(polygons.vertices(), triangles.vertices());
    assert_relative_eq!(polygons.volume(), triangles.volume(), max_relative = 1e-12);
    assert_relative_eq!(
        polygons.surface_area(),
        triangles.surface_area(),
        max_relative = 1e-12
    );
    assert_eq!(polygons.triangulate().len(), triangles.face_count());
}

#[test]
fn test_every_generated_point_is_contained() {
    let output = polygon_pipeline().build().unwrap();
    let distance = output.mesh.max_outside_distance(output.points.points());
    println!("Max outside distance: {:e}", distance);
    assert!(distance <= 1e-9);
    for p in output.points.points() {
        assert!(output.mesh.contains(p, 1e-9));
    }
    assert!(!output.mesh.contains(&Point3::new(0.0, 0.0, 1.5), 1e-9));
}

#[test]
fn test_every_generated_point_is_a_corner() {
    let output = polygon_pipeline().build().unwrap();
    for p in output.points.points() {
        assert!(
            output.mesh.vertices().iter().any(|v| v.approx_eq(p, 1e-12)),
            "generated point {} is not a hull vertex",
            p
        );
    }
}

#[test]
fn test_caps_are_horizontal_fifteen_gons() {
    let mesh = polygon_pipeline().build().unwrap().mesh;
    let caps: Vec<usize> = (0..mesh.face_count())
        .filter(|&i| mesh.faces()[i].len() == 15)
        .collect();
    assert_eq!(caps.len(), 2);

    let mut heights = Vec::new();
    for &i in &caps {
        let normal = mesh.face_normal(i);
        assert_relative_eq!(normal.z.abs(), 1.0, epsilon = 1e-12);
        let first = &mesh.vertices()[mesh.faces()[i][0]];
        heights.push(first.z);
        assert_eq!(normal.z.signum(), first.z.signum());
    }
    assert_relative_eq!(heights[0], -heights[1], epsilon = 1e-15);
    assert_relative_eq!(heights[0].abs(), 210152163.0 / 259375205.0, epsilon = 1e-15);
}

#[test]
fn test_idempotent() {
    let first = polygon_pipeline().build().unwrap();
    let second = polygon_pipeline().build().unwrap();
    assert_eq!(first.points, second.points);
    assert_eq!(first.mesh, second.mesh);
}

#[test]
fn test_point_order_does_not_change_hull() {
    let group = TransformGroup::noperthedron().unwrap();
    let cloud = generate_vertices(&SeedSet::NOPERTHEDRON, &group).unwrap();
    let mut reversed = cloud.points().to_vec();
    reversed.reverse();

    let forward = HullMesh::from_hull(
        &ConvexHull3D::build(cloud.points()).unwrap(),
        FaceMode::Polygons,
    )
    .unwrap();
    let backward =
        HullMesh::from_hull(&ConvexHull3D::build(&reversed).unwrap(), FaceMode::Polygons).unwrap();

    assert_eq!(forward.vertex_count(), backward.vertex_count());
    assert_eq!(forward.edge_count(), backward.edge_count());
    assert_eq!(forward.face_size_histogram(), backward.face_size_histogram());
    assert_relative_eq!(forward.volume(), backward.volume(), max_relative = 1e-12);
}

#[test]
fn test_memory_sink_receives_validated_mesh() {
    let mut sink = MemorySink::new();
    let output = polygon_pipeline().run(&mut sink).unwrap();

    let registered = sink.get("Noperthedron").unwrap();
    assert_eq!(registered.vertices.len(), 90);
    assert_eq!(registered.faces.len(), 152);
    assert_eq!(registered.faces, output.mesh.faces());

    let rebuilt =
        HullMesh::from_parts(registered.vertices.clone(), registered.faces.clone(), 1e-9).unwrap();
    assert_eq!(rebuilt, output.mesh);
}

#[test]
fn test_json_sink_handoff() {
    let mut sink = JsonSink::new(Vec::new());
    triangle_pipeline().run(&mut sink).unwrap();

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
    assert_eq!(value["name"], "Noperthedron");
    assert_eq!(value["vertices"].as_array().unwrap().len(), 90);
    assert_eq!(value["faces"].as_array().unwrap().len(), 176);
}

#[test]
fn test_custom_mesh_name() {
    let config = PipelineConfig::from_json(r#"{ "mesh_name": "Nopert" }"#).unwrap();
    let mut sink = MemorySink::new();
    Pipeline::new(config).run(&mut sink).unwrap();
    assert!(sink.get("Nopert").is_some());
    assert!(sink.get("Noperthedron").is_none());
}

#[test]
fn test_summary_values() {
    let summary = polygon_pipeline().build().unwrap().summary();
    println!("{:#?}", summary);
    assert_eq!(summary.vertices, 90);
    assert_eq!(summary.edges, 240);
    assert_eq!(summary.faces, 152);
    assert_eq!(summary.euler_characteristic, 2);
    // Inscribed in the unit ball
    assert!(summary.volume > 0.0 && summary.volume < 4.0 / 3.0 * std::f64::consts::PI);
}
