//! Quickhull algorithm implementation for 3D convex hulls
//!
//! Based on:
//! - Barber, C.B., Dobkin, D.P., and Huhdanpaa, H.T., "The Quickhull algorithm
//!   for convex hulls," ACM Trans. on Mathematical Software, 22(4):469-483, 1996.
//!
//! Robustness notes:
//! - Input is deduplicated with a scale-aware tolerance before construction
//! - A point is outside a face only if it lies more than epsilon above its plane,
//!   so points on an existing face plane never create sliver faces
//! - Visible faces are collected by a flood fill from the seed face, which keeps
//!   the horizon a single closed loop
//! - Directed-edge ownership is tracked so every new face inherits the winding
//!   of the face it replaces
//!
//! Performance notes:
//! - Parallel point assignment with rayon above a configurable threshold
//! - Generation-free face deletion (flag + periodic compaction)
//! - Pre-allocated scratch buffers reused across iterations
//! - Furthest point tracked during assignment

use crate::config::HullConfig;
use crate::geometry::{find_extreme_points, signed_tetrahedron_volume};
use crate::types::{ConvexHull3D, Face, Point3};
use crate::{ConvexHullError, Result, compute_relative_epsilon, deduplicate_vertices};
use rayon::prelude::*;
use std::collections::HashMap;

/// Internal representation of a face during hull construction
#[derive(Debug, Clone)]
struct HullFace {
    vertices: [usize; 3],
    normal: Point3,
    d: f64, // Plane constant: normal.dot(v0), for faster distance computation
    outside_points: Vec<usize>,
    furthest_point: Option<usize>, // Track furthest point for O(1) access
    furthest_distance: f64,        // Distance of furthest point
    deleted: bool,                 // Mark as deleted instead of removing
}

impl HullFace {
    fn new(v0: usize, v1: usize, v2: usize, vertices: &[Point3]) -> Self {
        let p0 = &vertices[v0];
        let p1 = &vertices[v1];
        let p2 = &vertices[v2];

        let normal = p1
            .sub(p0)
            .cross(&p2.sub(p0))
            .try_normalize()
            .unwrap_or_else(|| Point3::new(0.0, 0.0, 1.0));

        // Pre-compute plane constant for faster distance calculation
        let d = normal.dot(p0);

        Self {
            vertices: [v0, v1, v2],
            normal,
            d,
            outside_points: Vec::new(),
            furthest_point: None,
            furthest_distance: 0.0,
            deleted: false,
        }
    }

    /// Fast signed distance from point to plane (positive = outside)
    #[inline]
    fn signed_distance(&self, point: &Point3) -> f64 {
        self.normal.dot(point) - self.d
    }

    fn assign_point(&mut self, point_idx: usize, distance: f64) {
        self.outside_points.push(point_idx);
        if distance > self.furthest_distance {
            self.furthest_point = Some(point_idx);
            self.furthest_distance = distance;
        }
    }

    #[inline]
    fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.vertices;
        [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)]
    }

    fn to_face(&self) -> Face {
        Face::new(self.vertices[0], self.vertices[1], self.vertices[2])
    }
}

/// Directed edge, oriented as it appears in its owning face's winding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Edge {
    v0: usize,
    v1: usize,
}

impl Edge {
    #[inline]
    fn new(v0: usize, v1: usize) -> Self {
        Self { v0, v1 }
    }

    /// The same edge as seen from the neighbouring face
    #[inline]
    fn reversed(self) -> Self {
        Self {
            v0: self.v1,
            v1: self.v0,
        }
    }
}

/// Scratch buffers to avoid allocations in hot loop
struct ScratchBuffers {
    visible_face_indices: Vec<usize>,
    visited: Vec<bool>,
    stack: Vec<usize>,
    orphaned_points: Vec<usize>,
    new_faces: Vec<HullFace>,
    horizon_edges: Vec<Edge>,
}

impl ScratchBuffers {
    fn new() -> Self {
        Self {
            visible_face_indices: Vec::with_capacity(64),
            visited: Vec::with_capacity(256),
            stack: Vec::with_capacity(64),
            orphaned_points: Vec::with_capacity(256),
            new_faces: Vec::with_capacity(64),
            horizon_edges: Vec::with_capacity(64),
        }
    }

    fn clear(&mut self, face_count: usize) {
        self.visible_face_indices.clear();
        self.visited.clear();
        self.visited.resize(face_count, false);
        self.stack.clear();
        self.orphaned_points.clear();
        self.new_faces.clear();
        self.horizon_edges.clear();
    }
}

/// Build a convex hull using the Quickhull algorithm
pub fn quickhull_3d(points: &[Point3], config: &HullConfig) -> Result<ConvexHull3D> {
    if points.len() < 4 {
        return Err(ConvexHullError::InsufficientVertices);
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(ConvexHullError::NonFiniteInput { index });
    }

    // Compute scale-aware epsilon for this input
    let eps = compute_relative_epsilon(points, config.epsilon_scale);

    // Deduplicate points to handle duplicates
    let (unique_vertices, input_remap) = deduplicate_vertices(points, eps);

    if unique_vertices.len() < 4 {
        return Err(ConvexHullError::DegenerateInput);
    }

    // Find initial simplex (tetrahedron)
    let initial_simplex = find_initial_simplex(&unique_vertices, eps)?;

    // Build initial hull from simplex
    let mut hull_faces = create_initial_hull(&initial_simplex, &unique_vertices);
    let mut edge_owner = build_edge_owner(&hull_faces);

    // Track which points are in the initial simplex
    let mut in_simplex = vec![false; unique_vertices.len()];
    for &idx in &initial_simplex {
        in_simplex[idx] = true;
    }

    // Collect unprocessed points
    let unprocessed_points: Vec<usize> = (0..unique_vertices.len())
        .filter(|&i| !in_simplex[i])
        .collect();

    assign_points(
        &mut hull_faces,
        &unique_vertices,
        &unprocessed_points,
        eps,
        config.parallel_threshold,
    );

    let mut scratch = ScratchBuffers::new();

    // Main iteration loop
    let mut iterations = 0;
    loop {
        iterations += 1;
        if iterations > config.max_iterations {
            log::error!(
                "Max iterations exceeded after {} iterations with {} faces",
                iterations,
                hull_faces.iter().filter(|f| !f.deleted).count()
            );
            return Err(ConvexHullError::MaxIterationsExceeded);
        }

        // Compaction invalidates face indices, so the edge map is rebuilt with it
        let deleted_count = hull_faces.iter().filter(|f| f.deleted).count();
        if deleted_count * 10 > hull_faces.len() * 3 {
            compact_faces(&mut hull_faces);
            edge_owner = build_edge_owner(&hull_faces);

            let total_outside_points: usize =
                hull_faces.iter().map(|f| f.outside_points.len()).sum();
            log::debug!(
                "Iteration {}: {} faces, {} outside points remaining",
                iterations,
                hull_faces.len(),
                total_outside_points
            );
        }

        // Find face with furthest outside point
        let Some((face_idx, point_idx)) = find_face_with_furthest_point(&hull_faces) else {
            break; // No more outside points
        };

        let point = unique_vertices[point_idx];

        scratch.clear(hull_faces.len());

        collect_visible_faces(&hull_faces, &edge_owner, face_idx, &point, eps, &mut scratch);
        find_horizon(&hull_faces, &edge_owner, &mut scratch);

        // Collect orphaned points from visible faces
        for &visible_idx in &scratch.visible_face_indices {
            scratch
                .orphaned_points
                .extend(hull_faces[visible_idx].outside_points.iter().copied());
        }
        scratch.orphaned_points.retain(|&p| p != point_idx);

        // Mark visible faces as deleted and release their edges
        for &visible_idx in &scratch.visible_face_indices {
            let face = &mut hull_faces[visible_idx];
            face.deleted = true;
            face.outside_points.clear();
            for edge in face.edges() {
                edge_owner.remove(&edge);
            }
        }

        // Each horizon edge keeps the winding of the visible face it bordered
        for edge in &scratch.horizon_edges {
            scratch
                .new_faces
                .push(HullFace::new(edge.v0, edge.v1, point_idx, &unique_vertices));
        }

        reassign_orphans(
            &mut scratch.new_faces,
            &mut hull_faces,
            &unique_vertices,
            &scratch.orphaned_points,
            eps,
            config.parallel_threshold,
        );

        // Add new faces to hull
        for face in scratch.new_faces.drain(..) {
            let idx = hull_faces.len();
            for edge in face.edges() {
                edge_owner.insert(edge, idx);
            }
            hull_faces.push(face);
        }
    }

    // Final compaction - remove all deleted faces
    compact_faces(&mut hull_faces);

    log::debug!(
        "Quickhull finished after {} iterations: {} unique points, {} faces",
        iterations,
        unique_vertices.len(),
        hull_faces.len()
    );

    let faces: Vec<Face> = hull_faces.iter().map(|f| f.to_face()).collect();

    Ok(ConvexHull3D::new(
        unique_vertices,
        faces,
        input_remap,
        config.clone(),
        eps,
    ))
}

/// Map every directed edge to the live face that owns it
fn build_edge_owner(hull_faces: &[HullFace]) -> HashMap<Edge, usize> {
    let mut edge_owner = HashMap::with_capacity(hull_faces.len() * 3);
    for (idx, face) in hull_faces.iter().enumerate() {
        if face.deleted {
            continue;
        }
        for edge in face.edges() {
            edge_owner.insert(edge, idx);
        }
    }
    edge_owner
}

/// First face each point lies strictly above, with the distance
fn first_visible_face(faces: &[HullFace], point: &Point3, eps: f64) -> Option<(usize, f64)> {
    faces.iter().enumerate().find_map(|(i, face)| {
        if face.deleted {
            return None;
        }
        let distance = face.signed_distance(point);
        (distance > eps).then_some((i, distance))
    })
}

/// Assign points to the first face they are outside of
///
/// The visibility search runs in parallel for large point sets; the
/// assignment itself is sequential so outside sets keep input order.
fn assign_points(
    hull_faces: &mut [HullFace],
    vertices: &[Point3],
    points: &[usize],
    eps: f64,
    parallel_threshold: usize,
) {
    let faces: &[HullFace] = hull_faces;
    let assignments: Vec<Option<(usize, f64)>> = if points.len() >= parallel_threshold {
        points
            .par_iter()
            .map(|&point_idx| first_visible_face(faces, &vertices[point_idx], eps))
            .collect()
    } else {
        points
            .iter()
            .map(|&point_idx| first_visible_face(faces, &vertices[point_idx], eps))
            .collect()
    };

    for (&point_idx, assignment) in points.iter().zip(assignments) {
        if let Some((face_idx, distance)) = assignment {
            hull_faces[face_idx].assign_point(point_idx, distance);
        }
    }
}

/// Reassign orphaned points to new faces first, then existing faces
fn reassign_orphans(
    new_faces: &mut [HullFace],
    hull_faces: &mut [HullFace],
    vertices: &[Point3],
    orphans: &[usize],
    eps: f64,
    parallel_threshold: usize,
) {
    let fresh: &[HullFace] = new_faces;
    let on_new_faces: Vec<Option<(usize, f64)>> = if orphans.len() >= parallel_threshold {
        orphans
            .par_iter()
            .map(|&idx| first_visible_face(fresh, &vertices[idx], eps))
            .collect()
    } else {
        orphans
            .iter()
            .map(|&idx| first_visible_face(fresh, &vertices[idx], eps))
            .collect()
    };

    for (&orphan_idx, assignment) in orphans.iter().zip(on_new_faces) {
        match assignment {
            Some((face_idx, distance)) => new_faces[face_idx].assign_point(orphan_idx, distance),
            None => {
                // Points no new face sees are inside unless an old face still sees them
                if let Some((face_idx, distance)) =
                    first_visible_face(hull_faces, &vertices[orphan_idx], eps)
                {
                    hull_faces[face_idx].assign_point(orphan_idx, distance);
                }
            }
        }
    }
}

/// Flood fill from the seed face across faces the point is strictly above
fn collect_visible_faces(
    hull_faces: &[HullFace],
    edge_owner: &HashMap<Edge, usize>,
    seed: usize,
    point: &Point3,
    eps: f64,
    scratch: &mut ScratchBuffers,
) {
    scratch.visited[seed] = true;
    scratch.stack.push(seed);

    while let Some(face_idx) = scratch.stack.pop() {
        scratch.visible_face_indices.push(face_idx);
        for edge in hull_faces[face_idx].edges() {
            let Some(&neighbour) = edge_owner.get(&edge.reversed()) else {
                continue;
            };
            if scratch.visited[neighbour] {
                continue;
            }
            if hull_faces[neighbour].signed_distance(point) > eps {
                scratch.visited[neighbour] = true;
                scratch.stack.push(neighbour);
            }
        }
    }
}

/// Horizon edges are edges of visible faces whose neighbour is not visible
fn find_horizon(
    hull_faces: &[HullFace],
    edge_owner: &HashMap<Edge, usize>,
    scratch: &mut ScratchBuffers,
) {
    for &face_idx in &scratch.visible_face_indices {
        for edge in hull_faces[face_idx].edges() {
            let neighbour_visible = edge_owner
                .get(&edge.reversed())
                .is_some_and(|&n| scratch.visited[n]);
            if !neighbour_visible {
                scratch.horizon_edges.push(edge);
            }
        }
    }
}

/// Find the initial simplex (tetrahedron) to start the algorithm
fn find_initial_simplex(vertices: &[Point3], epsilon: f64) -> Result<[usize; 4]> {
    // Find the 6 extreme points
    let extremes = find_extreme_points(vertices);

    // Find the pair with maximum distance
    let mut max_distance = 0.0;
    let mut v0 = 0;
    let mut v1 = 0;

    for i in 0..6 {
        for j in (i + 1)..6 {
            let dist = vertices[extremes[i]].distance(&vertices[extremes[j]]);
            if dist > max_distance {
                max_distance = dist;
                v0 = extremes[i];
                v1 = extremes[j];
            }
        }
    }

    if max_distance < epsilon {
        return Err(ConvexHullError::DegenerateInput);
    }

    // Find the point furthest from the line v0-v1
    let line_dir = vertices[v1].sub(&vertices[v0]).scale(1.0 / max_distance);

    let mut max_distance = 0.0;
    let mut v2 = 0;

    for (i, vertex) in vertices.iter().enumerate() {
        if i == v0 || i == v1 {
            continue;
        }

        let to_point = vertex.sub(&vertices[v0]);
        let projection = line_dir.scale(to_point.dot(&line_dir));
        let dist = to_point.sub(&projection).magnitude();

        if dist > max_distance {
            max_distance = dist;
            v2 = i;
        }
    }

    if max_distance < epsilon {
        return Err(ConvexHullError::DegenerateInput);
    }

    // Find the point furthest from the plane formed by v0, v1, v2
    let Some(normal) = vertices[v1]
        .sub(&vertices[v0])
        .cross(&vertices[v2].sub(&vertices[v0]))
        .try_normalize()
    else {
        return Err(ConvexHullError::DegenerateInput);
    };

    let mut max_distance = 0.0;
    let mut v3 = 0;

    for (i, vertex) in vertices.iter().enumerate() {
        if i == v0 || i == v1 || i == v2 {
            continue;
        }

        let dist = normal.dot(&vertex.sub(&vertices[v0])).abs();
        if dist > max_distance {
            max_distance = dist;
            v3 = i;
        }
    }

    if max_distance < epsilon {
        return Err(ConvexHullError::DegenerateInput);
    }

    Ok([v0, v1, v2, v3])
}

/// Create the initial hull from the simplex
fn create_initial_hull(simplex: &[usize; 4], vertices: &[Point3]) -> Vec<HullFace> {
    let [v0, v1, v2, v3] = *simplex;

    // The base must wind clockwise seen from the apex
    if signed_tetrahedron_volume(&vertices[v0], &vertices[v1], &vertices[v2], &vertices[v3]) > 0.0
    {
        tetrahedron_faces(v0, v2, v1, v3, vertices)
    } else {
        tetrahedron_faces(v0, v1, v2, v3, vertices)
    }
}

/// Outward faces of a tetrahedron whose base (a, b, c) has apex `d` on its negative side
fn tetrahedron_faces(a: usize, b: usize, c: usize, d: usize, vertices: &[Point3]) -> Vec<HullFace> {
    vec![
        HullFace::new(a, b, c, vertices),
        HullFace::new(a, d, b, vertices),
        HullFace::new(b, d, c, vertices),
        HullFace::new(c, d, a, vertices),
    ]
}

/// Find the face with the furthest outside point
fn find_face_with_furthest_point(hull_faces: &[HullFace]) -> Option<(usize, usize)> {
    let mut max_distance = 0.0;
    let mut result = None;

    for (face_idx, face) in hull_faces.iter().enumerate() {
        if face.deleted {
            continue;
        }

        if let Some(point_idx) = face.furthest_point
            && face.furthest_distance > max_distance
        {
            max_distance = face.furthest_distance;
            result = Some((face_idx, point_idx));
        }
    }

    result
}

/// Remove deleted faces from the vector
fn compact_faces(hull_faces: &mut Vec<HullFace>) {
    hull_faces.retain(|f| !f.deleted);
}
