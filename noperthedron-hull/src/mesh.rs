//! Closed polygon mesh assembled from a convex hull
//!
//! [`HullMesh`] is the externally consumed form of a hull: only vertices on the
//! hull boundary, renumbered densely, and faces as vertex-index loops wound
//! counter-clockwise seen from outside.

use crate::config::{FaceMode, HullConfig};
use crate::geometry::{newell_normal, polygon_area};
use crate::merge::merge_coplanar_faces;
use crate::types::{ConvexHull3D, Point3};
use crate::{ConvexHullError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A validated closed mesh: vertex coordinates plus face index loops
///
/// Deserialization runs [`HullMesh::validate`] with the default coplanar
/// tolerance scaled by the extent of the vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHullMesh")]
pub struct HullMesh {
    vertices: Vec<Point3>,
    faces: Vec<Vec<usize>>,
}

/// Unchecked serialized form of [`HullMesh`]
#[derive(Deserialize)]
struct RawHullMesh {
    vertices: Vec<Point3>,
    faces: Vec<Vec<usize>>,
}

impl TryFrom<RawHullMesh> for HullMesh {
    type Error = ConvexHullError;

    fn try_from(raw: RawHullMesh) -> Result<Self> {
        let tolerance = HullConfig::default().coplanar_tolerance * extent(&raw.vertices).max(1.0);
        Self::from_parts(raw.vertices, raw.faces, tolerance)
    }
}

impl HullMesh {
    /// Assemble and validate the mesh of a hull
    ///
    /// Interior and unreferenced points are dropped; the survivors keep their
    /// relative order from the hull's vertex list.
    pub fn from_hull(hull: &ConvexHull3D, mode: FaceMode) -> Result<Self> {
        let tolerance = hull.config().coplanar_tolerance * extent(hull.vertices()).max(1.0);

        let loops: Vec<Vec<usize>> = match mode {
            FaceMode::Triangles => hull.faces().iter().map(|f| f.indices().to_vec()).collect(),
            FaceMode::Polygons => merge_coplanar_faces(hull.faces(), hull.vertices(), tolerance)?,
        };

        // Points inside a merged polygon or on one of its edges are no longer corners
        let mut used = vec![false; hull.num_vertices()];
        for face in &loops {
            for &i in face {
                used[i] = true;
            }
        }
        let kept: Vec<usize> = (0..hull.num_vertices()).filter(|&i| used[i]).collect();
        let mut new_index = vec![usize::MAX; hull.num_vertices()];
        for (new, &old) in kept.iter().enumerate() {
            new_index[old] = new;
        }

        let vertices: Vec<Point3> = kept.iter().map(|&i| hull.vertices()[i]).collect();
        let faces: Vec<Vec<usize>> = loops
            .into_iter()
            .map(|face| face.into_iter().map(|i| new_index[i]).collect())
            .collect();

        let mesh = Self { vertices, faces };
        mesh.validate(tolerance)?;

        log::info!(
            "Hull mesh assembled: {} vertices, {} edges, {} faces ({} input points)",
            mesh.vertex_count(),
            mesh.edge_count(),
            mesh.face_count(),
            hull.input_remap().len()
        );

        Ok(mesh)
    }

    /// Build from raw parts; the result is validated with `tolerance`
    pub fn from_parts(vertices: Vec<Point3>, faces: Vec<Vec<usize>>, tolerance: f64) -> Result<Self> {
        let mesh = Self { vertices, faces };
        mesh.validate(tolerance)?;
        Ok(mesh)
    }

    /// Vertex coordinates
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Face index loops
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Split into (vertices, faces)
    pub fn into_parts(self) -> (Vec<Point3>, Vec<Vec<usize>>) {
        (self.vertices, self.faces)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Undirected edges as (low, high) pairs, sorted
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = self
            .directed_edges()
            .map(|(a, b)| (a.min(b), a.max(b)))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        edges.sort_unstable();
        edges
    }

    pub fn edge_count(&self) -> usize {
        self.directed_edges().count() / 2
    }

    /// V - E + F; 2 for any closed genus-0 surface
    pub fn euler_characteristic(&self) -> i64 {
        self.vertex_count() as i64 - self.edge_count() as i64 + self.face_count() as i64
    }

    /// Histogram of face sizes: number of corners -> number of faces
    pub fn face_size_histogram(&self) -> Vec<(usize, usize)> {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for face in &self.faces {
            *counts.entry(face.len()).or_default() += 1;
        }
        let mut histogram: Vec<(usize, usize)> = counts.into_iter().collect();
        histogram.sort_unstable();
        histogram
    }

    /// Outward unit normal of a face
    pub fn face_normal(&self, face: usize) -> Point3 {
        newell_normal(&self.faces[face], &self.vertices).normalize()
    }

    /// Mean of the vertex positions; interior for a convex mesh
    pub fn centroid(&self) -> Point3 {
        Point3::mean(&self.vertices)
    }

    /// Fan triangulation of every face, keeping the winding
    pub fn triangulate(&self) -> Vec<[usize; 3]> {
        self.faces
            .iter()
            .flat_map(|face| {
                (1..face.len().saturating_sub(1)).map(move |i| [face[0], face[i], face[i + 1]])
            })
            .collect()
    }

    /// Enclosed volume
    pub fn volume(&self) -> f64 {
        self.triangulate()
            .iter()
            .map(|&[a, b, c]| {
                let (p, q, r) = (&self.vertices[a], &self.vertices[b], &self.vertices[c]);
                p.dot(&q.cross(r)) / 6.0
            })
            .sum()
    }

    pub fn surface_area(&self) -> f64 {
        self.faces
            .iter()
            .map(|face| polygon_area(face, &self.vertices))
            .sum()
    }

    /// Largest distance by which any of `points` lies outside a face plane
    ///
    /// Zero or negative when every point is on or inside the mesh.
    pub fn max_outside_distance(&self, points: &[Point3]) -> f64 {
        let planes: Vec<(Point3, f64)> = (0..self.faces.len())
            .map(|i| {
                let n = self.face_normal(i);
                (n, n.dot(&self.vertices[self.faces[i][0]]))
            })
            .collect();

        points
            .iter()
            .flat_map(|p| planes.iter().map(move |(n, d)| n.dot(p) - d))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Point lies inside or within `tolerance` of the boundary
    pub fn contains(&self, point: &Point3, tolerance: f64) -> bool {
        self.max_outside_distance(std::slice::from_ref(point)) <= tolerance
    }

    fn directed_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.faces.iter().flat_map(|face| {
            (0..face.len()).map(move |i| (face[i], face[(i + 1) % face.len()]))
        })
    }

    /// Check that the mesh is a closed, outward-oriented convex polyhedron
    ///
    /// Checks: face arity and index range, non-zero face area, face planarity,
    /// every directed edge paired with exactly one reverse edge, no unused
    /// vertices, Euler characteristic 2, outward normals, and no vertex
    /// outside any face plane.
    pub fn validate(&self, tolerance: f64) -> Result<()> {
        let fail = |msg: String| Err(ConvexHullError::TopologyValidation(msg));

        if self.faces.is_empty() {
            return fail("mesh has no faces".to_string());
        }

        for (i, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return fail(format!("face {} has only {} indices", i, face.len()));
            }
            if let Some(&bad) = face.iter().find(|&&v| v >= self.vertices.len()) {
                return fail(format!(
                    "face {} references vertex {} of {}",
                    i,
                    bad,
                    self.vertices.len()
                ));
            }
            let distinct: HashSet<usize> = face.iter().copied().collect();
            if distinct.len() != face.len() {
                return fail(format!("face {} repeats a vertex", i));
            }
            // A face thinner than the tolerance counts as zero-area
            let area = polygon_area(face, &self.vertices);
            let longest_edge = (0..face.len())
                .map(|k| self.vertices[face[k]].distance(&self.vertices[face[(k + 1) % face.len()]]))
                .fold(0.0, f64::max);
            if 2.0 * area <= tolerance * longest_edge {
                return fail(format!("face {} has zero area ({:e})", i, area));
            }
            let normal = self.face_normal(i);
            let offset = normal.dot(&self.vertices[face[0]]);
            if let Some(&off) = face
                .iter()
                .find(|&&v| (normal.dot(&self.vertices[v]) - offset).abs() > tolerance)
            {
                return fail(format!("face {} is not planar at vertex {}", i, off));
            }
        }

        let mut directed: HashMap<(usize, usize), usize> = HashMap::new();
        for edge in self.directed_edges() {
            *directed.entry(edge).or_default() += 1;
        }
        for (&(a, b), &count) in &directed {
            if count != 1 {
                return fail(format!("edge ({}, {}) is used {} times in one direction", a, b, count));
            }
            if directed.get(&(b, a)) != Some(&1) {
                return fail(format!("edge ({}, {}) has no opposite edge", a, b));
            }
        }

        let mut used = vec![false; self.vertices.len()];
        for face in &self.faces {
            for &v in face {
                used[v] = true;
            }
        }
        if let Some(unused) = used.iter().position(|&u| !u) {
            return fail(format!("vertex {} is not on any face", unused));
        }

        let chi = self.euler_characteristic();
        if chi != 2 {
            return fail(format!(
                "Euler characteristic is {} (V={}, E={}, F={})",
                chi,
                self.vertex_count(),
                self.edge_count(),
                self.face_count()
            ));
        }

        let centre = self.centroid();
        for (i, face) in self.faces.iter().enumerate() {
            let normal = self.face_normal(i);
            let offset = normal.dot(&self.vertices[face[0]]);
            if normal.dot(&centre) - offset >= -tolerance {
                return fail(format!("face {} is not oriented outward", i));
            }
            if let Some(v) = self
                .vertices
                .iter()
                .position(|p| normal.dot(p) - offset > tolerance)
            {
                return fail(format!("vertex {} lies outside the plane of face {}", v, i));
            }
        }

        Ok(())
    }
}

/// Largest absolute coordinate
fn extent(points: &[Point3]) -> f64 {
    points
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()).max(p.z.abs()))
        .fold(0.0, f64::max)
}
