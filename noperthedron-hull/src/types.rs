//! Core data types for 3D convex hull computation

use crate::config::HullConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 3D point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    /// Create a new point
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Create a point from spherical coordinates (azimuth, elevation in radians, radius)
    pub fn from_spherical(azimuth: f64, elevation: f64, radius: f64) -> Self {
        let x = radius * elevation.cos() * azimuth.cos();
        let y = radius * elevation.cos() * azimuth.sin();
        let z = radius * elevation.sin();
        Self { x, y, z }
    }

    /// Coordinates as an array
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Dot product with another point
    pub fn dot(&self, other: &Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another point
    pub fn cross(&self, other: &Point3) -> Point3 {
        Point3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Subtract another point
    pub fn sub(&self, other: &Point3) -> Point3 {
        Point3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    /// Add another point
    pub fn add(&self, other: &Point3) -> Point3 {
        Point3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    /// Scale by a scalar
    pub fn scale(&self, s: f64) -> Point3 {
        Point3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Compute the magnitude/length
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Normalize to unit length, or `None` for a (near) zero vector
    pub fn try_normalize(&self) -> Option<Point3> {
        let mag = self.magnitude();
        if mag > 1e-300 && mag.is_finite() {
            Some(self.scale(1.0 / mag))
        } else {
            None
        }
    }

    /// Normalize to unit length
    pub fn normalize(&self) -> Point3 {
        self.try_normalize().unwrap_or(*self)
    }

    /// Distance to another point
    pub fn distance(&self, other: &Point3) -> f64 {
        self.sub(other).magnitude()
    }

    /// Epsilon-tolerant equality (Euclidean distance)
    pub fn approx_eq(&self, other: &Point3, epsilon: f64) -> bool {
        self.distance(other) <= epsilon
    }

    /// All coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Arithmetic mean of a set of points (origin for an empty set)
    pub fn mean<'a, I>(points: I) -> Point3
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        let mut sum = Point3::zero();
        let mut n = 0usize;
        for p in points {
            sum = sum.add(p);
            n += 1;
        }
        if n == 0 { sum } else { sum.scale(1.0 / n as f64) }
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(p: [f64; 3]) -> Self {
        Point3::new(p[0], p[1], p[2])
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6})", self.x, self.y, self.z)
    }
}

/// A face of the convex hull (triangle defined by 3 vertex indices)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
}

impl Face {
    /// Create a new face from three vertex indices
    pub fn new(v0: usize, v1: usize, v2: usize) -> Self {
        Self { v0, v1, v2 }
    }

    /// Get vertex indices as an array
    pub fn indices(&self) -> [usize; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Directed edges in winding order
    pub fn edges(&self) -> [(usize, usize); 3] {
        [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
    }

    /// Compute the normal vector of this face
    pub fn normal(&self, vertices: &[Point3]) -> Point3 {
        let v0 = &vertices[self.v0];
        let v1 = &vertices[self.v1];
        let v2 = &vertices[self.v2];

        let e1 = v1.sub(v0);
        let e2 = v2.sub(v0);
        e1.cross(&e2).normalize()
    }

    /// Compute the centroid of this face
    pub fn centroid(&self, vertices: &[Point3]) -> Point3 {
        let v0 = &vertices[self.v0];
        let v1 = &vertices[self.v1];
        let v2 = &vertices[self.v2];

        Point3 {
            x: (v0.x + v1.x + v2.x) / 3.0,
            y: (v0.y + v1.y + v2.y) / 3.0,
            z: (v0.z + v1.z + v2.z) / 3.0,
        }
    }
}

/// The result of a convex hull computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvexHull3D {
    /// Deduplicated input points (interior points included)
    vertices: Vec<Point3>,
    /// Faces of the convex hull (each face is a triangle)
    faces: Vec<Face>,
    /// For every original input point, its index in `vertices`
    input_remap: Vec<usize>,
    /// Tolerances the hull was built with
    config: HullConfig,
    /// Scale-aware distance tolerance used during construction
    epsilon: f64,
}

impl ConvexHull3D {
    /// Create a new convex hull from vertices and faces
    pub(crate) fn new(
        vertices: Vec<Point3>,
        faces: Vec<Face>,
        input_remap: Vec<usize>,
        config: HullConfig,
        epsilon: f64,
    ) -> Self {
        Self {
            vertices,
            faces,
            input_remap,
            config,
            epsilon,
        }
    }

    /// Build a convex hull from points using the Quickhull algorithm
    pub fn build(points: &[Point3]) -> crate::Result<Self> {
        Self::build_with_config(points, &HullConfig::default())
    }

    /// Build a convex hull with explicit tolerances
    pub fn build_with_config(points: &[Point3], config: &HullConfig) -> crate::Result<Self> {
        config.validate()?;
        crate::quickhull::quickhull_3d(points, config)
    }

    /// Get the vertices
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Get the faces
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Index into `vertices` for every original input point
    pub fn input_remap(&self) -> &[usize] {
        &self.input_remap
    }

    /// Configuration used to build this hull
    pub fn config(&self) -> &HullConfig {
        &self.config
    }

    /// Distance tolerance used to build this hull
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Get the number of faces
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of vertices
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Indices of the vertices referenced by at least one face, ascending
    pub fn hull_vertex_indices(&self) -> Vec<usize> {
        let mut used = vec![false; self.vertices.len()];
        for face in &self.faces {
            for i in face.indices() {
                used[i] = true;
            }
        }
        (0..self.vertices.len()).filter(|&i| used[i]).collect()
    }

    /// Compute the volume of the convex hull
    pub fn volume(&self) -> f64 {
        let mut volume = 0.0;

        for face in &self.faces {
            let v0 = &self.vertices[face.v0];
            let v1 = &self.vertices[face.v1];
            let v2 = &self.vertices[face.v2];

            // Volume of tetrahedron formed by origin and face
            let tetrahedron_volume = v0.dot(&v1.cross(v2)) / 6.0;
            volume += tetrahedron_volume;
        }

        volume.abs()
    }

    /// Compute the surface area of the convex hull
    pub fn surface_area(&self) -> f64 {
        let mut area = 0.0;

        for face in &self.faces {
            let v0 = &self.vertices[face.v0];
            let v1 = &self.vertices[face.v1];
            let v2 = &self.vertices[face.v2];

            let e1 = v1.sub(v0);
            let e2 = v2.sub(v0);
            let cross = e1.cross(&e2);
            area += cross.magnitude() / 2.0;
        }

        area
    }
}
