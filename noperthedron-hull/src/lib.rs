//! 3D Convex Hull Library
//!
//! This library implements the Quickhull algorithm for computing convex hulls
//! in 3D space, merges coplanar hull triangles into convex polygons, and
//! assembles the result into a validated closed mesh.
//!
//! # 3D Convex Hull Example
//! ```
//! use noperthedron_hull::{ConvexHull3D, FaceMode, HullMesh, Point3};
//!
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//! ];
//!
//! let hull = ConvexHull3D::build(&points).unwrap();
//! println!("Number of faces: {}", hull.num_faces());
//!
//! let mesh = HullMesh::from_hull(&hull, FaceMode::Polygons).unwrap();
//! assert_eq!(mesh.euler_characteristic(), 2);
//! ```

mod config;
mod geometry;
mod merge;
mod mesh;
mod quickhull;
mod types;

// Make testdata publicly available for tests
pub mod testdata;

pub use config::{FaceMode, HullConfig};
pub use geometry::{polygon_area, polygon_normal};
pub use mesh::HullMesh;
pub use types::{ConvexHull3D, Face, Point3};

/// Error types for convex hull operations
#[derive(Debug, thiserror::Error)]
pub enum ConvexHullError {
    #[error("Not enough vertices to form a hull (minimum 4 required)")]
    InsufficientVertices,

    #[error("Input point {index} has a non-finite coordinate")]
    NonFiniteInput { index: usize },

    #[error("Degenerate input: points are coincident, collinear or coplanar")]
    DegenerateInput,

    #[error("Maximum iterations exceeded")]
    MaxIterationsExceeded,

    #[error("Topology validation failed: {0}")]
    TopologyValidation(String),

    #[error("Invalid hull configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ConvexHullError>;

/// Numerical tolerance for floating-point comparisons
/// Used throughout the library for:
/// - Distance calculations
/// - Determinant checks
/// - Degeneracy detection
pub(crate) const EPSILON: f64 = 1e-10;

/// Scale a base tolerance by the extent of the input.
///
/// Unit-sized inputs keep the base tolerance; larger clouds get a tolerance
/// proportional to their largest absolute coordinate.
pub fn compute_relative_epsilon(points: &[Point3], base: f64) -> f64 {
    let extent = points
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()).max(p.z.abs()))
        .fold(0.0_f64, f64::max);
    base * extent.max(1.0)
}

/// Collapse points closer than `epsilon` to an earlier point.
///
/// Returns the surviving points in input order together with, for every
/// input point, the index of the surviving point it was merged into.
pub fn deduplicate_vertices(points: &[Point3], epsilon: f64) -> (Vec<Point3>, Vec<usize>) {
    let mut unique: Vec<Point3> = Vec::with_capacity(points.len());
    let mut remap = Vec::with_capacity(points.len());

    // Sort indices along x so only a narrow window has to be compared
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| points[a].x.total_cmp(&points[b].x).then(a.cmp(&b)));

    let mut representative = vec![usize::MAX; points.len()];
    for (pos, &i) in order.iter().enumerate() {
        let p = &points[i];
        let mut found = None;
        for &j in order[..pos].iter().rev() {
            if p.x - points[j].x > epsilon {
                break;
            }
            if p.distance(&points[j]) <= epsilon {
                let candidate = representative[j];
                found = Some(found.map_or(candidate, |f: usize| f.min(candidate)));
            }
        }
        representative[i] = found.unwrap_or(i);
    }

    // Number surviving points in input order
    let mut new_index = vec![usize::MAX; points.len()];
    for i in 0..points.len() {
        let rep = representative[i];
        if rep == i {
            new_index[i] = unique.len();
            unique.push(points[i]);
        }
    }
    for i in 0..points.len() {
        remap.push(new_index[representative[i]]);
    }

    let collapsed = points.len() - unique.len();
    if collapsed > 0 {
        log::warn!(
            "Collapsed {} duplicate point(s) within tolerance {:e}",
            collapsed,
            epsilon
        );
    }

    (unique, remap)
}
