//! Point clouds for exercising the hull engine
//!
//! Regular solids with known face structure, clouds with coplanar caps and
//! duplicated points, and randomised spheres.

use crate::types::Point3;
use rand::Rng;
use std::f64::consts::PI;

/// Generate random points on a sphere
pub fn random_sphere_points(n: usize, radius: f64) -> Vec<Point3> {
    let mut rng = rand::rng();
    let mut points = Vec::with_capacity(n);

    for _ in 0..n {
        let azimuth = rng.random::<f64>() * 2.0 * PI;
        let elevation = (rng.random::<f64>() * 2.0 - 1.0).asin();
        let r = radius * (0.9 + 0.2 * rng.random::<f64>()); // Add some radius variation

        points.push(Point3::from_spherical(azimuth, elevation, r));
    }

    points
}

/// Generate uniformly distributed points on a sphere using Fibonacci lattice
pub fn fibonacci_sphere_points(n: usize, radius: f64) -> Vec<Point3> {
    let mut points = Vec::with_capacity(n);
    let golden_ratio = (1.0 + 5.0_f64.sqrt()) / 2.0;

    for i in 0..n {
        let theta = 2.0 * PI * (i as f64) / golden_ratio;
        let phi = ((2 * i + 1) as f64 / n as f64 - 1.0).acos();

        let x = radius * phi.sin() * theta.cos();
        let y = radius * phi.sin() * theta.sin();
        let z = radius * phi.cos();

        points.push(Point3::new(x, y, z));
    }

    points
}

/// Generate a cube's vertices
pub fn cube_vertices(size: f64) -> Vec<Point3> {
    let s = size / 2.0;
    vec![
        Point3::new(-s, -s, -s),
        Point3::new(s, -s, -s),
        Point3::new(s, s, -s),
        Point3::new(-s, s, -s),
        Point3::new(-s, -s, s),
        Point3::new(s, -s, s),
        Point3::new(s, s, s),
        Point3::new(-s, s, s),
    ]
}

/// Cube corners followed by random points strictly inside the cube
pub fn cube_with_interior_points(size: f64, n_interior: usize) -> Vec<Point3> {
    let mut points = cube_vertices(size);
    let mut rng = rand::rng();
    let s = 0.99 * size / 2.0;

    for _ in 0..n_interior {
        let x = (rng.random::<f64>() * 2.0 - 1.0) * s;
        let y = (rng.random::<f64>() * 2.0 - 1.0) * s;
        let z = (rng.random::<f64>() * 2.0 - 1.0) * s;
        points.push(Point3::new(x, y, z));
    }

    points
}

/// Generate a simple tetrahedron
pub fn tetrahedron_vertices() -> Vec<Point3> {
    vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.5, (3.0_f64).sqrt() / 2.0, 0.0),
        Point3::new(0.5, (3.0_f64).sqrt() / 6.0, (2.0 / 3.0_f64).sqrt()),
    ]
}

/// Generate vertices for an icosahedron
pub fn icosahedron_vertices() -> Vec<Point3> {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0; // Golden ratio

    vec![
        Point3::new(-1.0, phi, 0.0),
        Point3::new(1.0, phi, 0.0),
        Point3::new(-1.0, -phi, 0.0),
        Point3::new(1.0, -phi, 0.0),
        Point3::new(0.0, -1.0, phi),
        Point3::new(0.0, 1.0, phi),
        Point3::new(0.0, -1.0, -phi),
        Point3::new(0.0, 1.0, -phi),
        Point3::new(phi, 0.0, -1.0),
        Point3::new(phi, 0.0, 1.0),
        Point3::new(-phi, 0.0, -1.0),
        Point3::new(-phi, 0.0, 1.0),
    ]
}

/// Generate vertices for an octahedron
pub fn octahedron_vertices() -> Vec<Point3> {
    vec![
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(-1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, -1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(0.0, 0.0, -1.0),
    ]
}

/// Antiprism with regular `n`-gon caps at z = +/-`half_height`
///
/// The caps are rotated against each other by half a step, so the hull has
/// two `n`-gon faces and `2n` triangles. Cap vertices come from cos/sin of
/// non-special angles, which exercises coplanarity under rounding.
pub fn antiprism_vertices(n: usize, radius: f64, half_height: f64) -> Vec<Point3> {
    let step = 2.0 * PI / n as f64;
    let top = (0..n).map(|k| {
        let a = step * k as f64;
        Point3::new(radius * a.cos(), radius * a.sin(), half_height)
    });
    let bottom = (0..n).map(|k| {
        let a = step * (k as f64 + 0.5);
        Point3::new(radius * a.cos(), radius * a.sin(), -half_height)
    });
    top.chain(bottom).collect()
}

/// `rings` circles of `per_ring` points stacked evenly between `-half_height`
/// and `half_height`
///
/// All rings share the same angles, so the inner rings lie exactly on the
/// vertical edges of the hull.
pub fn cylinder_rings(rings: usize, per_ring: usize, radius: f64, half_height: f64) -> Vec<Point3> {
    let step = 2.0 * PI / per_ring as f64;
    let dz = if rings > 1 {
        2.0 * half_height / (rings - 1) as f64
    } else {
        0.0
    };
    (0..rings)
        .flat_map(|j| {
            let z = -half_height + dz * j as f64;
            (0..per_ring).map(move |k| {
                let a = step * k as f64;
                Point3::new(radius * a.cos(), radius * a.sin(), z)
            })
        })
        .collect()
}

/// Every point repeated `copies` times, the copies perturbed by up to `jitter`
pub fn with_duplicates(points: &[Point3], copies: usize, jitter: f64) -> Vec<Point3> {
    let mut rng = rand::rng();
    let mut out = Vec::with_capacity(points.len() * (copies + 1));
    out.extend_from_slice(points);
    for _ in 0..copies {
        for p in points {
            out.push(Point3::new(
                p.x + jitter * (rng.random::<f64>() - 0.5),
                p.y + jitter * (rng.random::<f64>() - 0.5),
                p.z + jitter * (rng.random::<f64>() - 0.5),
            ));
        }
    }
    out
}
