//! Geometric utility functions

use crate::types::Point3;

/// Signed volume; positive when `p3` lies on the side `(p1 - p0) x (p2 - p0)` points to
pub(crate) fn signed_tetrahedron_volume(p0: &Point3, p1: &Point3, p2: &Point3, p3: &Point3) -> f64 {
    let v1 = p1.sub(p0);
    let v2 = p2.sub(p0);
    let v3 = p3.sub(p0);

    v1.cross(&v2).dot(&v3) / 6.0
}

/// Distance from `p` to the infinite line through `a` and `b`
pub(crate) fn distance_to_line(p: &Point3, a: &Point3, b: &Point3) -> f64 {
    let direction = b.sub(a);
    let length = direction.magnitude();
    if length == 0.0 {
        return p.distance(a);
    }
    direction.cross(&p.sub(a)).magnitude() / length
}

/// Newell normal of a polygon, unnormalized (length = twice the area)
pub(crate) fn newell_normal(polygon: &[usize], vertices: &[Point3]) -> Point3 {
    let mut n = Point3::zero();
    for (i, &a) in polygon.iter().enumerate() {
        let p = &vertices[a];
        let q = &vertices[polygon[(i + 1) % polygon.len()]];
        n.x += (p.y - q.y) * (p.z + q.z);
        n.y += (p.z - q.z) * (p.x + q.x);
        n.z += (p.x - q.x) * (p.y + q.y);
    }
    n
}

/// Unit normal of a planar polygon following the right-hand rule
pub fn polygon_normal(polygon: &[usize], vertices: &[Point3]) -> Point3 {
    newell_normal(polygon, vertices).normalize()
}

/// Area of a planar polygon
pub fn polygon_area(polygon: &[usize], vertices: &[Point3]) -> f64 {
    newell_normal(polygon, vertices).magnitude() / 2.0
}

/// Find the extreme points (min/max in each dimension)
pub fn find_extreme_points(vertices: &[Point3]) -> [usize; 6] {
    let mut min_x_idx = 0;
    let mut max_x_idx = 0;
    let mut min_y_idx = 0;
    let mut max_y_idx = 0;
    let mut min_z_idx = 0;
    let mut max_z_idx = 0;

    for (i, v) in vertices.iter().enumerate() {
        if v.x < vertices[min_x_idx].x {
            min_x_idx = i;
        }
        if v.x > vertices[max_x_idx].x {
            max_x_idx = i;
        }
        if v.y < vertices[min_y_idx].y {
            min_y_idx = i;
        }
        if v.y > vertices[max_y_idx].y {
            max_y_idx = i;
        }
        if v.z < vertices[min_z_idx].z {
            min_z_idx = i;
        }
        if v.z > vertices[max_z_idx].z {
            max_z_idx = i;
        }
    }

    [
        min_x_idx, max_x_idx, min_y_idx, max_y_idx, min_z_idx, max_z_idx,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_tetrahedron_volume() {
        let p0 = Point3::new(0.0, 0.0, 0.0);
        let p1 = Point3::new(1.0, 0.0, 0.0);
        let p2 = Point3::new(0.0, 1.0, 0.0);
        let p3 = Point3::new(0.0, 0.0, 1.0);

        let vol = signed_tetrahedron_volume(&p0, &p1, &p2, &p3);
        assert!((vol - 1.0 / 6.0).abs() < 1e-10);
        assert!(signed_tetrahedron_volume(&p0, &p2, &p1, &p3) < 0.0);
    }

    #[test]
    fn test_distance_to_line() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 0.0, 0.0);
        assert_eq!(distance_to_line(&Point3::new(1.0, 0.0, 0.0), &a, &b), 0.0);
        assert!((distance_to_line(&Point3::new(5.0, 3.0, 4.0), &a, &b) - 5.0).abs() < 1e-12);
        assert_eq!(distance_to_line(&Point3::new(0.0, 3.0, 4.0), &a, &a), 5.0);
    }

    #[test]
    fn test_polygon_area_and_normal() {
        let square = vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(2.0, 0.0, 1.0),
            Point3::new(2.0, 2.0, 1.0),
            Point3::new(0.0, 2.0, 1.0),
        ];
        let polygon = [0, 1, 2, 3];
        assert!((polygon_area(&polygon, &square) - 4.0).abs() < 1e-12);
        let n = polygon_normal(&polygon, &square);
        assert!(n.approx_eq(&Point3::new(0.0, 0.0, 1.0), 1e-12));

        let reversed = [3, 2, 1, 0];
        let n = polygon_normal(&reversed, &square);
        assert!(n.approx_eq(&Point3::new(0.0, 0.0, -1.0), 1e-12));
    }

    #[test]
    fn test_extreme_points() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(-3.0, 1.0, 0.0),
            Point3::new(2.0, -1.0, 5.0),
        ];
        assert_eq!(find_extreme_points(&points), [1, 2, 2, 1, 0, 2]);
    }
}
