//! Vertex generation by group action on the seed points

use crate::error::{NoperthedronError, Result};
use crate::group::TransformGroup;
use crate::seeds::SeedSet;
use noperthedron_hull::Point3;

/// Generated candidate vertices, seed-major
///
/// Point `s * group.len() + g` is group element `g` applied to seed `s`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    points: Vec<Point3>,
    group_size: usize,
}

impl PointCloud {
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points generated from one seed
    pub fn orbit(&self, seed: usize) -> &[Point3] {
        let start = (seed * self.group_size).min(self.points.len());
        let end = (start + self.group_size).min(self.points.len());
        &self.points[start..end]
    }

    pub fn into_points(self) -> Vec<Point3> {
        self.points
    }
}

/// Apply every group element to every seed
pub fn generate_vertices(seeds: &SeedSet, group: &TransformGroup) -> Result<PointCloud> {
    let mut points = Vec::with_capacity(seeds.points().len() * group.len());

    for seed in seeds.iter() {
        for element in group {
            let p = element.apply(seed);
            if !p.is_finite() {
                return Err(NoperthedronError::NumericInstability {
                    what: "vertex",
                    index: points.len(),
                });
            }
            points.push(p);
        }
    }

    log::debug!(
        "Generated {} candidate vertices from {} seeds",
        points.len(),
        seeds.points().len()
    );

    Ok(PointCloud {
        points,
        group_size: group.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds::{C_1, C_2, C_3};

    fn noperthedron_cloud() -> PointCloud {
        let group = TransformGroup::noperthedron().unwrap();
        generate_vertices(&SeedSet::NOPERTHEDRON, &group).unwrap()
    }

    #[test]
    fn test_ninety_points_seed_major() {
        let cloud = noperthedron_cloud();
        assert_eq!(cloud.len(), 90);
        assert_eq!(cloud.orbit(0)[0], C_1);
        assert_eq!(cloud.orbit(1)[0], C_2);
        assert_eq!(cloud.orbit(2)[0], C_3);
        assert_eq!(cloud.orbit(2)[1], C_3.scale(-1.0));
        assert!(cloud.orbit(3).is_empty());
    }

    #[test]
    fn test_bit_for_bit_reproducible() {
        let a = noperthedron_cloud();
        let b = noperthedron_cloud();
        for (p, q) in a.points().iter().zip(b.points()) {
            assert_eq!(p.x.to_bits(), q.x.to_bits());
            assert_eq!(p.y.to_bits(), q.y.to_bits());
            assert_eq!(p.z.to_bits(), q.z.to_bits());
        }
    }

    #[test]
    fn test_zero_coordinate_seed_has_thirty_distinct_images() {
        let cloud = noperthedron_cloud();
        let orbit = cloud.orbit(0);
        for i in 0..orbit.len() {
            for j in (i + 1)..orbit.len() {
                assert!(
                    orbit[i].distance(&orbit[j]) > 0.1,
                    "points {i} and {j} of the C_1 orbit collapse"
                );
            }
        }
    }

    #[test]
    fn test_partner_points_are_negated() {
        let cloud = noperthedron_cloud();
        for pair in cloud.points().chunks(2) {
            assert_eq!(pair[1], pair[0].scale(-1.0));
        }
    }

    #[test]
    fn test_orbits_keep_norm_and_height() {
        let cloud = noperthedron_cloud();
        for (s, seed) in SeedSet::NOPERTHEDRON.iter().enumerate() {
            for p in cloud.orbit(s) {
                assert!((p.magnitude() - seed.magnitude()).abs() < 1e-15);
                assert_eq!(p.z.abs(), seed.z.abs());
            }
        }
    }

    #[test]
    fn test_non_finite_seed_is_reported() {
        let seeds = SeedSet::new([C_1, Point3::new(f64::NAN, 0.0, 0.0), C_3]);
        let group = TransformGroup::noperthedron().unwrap();
        let err = generate_vertices(&seeds, &group).unwrap_err();
        assert!(matches!(
            err,
            NoperthedronError::NumericInstability {
                what: "vertex",
                index: 30
            }
        ));
    }
}
