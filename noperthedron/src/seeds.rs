//! Orbit representatives of the Noperthedron
//!
//! The three points are treated as opaque inputs. `C_1` is given as exact
//! integer ratios and `C_2`, `C_3` as ten-digit decimals; each literal is
//! reproduced by a single correctly rounded f64 operation, so the constants
//! carry about 1e-16 relative error. The hull tolerances (1e-10 visibility,
//! 1e-9 face merging) sit far above this and far below the smallest real
//! feature of the solid (closest vertices ~0.24 apart, smallest vertex to
//! non-incident face distance ~0.018).

use noperthedron_hull::Point3;

/// `C_1 = (152024884 / 259375205, 0, 210152163 / 259375205)`, a unit vector
pub const C_1: Point3 = Point3::new(
    152024884.0 / 259375205.0,
    0.0,
    210152163.0 / 259375205.0,
);

/// `C_2`
pub const C_2: Point3 = Point3::new(6632738028e-10, 6106948881e-10, 3980949609e-10);

/// `C_3`
pub const C_3: Point3 = Point3::new(8193990033e-10, 5298215096e-10, 1230614493e-10);

/// Exactly three seed points, orbited by the transformation group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedSet {
    points: [Point3; 3],
}

impl SeedSet {
    pub const NOPERTHEDRON: SeedSet = SeedSet::new([C_1, C_2, C_3]);

    pub const fn new(points: [Point3; 3]) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point3; 3] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3> {
        self.points.iter()
    }
}

impl Default for SeedSet {
    fn default() -> Self {
        Self::NOPERTHEDRON
    }
}
